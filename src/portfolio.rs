use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;

use crate::core::constants::PINNED_STABLECOIN_MINTS;
use crate::price::PriceMap;
use crate::token::account::TokenAccount;
use crate::token::amount::ui_amount_decimal;
use crate::token::registry::TokenDirectory;

/// A token account with its USD quote and value attached. Derived on every
/// aggregation pass, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuedTokenAccount {
    pub account: TokenAccount,
    pub usd_price: Decimal,
    pub usd_value: Decimal,
}

/// Value-sorted partition of a wallet's token accounts.
#[derive(Clone, Debug, Default)]
pub struct Portfolio {
    /// Non-zero balances, sorted by descending USD value (stable for ties).
    pub active: Vec<ValuedTokenAccount>,
    /// Zero-balance accounts, in input order.
    pub empty: Vec<TokenAccount>,
}

/// Combine decoded token accounts with the token directory and the quote map
/// into a sorted, valued, partitioned view.
///
/// Pure: callers re-invoke this on every refresh of any input; a full
/// recompute is cheap at wallet scale and there is no incremental path.
/// The partition tests the raw `u64` amount, never a formatted string.
pub fn build_portfolio(
    accounts: &[TokenAccount],
    directory: Option<&TokenDirectory>,
    quotes: Option<&PriceMap>,
) -> Portfolio {
    let mut active = Vec::new();
    let mut empty = Vec::new();

    for account in accounts {
        if account.amount == 0 {
            empty.push(account.clone());
            continue;
        }

        let decimals = directory.and_then(|d| d.decimals(&account.mint));
        let usd_price = price_for(&account.mint, quotes);
        let ui_amount =
            ui_amount_decimal(account.amount, decimals).unwrap_or_else(|| account.amount.into());
        let usd_value = ui_amount
            .checked_mul(usd_price)
            .unwrap_or(Decimal::ZERO);

        active.push(ValuedTokenAccount {
            account: account.clone(),
            usd_price,
            usd_value,
        });
    }

    // Stable sort keeps input order for equal values.
    active.sort_by(|a, b| b.usd_value.cmp(&a.usd_value));

    Portfolio { active, empty }
}

/// USD quote for a mint. The two well-known stablecoins pin to 1.00 when the
/// quote service omits them; everything else unquoted values at zero.
fn price_for(mint: &Pubkey, quotes: Option<&PriceMap>) -> Decimal {
    if let Some(price) = quotes.and_then(|q| q.get(mint)) {
        return price;
    }
    if PINNED_STABLECOIN_MINTS.contains(mint) {
        return Decimal::ONE;
    }
    Decimal::ZERO
}
