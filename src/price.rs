use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;

use crate::core::error::WalletError;

/// Mint → USD quote map, replaced wholesale on refresh and never partially
/// mutated. Missing entries are expected; the aggregator treats them as
/// unpriced (except for the pinned stablecoins, see `portfolio`).
#[derive(Clone, Debug, Default)]
pub struct PriceMap {
    quotes: HashMap<Pubkey, Decimal>,
}

impl PriceMap {
    pub fn from_quotes(quotes: impl IntoIterator<Item = (Pubkey, Decimal)>) -> Self {
        Self {
            quotes: quotes.into_iter().collect(),
        }
    }

    pub fn get(&self, mint: &Pubkey) -> Option<Decimal> {
        self.quotes.get(mint).copied()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuote {
    #[serde(default)]
    usd: Option<Decimal>,
}

/// Best-effort USD quotes for the given mints from a CoinGecko-style
/// `simple/token_price` endpoint. Mints the service does not know are simply
/// absent from the result.
pub async fn fetch_quotes(endpoint: &str, mints: &[Pubkey]) -> Result<PriceMap, WalletError> {
    if mints.is_empty() {
        return Ok(PriceMap::default());
    }

    let addresses = mints
        .iter()
        .map(Pubkey::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let url = format!("{endpoint}?vs_currencies=usd&contract_addresses={addresses}");

    let response: HashMap<String, TokenQuote> = reqwest::get(&url)
        .await
        .map_err(|err| WalletError::transport(err.to_string()))?
        .json()
        .await
        .map_err(|err| WalletError::transport(err.to_string()))?;

    let quotes = response
        .into_iter()
        .filter_map(|(mint, quote)| {
            let mint = Pubkey::from_str(&mint).ok()?;
            Some((mint, quote.usd?))
        })
        .collect::<HashMap<_, _>>();
    tracing::debug!("fetched {} usd quotes for {} mints", quotes.len(), mints.len());

    Ok(PriceMap { quotes })
}
