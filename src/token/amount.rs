use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::core::error::WalletError;

/// Raw base units scaled into a human-readable decimal string.
///
/// With no known decimals the amount is treated as already being the display
/// unit, so the raw integer string comes back unchanged.
pub fn amount_to_ui_amount(amount: u64, decimals: Option<u8>) -> String {
    match ui_amount_decimal(amount, decimals) {
        Some(value) => value.normalize().to_string(),
        None => amount.to_string(),
    }
}

/// Raw base units as a `Decimal` display amount, for valuation math.
pub fn ui_amount_decimal(amount: u64, decimals: Option<u8>) -> Option<Decimal> {
    match decimals {
        None | Some(0) => Some(Decimal::from(amount)),
        Some(d) => Decimal::try_from_i128_with_scale(i128::from(amount), u32::from(d)).ok(),
    }
}

/// User-entered decimal text scaled into raw base units, flooring any excess
/// precision. Malformed or negative input is `InvalidAmount`; callers gate
/// submission on a present result instead of reusing a stale value.
pub fn ui_amount_to_amount(ui_amount: &str, decimals: Option<u8>) -> Result<u64, WalletError> {
    let text = ui_amount.trim();
    let parsed =
        Decimal::from_str(text).map_err(|_| WalletError::invalid_amount(ui_amount))?;
    if parsed.is_sign_negative() {
        return Err(WalletError::invalid_amount(ui_amount));
    }

    let scale = u32::from(decimals.unwrap_or(0));
    let multiplier = 10u64
        .checked_pow(scale)
        .ok_or_else(|| WalletError::invalid_amount(ui_amount))?;
    let scaled = parsed
        .checked_mul(Decimal::from(multiplier))
        .ok_or_else(|| WalletError::invalid_amount(ui_amount))?;

    scaled
        .floor()
        .to_u64()
        .ok_or_else(|| WalletError::invalid_amount(ui_amount))
}
