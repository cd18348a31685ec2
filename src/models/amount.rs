use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Smallest accepted amount, one cent (0.01).
pub(crate) const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest accepted amount (1e15). Month totals and ratios built from
/// amounts in `MIN_AMOUNT..=MAX_AMOUNT` stay far inside `Decimal` range.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Reject amounts outside `MIN_AMOUNT..=MAX_AMOUNT` before they reach the store.
pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal> {
    if amount < MIN_AMOUNT || amount > MAX_AMOUNT {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

/// Parse user-entered money text such as `1500`, `1,500.00` or `$42.99`.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.trim().replace(['$', ','], "");
    let amount =
        Decimal::from_str(cleaned.trim()).map_err(|_| Error::InvalidAmount(s.trim().to_string()))?;
    validate_amount(amount)
}
