use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::validate_amount;
use super::Month;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct IncomeEntry {
    pub(crate) id: String,
    pub(crate) month: Month,
    pub(crate) amount: Decimal,
}

impl IncomeEntry {
    /// Create a new entry with a fresh identifier. Non-positive amounts are rejected.
    pub(crate) fn new(month: Month, amount: Decimal) -> Result<Self> {
        Ok(Self {
            id: super::new_id(),
            month,
            amount: validate_amount(amount)?,
        })
    }

    /// Replacement record for a whole-record update of an existing entry.
    pub(crate) fn replacing(id: &str, month: Month, amount: Decimal) -> Result<Self> {
        Ok(Self {
            id: id.to_string(),
            month,
            amount: validate_amount(amount)?,
        })
    }
}
