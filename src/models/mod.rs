mod amount;
mod expense;
mod income;
mod month;
mod prediction;

pub(crate) use amount::{parse_amount, validate_amount, MAX_AMOUNT, MIN_AMOUNT};
pub(crate) use expense::{ExpenseCategory, ExpenseEntry, ExpenseType};
pub(crate) use income::IncomeEntry;
pub(crate) use month::Month;
pub(crate) use prediction::{PredictionEntry, RiskLevel};

/// Fresh opaque record identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
