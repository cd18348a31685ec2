use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Month, PredictionEntry};
use crate::risk::compute_risk;
use crate::store::RecordStore;

/// A recorded prediction together with the advice shown next to it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Prediction {
    #[serde(flatten)]
    pub(crate) entry: PredictionEntry,
    pub(crate) suggestions: Vec<String>,
}

impl Prediction {
    pub(crate) fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute the risk for `month`, append it to the prediction history and
/// return it with its suggestions.
///
/// Months with neither income nor expenses are refused with [`Error::NoData`]
/// and nothing is recorded.
pub(crate) fn run_prediction<S: RecordStore + ?Sized>(
    store: &mut S,
    month: Month,
) -> Result<Prediction> {
    let snapshot = store.snapshot()?;

    let has_data = snapshot.income.iter().any(|i| i.month == month)
        || snapshot.expenses.iter().any(|e| e.month == month);
    if !has_data {
        return Err(Error::NoData(month.to_string()));
    }

    let assessment = compute_risk(month, &snapshot.income, &snapshot.expenses);
    let suggestions = assessment.suggestions(&snapshot.expenses);
    let entry = PredictionEntry::record(&assessment);
    store.append_prediction(&entry)?;

    info!(
        id = %entry.id,
        %month,
        risk = %entry.risk_level,
        savings_ratio = %entry.savings_ratio,
        "Recorded prediction"
    );

    Ok(Prediction { entry, suggestions })
}

#[cfg(test)]
#[path = "predict_tests.rs"]
mod tests;
