use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Month;
use crate::error::{Error, Result};
use crate::risk::RiskAssessment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(Error::UnknownRiskLevel(s.trim().to_string())),
        }
    }

    /// Badge text, e.g. "Medium Risk".
    pub(crate) fn label(&self) -> String {
        format!("{} Risk", self.as_str())
    }

    /// Hex color used when plotting risk in charts.
    pub(crate) fn chart_color(&self) -> &'static str {
        match self {
            Self::Low => "#059669",
            Self::Medium => "#d97706",
            Self::High => "#dc2626",
        }
    }

    /// Ordinal used for the risk history chart (Low = 1 .. High = 3).
    pub(crate) fn score(&self) -> u64 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted risk computation. Append-only: entries are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictionEntry {
    pub(crate) id: String,
    pub(crate) month: Month,
    pub(crate) total_income: Decimal,
    pub(crate) total_spending: Decimal,
    pub(crate) savings_ratio: Decimal,
    pub(crate) essential_ratio: Decimal,
    pub(crate) non_essential_ratio: Decimal,
    pub(crate) expense_growth_rate: Decimal,
    pub(crate) risk_level: RiskLevel,
    pub(crate) created_at: String,
}

impl PredictionEntry {
    /// Stamp an assessment with an identifier and creation time.
    pub(crate) fn record(assessment: &RiskAssessment) -> Self {
        Self {
            id: super::new_id(),
            month: assessment.month,
            total_income: assessment.total_income,
            total_spending: assessment.total_spending,
            savings_ratio: assessment.savings_ratio,
            essential_ratio: assessment.essential_ratio,
            non_essential_ratio: assessment.non_essential_ratio,
            expense_growth_rate: assessment.expense_growth_rate,
            risk_level: assessment.risk_level,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
