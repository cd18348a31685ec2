//! Overspending risk engine.
//!
//! Turns raw income and expense records into a [`RiskAssessment`] for one
//! month: totals, savings ratio, essential/non-essential composition,
//! month-over-month expense growth and a three-tier [`RiskLevel`].
//!
//! Everything here is pure. Callers hand in a consistent snapshot of the full
//! collections and the engine does all month filtering itself, for both the
//! target month and the month before it.

mod suggestions;

pub(crate) use suggestions::{category_totals, format_percent, generate_suggestions};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{ExpenseEntry, ExpenseType, IncomeEntry, Month, RiskLevel};

/// Savings ratios strictly above this are `Low` risk (0.30).
pub(crate) const LOW_RISK_THRESHOLD: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Savings ratios at or above this (up to the low threshold) are `Medium` (0.10).
pub(crate) const MEDIUM_RISK_THRESHOLD: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RiskAssessment {
    pub(crate) month: Month,
    pub(crate) total_income: Decimal,
    pub(crate) total_spending: Decimal,
    pub(crate) savings_ratio: Decimal,
    pub(crate) essential_ratio: Decimal,
    pub(crate) non_essential_ratio: Decimal,
    pub(crate) expense_growth_rate: Decimal,
    pub(crate) risk_level: RiskLevel,
}

impl RiskAssessment {
    /// Suggestions for this assessment, drawn from the month's expenses.
    pub(crate) fn suggestions(&self, expenses: &[ExpenseEntry]) -> Vec<String> {
        generate_suggestions(self.risk_level, self.savings_ratio, expenses, self.month)
    }
}

/// Compute the risk assessment for `month` from the full income and expense
/// collections. Never fails: zero denominators yield a ratio of 0.
pub(crate) fn compute_risk(
    month: Month,
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
) -> RiskAssessment {
    let total_income = income_total(month, incomes);
    let total_spending = expense_total(month, expenses);

    let savings_ratio = ratio(total_income - total_spending, total_income);

    let essential_spending = expense_total_by_type(month, expenses, ExpenseType::Essential);
    let non_essential_spending = expense_total_by_type(month, expenses, ExpenseType::NonEssential);
    let essential_ratio = ratio(essential_spending, total_spending);
    let non_essential_ratio = ratio(non_essential_spending, total_spending);

    let prev_total = expense_total(month.previous(), expenses);
    let expense_growth_rate = ratio(total_spending - prev_total, prev_total);

    let risk_level = classify_risk(savings_ratio);

    debug!(
        %month,
        %total_income,
        %total_spending,
        %prev_total,
        %savings_ratio,
        risk = %risk_level,
        "Computed risk"
    );

    RiskAssessment {
        month,
        total_income,
        total_spending,
        savings_ratio,
        essential_ratio,
        non_essential_ratio,
        expense_growth_rate,
        risk_level,
    }
}

/// Three-tier classification on the savings ratio.
/// Exactly 0.30 is `Medium`; exactly 0.10 is `Medium`.
pub(crate) fn classify_risk(savings_ratio: Decimal) -> RiskLevel {
    if savings_ratio > LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if savings_ratio >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
///
/// An overflowing division saturates to `Decimal::MAX`/`Decimal::MIN`.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator.checked_div(denominator).unwrap_or(if numerator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    } else {
        Decimal::ZERO
    }
}

pub(crate) fn income_total(month: Month, incomes: &[IncomeEntry]) -> Decimal {
    incomes
        .iter()
        .filter(|i| i.month == month)
        .map(|i| i.amount)
        .sum()
}

pub(crate) fn expense_total(month: Month, expenses: &[ExpenseEntry]) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.month == month)
        .map(|e| e.amount)
        .sum()
}

pub(crate) fn expense_total_by_type(
    month: Month,
    expenses: &[ExpenseEntry],
    expense_type: ExpenseType,
) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.month == month && e.expense_type == expense_type)
        .map(|e| e.amount)
        .sum()
}
