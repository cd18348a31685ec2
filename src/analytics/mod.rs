//! Read-only summaries behind the dashboard and analytics views.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    ExpenseCategory, ExpenseEntry, ExpenseType, IncomeEntry, Month, PredictionEntry, RiskLevel,
};
use crate::risk::{self, category_totals, ratio};
use crate::store::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthStats {
    pub(crate) month: Month,
    pub(crate) income: Decimal,
    pub(crate) spending: Decimal,
    pub(crate) essential: Decimal,
    pub(crate) non_essential: Decimal,
    pub(crate) savings: Decimal,
    pub(crate) savings_ratio: Decimal,
    /// Risk of the most recent prediction recorded for the month.
    pub(crate) latest_risk: Option<RiskLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MonthComparison {
    pub(crate) a: MonthStats,
    pub(crate) b: MonthStats,
}

impl MonthComparison {
    pub(crate) fn income_delta(&self) -> Decimal {
        self.b.income - self.a.income
    }

    pub(crate) fn spending_delta(&self) -> Decimal {
        self.b.spending - self.a.spending
    }

    /// Relative change in spending from `a` to `b`, 0 when `a` spent nothing.
    pub(crate) fn spending_change(&self) -> Decimal {
        ratio(self.spending_delta(), self.a.spending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrendPoint {
    pub(crate) month: Month,
    pub(crate) income: Decimal,
    pub(crate) spending: Decimal,
    pub(crate) savings_ratio: Decimal,
}

/// Every month with at least one income or expense entry, ascending.
pub(crate) fn known_months(incomes: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Vec<Month> {
    let months: BTreeSet<Month> = incomes
        .iter()
        .map(|i| i.month)
        .chain(expenses.iter().map(|e| e.month))
        .collect();
    months.into_iter().collect()
}

pub(crate) fn month_stats(month: Month, snapshot: &Snapshot) -> MonthStats {
    let income = risk::income_total(month, &snapshot.income);
    let spending = risk::expense_total(month, &snapshot.expenses);
    let savings = income - spending;

    MonthStats {
        month,
        income,
        spending,
        essential: risk::expense_total_by_type(month, &snapshot.expenses, ExpenseType::Essential),
        non_essential: risk::expense_total_by_type(
            month,
            &snapshot.expenses,
            ExpenseType::NonEssential,
        ),
        savings,
        savings_ratio: ratio(savings, income),
        latest_risk: snapshot
            .predictions
            .iter()
            .rev()
            .find(|p| p.month == month)
            .map(|p| p.risk_level),
    }
}

pub(crate) fn compare(a: Month, b: Month, snapshot: &Snapshot) -> MonthComparison {
    MonthComparison {
        a: month_stats(a, snapshot),
        b: month_stats(b, snapshot),
    }
}

pub(crate) fn trend(
    months: &[Month],
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
) -> Vec<TrendPoint> {
    months
        .iter()
        .map(|&month| {
            let income = risk::income_total(month, incomes);
            let spending = risk::expense_total(month, expenses);
            TrendPoint {
                month,
                income,
                spending,
                savings_ratio: ratio(income - spending, income),
            }
        })
        .collect()
}

/// The `n` months ending at `anchor`, oldest first.
pub(crate) fn recent_months(anchor: Month, n: usize) -> Vec<Month> {
    let mut months = Vec::with_capacity(n);
    let mut m = anchor;
    for _ in 0..n {
        months.push(m);
        m = m.previous();
    }
    months.reverse();
    months
}

pub(crate) fn category_breakdown(
    month: Month,
    expenses: &[ExpenseEntry],
) -> Vec<(ExpenseCategory, Decimal)> {
    category_totals(month, expenses)
}

/// One point per month, ascending, using the last prediction appended for it.
pub(crate) fn risk_history(predictions: &[PredictionEntry]) -> Vec<(Month, RiskLevel)> {
    let mut latest: BTreeMap<Month, RiskLevel> = BTreeMap::new();
    for p in predictions {
        latest.insert(p.month, p.risk_level);
    }
    latest.into_iter().collect()
}

#[cfg(test)]
mod tests;
