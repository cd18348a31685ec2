use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{ExpenseEntry, IncomeEntry, PredictionEntry};
use crate::store::Snapshot;

pub(crate) const INCOME_FILE: &str = "income.csv";
pub(crate) const EXPENSES_FILE: &str = "expenses.csv";
pub(crate) const PREDICTIONS_FILE: &str = "predictions.csv";

// Columns lead with the import layout so exported files read back in.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ExportCounts {
    pub(crate) income: usize,
    pub(crate) expenses: usize,
    pub(crate) predictions: usize,
}

pub(crate) fn write_income<W: Write>(out: W, entries: &[IncomeEntry]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["month", "amount", "id"])?;
    for e in entries {
        wtr.write_record([e.month.to_string(), e.amount.to_string(), e.id.clone()])?;
    }
    wtr.flush()?;
    Ok(entries.len())
}

pub(crate) fn write_expenses<W: Write>(out: W, entries: &[ExpenseEntry]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["month", "category", "amount", "type", "id"])?;
    for e in entries {
        wtr.write_record([
            e.month.to_string(),
            e.category.to_string(),
            e.amount.to_string(),
            e.expense_type.to_string(),
            e.id.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(entries.len())
}

pub(crate) fn write_predictions<W: Write>(out: W, entries: &[PredictionEntry]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "month",
        "totalIncome",
        "totalSpending",
        "savingsRatio",
        "essentialRatio",
        "nonEssentialRatio",
        "expenseGrowthRate",
        "riskLevel",
        "createdAt",
        "id",
    ])?;
    for p in entries {
        wtr.write_record([
            p.month.to_string(),
            p.total_income.to_string(),
            p.total_spending.to_string(),
            p.savings_ratio.to_string(),
            p.essential_ratio.to_string(),
            p.non_essential_ratio.to_string(),
            p.expense_growth_rate.to_string(),
            p.risk_level.to_string(),
            p.created_at.clone(),
            p.id.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(entries.len())
}

/// Write every collection into `dir` as three CSV files, creating the
/// directory if needed.
pub(crate) fn export_all(dir: &Path, snapshot: &Snapshot) -> Result<ExportCounts> {
    std::fs::create_dir_all(dir)?;

    let counts = ExportCounts {
        income: write_income(std::fs::File::create(dir.join(INCOME_FILE))?, &snapshot.income)?,
        expenses: write_expenses(
            std::fs::File::create(dir.join(EXPENSES_FILE))?,
            &snapshot.expenses,
        )?,
        predictions: write_predictions(
            std::fs::File::create(dir.join(PREDICTIONS_FILE))?,
            &snapshot.predictions,
        )?,
    };

    info!(
        dir = %dir.display(),
        income = counts.income,
        expenses = counts.expenses,
        predictions = counts.predictions,
        "Exported records"
    );
    Ok(counts)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
