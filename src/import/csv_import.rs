use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::{
    parse_amount, ExpenseCategory, ExpenseEntry, ExpenseType, IncomeEntry, Month,
};

/// Read `month,amount[,id]` rows. A header row is optional; rows without an
/// id get a fresh one.
pub(crate) fn read_income(path: &Path) -> Result<Vec<IncomeEntry>> {
    let mut entries = Vec::new();
    for (line, row) in read_rows(path)? {
        let entry = parse_income_row(&row).with_context(|| format!("Row {line}"))?;
        entries.push(entry);
    }
    info!(path = %path.display(), count = entries.len(), "Read income CSV");
    Ok(entries)
}

/// Read `month,category,amount,type[,id]` rows. A header row is optional and
/// a missing type column means essential.
pub(crate) fn read_expenses(path: &Path) -> Result<Vec<ExpenseEntry>> {
    let mut entries = Vec::new();
    for (line, row) in read_rows(path)? {
        let entry = parse_expense_row(&row).with_context(|| format!("Row {line}"))?;
        entries.push(entry);
    }
    info!(path = %path.display(), count = entries.len(), "Read expenses CSV");
    Ok(entries)
}

/// Non-blank rows paired with their 1-based line in the file, header removed.
fn read_rows(path: &Path) -> Result<Vec<(usize, Vec<String>)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.context("Failed to read CSV record")?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map_or(i + 1, |pos| pos.line() as usize);
        rows.push((line, record.iter().map(|s| s.to_string()).collect()));
    }

    if rows.is_empty() {
        anyhow::bail!("CSV file is empty");
    }

    if looks_like_header(&rows[0].1) {
        rows.remove(0);
    }

    Ok(rows)
}

/// Headers carry a label where the month goes, never a number.
fn looks_like_header(row: &[String]) -> bool {
    row.first()
        .is_some_and(|cell| !cell.chars().any(|c| c.is_ascii_digit()))
}

fn field<'a>(row: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    row.get(idx)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("missing {name} column"))
}

fn optional(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(|s| s.as_str()).filter(|s| !s.is_empty())
}

fn parse_income_row(row: &[String]) -> Result<IncomeEntry> {
    let month = Month::parse(field(row, 0, "month")?)?;
    let amount = parse_amount(field(row, 1, "amount")?)?;
    let entry = match optional(row, 2) {
        Some(id) => IncomeEntry::replacing(id, month, amount)?,
        None => IncomeEntry::new(month, amount)?,
    };
    Ok(entry)
}

fn parse_expense_row(row: &[String]) -> Result<ExpenseEntry> {
    let month = Month::parse(field(row, 0, "month")?)?;
    let category = ExpenseCategory::parse(field(row, 1, "category")?)?;
    let amount = parse_amount(field(row, 2, "amount")?)?;
    let expense_type = match optional(row, 3) {
        Some(raw) => ExpenseType::parse(raw)?,
        None => ExpenseType::default(),
    };
    let entry = match optional(row, 4) {
        Some(id) => ExpenseEntry::replacing(id, month, category, amount, expense_type)?,
        None => ExpenseEntry::new(month, category, amount, expense_type)?,
    };
    Ok(entry)
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
