#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{ExpenseCategory, ExpenseType, Month};
use rust_decimal_macros::dec;

fn month(s: &str) -> Month {
    Month::parse(s).unwrap()
}

fn sample() -> Snapshot {
    Snapshot {
        income: vec![IncomeEntry::new(month("2024-03"), dec!(5000)).unwrap()],
        expenses: vec![
            ExpenseEntry::new(
                month("2024-03"),
                ExpenseCategory::FoodGroceries,
                dec!(412.50),
                ExpenseType::Essential,
            )
            .unwrap(),
            ExpenseEntry::new(
                month("2024-03"),
                ExpenseCategory::DiningOut,
                dec!(80),
                ExpenseType::NonEssential,
            )
            .unwrap(),
        ],
        predictions: Vec::new(),
    }
}

#[test]
fn test_write_income() {
    let snap = sample();
    let mut buf = Vec::new();
    let count = write_income(&mut buf, &snap.income).unwrap();
    assert_eq!(count, 1);

    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("month,amount,id"));
    assert_eq!(
        lines.next().unwrap(),
        format!("2024-03,5000,{}", snap.income[0].id)
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn test_write_expenses_quotes_labels() {
    let snap = sample();
    let mut buf = Vec::new();
    write_expenses(&mut buf, &snap.expenses).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "month,category,amount,type,id");
    assert!(lines[1].starts_with("2024-03,Food & Groceries,412.50,essential,"));
    assert!(lines[2].starts_with("2024-03,Dining Out,80,non-essential,"));
}

#[test]
fn test_write_predictions_header_only_when_empty() {
    let mut buf = Vec::new();
    assert_eq!(write_predictions(&mut buf, &[]).unwrap(), 0);
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("month,totalIncome,totalSpending,savingsRatio"));
}

#[test]
fn test_export_all_writes_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");
    let counts = export_all(&out, &sample()).unwrap();

    assert_eq!(
        counts,
        ExportCounts {
            income: 1,
            expenses: 2,
            predictions: 0
        }
    );
    assert!(out.join(INCOME_FILE).exists());
    assert!(out.join(EXPENSES_FILE).exists());
    assert!(out.join(PREDICTIONS_FILE).exists());
}

#[test]
fn test_exported_files_import_back() {
    let dir = tempfile::tempdir().unwrap();
    let snap = sample();
    export_all(dir.path(), &snap).unwrap();

    let income = crate::import::read_income(&dir.path().join(INCOME_FILE)).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].amount, dec!(5000));

    let expenses = crate::import::read_expenses(&dir.path().join(EXPENSES_FILE)).unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].category, ExpenseCategory::FoodGroceries);
    assert_eq!(expenses[1].expense_type, ExpenseType::NonEssential);
    assert_eq!(income, snap.income);
    assert_eq!(expenses, snap.expenses);
}
