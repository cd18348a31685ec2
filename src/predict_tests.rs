#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{ExpenseCategory, ExpenseEntry, ExpenseType, IncomeEntry, RiskLevel};
use crate::store::{MemoryStore, SqliteStore};

fn month(s: &str) -> Month {
    Month::parse(s).unwrap()
}

fn seeded(store: &mut dyn RecordStore) {
    let m = month("2024-03");
    store.append_income(&IncomeEntry::new(m, dec!(5000)).unwrap()).unwrap();
    store
        .append_expense(
            &ExpenseEntry::new(m, ExpenseCategory::Housing, dec!(1500), ExpenseType::Essential)
                .unwrap(),
        )
        .unwrap();
    store
        .append_expense(
            &ExpenseEntry::new(m, ExpenseCategory::DiningOut, dec!(2500), ExpenseType::NonEssential)
                .unwrap(),
        )
        .unwrap();
}

#[test]
fn test_empty_month_is_refused() {
    let mut store = MemoryStore::new();
    seeded(&mut store);

    let err = run_prediction(&mut store, month("2024-05")).unwrap_err();
    assert!(matches!(err, Error::NoData(ref m) if m == "2024-05"));
    assert_eq!(
        err.to_string(),
        "No data found for 2024-05. Add income/expenses first."
    );
    assert!(store.list_predictions().unwrap().is_empty());
}

#[test]
fn test_prediction_is_appended() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    seeded(&mut store);

    let prediction = run_prediction(&mut store, month("2024-03")).unwrap();
    assert_eq!(prediction.entry.risk_level, RiskLevel::Medium);
    assert_eq!(prediction.entry.savings_ratio, dec!(0.2));
    assert_eq!(prediction.suggestions.len(), 3);

    let history = store.list_predictions().unwrap();
    assert_eq!(history, vec![prediction.entry]);
}

#[test]
fn test_repeat_runs_accumulate_history() {
    let mut store = MemoryStore::new();
    seeded(&mut store);

    let first = run_prediction(&mut store, month("2024-03")).unwrap();
    let second = run_prediction(&mut store, month("2024-03")).unwrap();
    assert_ne!(first.entry.id, second.entry.id);
    assert_eq!(store.list_predictions().unwrap().len(), 2);
}

#[test]
fn test_expenses_alone_are_enough_to_predict() {
    let mut store = MemoryStore::new();
    store
        .append_expense(
            &ExpenseEntry::new(
                month("2024-06"),
                ExpenseCategory::Travel,
                dec!(300),
                ExpenseType::NonEssential,
            )
            .unwrap(),
        )
        .unwrap();

    let prediction = run_prediction(&mut store, month("2024-06")).unwrap();
    assert_eq!(prediction.entry.risk_level, RiskLevel::High);
    assert_eq!(prediction.suggestions.len(), 3);
}

#[test]
fn test_json_output_is_camel_case() {
    let mut store = MemoryStore::new();
    seeded(&mut store);

    let json = run_prediction(&mut store, month("2024-03"))
        .unwrap()
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["month"], "2024-03");
    assert_eq!(value["totalIncome"], "5000");
    assert_eq!(value["essentialRatio"], "0.375");
    assert_eq!(value["riskLevel"], "Medium");
    assert_eq!(value["suggestions"].as_array().unwrap().len(), 3);
}
