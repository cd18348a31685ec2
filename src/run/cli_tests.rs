#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::RiskLevel;
use crate::store::MemoryStore;
use rust_decimal_macros::dec;

fn run(store: &mut MemoryStore, line: &str) -> Result<String> {
    let args: Vec<String> = std::iter::once("moneyrisk")
        .chain(line.split_whitespace())
        .map(String::from)
        .collect();
    let mut out = Vec::new();
    as_cli(&args, store, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn run_args(store: &mut MemoryStore, args: &[&str]) -> Result<String> {
    let args: Vec<String> = std::iter::once("moneyrisk")
        .chain(args.iter().copied())
        .map(String::from)
        .collect();
    let mut out = Vec::new();
    as_cli(&args, store, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn seeded() -> MemoryStore {
    let mut store = MemoryStore::new();
    run(&mut store, "income add 2024-03 5000").unwrap();
    run(&mut store, "expense add 2024-03 Housing 1500 essential").unwrap();
    run_args(&mut store, &["expense", "add", "2024-03", "Dining Out", "2500", "non-essential"])
        .unwrap();
    store
}

#[test]
fn test_help_and_version() {
    let mut store = MemoryStore::new();
    assert!(run(&mut store, "help").unwrap().contains("Usage: moneyrisk"));
    assert!(run(&mut store, "--version").unwrap().starts_with("moneyrisk "));
}

#[test]
fn test_unknown_command_fails() {
    let mut store = MemoryStore::new();
    let err = run(&mut store, "frobnicate").unwrap_err();
    assert!(err.to_string().contains("Unknown command: frobnicate"));
}

#[test]
fn test_income_add_and_list() {
    let mut store = MemoryStore::new();
    let out = run(&mut store, "income add 2024-03 $5,000").unwrap();
    assert!(out.starts_with("Added income"));

    let entries = store.list_income().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, dec!(5000));

    let listing = run(&mut store, "income list --month 2024-03").unwrap();
    assert!(listing.contains(&entries[0].id));
    assert!(listing.contains("$5000.00"));

    let other = run(&mut store, "income list --month 2024-04").unwrap();
    assert_eq!(other.trim(), "No income entries");
}

#[test]
fn test_invalid_input_never_reaches_store() {
    let mut store = MemoryStore::new();
    assert!(run(&mut store, "income add 2024-13 100").is_err());
    assert!(run(&mut store, "income add 2024-03 0").is_err());
    assert!(run(&mut store, "income add 2024-03 -5").is_err());
    assert!(run(&mut store, "expense add 2024-03 Yachts 100").is_err());
    assert!(run(&mut store, "expense add 2024-03 Housing 100 luxury").is_err());
    assert!(run(&mut store, "income add 2024-03").is_err());
    assert!(store.snapshot().unwrap().income.is_empty());
    assert!(store.snapshot().unwrap().expenses.is_empty());
}

#[test]
fn test_expense_type_defaults_to_essential() {
    let mut store = MemoryStore::new();
    run(&mut store, "expense add 2024-03 Utilities 120").unwrap();
    assert_eq!(store.list_expenses().unwrap()[0].expense_type, ExpenseType::Essential);
}

#[test]
fn test_update_and_remove() {
    let mut store = seeded();
    let income_id = store.list_income().unwrap()[0].id.clone();
    run(&mut store, &format!("income update {income_id} 2024-03 6000")).unwrap();
    assert_eq!(store.list_income().unwrap()[0].amount, dec!(6000));

    let expense_id = store.list_expenses().unwrap()[0].id.clone();
    run(
        &mut store,
        &format!("expense update {expense_id} 2024-03 Travel 700 non-essential"),
    )
    .unwrap();
    let updated = &store.list_expenses().unwrap()[0];
    assert_eq!(updated.category, ExpenseCategory::Travel);
    assert_eq!(updated.expense_type, ExpenseType::NonEssential);

    run(&mut store, &format!("expense rm {expense_id}")).unwrap();
    assert_eq!(store.list_expenses().unwrap().len(), 1);

    let err = run(&mut store, "income rm missing-id").unwrap_err();
    assert!(err.to_string().contains("missing-id"));
}

#[test]
fn test_predict_report() {
    let mut store = seeded();
    let out = run(&mut store, "predict 2024-03").unwrap();
    assert!(out.contains("Medium Risk"));
    assert!(out.contains("Savings ratio:    20.0%"));
    assert!(out.contains("Essential:        37.5%"));
    assert!(out.contains("Your savings ratio is 20.0%. Try to improve it to 25%+."));
    assert_eq!(store.list_predictions().unwrap().len(), 1);
}

#[test]
fn test_predict_json() {
    let mut store = seeded();
    let out = run(&mut store, "predict 2024-03 --json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["riskLevel"], "Medium");
    assert_eq!(value["nonEssentialRatio"], "0.625");
}

#[test]
fn test_predict_empty_month() {
    let mut store = seeded();
    let err = run(&mut store, "predict 2023-01").unwrap_err();
    assert!(err.to_string().contains("No data found for 2023-01"));
    assert!(store.list_predictions().unwrap().is_empty());
}

#[test]
fn test_history_lists_and_removes() {
    let mut store = seeded();
    assert!(run(&mut store, "history").unwrap().contains("No predictions yet"));

    run(&mut store, "predict 2024-03").unwrap();
    let id = store.list_predictions().unwrap()[0].id.clone();
    let listing = run(&mut store, "history").unwrap();
    assert!(listing.contains(&id));
    assert!(listing.contains("Medium"));

    run(&mut store, &format!("history rm {id}")).unwrap();
    assert!(store.list_predictions().unwrap().is_empty());
}

#[test]
fn test_compare_and_trend() {
    let mut store = seeded();
    run(&mut store, "income add 2024-02 4000").unwrap();
    run(&mut store, "expense add 2024-02 Housing 2000").unwrap();
    run(&mut store, "predict 2024-03").unwrap();

    let cmp = run(&mut store, "compare 2024-02 2024-03").unwrap();
    assert!(cmp.contains("$4000.00"));
    assert!(cmp.contains("100.0%"));
    assert!(cmp.contains(RiskLevel::Medium.as_str()));

    let trend = run(&mut store, "trend").unwrap();
    let lines: Vec<&str> = trend.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("2024-02"));
    assert!(lines[3].starts_with("2024-03"));
}

#[test]
fn test_categories() {
    let mut store = seeded();
    let all = run(&mut store, "categories").unwrap();
    assert_eq!(all.lines().count(), 14);

    let breakdown = run(&mut store, "categories 2024-03").unwrap();
    let dining = breakdown.find("Dining Out").unwrap();
    let housing = breakdown.find("Housing").unwrap();
    assert!(dining < housing);
}

#[test]
fn test_export_then_import() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded();
    let out = run(&mut store, &format!("export {}", dir.path().display())).unwrap();
    assert!(out.contains("Exported 1 income, 2 expense and 0 prediction records"));

    let mut fresh = MemoryStore::new();
    let income = dir.path().join("income.csv");
    let expenses = dir.path().join("expenses.csv");
    run(&mut fresh, &format!("import income {}", income.display())).unwrap();
    let out = run(&mut fresh, &format!("import expenses {}", expenses.display())).unwrap();
    assert_eq!(out.trim(), "Imported 2 expense entries (0 already present)");
    assert_eq!(fresh.list_expenses().unwrap(), store.list_expenses().unwrap());
    assert_eq!(fresh.list_income().unwrap(), store.list_income().unwrap());
}

#[test]
fn test_reimporting_an_export_skips_existing_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded();
    run(&mut store, &format!("export {}", dir.path().display())).unwrap();

    let expenses = dir.path().join("expenses.csv");
    let out = run(&mut store, &format!("import expenses {}", expenses.display())).unwrap();
    assert_eq!(out.trim(), "Imported 0 expense entries (2 already present)");
    assert_eq!(store.list_expenses().unwrap().len(), 2);
}

#[test]
fn test_import_missing_file() {
    let mut store = MemoryStore::new();
    let err = run(&mut store, "import income /definitely/not/here.csv").unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/tmp/x"), PathBuf::from("/tmp/x"));
    assert!(!shellexpand("~/x").starts_with("~"));
}
