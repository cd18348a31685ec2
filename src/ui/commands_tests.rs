#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::RiskLevel;
use crate::store::MemoryStore;
use rust_decimal_macros::dec;

fn setup() -> (App, MemoryStore) {
    let app = App::new(Month::parse("2024-03").unwrap());
    (app, MemoryStore::new())
}

fn run(input: &str, app: &mut App, store: &mut MemoryStore) {
    handle_command(input, app, store).unwrap();
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("run", "run"), 0);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (mut app, mut store) = setup();
    run("expnses", &mut app, &mut store);
    assert_eq!(
        app.status_message,
        "Unknown command: :expnses. Did you mean :expenses?"
    );
}

#[test]
fn test_every_listed_command_is_registered() {
    for name in [
        "quit", "dashboard", "income", "expenses", "predict", "analytics", "help", "month",
        "next-month", "prev-month", "add-income", "add-expense", "amount", "delete", "run",
        "compare", "export",
    ] {
        assert!(COMMANDS.contains_key(name), "missing :{name}");
    }
}

#[test]
fn test_screen_switching_and_quit() {
    let (mut app, mut store) = setup();
    run("analytics", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Analytics);
    run("e", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Expenses);
    run("q", &mut app, &mut store);
    assert!(!app.running);
}

#[test]
fn test_month_navigation() {
    let (mut app, mut store) = setup();
    run("month 2023-12", &mut app, &mut store);
    assert_eq!(app.current_month.to_string(), "2023-12");
    run("next-month", &mut app, &mut store);
    assert_eq!(app.current_month.to_string(), "2024-01");
    run("prev-month", &mut app, &mut store);
    assert_eq!(app.current_month.to_string(), "2023-12");
    assert_eq!(app.compare_month.to_string(), "2023-11");

    run("m 7", &mut app, &mut store);
    assert_eq!(app.current_month.to_string(), "2023-07");

    run("month 2024-13", &mut app, &mut store);
    assert_eq!(app.current_month.to_string(), "2023-07");
    assert!(app.status_message.starts_with("Invalid month"));
}

#[test]
fn test_add_income_and_expense() {
    let (mut app, mut store) = setup();
    run("add-income $5,000", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Income);
    assert_eq!(app.income.len(), 1);
    assert_eq!(app.stats.income, dec!(5000));

    run("add-expense Dining Out 80 non-essential", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Expenses);
    let e = &app.expenses[0];
    assert_eq!(e.category, ExpenseCategory::DiningOut);
    assert_eq!(e.expense_type, ExpenseType::NonEssential);
    assert_eq!(e.amount, dec!(80));

    run("add-expense Housing 1500", &mut app, &mut store);
    assert_eq!(app.expenses[1].expense_type, ExpenseType::Essential);
    assert_eq!(app.expense_index, 1);
}

#[test]
fn test_invalid_input_reports_error() {
    let (mut app, mut store) = setup();
    run("add-income -10", &mut app, &mut store);
    assert!(app.status_message.starts_with("Error:"));
    run("add-expense Yachts 100", &mut app, &mut store);
    assert!(app.status_message.contains("Yachts"));
    run("add-expense 100", &mut app, &mut store);
    assert!(app.status_message.starts_with("Usage:"));
    assert!(store.list_income().unwrap().is_empty());
    assert!(store.list_expenses().unwrap().is_empty());
}

#[test]
fn test_amount_updates_selected_entry() {
    let (mut app, mut store) = setup();
    run("add-expense Housing 1500", &mut app, &mut store);
    run("amount 1450.25", &mut app, &mut store);
    assert_eq!(store.list_expenses().unwrap()[0].amount, dec!(1450.25));
    assert_eq!(app.expenses[0].amount, dec!(1450.25));

    run("dashboard", &mut app, &mut store);
    run("amount 10", &mut app, &mut store);
    assert!(app.status_message.starts_with("Navigate to"));
}

#[test]
fn test_delete_requires_confirmation() {
    let (mut app, mut store) = setup();
    run("add-income 5000", &mut app, &mut store);
    run("delete", &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(app.confirm_message.contains("2024-03 $5000.00"));
    assert_eq!(store.list_income().unwrap().len(), 1);

    confirm_pending(&mut app, &mut store).unwrap();
    assert!(store.list_income().unwrap().is_empty());
    assert!(app.income.is_empty());
    assert!(app.pending_action.is_none());
}

#[test]
fn test_delete_with_nothing_selected() {
    let (mut app, mut store) = setup();
    run("income", &mut app, &mut store);
    run("delete", &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "Nothing selected to delete");
}

#[test]
fn test_run_prediction() {
    let (mut app, mut store) = setup();
    run("run", &mut app, &mut store);
    assert!(app.status_message.contains("No data found for 2024-03"));
    assert!(app.last_prediction.is_none());

    run("add-income 5000", &mut app, &mut store);
    run("add-expense Housing 4900", &mut app, &mut store);
    run("run", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Predict);
    let p = app.last_prediction.as_ref().unwrap();
    assert_eq!(p.entry.risk_level, RiskLevel::High);
    assert!(p.suggestions[2].contains("Housing (4900)"));
    assert_eq!(app.snapshot.predictions.len(), 1);
    assert_eq!(app.stats.latest_risk, Some(RiskLevel::High));
    assert_eq!(app.status_message, "High Risk — savings ratio 2.0%");
}

#[test]
fn test_delete_prediction_clears_latest() {
    let (mut app, mut store) = setup();
    run("add-income 5000", &mut app, &mut store);
    run("run", &mut app, &mut store);
    run("delete", &mut app, &mut store);
    confirm_pending(&mut app, &mut store).unwrap();
    assert!(app.last_prediction.is_none());
    assert!(store.list_predictions().unwrap().is_empty());
}

#[test]
fn test_compare_sets_month() {
    let (mut app, mut store) = setup();
    run("compare 2023-03", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Analytics);
    assert_eq!(app.comparison.a.month.to_string(), "2023-03");
    assert_eq!(app.comparison.b.month.to_string(), "2024-03");
}

#[test]
fn test_export_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, mut store) = setup();
    run("add-income 5000", &mut app, &mut store);
    run(&format!("export {}", dir.path().display()), &mut app, &mut store);
    assert!(app.status_message.starts_with("Exported 1 income"));
    assert!(dir.path().join("income.csv").exists());
}
