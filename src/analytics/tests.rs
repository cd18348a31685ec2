#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn month(s: &str) -> Month {
    Month::parse(s).unwrap()
}

fn income(m: &str, amount: Decimal) -> IncomeEntry {
    IncomeEntry::new(month(m), amount).unwrap()
}

fn expense(m: &str, category: ExpenseCategory, amount: Decimal, t: ExpenseType) -> ExpenseEntry {
    ExpenseEntry::new(month(m), category, amount, t).unwrap()
}

fn prediction(m: &str, level: RiskLevel) -> PredictionEntry {
    PredictionEntry {
        id: crate::models::new_id(),
        month: month(m),
        total_income: Decimal::ZERO,
        total_spending: Decimal::ZERO,
        savings_ratio: Decimal::ZERO,
        essential_ratio: Decimal::ZERO,
        non_essential_ratio: Decimal::ZERO,
        expense_growth_rate: Decimal::ZERO,
        risk_level: level,
        created_at: String::new(),
    }
}

fn sample() -> Snapshot {
    Snapshot {
        income: vec![income("2024-02", dec!(4000)), income("2024-03", dec!(5000))],
        expenses: vec![
            expense("2024-02", ExpenseCategory::Housing, dec!(1500), ExpenseType::Essential),
            expense("2024-03", ExpenseCategory::Housing, dec!(1500), ExpenseType::Essential),
            expense("2024-03", ExpenseCategory::DiningOut, dec!(2500), ExpenseType::NonEssential),
            expense("2024-04", ExpenseCategory::Travel, dec!(900), ExpenseType::NonEssential),
        ],
        predictions: vec![
            prediction("2024-03", RiskLevel::High),
            prediction("2024-02", RiskLevel::Low),
            prediction("2024-03", RiskLevel::Medium),
        ],
    }
}

#[test]
fn test_known_months_sorted_and_distinct() {
    let snap = sample();
    let months = known_months(&snap.income, &snap.expenses);
    assert_eq!(
        months,
        vec![month("2024-02"), month("2024-03"), month("2024-04")]
    );
}

#[test]
fn test_known_months_empty() {
    assert!(known_months(&[], &[]).is_empty());
}

#[test]
fn test_month_stats() {
    let stats = month_stats(month("2024-03"), &sample());
    assert_eq!(stats.income, dec!(5000));
    assert_eq!(stats.spending, dec!(4000));
    assert_eq!(stats.essential, dec!(1500));
    assert_eq!(stats.non_essential, dec!(2500));
    assert_eq!(stats.savings, dec!(1000));
    assert_eq!(stats.savings_ratio, dec!(0.2));
    assert_eq!(stats.latest_risk, Some(RiskLevel::Medium));
}

#[test]
fn test_month_stats_without_income_or_prediction() {
    let stats = month_stats(month("2024-04"), &sample());
    assert_eq!(stats.income, Decimal::ZERO);
    assert_eq!(stats.savings, dec!(-900));
    assert_eq!(stats.savings_ratio, Decimal::ZERO);
    assert_eq!(stats.latest_risk, None);
}

#[test]
fn test_compare_months() {
    let cmp = compare(month("2024-02"), month("2024-03"), &sample());
    assert_eq!(cmp.a.month, month("2024-02"));
    assert_eq!(cmp.income_delta(), dec!(1000));
    assert_eq!(cmp.spending_delta(), dec!(2500));
    assert_eq!(cmp.spending_change(), dec!(2500) / dec!(1500));
}

#[test]
fn test_compare_against_empty_month() {
    let cmp = compare(month("2023-01"), month("2024-03"), &sample());
    assert_eq!(cmp.spending_change(), Decimal::ZERO);
}

#[test]
fn test_trend() {
    let snap = sample();
    let months = known_months(&snap.income, &snap.expenses);
    let points = trend(&months, &snap.income, &snap.expenses);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].savings_ratio, dec!(0.625));
    assert_eq!(points[1].spending, dec!(4000));
    assert_eq!(points[2].income, Decimal::ZERO);
    assert_eq!(points[2].savings_ratio, Decimal::ZERO);
}

#[test]
fn test_recent_months_crosses_year() {
    let months = recent_months(month("2024-02"), 4);
    let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
    assert_eq!(labels, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
}

#[test]
fn test_recent_months_zero() {
    assert!(recent_months(month("2024-02"), 0).is_empty());
}

#[test]
fn test_category_breakdown() {
    let snap = sample();
    let breakdown = category_breakdown(month("2024-03"), &snap.expenses);
    assert_eq!(
        breakdown,
        vec![
            (ExpenseCategory::DiningOut, dec!(2500)),
            (ExpenseCategory::Housing, dec!(1500)),
        ]
    );
}

#[test]
fn test_risk_history_uses_latest_per_month() {
    let history = risk_history(&sample().predictions);
    assert_eq!(
        history,
        vec![
            (month("2024-02"), RiskLevel::Low),
            (month("2024-03"), RiskLevel::Medium),
        ]
    );
}
