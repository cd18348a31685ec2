use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ExpenseCategory, ExpenseEntry, Month, RiskLevel};

/// How many categories the high-risk advice names.
const TOP_CATEGORIES: usize = 3;

/// Advice for a month, ordered for display. High risk yields 2 or 3 items,
/// Medium 3, Low 4.
pub(crate) fn generate_suggestions(
    risk_level: RiskLevel,
    savings_ratio: Decimal,
    expenses: &[ExpenseEntry],
    month: Month,
) -> Vec<String> {
    let pct = format_percent(savings_ratio);

    match risk_level {
        RiskLevel::High => {
            let mut suggestions = vec![
                format!("Your savings ratio is only {pct}%. Aim for at least 10% to reduce risk."),
                "Reduce non-essential spending immediately.".to_string(),
            ];
            let top: Vec<String> = category_totals(month, expenses)
                .into_iter()
                .take(TOP_CATEGORIES)
                .map(|(cat, total)| format!("{cat} ({})", total.normalize()))
                .collect();
            if !top.is_empty() {
                suggestions.push(format!(
                    "Top spending categories: {}. Consider cutting these.",
                    top.join(", ")
                ));
            }
            suggestions
        }
        RiskLevel::Medium => vec![
            format!("Your savings ratio is {pct}%. Try to improve it to 25%+."),
            "Review non-essential expenses for areas to cut back.".to_string(),
            "Set a monthly budget and track your progress weekly.".to_string(),
        ],
        RiskLevel::Low => vec![
            format!("Great job! Your savings ratio is {pct}%."),
            "Consider investing your surplus in diversified funds.".to_string(),
            "Build an emergency fund covering 6 months of expenses.".to_string(),
            "Look into tax-advantaged investment accounts.".to_string(),
        ],
    }
}

/// Per-category spending for `month`, largest first.
///
/// Totals accumulate in first-seen order and the sort is stable, so equal
/// totals keep the order in which their categories first appeared.
pub(crate) fn category_totals(
    month: Month,
    expenses: &[ExpenseEntry],
) -> Vec<(ExpenseCategory, Decimal)> {
    let mut totals: Vec<(ExpenseCategory, Decimal)> = Vec::new();
    for e in expenses.iter().filter(|e| e.month == month) {
        match totals.iter_mut().find(|(cat, _)| *cat == e.category) {
            Some((_, sum)) => *sum += e.amount,
            None => totals.push((e.category, e.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// A ratio as a percentage with one decimal place, e.g. `0.2` → `"20.0"`.
pub(crate) fn format_percent(ratio: Decimal) -> String {
    let pct = ratio
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{pct:.1}")
}
