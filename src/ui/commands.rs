use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::warn;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::{
    parse_amount, ExpenseCategory, ExpenseEntry, ExpenseType, IncomeEntry, Month,
};
use crate::predict::run_prediction;
use crate::risk::format_percent;
use crate::store::RecordStore;

const DEFAULT_EXPORT_DIR: &str = "~/moneyrisk-export";

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut dyn RecordStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit MoneyRisk", cmd_quit, r);
    register_command!("quit", "Quit MoneyRisk", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("i", "Go to Income", cmd_income, r);
    register_command!("income", "Go to Income", cmd_income, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("p", "Go to Predict", cmd_predict, r);
    register_command!("predict", "Go to Predict", cmd_predict, r);
    register_command!("a", "Go to Analytics", cmd_analytics, r);
    register_command!("analytics", "Go to Analytics", cmd_analytics, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add-income",
        "Add income for this month (e.g. :add-income 5000)",
        cmd_add_income,
        r
    );
    register_command!(
        "add-expense",
        "Add expense (e.g. :add-expense Dining Out 80 non-essential)",
        cmd_add_expense,
        r
    );
    register_command!(
        "amount",
        "Change the selected entry's amount (e.g. :amount 1450)",
        cmd_amount,
        r
    );
    register_command!("delete", "Delete the selected entry", cmd_delete, r);
    register_command!("run", "Run a risk prediction for this month", cmd_run, r);
    register_command!(
        "compare",
        "Compare this month against another (e.g. :compare 2024-01)",
        cmd_compare,
        r
    );
    register_command!(
        "export",
        "Export all records to CSV (e.g. :export ~/moneyrisk)",
        cmd_export,
        r
    );

    r
});

/// Run a `:command`. Failures land in the status bar instead of ending the session.
pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut dyn RecordStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, store) {
            warn!(command = cmd_name, error = %format!("{e:#}"), "Command failed");
            app.set_status(format!("Error: {e:#}"));
        }
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Carry out the action the user just confirmed.
pub(crate) fn confirm_pending(app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    let Some(action) = app.pending_action.take() else {
        return Ok(());
    };
    match action {
        PendingAction::DeleteIncome { id, label } => {
            store.delete_income(&id)?;
            app.set_status(format!("Deleted income: {label}"));
        }
        PendingAction::DeleteExpense { id, label } => {
            store.delete_expense(&id)?;
            app.set_status(format!("Deleted expense: {label}"));
        }
        PendingAction::DeletePrediction { id, label } => {
            store.delete_prediction(&id)?;
            if app
                .last_prediction
                .as_ref()
                .is_some_and(|p| p.entry.id == id)
            {
                app.last_prediction = None;
            }
            app.set_status(format!("Deleted prediction: {label}"));
        }
    }
    app.refresh_all(store)
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut dyn RecordStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_all(store)
}

fn cmd_income(_args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    app.screen = Screen::Income;
    app.refresh_all(store)
}

fn cmd_expenses(_args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_all(store)
}

fn cmd_predict(_args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    app.screen = Screen::Predict;
    app.refresh_all(store)
}

fn cmd_analytics(_args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    app.screen = Screen::Analytics;
    app.refresh_all(store)
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut dyn RecordStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    if args.is_empty() {
        let month = Month::current();
        app.set_month(store, month)?;
        app.set_status(format!("Switched to month: {month}"));
        return Ok(());
    }

    // Accept "2024-01", or a bare "1"/"01" within the current year
    let month = if args.len() <= 2 {
        match args.parse::<u32>() {
            Ok(m) => Month::new(app.current_month.year(), m),
            Err(_) => Month::parse(args),
        }
    } else {
        Month::parse(args)
    };

    match month {
        Ok(m) => {
            app.set_month(store, m)?;
            app.set_status(format!("Switched to month: {m}"));
        }
        Err(_) => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)"),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    let month = app.current_month.next();
    app.set_month(store, month)?;
    app.set_status(format!("Month: {month}"));
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    let month = app.current_month.previous();
    app.set_month(store, month)?;
    app.set_status(format!("Month: {month}"));
    Ok(())
}

fn cmd_add_income(args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add-income <amount>");
        return Ok(());
    }

    let amount = parse_amount(args)?;
    let entry = IncomeEntry::new(app.current_month, amount)?;
    store.append_income(&entry)?;
    app.screen = Screen::Income;
    app.refresh_all(store)?;
    app.income_index = app.income.len().saturating_sub(1);
    app.set_status(format!("Added income ${amount:.2} for {}", app.current_month));
    Ok(())
}

fn cmd_add_expense(args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add-expense <category> <amount> [essential|non-essential]";
    let mut tokens: Vec<&str> = args.split_whitespace().collect();

    // Optional trailing type, then the amount; everything before is the category
    let expense_type = match tokens.last().map(|t| ExpenseType::parse(t)) {
        Some(Ok(t)) => {
            tokens.pop();
            t
        }
        _ => ExpenseType::default(),
    };
    let Some(amount_str) = tokens.pop() else {
        app.set_status(USAGE);
        return Ok(());
    };
    if tokens.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    let category = ExpenseCategory::parse(&tokens.join(" "))?;
    let amount = parse_amount(amount_str)?;
    let entry = ExpenseEntry::new(app.current_month, category, amount, expense_type)?;
    store.append_expense(&entry)?;
    app.screen = Screen::Expenses;
    app.refresh_all(store)?;
    app.expense_index = app.expenses.len().saturating_sub(1);
    app.set_status(format!("Added {expense_type} expense: {category} ${amount:.2}"));
    Ok(())
}

fn cmd_amount(args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :amount <new amount>");
        return Ok(());
    }
    let amount = parse_amount(args)?;

    match app.screen {
        Screen::Income => {
            let Some(sel) = app.selected_income() else {
                app.set_status("No income entry selected");
                return Ok(());
            };
            let updated = IncomeEntry::replacing(&sel.id, sel.month, amount)?;
            store.update_income(&updated)?;
        }
        Screen::Expenses => {
            let Some(sel) = app.selected_expense() else {
                app.set_status("No expense selected");
                return Ok(());
            };
            let updated =
                ExpenseEntry::replacing(&sel.id, sel.month, sel.category, amount, sel.expense_type)?;
            store.update_expense(&updated)?;
        }
        _ => {
            app.set_status("Navigate to Income or Expenses and select an entry first");
            return Ok(());
        }
    }

    app.refresh_all(store)?;
    app.set_status(format!("Amount set to ${amount:.2}"));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _store: &mut dyn RecordStore) -> anyhow::Result<()> {
    let action = match app.screen {
        Screen::Income => app.selected_income().map(|i| PendingAction::DeleteIncome {
            id: i.id.clone(),
            label: format!("{} ${:.2}", i.month, i.amount),
        }),
        Screen::Expenses => app.selected_expense().map(|e| PendingAction::DeleteExpense {
            id: e.id.clone(),
            label: format!("{} {} ${:.2}", e.month, e.category, e.amount),
        }),
        Screen::Predict => app
            .selected_prediction()
            .map(|p| PendingAction::DeletePrediction {
                id: p.id.clone(),
                label: format!("{} {}", p.month, p.risk_level.label()),
            }),
        _ => None,
    };

    match action {
        Some(action) => {
            let label = match &action {
                PendingAction::DeleteIncome { label, .. }
                | PendingAction::DeleteExpense { label, .. }
                | PendingAction::DeletePrediction { label, .. } => label.clone(),
            };
            app.confirm_message = format!("Delete '{label}'?");
            app.pending_action = Some(action);
            app.input_mode = InputMode::Confirm;
        }
        None => app.set_status("Nothing selected to delete"),
    }
    Ok(())
}

fn cmd_run(args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    if !args.is_empty() {
        let month = Month::parse(args)?;
        app.set_month(store, month)?;
    }

    let prediction = run_prediction(store, app.current_month)?;
    app.set_status(format!(
        "{} — savings ratio {}%",
        prediction.entry.risk_level.label(),
        format_percent(prediction.entry.savings_ratio)
    ));
    app.last_prediction = Some(prediction);
    app.screen = Screen::Predict;
    app.prediction_index = 0;
    app.prediction_scroll = 0;
    app.refresh_all(store)
}

fn cmd_compare(args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :compare <YYYY-MM>");
        return Ok(());
    }
    app.compare_month = Month::parse(args)?;
    app.screen = Screen::Analytics;
    app.refresh_all(store)?;
    app.set_status(format!(
        "Comparing {} with {}",
        app.compare_month, app.current_month
    ));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut dyn RecordStore) -> anyhow::Result<()> {
    let dir: PathBuf = crate::run::shellexpand(if args.is_empty() {
        DEFAULT_EXPORT_DIR
    } else {
        args
    });

    let snapshot = store.snapshot()?;
    let counts = crate::export::export_all(&dir, &snapshot)?;
    app.set_status(format!(
        "Exported {} income, {} expense, {} prediction records to {}",
        counts.income,
        counts.expenses,
        counts.predictions,
        dir.display()
    ));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
