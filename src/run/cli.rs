use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analytics;
use crate::models::{
    parse_amount, ExpenseCategory, ExpenseEntry, ExpenseType, IncomeEntry, Month,
};
use crate::predict::{run_prediction, Prediction};
use crate::risk::format_percent;
use crate::store::RecordStore;

const DEFAULT_EXPORT_DIR: &str = "moneyrisk-export";

pub(crate) fn as_cli(
    args: &[String],
    store: &mut dyn RecordStore,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[2..];

    match command.as_str() {
        "income" | "i" => cli_income(rest, store, out),
        "expense" | "expenses" | "e" => cli_expense(rest, store, out),
        "predict" | "p" => cli_predict(rest, store, out),
        "history" => cli_history(rest, store, out),
        "compare" => cli_compare(rest, store, out),
        "trend" => cli_trend(store, out),
        "categories" => cli_categories(rest, store, out),
        "export" => cli_export(rest, store, out),
        "import" => cli_import(rest, store, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "moneyrisk {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "\
MoneyRisk — monthly overspending risk tracker

Usage: moneyrisk [command]

Commands:
  (none)                                      Launch interactive TUI
  income add <YYYY-MM> <amount>               Record income
  income list [--month <YYYY-MM>]             List income entries
  income update <id> <YYYY-MM> <amount>       Replace an income entry
  income rm <id>                              Delete an income entry
  expense add <YYYY-MM> <category> <amount> [essential|non-essential]
                                              Record an expense (default: essential)
  expense list [--month <YYYY-MM>]            List expense entries
  expense update <id> <YYYY-MM> <category> <amount> <type>
                                              Replace an expense entry
  expense rm <id>                             Delete an expense entry
  predict [YYYY-MM] [--json]                  Compute and record risk (default: current month)
  history                                     List recorded predictions
  history rm <id>                             Delete a recorded prediction
  compare <YYYY-MM> <YYYY-MM>                 Compare two months
  trend                                       Income, spending and savings by month
  categories [YYYY-MM]                        List categories, or a month's spending by category
  export [dir]                                Export all records as CSV (default: ./{DEFAULT_EXPORT_DIR})
  import income|expenses <file.csv>           Import records from CSV
  --help, -h                                  Show this help
  --version, -V                               Show version"
    )?;
    Ok(())
}

// ── Income ────────────────────────────────────────────────────

fn cli_income(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    const USAGE: &str = "Usage: moneyrisk income add|list|update|rm ...";
    let sub = arg(args, 0, USAGE)?;
    let args = &args[1..];

    match sub {
        "add" => {
            const USAGE: &str = "Usage: moneyrisk income add <YYYY-MM> <amount>";
            let month = Month::parse(arg(args, 0, USAGE)?)?;
            let amount = parse_amount(arg(args, 1, USAGE)?)?;
            let entry = IncomeEntry::new(month, amount)?;
            store.append_income(&entry)?;
            writeln!(out, "Added income {} ({month}, ${amount:.2})", entry.id)?;
        }
        "list" | "ls" => {
            let month = month_flag(args)?;
            let entries: Vec<IncomeEntry> = store
                .list_income()?
                .into_iter()
                .filter(|e| month.is_none_or(|m| e.month == m))
                .collect();
            if entries.is_empty() {
                writeln!(out, "No income entries")?;
                return Ok(());
            }
            writeln!(out, "{:<36}  {:<7}  {:>12}", "ID", "Month", "Amount")?;
            writeln!(out, "{}", "─".repeat(59))?;
            for e in &entries {
                writeln!(out, "{:<36}  {:<7}  {:>12}", e.id, e.month, format!("${:.2}", e.amount))?;
            }
        }
        "update" => {
            const USAGE: &str = "Usage: moneyrisk income update <id> <YYYY-MM> <amount>";
            let id = arg(args, 0, USAGE)?;
            let month = Month::parse(arg(args, 1, USAGE)?)?;
            let amount = parse_amount(arg(args, 2, USAGE)?)?;
            store.update_income(&IncomeEntry::replacing(id, month, amount)?)?;
            writeln!(out, "Updated income {id}")?;
        }
        "rm" | "delete" => {
            let id = arg(args, 0, "Usage: moneyrisk income rm <id>")?;
            store.delete_income(id)?;
            writeln!(out, "Deleted income {id}")?;
        }
        other => anyhow::bail!("Unknown income command: {other}\n{USAGE}"),
    }
    Ok(())
}

// ── Expenses ──────────────────────────────────────────────────

fn cli_expense(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    const USAGE: &str = "Usage: moneyrisk expense add|list|update|rm ...";
    let sub = arg(args, 0, USAGE)?;
    let args = &args[1..];

    match sub {
        "add" => {
            const USAGE: &str =
                "Usage: moneyrisk expense add <YYYY-MM> <category> <amount> [essential|non-essential]";
            let month = Month::parse(arg(args, 0, USAGE)?)?;
            let category = ExpenseCategory::parse(arg(args, 1, USAGE)?)?;
            let amount = parse_amount(arg(args, 2, USAGE)?)?;
            let expense_type = match args.get(3) {
                Some(t) => ExpenseType::parse(t)?,
                None => ExpenseType::default(),
            };
            let entry = ExpenseEntry::new(month, category, amount, expense_type)?;
            store.append_expense(&entry)?;
            writeln!(
                out,
                "Added expense {} ({month}, {category}, ${amount:.2}, {expense_type})",
                entry.id
            )?;
        }
        "list" | "ls" => {
            let month = month_flag(args)?;
            let entries: Vec<ExpenseEntry> = store
                .list_expenses()?
                .into_iter()
                .filter(|e| month.is_none_or(|m| e.month == m))
                .collect();
            if entries.is_empty() {
                writeln!(out, "No expense entries")?;
                return Ok(());
            }
            writeln!(
                out,
                "{:<36}  {:<7}  {:<18}  {:>12}  Type",
                "ID", "Month", "Category", "Amount"
            )?;
            writeln!(out, "{}", "─".repeat(94))?;
            for e in &entries {
                writeln!(
                    out,
                    "{:<36}  {:<7}  {:<18}  {:>12}  {}",
                    e.id,
                    e.month,
                    e.category,
                    format!("${:.2}", e.amount),
                    e.expense_type
                )?;
            }
        }
        "update" => {
            const USAGE: &str =
                "Usage: moneyrisk expense update <id> <YYYY-MM> <category> <amount> <type>";
            let id = arg(args, 0, USAGE)?;
            let month = Month::parse(arg(args, 1, USAGE)?)?;
            let category = ExpenseCategory::parse(arg(args, 2, USAGE)?)?;
            let amount = parse_amount(arg(args, 3, USAGE)?)?;
            let expense_type = ExpenseType::parse(arg(args, 4, USAGE)?)?;
            store.update_expense(&ExpenseEntry::replacing(
                id,
                month,
                category,
                amount,
                expense_type,
            )?)?;
            writeln!(out, "Updated expense {id}")?;
        }
        "rm" | "delete" => {
            let id = arg(args, 0, "Usage: moneyrisk expense rm <id>")?;
            store.delete_expense(id)?;
            writeln!(out, "Deleted expense {id}")?;
        }
        other => anyhow::bail!("Unknown expense command: {other}\n{USAGE}"),
    }
    Ok(())
}

// ── Prediction ────────────────────────────────────────────────

fn cli_predict(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    let json = args.iter().any(|a| a == "--json");
    let month = match args.iter().find(|a| !a.starts_with('-')) {
        Some(m) => Month::parse(m)?,
        None => Month::current(),
    };

    let prediction = run_prediction(store, month)?;
    if json {
        writeln!(out, "{}", prediction.to_json()?)?;
    } else {
        print_prediction(&prediction, out)?;
    }
    Ok(())
}

fn print_prediction(prediction: &Prediction, out: &mut dyn Write) -> Result<()> {
    let p = &prediction.entry;
    writeln!(out, "MoneyRisk — {}", p.month)?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Risk:             {}", p.risk_level.label())?;
    writeln!(out, "  Income:           ${:.2}", p.total_income)?;
    writeln!(out, "  Spending:         ${:.2}", p.total_spending)?;
    writeln!(out, "  Savings ratio:    {}%", format_percent(p.savings_ratio))?;
    writeln!(out, "  Essential:        {}%", format_percent(p.essential_ratio))?;
    writeln!(out, "  Non-essential:    {}%", format_percent(p.non_essential_ratio))?;
    writeln!(out, "  Expense growth:   {}%", format_percent(p.expense_growth_rate))?;
    writeln!(out)?;
    writeln!(out, "Suggestions:")?;
    for s in &prediction.suggestions {
        writeln!(out, "  • {s}")?;
    }
    Ok(())
}

fn cli_history(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    if let Some(sub) = args.first() {
        if sub == "rm" || sub == "delete" {
            let id = arg(args, 1, "Usage: moneyrisk history rm <id>")?;
            store.delete_prediction(id)?;
            writeln!(out, "Deleted prediction {id}")?;
            return Ok(());
        }
        anyhow::bail!("Unknown history command: {sub}");
    }

    let predictions = store.list_predictions()?;
    if predictions.is_empty() {
        writeln!(out, "No predictions yet. Run `moneyrisk predict` first.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<36}  {:<7}  {:<6}  {:>8}  {:>12}  {:>12}  Recorded",
        "ID", "Month", "Risk", "Savings", "Income", "Spending"
    )?;
    writeln!(out, "{}", "─".repeat(110))?;
    for p in predictions.iter().rev() {
        writeln!(
            out,
            "{:<36}  {:<7}  {:<6}  {:>8}  {:>12}  {:>12}  {}",
            p.id,
            p.month,
            p.risk_level,
            format!("{}%", format_percent(p.savings_ratio)),
            format!("${:.2}", p.total_income),
            format!("${:.2}", p.total_spending),
            p.created_at
        )?;
    }
    Ok(())
}

// ── Analytics ─────────────────────────────────────────────────

fn cli_compare(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    const USAGE: &str = "Usage: moneyrisk compare <YYYY-MM> <YYYY-MM>";
    let a = Month::parse(arg(args, 0, USAGE)?)?;
    let b = Month::parse(arg(args, 1, USAGE)?)?;

    let snapshot = store.snapshot()?;
    let cmp = analytics::compare(a, b, &snapshot);
    let risk = |r: Option<crate::models::RiskLevel>| {
        r.map_or_else(|| "—".to_string(), |r| r.to_string())
    };

    writeln!(out, "{:<16} {:>14} {:>14} {:>14}", "", a, b, "Change")?;
    writeln!(out, "{}", "─".repeat(61))?;
    writeln!(
        out,
        "{:<16} {:>14} {:>14} {:>14}",
        "Income",
        format!("${:.2}", cmp.a.income),
        format!("${:.2}", cmp.b.income),
        format!("${:.2}", cmp.income_delta())
    )?;
    writeln!(
        out,
        "{:<16} {:>14} {:>14} {:>14}",
        "Spending",
        format!("${:.2}", cmp.a.spending),
        format!("${:.2}", cmp.b.spending),
        format!("{}%", format_percent(cmp.spending_change()))
    )?;
    writeln!(
        out,
        "{:<16} {:>14} {:>14}",
        "Essential",
        format!("${:.2}", cmp.a.essential),
        format!("${:.2}", cmp.b.essential)
    )?;
    writeln!(
        out,
        "{:<16} {:>14} {:>14}",
        "Non-essential",
        format!("${:.2}", cmp.a.non_essential),
        format!("${:.2}", cmp.b.non_essential)
    )?;
    writeln!(
        out,
        "{:<16} {:>14} {:>14}",
        "Savings ratio",
        format!("{}%", format_percent(cmp.a.savings_ratio)),
        format!("{}%", format_percent(cmp.b.savings_ratio))
    )?;
    writeln!(
        out,
        "{:<16} {:>14} {:>14}",
        "Latest risk",
        risk(cmp.a.latest_risk),
        risk(cmp.b.latest_risk)
    )?;
    Ok(())
}

fn cli_trend(store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    let snapshot = store.snapshot()?;
    let months = analytics::known_months(&snapshot.income, &snapshot.expenses);
    if months.is_empty() {
        writeln!(out, "No data yet")?;
        return Ok(());
    }

    writeln!(out, "{:<7}  {:>12}  {:>12}  {:>8}", "Month", "Income", "Spending", "Savings")?;
    writeln!(out, "{}", "─".repeat(45))?;
    for point in analytics::trend(&months, &snapshot.income, &snapshot.expenses) {
        writeln!(
            out,
            "{:<7}  {:>12}  {:>12}  {:>8}",
            point.month,
            format!("${:.2}", point.income),
            format!("${:.2}", point.spending),
            format!("{}%", format_percent(point.savings_ratio))
        )?;
    }
    Ok(())
}

fn cli_categories(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    let Some(month) = args.first() else {
        for c in ExpenseCategory::all() {
            writeln!(out, "{c}")?;
        }
        return Ok(());
    };

    let month = Month::parse(month)?;
    let expenses = store.list_expenses()?;
    let breakdown = analytics::category_breakdown(month, &expenses);
    if breakdown.is_empty() {
        writeln!(out, "No expenses for {month}")?;
        return Ok(());
    }
    writeln!(out, "Spending by Category — {month}")?;
    writeln!(out, "{}", "─".repeat(40))?;
    for (category, total) in &breakdown {
        writeln!(out, "  {:<24} ${total:.2}", category.as_str())?;
    }
    Ok(())
}

// ── CSV ───────────────────────────────────────────────────────

fn cli_export(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    let dir = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));

    let snapshot = store.snapshot()?;
    let counts = crate::export::export_all(&dir, &snapshot)
        .with_context(|| format!("Failed to export to {}", dir.display()))?;
    writeln!(
        out,
        "Exported {} income, {} expense and {} prediction records to {}",
        counts.income,
        counts.expenses,
        counts.predictions,
        dir.display()
    )?;
    Ok(())
}

fn cli_import(args: &[String], store: &mut dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    const USAGE: &str = "Usage: moneyrisk import income|expenses <file.csv>";
    let kind = arg(args, 0, USAGE)?;
    let path = shellexpand(arg(args, 1, USAGE)?);
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    // Rows are parsed and validated before the store is touched; the store
    // then writes them in one batch and skips ids it already holds.
    match kind {
        "income" => {
            let entries = crate::import::read_income(&path)?;
            let added = store.import_income(&entries)?;
            writeln!(
                out,
                "Imported {added} income entries ({} already present)",
                entries.len() - added
            )?;
        }
        "expenses" | "expense" => {
            let entries = crate::import::read_expenses(&path)?;
            let added = store.import_expenses(&entries)?;
            writeln!(
                out,
                "Imported {added} expense entries ({} already present)",
                entries.len() - added
            )?;
        }
        other => anyhow::bail!("Unknown import kind: {other}\n{USAGE}"),
    }
    Ok(())
}

// ── Argument helpers ──────────────────────────────────────────

fn arg<'a>(args: &'a [String], idx: usize, usage: &str) -> Result<&'a str> {
    args.get(idx)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow::anyhow!("{usage}"))
}

fn month_flag(args: &[String]) -> Result<Option<Month>> {
    args.windows(2)
        .find(|w| w[0] == "--month" || w[0] == "-m")
        .map(|w| Month::parse(&w[1]))
        .transpose()
        .map_err(Into::into)
}

pub(crate) fn shellexpand(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(rest))
            .unwrap_or_else(|| Path::new(".").join(rest)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
