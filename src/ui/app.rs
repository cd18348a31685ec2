use anyhow::Result;
use rust_decimal::Decimal;

use crate::analytics::{self, MonthComparison, MonthStats, TrendPoint};
use crate::models::*;
use crate::predict::Prediction;
use crate::store::{RecordStore, Snapshot};

/// Months shown in the dashboard spending trend.
pub(crate) const TREND_MONTHS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Income,
    Expenses,
    Predict,
    Analytics,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Income,
            Self::Expenses,
            Self::Predict,
            Self::Analytics,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Income => write!(f, "Income"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Predict => write!(f, "Predict"),
            Self::Analytics => write!(f, "Analytics"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteIncome { id: String, label: String },
    DeleteExpense { id: String, label: String },
    DeletePrediction { id: String, label: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) current_month: Month,

    pub(crate) snapshot: Snapshot,

    // Dashboard
    pub(crate) stats: MonthStats,
    pub(crate) category_breakdown: Vec<(ExpenseCategory, Decimal)>,
    pub(crate) spending_trend: Vec<TrendPoint>,
    pub(crate) risk_history: Vec<(Month, RiskLevel)>,

    // Income / Expenses (current month only)
    pub(crate) income: Vec<IncomeEntry>,
    pub(crate) income_index: usize,
    pub(crate) income_scroll: usize,
    pub(crate) expenses: Vec<ExpenseEntry>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Predict
    pub(crate) last_prediction: Option<Prediction>,
    pub(crate) prediction_index: usize,
    pub(crate) prediction_scroll: usize,

    // Analytics
    pub(crate) compare_month: Month,
    pub(crate) comparison: MonthComparison,
    pub(crate) trend: Vec<TrendPoint>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(current_month: Month) -> Self {
        let snapshot = Snapshot::default();
        let compare_month = current_month.previous();
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month,

            stats: analytics::month_stats(current_month, &snapshot),
            category_breakdown: Vec::new(),
            spending_trend: Vec::new(),
            risk_history: Vec::new(),

            income: Vec::new(),
            income_index: 0,
            income_scroll: 0,
            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,

            last_prediction: None,
            prediction_index: 0,
            prediction_scroll: 0,

            compare_month,
            comparison: analytics::compare(compare_month, current_month, &snapshot),
            trend: Vec::new(),

            snapshot,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-read the store and rebuild every derived view for the current month.
    pub(crate) fn refresh_all(&mut self, store: &dyn RecordStore) -> Result<()> {
        self.snapshot = store.snapshot()?;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        let month = self.current_month;
        let snap = &self.snapshot;

        self.stats = analytics::month_stats(month, snap);
        self.category_breakdown = analytics::category_breakdown(month, &snap.expenses);
        self.spending_trend = analytics::trend(
            &analytics::recent_months(month, TREND_MONTHS),
            &snap.income,
            &snap.expenses,
        );
        self.risk_history = analytics::risk_history(&snap.predictions);

        self.income = snap
            .income
            .iter()
            .filter(|i| i.month == month)
            .cloned()
            .collect();
        self.expenses = snap
            .expenses
            .iter()
            .filter(|e| e.month == month)
            .cloned()
            .collect();

        self.comparison = analytics::compare(self.compare_month, month, snap);
        let months = analytics::known_months(&snap.income, &snap.expenses);
        self.trend = analytics::trend(&months, &snap.income, &snap.expenses);

        if self
            .last_prediction
            .as_ref()
            .is_some_and(|p| p.entry.month != month)
        {
            self.last_prediction = None;
        }

        self.income_index = clamp_index(self.income_index, self.income.len());
        self.expense_index = clamp_index(self.expense_index, self.expenses.len());
        self.prediction_index = clamp_index(self.prediction_index, self.snapshot.predictions.len());
    }

    /// Switch month, keeping the comparison month one behind it.
    pub(crate) fn set_month(&mut self, store: &dyn RecordStore, month: Month) -> Result<()> {
        self.current_month = month;
        self.compare_month = month.previous();
        self.income_index = 0;
        self.income_scroll = 0;
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.refresh_all(store)
    }

    /// Prediction history, newest first, as shown on the Predict screen.
    pub(crate) fn prediction_history(&self) -> impl Iterator<Item = &PredictionEntry> {
        self.snapshot.predictions.iter().rev()
    }

    pub(crate) fn selected_income(&self) -> Option<&IncomeEntry> {
        self.income.get(self.income_index)
    }

    pub(crate) fn selected_expense(&self) -> Option<&ExpenseEntry> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn selected_prediction(&self) -> Option<&PredictionEntry> {
        self.prediction_history().nth(self.prediction_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}
