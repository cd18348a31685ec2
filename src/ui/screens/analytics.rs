use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::analytics::MonthStats;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_ratio, panel};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(5)])
        .split(area);

    render_comparison(f, chunks[0], app);
    render_trend(f, chunks[1], app);
}

fn render_comparison(f: &mut Frame, area: Rect, app: &App) {
    let cmp = &app.comparison;
    let (a, b) = (&cmp.a, &cmp.b);

    let header = Row::new(
        [
            String::new(),
            a.month.to_string(),
            b.month.to_string(),
            "Change".to_string(),
        ]
        .into_iter()
        .map(|h| Cell::from(h).style(theme::header_style())),
    );

    let risk = |s: &MonthStats| match s.latest_risk {
        Some(level) => Cell::from(Span::styled(
            level.as_str(),
            Style::default().fg(theme::risk_color(level)),
        )),
        None => Cell::from(Span::styled("-", theme::dim_style())),
    };

    let rows = vec![
        amount_row("Income", a.income, b.income, cmp.income_delta(), true),
        amount_row("Spending", a.spending, b.spending, cmp.spending_delta(), false),
        amount_row(
            "Essential",
            a.essential,
            b.essential,
            b.essential - a.essential,
            false,
        ),
        amount_row(
            "Non-essential",
            a.non_essential,
            b.non_essential,
            b.non_essential - a.non_essential,
            false,
        ),
        Row::new(vec![
            Cell::from("  Savings ratio"),
            Cell::from(format_ratio(a.savings_ratio)),
            Cell::from(format_ratio(b.savings_ratio)),
            Cell::from(format!(
                "spending {}",
                signed(format_ratio(cmp.spending_change()), cmp.spending_change())
            )),
        ]),
        Row::new(vec![Cell::from("  Latest risk"), risk(a), risk(b), Cell::from("")]),
    ];

    let widths = [
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, widths).header(header).block(panel(format!(
        "Compare {} with {}",
        a.month, b.month
    )));
    f.render_widget(table, area);
}

/// A row of two amounts and their difference, colored by whether the move is good.
fn amount_row(label: &str, a: Decimal, b: Decimal, delta: Decimal, up_is_good: bool) -> Row<'static> {
    let style = if delta == Decimal::ZERO {
        theme::dim_style()
    } else if (delta > Decimal::ZERO) == up_is_good {
        theme::income_style()
    } else {
        theme::expense_style()
    };
    Row::new(vec![
        Cell::from(format!("  {label}")),
        Cell::from(format_amount(a)),
        Cell::from(format_amount(b)),
        Cell::from(Span::styled(signed(format_amount(delta), delta), style)),
    ])
}

fn signed(text: String, value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{text}")
    } else {
        text
    }
}

fn render_trend(f: &mut Frame, area: Rect, app: &App) {
    if app.trend.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No income or expenses recorded yet",
                theme::dim_style(),
            )))
            .centered()
            .block(panel("Trend".into())),
            area,
        );
        return;
    }

    let header = Row::new(
        ["Month", "Income", "Spending", "Savings ratio"]
            .into_iter()
            .map(|h| Cell::from(h).style(theme::header_style())),
    );

    // Newest months at the top, keeping as many as fit.
    let height = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = app
        .trend
        .iter()
        .rev()
        .take(height)
        .enumerate()
        .map(|(i, point)| {
            let style = if point.month == app.current_month {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let ratio_style = if point.savings_ratio < Decimal::ZERO {
                theme::expense_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(format!("  {}", point.month)),
                Cell::from(format_amount(point.income)),
                Cell::from(format_amount(point.spending)),
                Cell::from(Span::styled(format_ratio(point.savings_ratio), ratio_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Min(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!("Trend ({} months)", app.trend.len())));
    f.render_widget(table, area);
}
