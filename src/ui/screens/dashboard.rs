use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::{App, TREND_MONTHS};
use crate::ui::theme;
use crate::ui::util::{chart_value, format_amount, format_ratio, panel, truncate};

/// Predictions shown in the risk history chart.
const RISK_HISTORY_BARS: usize = 12;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Charts
            Constraint::Length(3), // Spending trend sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);
    render_category_chart(f, charts[0], app);
    render_risk_history(f, charts[1], app);

    render_trend_sparkline(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let stats = &app.stats;

    render_card(
        f,
        cards[0],
        "Income",
        format_amount(stats.income),
        Style::default().fg(theme::GREEN),
        format!("{} entries", app.income.len()),
    );
    render_card(
        f,
        cards[1],
        "Spending",
        format_amount(stats.spending),
        Style::default().fg(theme::RED),
        format!(
            "{} essential / {} other",
            format_amount(stats.essential),
            format_amount(stats.non_essential)
        ),
    );
    render_card(
        f,
        cards[2],
        "Savings Ratio",
        format_ratio(stats.savings_ratio),
        Style::default().fg(if stats.savings >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        }),
        format!("{} saved", format_amount(stats.savings)),
    );

    match stats.latest_risk {
        Some(level) => render_card(
            f,
            cards[3],
            "Risk",
            format!(" {} ", level.label()),
            theme::risk_badge_style(level),
            "latest prediction".into(),
        ),
        None => render_card(
            f,
            cards[3],
            "Risk",
            "not predicted".into(),
            theme::dim_style(),
            ":run to assess".into(),
        ),
    }
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, style: Style, sub: String) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(value, style.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(sub, theme::dim_style())),
    ])
    .centered()
    .block(panel(title.to_string()));

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Spending by Category ({})", app.current_month);
    if app.category_breakdown.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses for this month",
                theme::dim_style(),
            )),
            Line::from(Span::styled(
                "Add one with :add-expense <category> <amount>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(title));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .category_breakdown
        .iter()
        .map(|(category, total)| {
            Bar::default()
                .value(chart_value(*total))
                .text_value(format_amount(*total))
                .label(Line::from(truncate(category.as_str(), 10)))
                .style(Style::default().fg(theme::ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .value_style(
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(chart, area);
}

fn render_risk_history(f: &mut Frame, area: Rect, app: &App) {
    if app.risk_history.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No predictions yet", theme::dim_style())),
        ])
        .centered()
        .block(panel("Risk History".into()));
        f.render_widget(msg, area);
        return;
    }

    let skip = app.risk_history.len().saturating_sub(RISK_HISTORY_BARS);
    let bars: Vec<Bar> = app
        .risk_history
        .iter()
        .skip(skip)
        .map(|(month, level)| {
            let color = theme::risk_color(*level);
            Bar::default()
                .value(level.score())
                .text_value(level.as_str().chars().take(1).collect())
                .label(Line::from(format!("{:02}", month.month())))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Risk History".into()))
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .max(3);

    f.render_widget(chart, area);
}

fn render_trend_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .spending_trend
        .iter()
        .map(|p| chart_value(p.spending))
        .collect();

    let sparkline = Sparkline::default()
        .block(panel(format!("Spending, last {TREND_MONTHS} months")))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
