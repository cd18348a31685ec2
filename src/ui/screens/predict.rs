use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::predict::Prediction;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_ratio, panel, short_id};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(5)])
        .split(area);

    match &app.last_prediction {
        Some(prediction) => render_result(f, chunks[0], prediction),
        None => render_prompt(f, chunks[0], app),
    }
    render_history(f, chunks[1], app);
}

fn render_prompt(f: &mut Frame, area: Rect, app: &App) {
    let msg = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No prediction run for {} this session", app.current_month),
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or :run to assess the month",
            theme::dim_style(),
        )),
    ];
    f.render_widget(
        Paragraph::new(msg).centered().block(panel("Prediction".into())),
        area,
    );
}

fn render_result(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let entry = &prediction.entry;
    let level = entry.risk_level;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::risk_border_style(level))
        .title(Span::styled(
            format!(" Prediction {} ", entry.month),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)])
        .split(inner);

    let metric = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<20}"), theme::dim_style()),
            Span::styled(value, theme::normal_style()),
        ])
    };
    let figures = vec![
        Line::from(Span::styled(
            format!(" {} ", level.label()),
            theme::risk_badge_style(level),
        )),
        Line::from(""),
        metric("Income", format_amount(entry.total_income)),
        metric("Spending", format_amount(entry.total_spending)),
        metric("Savings ratio", format_ratio(entry.savings_ratio)),
        metric("Essential", format_ratio(entry.essential_ratio)),
        metric("Non-essential", format_ratio(entry.non_essential_ratio)),
        metric("Expense growth", format_ratio(entry.expense_growth_rate)),
    ];
    f.render_widget(Paragraph::new(figures), cols[0]);

    let mut advice = vec![Line::from(Span::styled(
        "Suggestions",
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))];
    advice.extend(prediction.suggestions.iter().map(|s| {
        Line::from(vec![
            Span::styled("\u{2022} ", Style::default().fg(theme::risk_color(level))),
            Span::styled(s.as_str(), theme::normal_style()),
        ])
    }));
    f.render_widget(Paragraph::new(advice).wrap(Wrap { trim: true }), cols[1]);
}

fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let total = app.snapshot.predictions.len();
    if total == 0 {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No predictions recorded",
                theme::dim_style(),
            )))
            .centered()
            .block(panel("History (0)".into())),
            area,
        );
        return;
    }

    let header = Row::new(
        ["Month", "Risk", "Savings", "Income", "Spending", "Recorded", "ID"]
            .into_iter()
            .map(|h| Cell::from(h).style(theme::header_style())),
    );

    let rows: Vec<Row> = app
        .prediction_history()
        .enumerate()
        .skip(app.prediction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, entry)| {
            let style = if i == app.prediction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let recorded = entry.created_at.get(..16).unwrap_or(entry.created_at.as_str());
            Row::new(vec![
                Cell::from(format!("  {}", entry.month)),
                Cell::from(Span::styled(
                    entry.risk_level.as_str(),
                    Style::default().fg(theme::risk_color(entry.risk_level)),
                )),
                Cell::from(format_ratio(entry.savings_ratio)),
                Cell::from(format_amount(entry.total_income)),
                Cell::from(format_amount(entry.total_spending)),
                Cell::from(recorded.replace('T', " ")),
                Cell::from(Span::styled(short_id(&entry.id).to_string(), theme::dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(17),
        Constraint::Min(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!("History ({total})")));

    f.render_widget(table, area);
}
