use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::risk::income_total;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, panel, short_id};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.income.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No income recorded for {}", app.current_month),
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add-income <amount>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg).centered().block(panel("Income (0)".into())),
            area,
        );
        return;
    }

    let header = Row::new(
        ["Month", "Amount", "ID"]
            .into_iter()
            .map(|h| Cell::from(h).style(theme::header_style())),
    );

    let rows: Vec<Row> = app
        .income
        .iter()
        .enumerate()
        .skip(app.income_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, entry)| {
            let style = if i == app.income_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(format!("  {}", entry.month)),
                Cell::from(Span::styled(
                    format_amount(entry.amount),
                    theme::income_style(),
                )),
                Cell::from(Span::styled(short_id(&entry.id).to_string(), theme::dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Min(10),
    ];

    let title = format!(
        "Income ({}) total {}",
        app.income.len(),
        format_amount(income_total(app.current_month, &app.income))
    );
    let table = Table::new(rows, widths).header(header).block(panel(title));

    f.render_widget(table, area);
}
