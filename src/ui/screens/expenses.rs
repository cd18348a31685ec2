use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, panel, short_id, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No expenses recorded for {}", app.current_month),
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add-expense <category> <amount> [non-essential]",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(panel("Expenses (0)".into())),
            area,
        );
        return;
    }

    let header = Row::new(
        ["Month", "Category", "Type", "Amount", "ID"]
            .into_iter()
            .map(|h| Cell::from(h).style(theme::header_style())),
    );

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, entry)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let type_style = if entry.is_essential() {
                theme::essential_style()
            } else {
                theme::non_essential_style()
            };
            Row::new(vec![
                Cell::from(format!("  {}", entry.month)),
                Cell::from(truncate(entry.category.as_str(), 22)),
                Cell::from(Span::styled(entry.expense_type.as_str(), type_style)),
                Cell::from(Span::styled(
                    format_amount(entry.amount),
                    theme::expense_style(),
                )),
                Cell::from(Span::styled(short_id(&entry.id).to_string(), theme::dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(24),
        Constraint::Length(15),
        Constraint::Length(16),
        Constraint::Min(10),
    ];

    let stats = &app.stats;
    let title = format!(
        "Expenses ({}) essential {} | non-essential {}",
        app.expenses.len(),
        format_amount(stats.essential),
        format_amount(stats.non_essential)
    );
    let table = Table::new(rows, widths).header(header).block(panel(title));

    f.render_widget(table, area);
}
