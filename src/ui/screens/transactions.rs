use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::query::TypeFilter;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = title(app);

    if app.transactions.is_empty() {
        let hint = if app.search_input.is_empty() && app.type_filter == TypeFilter::All {
            "Add one with :add <date>, <description>, <amount>, <income|expense>, <category>"
        } else {
            "Press Esc or :clear to reset the filter"
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No matching transactions", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(title, theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Type", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };

            let amount_str = if txn.is_income() {
                format!("+{}", format_amount(txn.amount))
            } else {
                format_amount(txn.signed_amount())
            };

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date.format("%Y-%m-%d").to_string()),
                Cell::from(txn.kind.as_str()),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(title, theme::title_style())),
    );

    f.render_widget(table, area);
}

fn title(app: &App) -> String {
    let mut title = format!(" Transactions ({}) ", app.transactions.len());
    if app.type_filter != TypeFilter::All {
        title.push_str(&format!("[{}] ", app.type_filter));
    }
    if !app.search_input.is_empty() {
        title.push_str(&format!("search: '{}' ", app.search_input));
    }
    title
}
