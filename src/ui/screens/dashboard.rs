use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::query::CategoryBreakdown;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar_width, format_amount, truncate};

const LABEL_WIDTH: usize = 18;
const AMOUNT_WIDTH: usize = 14;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(5),    // Category breakdown
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_breakdown(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let balance = app.summary.balance;

    render_card(
        f,
        cards[0],
        "Income",
        app.summary.income,
        theme::GREEN,
        format!("{} txns", app.income_count),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        app.summary.expenses,
        theme::RED,
        format!("{} txns", app.expense_count),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        balance,
        if balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        format!("{} txns total", app.transaction_count),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color, subtitle: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(" Expenses by Category ", theme::title_style()));

    let totals = match &app.breakdown {
        CategoryBreakdown::NoData => {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Add one with :add <date>, <description>, <amount>, expense, <category>",
                    theme::dim_style(),
                )),
            ])
            .centered()
            .block(block);
            f.render_widget(msg, area);
            return;
        }
        CategoryBreakdown::Categories(totals) => totals,
    };

    // borders + spacing between columns
    let inner_width = area.width.saturating_sub(2) as usize;
    let track = inner_width.saturating_sub(LABEL_WIDTH + AMOUNT_WIDTH + 4);

    let lines: Vec<Line> = totals
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|cat| {
            let filled = bar_width(cat.percent, track);
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$} ", truncate(&cat.category, LABEL_WIDTH), width = LABEL_WIDTH),
                    theme::normal_style(),
                ),
                Span::styled("█".repeat(filled), theme::bar_style()),
                Span::raw(" ".repeat(track - filled)),
                Span::styled(
                    format!(" {:>width$}", format_amount(cat.amount), width = AMOUNT_WIDTH),
                    theme::expense_style(),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
