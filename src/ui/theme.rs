use ratatui::style::{Color, Modifier, Style};

// Gruvbox dark
pub(crate) const BG: Color = Color::Rgb(40, 40, 40);
pub(crate) const BG_SOFT: Color = Color::Rgb(50, 48, 47);
pub(crate) const BG_DEEP: Color = Color::Rgb(29, 32, 33);
pub(crate) const FG: Color = Color::Rgb(235, 219, 178);
pub(crate) const FG_DIM: Color = Color::Rgb(146, 131, 116);
pub(crate) const BORDER: Color = Color::Rgb(80, 73, 69);
pub(crate) const ACCENT: Color = Color::Rgb(131, 165, 152);
pub(crate) const GREEN: Color = Color::Rgb(184, 187, 38);
pub(crate) const RED: Color = Color::Rgb(251, 73, 52);
pub(crate) const YELLOW: Color = Color::Rgb(250, 189, 47);
pub(crate) const ORANGE: Color = Color::Rgb(254, 128, 25);

pub(crate) fn header_style() -> Style {
    Style::default().fg(FG).bg(BG).add_modifier(Modifier::BOLD)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(FG_DIM).add_modifier(Modifier::BOLD)
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(BORDER)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(FG)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(FG_DIM)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn bar_style() -> Style {
    Style::default().fg(ORANGE)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(FG).bg(BG_SOFT)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(FG).bg(BG_DEEP)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(FG_DIM).bg(BG_SOFT)
}
