use ratatui::style::{Color, Modifier, Style};

use crate::models::RiskLevel;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

/// Badge colors for one risk level: text, fill and outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RiskPalette {
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) border: Color,
}

pub(crate) fn risk_palette(level: RiskLevel) -> RiskPalette {
    match level {
        RiskLevel::Low => RiskPalette {
            fg: Color::Rgb(5, 150, 105),
            bg: Color::Rgb(236, 253, 245),
            border: Color::Rgb(167, 243, 208),
        },
        RiskLevel::Medium => RiskPalette {
            fg: Color::Rgb(217, 119, 6),
            bg: Color::Rgb(255, 251, 235),
            border: Color::Rgb(253, 230, 138),
        },
        RiskLevel::High => RiskPalette {
            fg: Color::Rgb(220, 38, 38),
            bg: Color::Rgb(254, 242, 242),
            border: Color::Rgb(254, 202, 202),
        },
    }
}

/// Chart color for a risk level, parsed from [`RiskLevel::chart_color`].
pub(crate) fn risk_color(level: RiskLevel) -> Color {
    let hex = level.chart_color().trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(0)
    };
    Color::Rgb(channel(0), channel(2), channel(4))
}

pub(crate) fn risk_badge_style(level: RiskLevel) -> Style {
    let p = risk_palette(level);
    Style::default()
        .fg(p.fg)
        .bg(p.bg)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn risk_border_style(level: RiskLevel) -> Style {
    Style::default().fg(risk_palette(level).border)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn essential_style() -> Style {
    Style::default().fg(ACCENT)
}

pub(crate) fn non_essential_style() -> Style {
    Style::default().fg(YELLOW)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(OVERLAY)
}
