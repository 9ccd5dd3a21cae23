//! Colour palette.

use ratatui::style::{Color, Modifier, Style};

/// Borders and separators
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Titles and the selected tab
pub const COLOR_ACCENT: Color = Color::Cyan;

pub const COLOR_HEADER: Color = Color::White;

/// Timestamps, hints, secondary text
pub const COLOR_DIM: Color = Color::DarkGray;

pub const COLOR_USERNAME: Color = Color::LightBlue;

pub const COLOR_TAG: Color = Color::Magenta;

pub const COLOR_LIKE: Color = Color::LightRed;

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);

pub const COLOR_ERROR: Color = Color::Red;

/// Server-rejected requests, as opposed to an unreachable server
pub const COLOR_WARNING: Color = Color::Yellow;

pub fn selected_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::REVERSED)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD)
}
