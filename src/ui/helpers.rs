//! Formatting and layout helpers shared by the screens.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{title_style, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_WARNING};
use crate::state::ErrorNotice;

/// Loading spinner frames
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[((tick / 6) % SPINNER_FRAMES.len() as u64) as usize]
}

/// Cut `s` to at most `max_width` terminal columns, ending in "…" if cut.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// First line of `s`, truncated.
pub fn preview(s: &str, max_width: usize) -> String {
    truncate(s.lines().next().unwrap_or(""), max_width)
}

/// Rounded, titled block.
pub fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(format!(" {} ", title), title_style()))
}

/// Centre a `width` x `height` box inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Error line with a retry hint.
///
/// Unreachable-server errors read differently from rejections.
pub fn error_line(notice: &ErrorNotice, retry: bool) -> Line<'static> {
    let (icon, color) = if notice.is_network() {
        ("✗ ", COLOR_ERROR)
    } else {
        ("! ", COLOR_WARNING)
    };
    let mut spans = vec![
        Span::styled(icon, Style::default().fg(color)),
        Span::styled(notice.message.clone(), Style::default().fg(color)),
    ];
    if retry {
        spans.push(Span::styled("  [r] retry", Style::default().fg(COLOR_DIM)));
    }
    Line::from(spans)
}

/// Dim placeholder line.
pub fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(COLOR_DIM)))
}
