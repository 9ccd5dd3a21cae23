//! Discover screen: follow suggestions and the user directory.

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::helpers::{error_line, hint_line, panel, truncate};
use super::theme::{selected_style, COLOR_ACCENT, COLOR_DIM, COLOR_USERNAME};
use crate::app::App;

pub fn render_discover(frame: &mut Frame, app: &App, area: Rect) {
    let social = &app.ctx.social;
    let [error_area, body] = Layout::vertical([
        Constraint::Length(social.error().is_some() as u16),
        Constraint::Min(3),
    ])
    .areas(area);
    if let Some(notice) = social.error() {
        frame.render_widget(Paragraph::new(error_line(notice, true)), error_area);
    }

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    render_suggestions(frame, app, left);
    render_directory(frame, app, right);
}

fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let social = &app.ctx.social;
    let block = panel("People you may know");
    if social.suggestions().is_empty() {
        let text = if social.is_loading() {
            "Loading…"
        } else {
            "No suggestions right now."
        };
        frame.render_widget(Paragraph::new(hint_line(text)).block(block), area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = social
        .suggestions()
        .iter()
        .map(|s| {
            let mut header = vec![Span::styled(
                format!("@{}", s.username),
                Style::default()
                    .fg(COLOR_USERNAME)
                    .add_modifier(Modifier::BOLD),
            )];
            if let Some(name) = &s.name {
                header.push(Span::raw(format!("  {}", name)));
            }
            if social.is_follow_pending(&s.username) {
                header.push(Span::styled("  following…", Style::default().fg(COLOR_ACCENT)));
            }
            let mut lines = vec![Line::from(header)];
            if let Some(count) = s.mutual_connections.filter(|c| *c > 0) {
                lines.push(Line::from(Span::styled(
                    format!("{} mutual connection{}", count, if count == 1 { "" } else { "s" }),
                    Style::default().fg(COLOR_DIM),
                )));
            }
            if let Some(bio) = &s.bio {
                lines.push(Line::from(truncate(bio, width)));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block.title_bottom(hint_line(" [f] follow  [Enter] profile ")))
        .highlight_style(selected_style())
        .highlight_symbol("▌");
    let mut state = ListState::default()
        .with_selected(Some(app.selected.min(social.suggestions().len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_directory(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let lines: Vec<Line> = app
        .ctx
        .social
        .users()
        .iter()
        .map(|u| {
            Line::from(vec![
                Span::styled(
                    format!("@{}", u.username),
                    Style::default().fg(COLOR_USERNAME),
                ),
                Span::styled(
                    format!("  {}", truncate(u.display_name(), width.saturating_sub(u.username.len() + 3))),
                    Style::default().fg(COLOR_DIM),
                ),
            ])
        })
        .collect();
    let title = format!("All users ({})", lines.len());
    frame.render_widget(Paragraph::new(lines).block(panel(&title)), area);
}
