//! Messages screen: conversation list and the open conversation.

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use super::forms::render_inline_form;
use super::helpers::{error_line, hint_line, panel, preview, spinner};
use super::theme::{selected_style, COLOR_ACCENT, COLOR_DIM, COLOR_USERNAME};
use crate::app::{App, Editor};
use crate::models::format_relative;

pub fn render_messages(frame: &mut Frame, app: &App, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Length(32), Constraint::Min(20)]).areas(area);
    render_conversations(frame, app, left);
    render_conversation(frame, app, right);
}

fn render_conversations(frame: &mut Frame, app: &App, area: Rect) {
    let messages = &app.ctx.messages;
    let unread = messages.total_unread();
    let title = if unread > 0 {
        format!("Conversations ({} unread)", unread)
    } else {
        "Conversations".to_string()
    };
    let block = panel(&title).title_bottom(hint_line(" [c] new  [Enter] open "));

    if app.editor == Some(Editor::Peer) {
        let [form_area, _] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        render_inline_form(frame, form_area, &app.lookup_form, "Message who?");
        return;
    }
    if messages.conversations().is_empty() {
        frame.render_widget(
            Paragraph::new(hint_line("No conversations yet.")).block(block),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = messages
        .conversations()
        .iter()
        .map(|c| {
            let mut header = vec![Span::styled(
                format!("@{}", c.username),
                Style::default().fg(COLOR_USERNAME),
            )];
            if c.unread_count > 0 {
                header.push(Span::styled(
                    format!(" ({})", c.unread_count),
                    Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
                ));
            }
            let last = c.last_message.as_deref().unwrap_or("");
            ListItem::new(vec![
                Line::from(header),
                Line::from(Span::styled(preview(last, width), Style::default().fg(COLOR_DIM))),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style());
    let mut state = ListState::default()
        .with_selected(Some(app.selected.min(messages.conversations().len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_conversation(frame: &mut Frame, app: &App, area: Rect) {
    let messages = &app.ctx.messages;
    let Some(peer) = messages.current_conversation() else {
        frame.render_widget(
            Paragraph::new(hint_line("Pick a conversation, or press [c] to start one."))
                .block(panel("Conversation")),
            area,
        );
        return;
    };

    let composing = app.editor == Some(Editor::Message);
    let [error_area, history_area, composer_area] = Layout::vertical([
        Constraint::Length(messages.error().is_some() as u16),
        Constraint::Min(3),
        Constraint::Length(if composing { 3 } else { 0 }),
    ])
    .areas(area);

    if let Some(notice) = messages.error() {
        frame.render_widget(Paragraph::new(error_line(notice, true)), error_area);
    }

    let me = app.ctx.session.username().unwrap_or_default();
    let mut lines: Vec<Line> = Vec::new();
    for message in messages.messages() {
        let mine = message.is_from(me);
        let name_style = if mine {
            Style::default().fg(COLOR_ACCENT)
        } else {
            Style::default().fg(COLOR_USERNAME)
        };
        lines.push(Line::from(vec![
            Span::styled(
                if mine { "you".to_string() } else { message.sender_username.clone() },
                name_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_relative(message.created_at.as_deref())),
                Style::default().fg(COLOR_DIM),
            ),
        ]));
        lines.push(Line::from(message.content.clone()));
    }
    if lines.is_empty() {
        lines.push(hint_line(if messages.is_loading() {
            "Loading…"
        } else {
            "No messages yet. Press [n] to say hi."
        }));
    }

    let title = if messages.is_sending() {
        format!("@{} {} sending", peer, spinner(app.tick_count))
    } else {
        format!("@{}", peer)
    };
    // Keep the newest messages in view.
    let inner_height = history_area.height.saturating_sub(2);
    let scroll = (lines.len() as u16).saturating_sub(inner_height);
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel(&title).title_bottom(hint_line(" [n] write ")))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        history_area,
    );

    if composing {
        render_inline_form(frame, composer_area, &app.message_form, "Message");
    }
}
