//! Feed screen: mode selector, composer, posts.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Tabs},
};

use super::helpers::error_line;
use super::posts::render_post_list;
use super::theme::{selected_style, COLOR_DIM};
use crate::app::{App, Editor};
use crate::models::FeedMode;

pub fn render_feed(frame: &mut Frame, app: &App, area: Rect) {
    let feed = &app.ctx.feed;
    let composing = app.editor == Some(Editor::Post);
    let errors: Vec<Line> = [feed.error(), app.ctx.posts.error()]
        .into_iter()
        .flatten()
        .map(|notice| error_line(notice, true))
        .collect();

    let [modes_area, composer_area, error_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(if composing { 4 } else { 0 }),
        Constraint::Length(errors.len() as u16),
        Constraint::Min(3),
    ])
    .areas(area);

    let selected = FeedMode::ALL
        .iter()
        .position(|m| *m == feed.mode())
        .unwrap_or(0);
    let modes = Tabs::new(FeedMode::ALL.iter().map(|m| m.label()))
        .select(selected)
        .style(Style::default().fg(COLOR_DIM))
        .highlight_style(selected_style())
        .divider("│");
    frame.render_widget(modes, modes_area);

    if composing {
        super::forms::render_inline_form(frame, composer_area, &app.post_form, "New post");
    }
    if !errors.is_empty() {
        frame.render_widget(Paragraph::new(errors), error_area);
    }

    let mut title = format!("{} feed", feed.mode().label());
    if feed.has_more() {
        title.push_str(" (more available)");
    }
    render_post_list(
        frame,
        list_area,
        app,
        &title,
        feed.posts(),
        "No posts yet. Press [n] to write one.",
        false,
    );
}

pub fn render_trending(frame: &mut Frame, app: &App, area: Rect) {
    let trending = &app.ctx.trending;
    let [error_area, list_area] = Layout::vertical([
        Constraint::Length(trending.error().is_some() as u16),
        Constraint::Min(3),
    ])
    .areas(area);
    if let Some(notice) = trending.error() {
        frame.render_widget(Paragraph::new(error_line(notice, true)), error_area);
    }
    render_post_list(
        frame,
        list_area,
        app,
        "Trending",
        trending.posts(),
        "Nothing is trending.",
        true,
    );
}
