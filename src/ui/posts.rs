//! Post list shared by the feed, trending and profile screens.

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::helpers::{hint_line, panel, truncate};
use super::theme::{selected_style, COLOR_DIM, COLOR_LIKE, COLOR_TAG, COLOR_USERNAME};
use crate::app::App;
use crate::models::{format_relative, Post};

/// Lines for one post: header, content, tags.
pub fn post_item(app: &App, post: &Post, width: usize, rank: Option<usize>) -> ListItem<'static> {
    let posts = &app.ctx.posts;
    let liked = app
        .ctx
        .session
        .username()
        .map(|u| posts.is_liked_by(&post.id, u))
        .unwrap_or(false);
    let heart = if posts.is_like_pending(&post.id) {
        "…"
    } else if liked {
        "♥"
    } else {
        "♡"
    };

    let mut header = Vec::new();
    if let Some(rank) = rank {
        header.push(Span::styled(
            format!("#{} ", rank),
            Style::default().fg(COLOR_DIM),
        ));
    }
    header.push(Span::styled(
        format!("@{}", post.author_username),
        Style::default()
            .fg(COLOR_USERNAME)
            .add_modifier(Modifier::BOLD),
    ));
    header.push(Span::styled(
        format!("  {}", format_relative(post.created_at.as_deref())),
        Style::default().fg(COLOR_DIM),
    ));
    header.push(Span::styled(
        format!("  {} {}", heart, posts.likes_count(post)),
        Style::default().fg(COLOR_LIKE),
    ));

    let mut lines = vec![Line::from(header)];
    for content_line in post.content.lines() {
        lines.push(Line::from(truncate(content_line, width)));
    }
    if !post.tags().is_empty() {
        lines.push(Line::from(Span::styled(
            truncate(&post.hashtags(), width),
            Style::default().fg(COLOR_TAG),
        )));
    }
    if let Some(likes) = posts.likes(&post.id).filter(|l| !l.users.is_empty()) {
        lines.push(Line::from(Span::styled(
            truncate(&format!("liked by {}", likes.users.join(", ")), width),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines.push(Line::default());
    ListItem::new(lines)
}

/// Render `posts` as a selectable list inside a titled panel.
pub fn render_post_list(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    posts: &[Post],
    empty_text: &str,
    ranked: bool,
) {
    let block = panel(title);
    if posts.is_empty() {
        let text = if app.is_busy() { "Loading…" } else { empty_text };
        frame.render_widget(Paragraph::new(hint_line(text)).block(block), area);
        return;
    }
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| post_item(app, post, width, ranked.then_some(i + 1)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style())
        .highlight_symbol("▌");
    let mut state = ListState::default().with_selected(Some(app.selected.min(posts.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
