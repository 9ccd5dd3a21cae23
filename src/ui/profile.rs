//! Profile screen.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::forms::render_inline_form;
use super::helpers::{error_line, hint_line, panel, truncate};
use super::posts::render_post_list;
use super::theme::{title_style, COLOR_ACCENT, COLOR_DIM, COLOR_SUCCESS, COLOR_USERNAME};
use crate::app::{App, Editor};
use crate::models::format_relative;

pub fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let profile = &app.ctx.profile;
    let looking_up = app.editor == Some(Editor::ProfileLookup);
    let [lookup_area, header_area, error_area, body] = Layout::vertical([
        Constraint::Length(if looking_up { 3 } else { 0 }),
        Constraint::Length(6),
        Constraint::Length(profile.error().is_some() as u16),
        Constraint::Min(3),
    ])
    .areas(area);

    if looking_up {
        render_inline_form(frame, lookup_area, &app.lookup_form, "View profile");
    }
    render_header(frame, app, header_area);
    if let Some(notice) = profile.error() {
        frame.render_widget(Paragraph::new(error_line(notice, true)), error_area);
    }

    let [posts_area, following_area] =
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(body);
    render_post_list(
        frame,
        posts_area,
        app,
        &format!("Posts ({})", profile.user_posts().len()),
        profile.user_posts(),
        "No posts yet.",
        false,
    );

    let width = following_area.width.saturating_sub(4) as usize;
    let following: Vec<Line> = profile
        .following()
        .iter()
        .map(|u| {
            Line::from(Span::styled(
                truncate(&format!("@{}", u.username), width),
                Style::default().fg(COLOR_USERNAME),
            ))
        })
        .collect();
    let title = format!("Following ({})", following.len());
    frame.render_widget(Paragraph::new(following).block(panel(&title)), following_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let profile = &app.ctx.profile;
    let own = profile.target().is_some() && profile.target() == app.ctx.session.username();

    let mut lines = Vec::new();
    match profile.profile_user() {
        Some(user) => {
            let mut name = vec![
                Span::styled(user.display_name().to_string(), title_style()),
                Span::styled(format!("  @{}", user.username), Style::default().fg(COLOR_USERNAME)),
            ];
            if !own {
                let (label, color) = if profile.is_follow_pending() {
                    ("  …", COLOR_DIM)
                } else if profile.is_following() {
                    ("  ✓ following", COLOR_SUCCESS)
                } else {
                    ("  not following", COLOR_DIM)
                };
                name.push(Span::styled(label, Style::default().fg(color)));
            }
            lines.push(Line::from(name));
            if let Some(bio) = user.bio.as_deref().filter(|b| !b.trim().is_empty()) {
                lines.push(Line::from(bio.to_string()));
            }
            let mut meta = user.email.clone();
            if user.created_at.is_some() {
                meta.push_str(&format!("  joined {}", format_relative(user.created_at.as_deref())));
            }
            lines.push(Line::from(Span::styled(meta, Style::default().fg(COLOR_DIM))));
        }
        None if profile.is_loading() => lines.push(hint_line("Loading…")),
        None => lines.push(hint_line("No profile loaded.")),
    }

    let help = if own {
        " [u] view user  [l] like "
    } else {
        " [f] follow/unfollow  [m] message  [h] my profile  [u] view user "
    };
    let block = panel("Profile")
        .title_bottom(hint_line(help))
        .border_style(Style::default().fg(if own { COLOR_ACCENT } else { COLOR_DIM }));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
