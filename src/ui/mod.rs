//! Rendering.
//!
//! Signed out, the screen shows a centred auth form. Signed in, every
//! screen shares a tab bar at the top and a status bar at the bottom; the
//! body is drawn by the screen's own module.

mod cluster;
mod discover;
mod feed;
mod forms;
mod helpers;
mod messages;
mod posts;
mod profile;
mod theme;

pub use helpers::{preview, truncate};

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Tabs},
};

use crate::app::{App, Screen};
use helpers::{hint_line, spinner};
use theme::{selected_style, COLOR_DIM, COLOR_SUCCESS, COLOR_USERNAME};

/// Draw the whole UI for the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    if app.screen.is_auth() {
        forms::render_auth(frame, app);
        return;
    }

    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);
    match app.screen {
        Screen::Feed => feed::render_feed(frame, app, body_area),
        Screen::Trending => feed::render_trending(frame, app, body_area),
        Screen::Discover => discover::render_discover(frame, app, body_area),
        Screen::Messages => messages::render_messages(frame, app, body_area),
        Screen::Profile => profile::render_profile(frame, app, body_area),
        Screen::Cluster => cluster::render_cluster(frame, app, body_area),
        Screen::Login | Screen::Register => {}
    }
    render_status_bar(frame, app, status_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let who = app
        .ctx
        .session
        .user()
        .map(|u| format!("{} (@{}) ", u.display_name(), u.username))
        .unwrap_or_default();
    let [tabs_area, user_area] = Layout::horizontal([
        Constraint::Min(10),
        Constraint::Length(who.chars().count() as u16),
    ])
    .areas(area);

    let unread = app.ctx.messages.total_unread();
    let titles = Screen::TABS.iter().enumerate().map(|(i, screen)| {
        if *screen == Screen::Messages && unread > 0 {
            format!("{} {} ({})", i + 1, screen.title(), unread)
        } else {
            format!("{} {}", i + 1, screen.title())
        }
    });
    let tabs = Tabs::new(titles)
        .select(app.screen.tab_index())
        .style(Style::default().fg(COLOR_DIM))
        .highlight_style(selected_style())
        .divider("│");
    frame.render_widget(tabs, tabs_area);
    frame.render_widget(
        Paragraph::new(Span::styled(who, Style::default().fg(COLOR_USERNAME))),
        user_area,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.is_busy() {
        Line::from(format!("{} loading", spinner(app.tick_count)))
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(status.clone(), Style::default().fg(COLOR_SUCCESS)))
    } else {
        hint_line(screen_help(app.screen))
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Key hints for the status bar.
fn screen_help(screen: Screen) -> &'static str {
    match screen {
        Screen::Feed => "[n] new post  [m] mode  [l] like  [v] likes  [Enter] author  [Tab] next  [X] sign out  [q] quit",
        Screen::Trending | Screen::Profile => {
            "[l] like  [v] likes  [Enter] author  [r] refresh  [Tab] next  [q] quit"
        }
        Screen::Discover => "[f] follow  [Enter] profile  [r] refresh  [Tab] next  [q] quit",
        Screen::Messages => "[c] new  [n] write  [Enter] open  [r] refresh  [Tab] next  [q] quit",
        Screen::Cluster => "[a] auto-refresh  [r] refresh  [Tab] next  [q] quit",
        Screen::Login | Screen::Register => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{drain, test_app};
    use crate::adapters::MockResponse;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_login_screen() {
        let (mut app, _, _) = test_app();
        app.start();
        let text = screen_text(&app);
        assert!(text.contains("Sign in with your username."));
        assert!(text.contains("Username:"));
    }

    #[tokio::test]
    async fn test_feed_shows_posts_and_tags() {
        let (mut app, mock, _) = test_app();
        mock.set_default_response(MockResponse::json(
            200,
            json!([{"id": "p1", "author_username": "bob", "content": "hello plaza", "tags": ["rust"], "likes_count": 4}]),
        ));
        app.start_demo();
        drain(&mut app).await;

        let text = screen_text(&app);
        assert!(text.contains("@bob"));
        assert!(text.contains("hello plaza"));
        assert!(text.contains("#rust"));
        assert!(text.contains("Alice Smith (@alice)"));
    }

    #[tokio::test]
    async fn test_feed_error_shows_retry() {
        let (mut app, mock, _) = test_app();
        mock.set_default_response(MockResponse::unreachable());
        app.start_demo();
        drain(&mut app).await;

        let text = screen_text(&app);
        assert!(text.contains("Could not connect to the server."));
        assert!(text.contains("[r] retry"));
    }

    #[tokio::test]
    async fn test_every_tab_renders() {
        let (mut app, mock, _) = test_app();
        mock.set_default_response(MockResponse::json(200, json!([])));
        app.start_demo();
        for screen in Screen::TABS {
            app.navigate(screen);
            drain(&mut app).await;
            let text = screen_text(&app);
            assert!(text.contains(screen.title()), "{:?}", screen);
        }
    }

    #[tokio::test]
    async fn test_cluster_dashboard() {
        let (mut app, mock, _) = test_app();
        mock.set_response(
            "http://api.test/observability/cluster/health",
            MockResponse::json(
                200,
                json!({
                    "mode": "mock", "timestamp": "2024-05-10T12:00:00",
                    "cluster_state": "ok", "cluster_size": 1, "cluster_known_nodes": 1,
                    "cluster_slots_assigned": 16384, "cluster_slots_ok": 16384,
                    "cluster_slots_pfail": 0, "cluster_slots_fail": 0,
                    "nodes": [{"node_id": "a", "ip_port": "10.0.0.1:6379", "role": "master",
                               "state": "connected", "slots": "0-16383", "uptime_in_seconds": 90000}]
                }),
            ),
        );
        mock.set_response(
            "http://api.test/observability/cluster/slots",
            MockResponse::json(
                200,
                json!({"mode": "mock", "timestamp": "t", "slot_distributions": []}),
            ),
        );
        mock.set_response(
            "http://api.test/observability/mode",
            MockResponse::json(200, json!({"mode": "mock"})),
        );
        app.start_demo();
        app.navigate(Screen::Cluster);
        drain(&mut app).await;

        let text = screen_text(&app);
        assert!(text.contains("10.0.0.1:6379"));
        assert!(text.contains("100.0%"));
        assert!(text.contains("Mode: mock"));
        assert!(text.contains("1d 1h"));
    }
}
