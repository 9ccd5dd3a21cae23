//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Editor, Form, Screen};
use crate::models::Post;

impl App {
    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Register => self.handle_register_key(key),
            _ if self.editor.is_some() => self.handle_editor_key(key),
            _ => self.handle_browse_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Tab => {
                self.ctx.session.clear_error();
                self.navigate(Screen::Register);
            }
            KeyCode::Enter => self.submit_login(),
            code => edit_form(&mut self.login_form, code),
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.ctx.session.clear_error();
                self.navigate(Screen::Login);
            }
            KeyCode::Tab | KeyCode::Down => self.register_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.register_form.focus_prev(),
            KeyCode::Enter if self.register_form.is_last_focused() => self.submit_register(),
            KeyCode::Enter => self.register_form.focus_next(),
            code => edit_form(&mut self.register_form, code),
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.editor = None,
            KeyCode::Enter => self.submit_editor(),
            code => {
                if let Some(form) = self.editor_form() {
                    edit_form(form, code);
                }
            }
        }
    }

    /// Form backing the open editor.
    pub fn editor_form(&mut self) -> Option<&mut Form> {
        match self.editor? {
            Editor::Post => Some(&mut self.post_form),
            Editor::Message => Some(&mut self.message_form),
            Editor::Peer | Editor::ProfileLookup => Some(&mut self.lookup_form),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => return self.quit(),
            KeyCode::Tab => return self.next_screen(),
            KeyCode::BackTab => return self.prev_screen(),
            KeyCode::Char('r') => return self.retry(),
            KeyCode::Char('X') => return self.sign_out(),
            KeyCode::Up | KeyCode::Char('k') => return self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => return self.move_down(),
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                return self.navigate(Screen::TABS[index]);
            }
            _ => {}
        }
        self.status = None;
        match self.screen {
            Screen::Feed => self.handle_feed_key(key.code),
            Screen::Trending => self.handle_post_list_key(key.code),
            Screen::Discover => self.handle_discover_key(key.code),
            Screen::Messages => self.handle_messages_key(key.code),
            Screen::Profile => self.handle_profile_key(key.code),
            Screen::Cluster => {
                if key.code == KeyCode::Char('a') {
                    let on = self.ctx.cluster.toggle_auto_refresh();
                    tracing::info!("Cluster auto-refresh {}", if on { "on" } else { "off" });
                }
            }
            Screen::Login | Screen::Register => {}
        }
    }

    fn handle_feed_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('n') => {
                self.ctx.posts.clear_error();
                self.editor = Some(Editor::Post);
            }
            KeyCode::Char('m') => self.cycle_feed_mode(),
            code => self.handle_post_list_key(code),
        }
    }

    /// Keys shared by every list of posts.
    fn handle_post_list_key(&mut self, code: KeyCode) {
        let Some((id, author)) = self
            .selected_post()
            .map(|p| (p.id.clone(), p.author_username.clone()))
        else {
            return;
        };
        match code {
            KeyCode::Char('l') => self.toggle_like(&id),
            KeyCode::Char('v') => self.load_likes(&id),
            KeyCode::Enter | KeyCode::Char('p') => self.open_profile(&author),
            _ => {}
        }
    }

    fn handle_discover_key(&mut self, code: KeyCode) {
        let Some(username) = self
            .ctx
            .social
            .suggestions()
            .get(self.selected)
            .map(|s| s.username.clone())
        else {
            return;
        };
        match code {
            KeyCode::Char('f') => self.follow_suggestion(&username),
            KeyCode::Enter | KeyCode::Char('p') => self.open_profile(&username),
            _ => {}
        }
    }

    fn handle_messages_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('c') => {
                self.lookup_form.reset();
                self.editor = Some(Editor::Peer);
            }
            KeyCode::Char('n') if self.ctx.messages.current_conversation().is_some() => {
                self.ctx.messages.clear_error();
                self.editor = Some(Editor::Message);
            }
            KeyCode::Enter => {
                if let Some(peer) = self
                    .ctx
                    .messages
                    .conversations()
                    .get(self.selected)
                    .map(|c| c.username.clone())
                {
                    self.load_conversation(&peer);
                }
            }
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('f') => self.toggle_profile_follow(),
            KeyCode::Char('u') => {
                self.lookup_form.reset();
                self.editor = Some(Editor::ProfileLookup);
            }
            KeyCode::Char('h') => {
                self.profile_target = None;
                self.navigate(Screen::Profile);
            }
            KeyCode::Char('m') => {
                let target = self.ctx.profile.target().map(str::to_string);
                if let Some(target) = target.filter(|t| Some(t.as_str()) != self.ctx.session.username()) {
                    self.open_conversation(&target);
                }
            }
            code => self.handle_post_list_key(code),
        }
    }

    /// Post under the cursor on the current screen.
    pub fn selected_post(&self) -> Option<&Post> {
        let posts = match self.screen {
            Screen::Feed => self.ctx.feed.posts(),
            Screen::Trending => self.ctx.trending.posts(),
            Screen::Profile => self.ctx.profile.user_posts(),
            _ => return None,
        };
        posts.get(self.selected)
    }
}

fn edit_form(form: &mut Form, code: KeyCode) {
    match code {
        KeyCode::Char(c) => form.push(c),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::MockResponse;
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        text.chars().for_each(|c| press(app, KeyCode::Char(c)));
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_anywhere() {
        let (mut app, _, _) = test_app();
        app.start();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_q_is_text_in_editor() {
        let (mut app, _, _) = test_app();
        app.start_demo();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "quit");

        assert!(!app.should_quit);
        assert_eq!(app.post_form.value(0), "quit");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.editor, None);
    }

    #[tokio::test]
    async fn test_digit_jumps_to_tab() {
        let (mut app, _, _) = test_app();
        app.start_demo();
        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.screen, Screen::Cluster);
        press(&mut app, KeyCode::Char('a'));
        assert!(app.ctx.cluster.auto_refresh());
    }

    #[tokio::test]
    async fn test_register_tab_walks_fields() {
        let (mut app, _, _) = test_app();
        app.start();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.screen, Screen::Register);

        type_text(&mut app, "carol");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "c@x.io");

        assert_eq!(app.register_form.value(0), "carol");
        assert_eq!(app.register_form.value(1), "c@x.io");
    }

    #[tokio::test]
    async fn test_follow_from_discover() {
        let (mut app, mock, _) = test_app();
        mock.set_response(
            "http://api.test/users/alice/suggestions",
            MockResponse::json(200, json!([{"username": "bob"}])),
        );
        mock.set_default_response(MockResponse::json(200, json!([])));
        mock.set_method_response(
            "POST",
            "http://api.test/users/alice/follow/bob",
            MockResponse::json(200, json!({"message": "ok"})),
        );
        app.start_demo();
        press(&mut app, KeyCode::Char('3'));
        drain(&mut app).await;
        assert_eq!(app.ctx.social.suggestions().len(), 1);

        press(&mut app, KeyCode::Char('f'));
        drain(&mut app).await;

        assert!(app.ctx.social.suggestions().is_empty());
        assert_eq!(app.status.as_deref(), Some("Following bob"));
    }
}
