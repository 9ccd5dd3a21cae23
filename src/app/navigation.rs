//! Screens and moving between them.

use super::{App, Editor};

/// Top-level screens. `Login` and `Register` are shown while signed out;
/// the rest form the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Feed,
    Trending,
    Discover,
    Messages,
    Profile,
    Cluster,
}

impl Screen {
    /// Tab bar order.
    pub const TABS: [Screen; 6] = [
        Screen::Feed,
        Screen::Trending,
        Screen::Discover,
        Screen::Messages,
        Screen::Profile,
        Screen::Cluster,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign in",
            Screen::Register => "Register",
            Screen::Feed => "Feed",
            Screen::Trending => "Trending",
            Screen::Discover => "Discover",
            Screen::Messages => "Messages",
            Screen::Profile => "Profile",
            Screen::Cluster => "Cluster",
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Screen::Login | Screen::Register)
    }

    pub fn tab_index(&self) -> Option<usize> {
        Self::TABS.iter().position(|s| s == self)
    }

    pub fn next_tab(&self) -> Screen {
        match self.tab_index() {
            Some(i) => Self::TABS[(i + 1) % Self::TABS.len()],
            None => *self,
        }
    }

    pub fn prev_tab(&self) -> Screen {
        match self.tab_index() {
            Some(i) => Self::TABS[(i + Self::TABS.len() - 1) % Self::TABS.len()],
            None => *self,
        }
    }
}

impl App {
    /// Switch to `screen` and load what it shows.
    ///
    /// Signed-out users can only reach the auth screens.
    pub fn navigate(&mut self, screen: Screen) {
        let screen = if !screen.is_auth() && !self.ctx.session.is_authenticated() {
            Screen::Login
        } else {
            screen
        };
        if self.screen != screen {
            tracing::debug!("Navigating {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
        self.selected = 0;
        self.editor = None;
        self.mark_dirty();
        self.load_screen();
    }

    pub fn next_screen(&mut self) {
        self.navigate(self.screen.next_tab());
    }

    pub fn prev_screen(&mut self) {
        self.navigate(self.screen.prev_tab());
    }

    /// Open `username`'s profile.
    pub fn open_profile(&mut self, username: &str) {
        self.profile_target = Some(username.to_string());
        self.navigate(Screen::Profile);
    }

    /// Open the conversation with `peer` on the messages screen.
    pub fn open_conversation(&mut self, peer: &str) {
        self.switch_conversation(peer);
        self.navigate(Screen::Messages);
    }

    /// Make `peer` the open conversation; a draft for another peer is dropped.
    pub fn switch_conversation(&mut self, peer: &str) {
        if self.ctx.messages.current_conversation() == Some(peer) {
            return;
        }
        self.message_form.reset();
        if self.editor == Some(Editor::Message) {
            self.editor = None;
        }
        self.ctx.messages.set_current_conversation(Some(peer));
    }

    /// Row count of the current screen's selectable list.
    pub fn list_len(&self) -> usize {
        match self.screen {
            Screen::Feed => self.ctx.feed.posts().len(),
            Screen::Trending => self.ctx.trending.posts().len(),
            Screen::Discover => self.ctx.social.suggestions().len(),
            Screen::Messages => self.ctx.messages.conversations().len(),
            Screen::Profile => self.ctx.profile.user_posts().len(),
            _ => 0,
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.list_len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Screen::Feed.next_tab(), Screen::Trending);
        assert_eq!(Screen::Cluster.next_tab(), Screen::Feed);
        assert_eq!(Screen::Feed.prev_tab(), Screen::Cluster);
        assert_eq!(Screen::Login.next_tab(), Screen::Login);
    }

    #[test]
    fn test_auth_screens_are_not_tabs() {
        assert!(Screen::Register.is_auth());
        assert_eq!(Screen::Register.tab_index(), None);
        assert_eq!(Screen::Messages.tab_index(), Some(3));
    }
}
