//! Application state for the terminal shell.
//!
//! [`AppContext`] owns the gateway and every state container; [`App`] adds
//! what only the UI needs (current screen, forms, selection) and the
//! channel that request tasks report back on.

mod actions;
mod form;
mod handlers;
mod input;
mod messages;
mod navigation;

pub use form::{Form, TextField};
pub use messages::AppMessage;
pub use navigation::Screen;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::models::SessionUser;
use crate::state::{
    ClusterState, FeedState, MessagesState, PostsState, ProfileState, SessionState, SocialState,
    TrendingState,
};
use crate::traits::SessionStore;

/// Everything the app talks to, created once in `main` and passed down.
pub struct AppContext {
    pub api: ApiClient,
    pub config: ClientConfig,
    pub session: SessionState,
    pub feed: FeedState,
    pub posts: PostsState,
    pub social: SocialState,
    pub profile: ProfileState,
    pub messages: MessagesState,
    pub trending: TrendingState,
    pub cluster: ClusterState,
}

impl AppContext {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            session: SessionState::new(store),
            feed: FeedState::new(),
            posts: PostsState::new(),
            social: SocialState::new(),
            profile: ProfileState::new(),
            messages: MessagesState::new(),
            trending: TrendingState::new(),
            cluster: ClusterState::new(),
        }
    }

    /// Signed-in username, if any.
    pub fn username(&self) -> Option<String> {
        self.session.username().map(str::to_string)
    }

    /// Drop every container's data, e.g. on sign out.
    pub fn reset_containers(&mut self) {
        self.feed = FeedState::new();
        self.posts = PostsState::new();
        self.social = SocialState::new();
        self.profile = ProfileState::new();
        self.messages = MessagesState::new();
        self.trending = TrendingState::new();
    }
}

/// Inline editor open on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    /// Post content and tags (feed)
    Post,
    /// Message body (messages)
    Message,
    /// Peer to start a conversation with (messages)
    Peer,
    /// Username to view (profile)
    ProfileLookup,
}

pub struct App {
    pub ctx: AppContext,
    pub screen: Screen,
    pub should_quit: bool,
    /// Set whenever visible state changes; cleared after a draw
    pub needs_redraw: bool,
    pub tick_count: u64,
    /// Selected row of the current screen's list
    pub selected: usize,
    pub editor: Option<Editor>,
    pub login_form: Form,
    pub register_form: Form,
    pub post_form: Form,
    pub message_form: Form,
    pub lookup_form: Form,
    /// Profile to show; `None` means the signed-in user's
    pub profile_target: Option<String>,
    /// Transient confirmation shown in the status bar
    pub status: Option<String>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            ctx,
            screen: Screen::Login,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            selected: 0,
            editor: None,
            login_form: Form::new(&["Username"]),
            register_form: Form::new(&["Username", "Email", "Name", "Bio"]),
            post_form: Form::new(&["Post", "Tags"]),
            message_form: Form::new(&["Message"]),
            lookup_form: Form::new(&["Username"]),
            profile_target: None,
            status: None,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// Restore the persisted session and open the first screen.
    pub fn start(&mut self) {
        if self.ctx.session.restore_session() {
            self.navigate(Screen::Feed);
        } else {
            self.navigate(Screen::Login);
        }
    }

    /// Sign in as the built-in demo user and open the feed.
    pub fn start_demo(&mut self) {
        self.ctx.session.set_demo_user(SessionUser::demo());
        self.navigate(Screen::Feed);
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance animations and start due auto-refreshes.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.screen == Screen::Cluster && self.ctx.cluster.refresh_due(Instant::now()) {
            self.load_cluster();
        }
        if self.is_busy() && self.tick_count % 6 == 0 {
            self.mark_dirty();
        }
    }

    /// Whether the current screen has a request in flight.
    pub fn is_busy(&self) -> bool {
        let ctx = &self.ctx;
        match self.screen {
            Screen::Login | Screen::Register => ctx.session.is_loading(),
            Screen::Feed => ctx.feed.is_loading() || ctx.posts.is_creating(),
            Screen::Trending => ctx.trending.is_loading(),
            Screen::Discover => ctx.social.is_loading(),
            Screen::Messages => ctx.messages.is_loading() || ctx.messages.is_sending(),
            Screen::Profile => ctx.profile.is_loading(),
            Screen::Cluster => ctx.cluster.is_loading(),
        }
    }

    /// Username whose profile the profile screen shows.
    pub fn profile_username(&self) -> Option<String> {
        self.profile_target.clone().or_else(|| self.ctx.username())
    }

    pub fn sign_out(&mut self) {
        self.ctx.session.logout();
        self.ctx.reset_containers();
        self.profile_target = None;
        self.login_form.reset();
        self.status = Some("Signed out".to_string());
        self.navigate(Screen::Login);
    }

    /// Send a message to our own channel; used by tests and request tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppMessage> {
        self.message_tx.clone()
    }
}
