//! Starting requests.
//!
//! Each action takes a ticket from its container, runs the request on a
//! spawned task with a clone of the gateway, and posts the result back as
//! an [`AppMessage`]. Results are applied in `handlers.rs`.

use std::future::Future;

use super::{App, AppMessage, Editor, Screen};
use crate::api::ApiClient;
use crate::models::{FeedMode, NewMessage, NewUser};
use crate::state::cluster::ClusterState;
use crate::state::messages::CONVERSATION_LIMIT;
use crate::state::profile::PROFILE_POSTS_LIMIT;
use crate::state::social::{FollowAction, DEFAULT_SUGGESTION_LIMIT};
use crate::state::trending::DEFAULT_TRENDING_LIMIT;

impl App {
    /// Run `request` on a task and send what `wrap` makes of its result.
    fn spawn_request<F, Fut, T>(&self, request: F, wrap: impl FnOnce(T) -> AppMessage + Send + 'static)
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let tx = self.sender();
        let fut = request(self.ctx.api.clone());
        tokio::spawn(async move {
            let result = fut.await;
            if tx.send(wrap(result)).is_err() {
                tracing::debug!("App closed before a request finished");
            }
        });
    }

    /// Load what the current screen shows.
    pub fn load_screen(&mut self) {
        match self.screen {
            Screen::Login | Screen::Register => {}
            Screen::Feed => self.load_feed(self.ctx.feed.mode()),
            Screen::Trending => self.load_trending(),
            Screen::Discover => {
                self.load_suggestions();
                self.load_users();
            }
            Screen::Messages => {
                self.load_conversations();
                if let Some(peer) = self.ctx.messages.current_conversation().map(str::to_string) {
                    self.load_conversation(&peer);
                }
            }
            Screen::Profile => self.load_profile(),
            Screen::Cluster => {
                self.load_cluster();
                self.load_mode();
            }
        }
    }

    /// Retry: clear the screen's error and fetch again.
    pub fn retry(&mut self) {
        match self.screen {
            Screen::Feed => {
                self.ctx.feed.clear_error();
                self.ctx.posts.clear_error();
            }
            Screen::Discover => self.ctx.social.clear_error(),
            Screen::Messages => self.ctx.messages.clear_error(),
            _ => {}
        }
        self.load_screen();
    }

    pub fn submit_login(&mut self) {
        let username = self.login_form.value(0).trim().to_string();
        let ticket = match self.ctx.session.begin_login(&username) {
            Ok(ticket) => ticket,
            Err(_) => return,
        };
        self.spawn_request(
            move |api| async move { api.get_user(&username).await },
            move |result| AppMessage::LoginFinished { ticket, result },
        );
    }

    pub fn submit_register(&mut self) {
        let form = &self.register_form;
        let mut user = NewUser::new(form.value(0).trim(), form.value(1).trim());
        if !form.fields()[2].is_blank() {
            user = user.with_name(form.value(2).trim());
        }
        if !form.fields()[3].is_blank() {
            user = user.with_bio(form.value(3).trim());
        }
        let ticket = match self.ctx.session.begin_register(&user) {
            Ok(ticket) => ticket,
            Err(_) => return,
        };
        self.spawn_request(
            move |api| async move { api.create_user(&user).await },
            move |result| AppMessage::RegisterFinished { ticket, result },
        );
    }

    pub fn load_feed(&mut self, mode: FeedMode) {
        let Some(username) = self.ctx.username() else {
            return;
        };
        let limit = self.ctx.config.feed_page_size;
        let ticket = self.ctx.feed.begin_fetch(mode, limit);
        self.spawn_request(
            move |api| async move { api.get_feed(&username, mode, limit).await },
            move |result| AppMessage::FeedLoaded { ticket, result },
        );
    }

    /// Next feed mode; the list is dropped until the new page arrives.
    pub fn cycle_feed_mode(&mut self) {
        let mode = self.ctx.feed.mode().next();
        self.ctx.feed.set_mode(mode);
        self.selected = 0;
        self.load_feed(mode);
    }

    pub fn submit_post(&mut self) {
        let author = self.ctx.username().unwrap_or_default();
        let (ticket, post) = match self.ctx.posts.begin_create(
            &author,
            self.post_form.value(0),
            self.post_form.value(1),
        ) {
            Ok(started) => started,
            Err(_) => return,
        };
        self.spawn_request(
            move |api| async move { api.create_post(&post).await },
            move |result| AppMessage::PostCreated { ticket, result },
        );
    }

    /// Like the post, or unlike it if the viewer's like is confirmed.
    pub fn toggle_like(&mut self, post_id: &str) {
        let Some(username) = self.ctx.username() else {
            return;
        };
        if self.ctx.posts.is_like_pending(post_id) {
            return;
        }
        let unlike = self.ctx.posts.is_liked_by(post_id, &username);
        let ticket = self.ctx.posts.begin_likes(post_id);
        let id = post_id.to_string();
        let post_id = post_id.to_string();
        self.spawn_request(
            move |api| async move {
                if unlike {
                    api.unlike_post(&id, &username).await
                } else {
                    api.like_post(&id, &username).await
                }
            },
            move |result| AppMessage::LikesUpdated {
                post_id,
                ticket,
                result,
            },
        );
    }

    pub fn load_likes(&mut self, post_id: &str) {
        let ticket = self.ctx.posts.begin_likes(post_id);
        let id = post_id.to_string();
        let post_id = post_id.to_string();
        self.spawn_request(
            move |api| async move { api.get_likes(&id).await },
            move |result| AppMessage::LikesUpdated {
                post_id,
                ticket,
                result,
            },
        );
    }

    pub fn load_trending(&mut self) {
        let ticket = self.ctx.trending.begin_fetch();
        self.spawn_request(
            |api| async move { api.get_trending(DEFAULT_TRENDING_LIMIT).await },
            move |result| AppMessage::TrendingLoaded { ticket, result },
        );
    }

    pub fn load_suggestions(&mut self) {
        let Some(username) = self.ctx.username() else {
            return;
        };
        let ticket = self.ctx.social.begin_suggestions();
        self.spawn_request(
            move |api| async move {
                api.get_suggestions(&username, DEFAULT_SUGGESTION_LIMIT)
                    .await
            },
            move |result| AppMessage::SuggestionsLoaded { ticket, result },
        );
    }

    pub fn load_users(&mut self) {
        let ticket = self.ctx.social.begin_users();
        self.spawn_request(
            |api| async move { api.list_users().await },
            move |result| AppMessage::UsersLoaded { ticket, result },
        );
    }

    /// Follow a suggested user.
    pub fn follow_suggestion(&mut self, target: &str) {
        let Some(username) = self.ctx.username() else {
            return;
        };
        if self.ctx.social.is_follow_pending(target) {
            return;
        }
        let ticket = self.ctx.social.begin_follow(target);
        let to = target.to_string();
        let target = target.to_string();
        self.spawn_request(
            move |api| async move { api.follow(&username, &to).await },
            move |result| AppMessage::FollowFinished {
                target,
                action: FollowAction::Follow,
                ticket,
                result,
            },
        );
    }

    /// Clear the profile container and load the target's profile.
    pub fn load_profile(&mut self) {
        let Some(target) = self.profile_username() else {
            return;
        };
        let viewer = self.ctx.username();
        let tickets = self.ctx.profile.begin_load(viewer.as_deref(), &target);

        let username = target.clone();
        let user = target.clone();
        self.spawn_request(
            move |api| async move { api.get_user(&user).await },
            move |result| AppMessage::ProfileUserLoaded {
                username,
                ticket: tickets.user,
                result,
            },
        );

        let username = target.clone();
        let author = target.clone();
        self.spawn_request(
            move |api| async move {
                api.get_feed(&author, FeedMode::Own, PROFILE_POSTS_LIMIT)
                    .await
            },
            move |result| AppMessage::ProfilePostsLoaded {
                username,
                ticket: tickets.posts,
                result,
            },
        );

        let username = target.clone();
        let follower = target.clone();
        self.spawn_request(
            move |api| async move { api.get_following(&follower).await },
            move |result| AppMessage::ProfileFollowingLoaded {
                username,
                ticket: tickets.following,
                result,
            },
        );

        if let (Some(ticket), Some(viewer)) = (tickets.viewer_following, viewer) {
            self.spawn_viewer_following(ticket, viewer, target);
        }
    }

    fn spawn_viewer_following(
        &self,
        ticket: crate::state::RequestTicket,
        viewer: String,
        target: String,
    ) {
        self.spawn_request(
            move |api| async move { api.get_following(&viewer).await },
            move |result| AppMessage::ViewerFollowingLoaded {
                target,
                ticket,
                result,
            },
        );
    }

    /// Re-derive `is_following` for the profiled user.
    pub fn refresh_viewer_following(&mut self) {
        let (Some(viewer), Some(target)) = (
            self.ctx.username(),
            self.ctx.profile.target().map(str::to_string),
        ) else {
            return;
        };
        if viewer == target {
            return;
        }
        let ticket = self.ctx.profile.begin_viewer_following();
        self.spawn_viewer_following(ticket, viewer, target);
    }

    /// Follow or unfollow the profiled user.
    pub fn toggle_profile_follow(&mut self) {
        let (Some(viewer), Some(target)) = (
            self.ctx.username(),
            self.ctx.profile.target().map(str::to_string),
        ) else {
            return;
        };
        if viewer == target || self.ctx.profile.is_follow_pending() {
            return;
        }
        let action = if self.ctx.profile.is_following() {
            FollowAction::Unfollow
        } else {
            FollowAction::Follow
        };
        let ticket = self.ctx.profile.begin_follow();
        let to = target.clone();
        self.spawn_request(
            move |api| async move {
                match action {
                    FollowAction::Follow => api.follow(&viewer, &to).await,
                    FollowAction::Unfollow => api.unfollow(&viewer, &to).await,
                }
            },
            move |result| AppMessage::ProfileFollowFinished {
                target,
                action,
                ticket,
                result,
            },
        );
    }

    pub fn load_conversations(&mut self) {
        let Some(username) = self.ctx.username() else {
            return;
        };
        let ticket = self.ctx.messages.begin_conversations();
        self.spawn_request(
            move |api| async move { api.list_conversations(&username).await },
            move |result| AppMessage::ConversationsLoaded { ticket, result },
        );
    }

    pub fn load_conversation(&mut self, peer: &str) {
        let Some(username) = self.ctx.username() else {
            return;
        };
        self.switch_conversation(peer);
        let ticket = self.ctx.messages.begin_conversation(peer);
        let other = peer.to_string();
        let peer = peer.to_string();
        self.spawn_request(
            move |api| async move {
                api.get_conversation(&username, &other, CONVERSATION_LIMIT)
                    .await
            },
            move |result| AppMessage::ConversationLoaded {
                peer,
                ticket,
                result,
            },
        );
    }

    pub fn submit_message(&mut self) {
        let Some(sender) = self.ctx.username() else {
            return;
        };
        let receiver = self
            .ctx
            .messages
            .current_conversation()
            .unwrap_or_default()
            .to_string();
        let message = NewMessage::new(&sender, &receiver, self.message_form.value(0).trim());
        let ticket = match self.ctx.messages.begin_send(&message) {
            Ok(ticket) => ticket,
            Err(_) => return,
        };
        self.spawn_request(
            move |api| async move { api.send_message(&message).await },
            move |result| AppMessage::MessageSent { ticket, result },
        );
    }

    pub fn load_cluster(&mut self) {
        let ticket = self.ctx.cluster.begin_cluster();
        self.spawn_request(
            |api| async move { ClusterState::load(&api).await },
            move |result| AppMessage::ClusterLoaded { ticket, result },
        );
    }

    pub fn load_mode(&mut self) {
        let ticket = self.ctx.cluster.begin_mode();
        self.spawn_request(
            |api| async move { api.observability_mode().await },
            move |result| AppMessage::ModeLoaded { ticket, result },
        );
    }

    /// Submit whichever inline editor is open.
    pub fn submit_editor(&mut self) {
        match self.editor {
            Some(Editor::Post) => self.submit_post(),
            Some(Editor::Message) => self.submit_message(),
            Some(Editor::Peer) => {
                let peer = self.lookup_form.value(0).trim().to_string();
                if !peer.is_empty() {
                    self.lookup_form.reset();
                    self.editor = None;
                    self.open_conversation(&peer);
                }
            }
            Some(Editor::ProfileLookup) => {
                let target = self.lookup_form.value(0).trim().to_string();
                if !target.is_empty() {
                    self.lookup_form.reset();
                    self.editor = None;
                    self.open_profile(&target);
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::MockResponse;
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_post_sends_nothing() {
        let (mut app, mock, _) = test_app();
        app.start_demo();
        drain(&mut app).await;
        mock.clear_requests();

        app.editor = Some(Editor::Post);
        app.submit_post();
        drain(&mut app).await;

        assert!(mock.get_requests().is_empty());
        assert_eq!(
            app.ctx.posts.error().unwrap().message,
            "Post content cannot be empty"
        );
    }

    #[tokio::test]
    async fn test_load_profile_of_other_user_checks_following() {
        let (mut app, mock, _) = test_app();
        app.start_demo();
        mock.set_default_response(MockResponse::json(200, json!([])));
        app.open_profile("bob");

        drain(&mut app).await;

        let urls: Vec<String> = mock.get_requests().into_iter().map(|r| r.url).collect();
        assert!(urls.contains(&"http://api.test/users/by-username/bob".to_string()));
        assert!(urls.contains(&"http://api.test/users/bob/following".to_string()));
        assert!(urls.contains(&"http://api.test/users/alice/following".to_string()));
    }

    #[tokio::test]
    async fn test_cycle_feed_mode_fetches_new_mode() {
        let (mut app, mock, _) = test_app();
        app.start_demo();
        drain(&mut app).await;
        mock.clear_requests();

        app.cycle_feed_mode();
        drain(&mut app).await;

        assert_eq!(app.ctx.feed.mode(), FeedMode::Following);
        assert!(mock.get_requests()[0].url.contains("mode=following"));
    }
}
