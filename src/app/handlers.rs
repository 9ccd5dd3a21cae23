//! Applying request results.

use std::collections::HashSet;

use super::{App, AppMessage, Editor, Screen};
use crate::state::social::FollowAction;

impl App {
    /// Hand a finished request to its container, then run follow-ups.
    ///
    /// Stale results (superseded ticket or changed target) are dropped by
    /// the container and trigger nothing.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        let kind = msg.kind();
        let applied = match msg {
            AppMessage::LoginFinished { ticket, result } => {
                let applied = self.ctx.session.apply_login(ticket, result);
                if applied {
                    self.after_auth();
                }
                applied
            }
            AppMessage::RegisterFinished { ticket, result } => {
                let applied = self.ctx.session.apply_register(ticket, result);
                if applied {
                    self.after_auth();
                }
                applied
            }
            AppMessage::FeedLoaded { ticket, result } => {
                let applied = self.ctx.feed.apply_fetch(ticket, result);
                if applied {
                    self.prune_likes();
                    if self.screen == Screen::Feed {
                        self.clamp_selection();
                    }
                }
                applied
            }
            AppMessage::PostCreated { ticket, result } => {
                let created = result.is_ok();
                let applied = self.ctx.posts.apply_create(ticket, result);
                if applied && created {
                    self.post_form.reset();
                    if self.editor == Some(Editor::Post) {
                        self.editor = None;
                    }
                    self.status = Some("Post published".to_string());
                    self.ctx.feed.clear_feed();
                    self.load_feed(self.ctx.feed.mode());
                }
                applied
            }
            AppMessage::LikesUpdated {
                post_id,
                ticket,
                result,
            } => self.ctx.posts.apply_likes(&post_id, ticket, result),
            AppMessage::TrendingLoaded { ticket, result } => {
                let applied = self.ctx.trending.apply_fetch(ticket, result);
                if applied {
                    self.prune_likes();
                }
                applied
            }
            AppMessage::SuggestionsLoaded { ticket, result } => {
                self.ctx.social.apply_suggestions(ticket, result)
            }
            AppMessage::UsersLoaded { ticket, result } => self.ctx.social.apply_users(ticket, result),
            AppMessage::FollowFinished {
                target,
                action,
                ticket,
                result,
            } => {
                let confirmed = result.is_ok();
                let applied = self.ctx.social.apply_follow(&target, action, ticket, result);
                if applied && confirmed {
                    self.status = Some(match action {
                        FollowAction::Follow => format!("Following {}", target),
                        FollowAction::Unfollow => format!("Unfollowed {}", target),
                    });
                    if self.screen == Screen::Discover {
                        self.clamp_selection();
                    }
                }
                applied
            }
            AppMessage::ProfileUserLoaded {
                username,
                ticket,
                result,
            } => self.ctx.profile.apply_user(ticket, &username, result),
            AppMessage::ProfilePostsLoaded {
                username,
                ticket,
                result,
            } => {
                let applied = self.ctx.profile.apply_posts(ticket, &username, result);
                if applied {
                    self.prune_likes();
                }
                applied
            }
            AppMessage::ProfileFollowingLoaded {
                username,
                ticket,
                result,
            } => self.ctx.profile.apply_following(ticket, &username, result),
            AppMessage::ViewerFollowingLoaded {
                target,
                ticket,
                result,
            } => self
                .ctx
                .profile
                .apply_viewer_following(ticket, &target, result),
            AppMessage::ProfileFollowFinished {
                target,
                action,
                ticket,
                result,
            } => {
                let confirmed = result.is_ok();
                let applied = self.ctx.profile.apply_follow(ticket, &target, action, result);
                if applied && confirmed {
                    self.refresh_viewer_following();
                }
                applied
            }
            AppMessage::ConversationsLoaded { ticket, result } => {
                self.ctx.messages.apply_conversations(ticket, result)
            }
            AppMessage::ConversationLoaded {
                peer,
                ticket,
                result,
            } => self.ctx.messages.apply_conversation(ticket, &peer, result),
            AppMessage::MessageSent { ticket, result } => {
                let receiver = result.as_ref().ok().map(|m| m.receiver_username.clone());
                let applied = self.ctx.messages.apply_send(ticket, result);
                if let (true, Some(receiver)) = (applied, receiver) {
                    if self.ctx.messages.current_conversation() == Some(receiver.as_str()) {
                        self.message_form.reset();
                        self.load_conversation(&receiver);
                    }
                    self.load_conversations();
                }
                applied
            }
            AppMessage::ClusterLoaded { ticket, result } => {
                self.ctx.cluster.apply_cluster(ticket, result)
            }
            AppMessage::ModeLoaded { ticket, result } => self.ctx.cluster.apply_mode(ticket, result),
        };
        if !applied {
            tracing::debug!("Dropped stale {} result", kind);
        }
    }

    /// Keep cached like state only for posts some list still shows.
    fn prune_likes(&mut self) {
        let ctx = &mut self.ctx;
        let shown: HashSet<&str> = ctx
            .feed
            .posts()
            .iter()
            .chain(ctx.trending.posts())
            .chain(ctx.profile.user_posts())
            .map(|p| p.id.as_str())
            .collect();
        ctx.posts.retain_likes(|id| shown.contains(id));
    }

    /// Signed in (or failed to): open the feed on success.
    fn after_auth(&mut self) {
        if self.ctx.session.is_authenticated() {
            self.login_form.reset();
            self.register_form.reset();
            self.status = None;
            self.navigate(Screen::Feed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::MockResponse;
    use crate::error::ApiError;
    use crate::models::FeedMode;
    use serde_json::json;

    fn post(id: &str, author: &str, content: &str) -> serde_json::Value {
        json!({"id": id, "author_username": author, "content": content})
    }

    #[tokio::test]
    async fn test_login_opens_feed() {
        let (mut app, mock, store) = test_app();
        mock.set_response(
            "http://api.test/users/by-username/bob",
            MockResponse::json(200, json!({"id": "1", "username": "bob", "email": "b@x.io"})),
        );
        mock.set_response("http://api.test/users/bob/feed", MockResponse::json(200, json!([])));
        app.start();
        "bob".chars().for_each(|c| app.login_form.push(c));

        app.submit_login();
        drain(&mut app).await;

        assert_eq!(app.screen, Screen::Feed);
        assert_eq!(store.stored().unwrap().username, "bob");
        assert_eq!(app.login_form.value(0), "");
    }

    #[tokio::test]
    async fn test_failed_login_stays_on_login() {
        let (mut app, mock, _) = test_app();
        mock.set_default_response(MockResponse::json(404, json!({})));
        app.start();
        "ghost".chars().for_each(|c| app.login_form.push(c));

        app.submit_login();
        drain(&mut app).await;

        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.ctx.session.error().unwrap().message, "User not found");
    }

    #[tokio::test]
    async fn test_created_post_reloads_feed() {
        let (mut app, mock, _) = test_app();
        mock.set_response(
            "http://api.test/posts/",
            MockResponse::json(200, post("p9", "alice", "hi")),
        );
        mock.set_response(
            "http://api.test/users/alice/feed",
            MockResponse::json(200, json!([post("p9", "alice", "hi")])),
        );
        app.start_demo();
        drain(&mut app).await;
        app.editor = Some(Editor::Post);
        "hi".chars().for_each(|c| app.post_form.push(c));

        app.submit_post();
        drain(&mut app).await;

        assert_eq!(app.ctx.posts.last_created_post().unwrap().id, "p9");
        assert_eq!(app.editor, None);
        assert_eq!(app.ctx.feed.posts()[0].content, "hi");
        let feed_fetches = mock
            .get_requests()
            .iter()
            .filter(|r| r.url.contains("/feed"))
            .count();
        assert_eq!(feed_fetches, 2);
    }

    #[tokio::test]
    async fn test_stale_feed_result_is_dropped() {
        let (mut app, _, _) = test_app();
        app.ctx.session.set_demo_user(crate::models::SessionUser::demo());
        let stale = app.ctx.feed.begin_fetch(FeedMode::All, 20);
        app.ctx.feed.set_mode(FeedMode::Following);

        app.handle_message(AppMessage::FeedLoaded {
            ticket: stale,
            result: Err(ApiError::Transport {
                message: "late".to_string(),
            }),
        });

        assert!(app.ctx.feed.error().is_none());
    }

    #[tokio::test]
    async fn test_sent_message_refetches_conversation() {
        let (mut app, mock, _) = test_app();
        mock.set_response(
            "http://api.test/dm/send",
            MockResponse::json(
                200,
                json!({"sender_username": "alice", "receiver_username": "bob", "content": "yo"}),
            ),
        );
        mock.set_default_response(MockResponse::json(200, json!([])));
        app.start_demo();
        app.open_conversation("bob");
        drain(&mut app).await;
        mock.clear_requests();
        app.editor = Some(Editor::Message);
        "yo".chars().for_each(|c| app.message_form.push(c));

        app.submit_message();
        drain(&mut app).await;

        let urls: Vec<String> = mock.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls[0], "http://api.test/dm/send");
        assert!(urls.contains(&"http://api.test/dm/alice/bob?limit=50".to_string()));
        assert_eq!(app.message_form.value(0), "");
    }

    #[tokio::test]
    async fn test_send_confirmed_after_switching_peer() {
        let (mut app, mock, _) = test_app();
        mock.set_response(
            "http://api.test/dm/send",
            MockResponse::json(
                200,
                json!({"sender_username": "alice", "receiver_username": "bob", "content": "yo"}),
            ),
        );
        mock.set_default_response(MockResponse::json(200, json!([])));
        app.start_demo();
        app.open_conversation("bob");
        drain(&mut app).await;
        app.editor = Some(Editor::Message);
        "yo".chars().for_each(|c| app.message_form.push(c));
        app.submit_message();

        app.open_conversation("carol");
        assert_eq!(app.message_form.value(0), "");
        assert_eq!(app.editor, None);
        mock.clear_requests();
        drain(&mut app).await;

        assert!(!app.ctx.messages.is_sending());
        assert_eq!(app.ctx.messages.current_conversation(), Some("carol"));
        assert!(app.ctx.messages.messages().is_empty());
        let urls: Vec<String> = mock.get_requests().into_iter().map(|r| r.url).collect();
        let list_fetches = urls
            .iter()
            .filter(|u| u.as_str() == "http://api.test/dm/conversations/alice")
            .count();
        assert_eq!(list_fetches, 2);
        assert!(!urls.iter().any(|u| u.starts_with("http://api.test/dm/alice/bob")));
    }
}
