//! Results delivered from request tasks back to the UI loop.

use crate::error::ApiResult;
use crate::models::{
    ClusterHealth, ClusterSlots, ConversationSummary, DirectMessage, ObservabilityMode, Post,
    PostLikes, Suggestion, User,
};
use crate::state::social::FollowAction;
use crate::state::RequestTicket;

/// One finished request, tagged with the ticket it was issued under.
#[derive(Debug, Clone)]
pub enum AppMessage {
    LoginFinished {
        ticket: RequestTicket,
        result: ApiResult<User>,
    },
    RegisterFinished {
        ticket: RequestTicket,
        result: ApiResult<User>,
    },
    FeedLoaded {
        ticket: RequestTicket,
        result: ApiResult<Vec<Post>>,
    },
    PostCreated {
        ticket: RequestTicket,
        result: ApiResult<Post>,
    },
    /// Like, unlike or likes fetch on one post
    LikesUpdated {
        post_id: String,
        ticket: RequestTicket,
        result: ApiResult<PostLikes>,
    },
    TrendingLoaded {
        ticket: RequestTicket,
        result: ApiResult<Vec<Post>>,
    },
    SuggestionsLoaded {
        ticket: RequestTicket,
        result: ApiResult<Vec<Suggestion>>,
    },
    UsersLoaded {
        ticket: RequestTicket,
        result: ApiResult<Vec<User>>,
    },
    /// Follow change started from the discover screen
    FollowFinished {
        target: String,
        action: FollowAction,
        ticket: RequestTicket,
        result: ApiResult<()>,
    },
    ProfileUserLoaded {
        username: String,
        ticket: RequestTicket,
        result: ApiResult<User>,
    },
    ProfilePostsLoaded {
        username: String,
        ticket: RequestTicket,
        result: ApiResult<Vec<Post>>,
    },
    ProfileFollowingLoaded {
        username: String,
        ticket: RequestTicket,
        result: ApiResult<Vec<User>>,
    },
    /// The viewer's following list, used to derive `is_following`
    ViewerFollowingLoaded {
        target: String,
        ticket: RequestTicket,
        result: ApiResult<Vec<User>>,
    },
    /// Follow change started from the profile screen
    ProfileFollowFinished {
        target: String,
        action: FollowAction,
        ticket: RequestTicket,
        result: ApiResult<()>,
    },
    ConversationsLoaded {
        ticket: RequestTicket,
        result: ApiResult<Vec<ConversationSummary>>,
    },
    ConversationLoaded {
        peer: String,
        ticket: RequestTicket,
        result: ApiResult<Vec<DirectMessage>>,
    },
    MessageSent {
        ticket: RequestTicket,
        result: ApiResult<DirectMessage>,
    },
    ClusterLoaded {
        ticket: RequestTicket,
        result: ApiResult<(ClusterHealth, ClusterSlots)>,
    },
    ModeLoaded {
        ticket: RequestTicket,
        result: ApiResult<ObservabilityMode>,
    },
}

impl AppMessage {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            AppMessage::LoginFinished { .. } => "login",
            AppMessage::RegisterFinished { .. } => "register",
            AppMessage::FeedLoaded { .. } => "feed",
            AppMessage::PostCreated { .. } => "create_post",
            AppMessage::LikesUpdated { .. } => "likes",
            AppMessage::TrendingLoaded { .. } => "trending",
            AppMessage::SuggestionsLoaded { .. } => "suggestions",
            AppMessage::UsersLoaded { .. } => "users",
            AppMessage::FollowFinished { .. } => "follow",
            AppMessage::ProfileUserLoaded { .. } => "profile_user",
            AppMessage::ProfilePostsLoaded { .. } => "profile_posts",
            AppMessage::ProfileFollowingLoaded { .. } => "profile_following",
            AppMessage::ViewerFollowingLoaded { .. } => "viewer_following",
            AppMessage::ProfileFollowFinished { .. } => "profile_follow",
            AppMessage::ConversationsLoaded { .. } => "conversations",
            AppMessage::ConversationLoaded { .. } => "conversation",
            AppMessage::MessageSent { .. } => "send_message",
            AppMessage::ClusterLoaded { .. } => "cluster",
            AppMessage::ModeLoaded { .. } => "observability_mode",
        }
    }
}
