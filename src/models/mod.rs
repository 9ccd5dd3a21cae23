//! Records exchanged with the API, plus presentation helpers.

pub mod cluster;
pub mod message;
pub mod post;
pub mod time;
pub mod user;

pub use cluster::{
    slot_coverage, ClusterHealth, ClusterNode, ClusterSlots, ObservabilityMode, SlotDistribution,
    TOTAL_SLOTS,
};
pub use message::{conversation_key, ConversationSummary, DirectMessage, NewMessage};
pub use post::{parse_tags, FeedMode, NewPost, Post, PostLikes};
pub use time::{format_relative, format_relative_to, format_uptime, parse_timestamp};
pub use user::{NewUser, SessionUser, Suggestion, User};
