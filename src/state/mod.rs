//! Client-side state containers.
//!
//! Each container owns one slice of UI state and the operations that mutate
//! it. Operations come in two forms:
//!
//! - split: `begin_*` marks the container loading and returns a
//!   [`RequestTicket`]; the caller performs the request and hands the result
//!   to `apply_*`, which drops it if the ticket went stale
//! - combined: an `async fn` doing begin, request and apply in one call
//!
//! The UI loop uses the split form so requests can run on spawned tasks.

pub mod cluster;
pub mod feed;
pub mod messages;
pub mod posts;
pub mod profile;
pub mod request;
pub mod session;
pub mod social;
pub mod trending;

pub use cluster::ClusterState;
pub use feed::FeedState;
pub use messages::MessagesState;
pub use posts::PostsState;
pub use profile::ProfileState;
pub use request::{KeyedRequests, RequestTicket, RequestTracker};
pub use session::SessionState;
pub use social::SocialState;
pub use trending::TrendingState;

use crate::error::{ApiError, ErrorCategory};

/// A failure as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub message: String,
    pub category: ErrorCategory,
}

impl ErrorNotice {
    pub fn new(message: impl Into<String>, category: ErrorCategory) -> Self {
        Self {
            message: message.into(),
            category,
        }
    }

    /// Message and category of `err`.
    pub fn from_api(err: &ApiError) -> Self {
        Self::new(err.user_message(), err.category())
    }

    /// Like [`from_api`](Self::from_api), but a rejection without a server
    /// detail reads `fallback`.
    pub fn with_fallback(err: &ApiError, fallback: &str) -> Self {
        Self::new(err.user_message_or(fallback), err.category())
    }

    pub fn is_network(&self) -> bool {
        self.category == ErrorCategory::Network
    }
}

impl std::fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
