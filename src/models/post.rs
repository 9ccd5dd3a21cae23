use serde::{Deserialize, Serialize};
use std::fmt;

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    pub author_username: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes_count: Option<u64>,
}

impl Post {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Tags rendered as `#rust #tui`.
    pub fn hashtags(&self) -> String {
        self.tags()
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Payload for `POST /posts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub author_username: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl NewPost {
    /// Build a post from raw form input.
    ///
    /// Content is trimmed; tags are parsed with [`parse_tags`].
    pub fn from_input(author: &str, content: &str, tags_text: &str) -> Self {
        Self {
            author_username: author.to_string(),
            content: content.trim().to_string(),
            tags: parse_tags(tags_text),
        }
    }
}

/// Split comma-separated tag input, dropping blanks.
///
/// Returns `None` when nothing is left so the field is omitted on the wire.
pub fn parse_tags(text: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    (!tags.is_empty()).then_some(tags)
}

/// Server-confirmed like state of one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLikes {
    #[serde(default)]
    pub post_id: String,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub users: Vec<String>,
}

impl PostLikes {
    pub fn liked_by(&self, username: &str) -> bool {
        self.users.iter().any(|u| u == username)
    }
}

/// Which slice of posts the feed endpoint returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Everyone's posts
    #[default]
    All,
    /// Posts by accounts the user follows
    Following,
    /// The user's own posts
    #[serde(rename = "self")]
    Own,
}

impl FeedMode {
    pub const ALL: [FeedMode; 3] = [FeedMode::All, FeedMode::Following, FeedMode::Own];

    /// Wire value used in the `mode` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedMode::All => "all",
            FeedMode::Following => "following",
            FeedMode::Own => "self",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedMode::All => "All",
            FeedMode::Following => "Following",
            FeedMode::Own => "Mine",
        }
    }

    /// The next mode in tab order.
    pub fn next(&self) -> FeedMode {
        match self {
            FeedMode::All => FeedMode::Following,
            FeedMode::Following => FeedMode::Own,
            FeedMode::Own => FeedMode::All,
        }
    }
}

impl fmt::Display for FeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
