use serde::{Deserialize, Serialize};

/// A direct message between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub sender_username: String,
    pub receiver_username: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read: bool,
}

impl DirectMessage {
    /// True when `username` wrote this message.
    pub fn is_from(&self, username: &str) -> bool {
        self.sender_username == username
    }
}

/// Payload for `POST /dm/send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub sender_username: String,
    pub receiver_username: String,
    pub content: String,
}

impl NewMessage {
    pub fn new(sender: &str, receiver: &str, content: &str) -> Self {
        Self {
            sender_username: sender.to_string(),
            receiver_username: receiver.to_string(),
            content: content.to_string(),
        }
    }
}

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The other participant
    pub username: String,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
}

/// Key of the conversation between `a` and `b`, independent of order.
pub fn conversation_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}:{}", a, b)
    } else {
        format!("{}:{}", b, a)
    }
}
