//! Direct messaging.
//!
//! Updates are pull-driven; there is no push channel.

use super::{ErrorNotice, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{ConversationSummary, DirectMessage, NewMessage};

pub const CONVERSATION_LIMIT: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct MessagesState {
    conversations: Vec<ConversationSummary>,
    current_conversation: Option<String>,
    messages: Vec<DirectMessage>,
    error: Option<ErrorNotice>,
    conversations_request: RequestTracker,
    conversation_request: RequestTracker,
    send_request: RequestTracker,
}

impl MessagesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    /// Peer of the open conversation.
    pub fn current_conversation(&self) -> Option<&str> {
        self.current_conversation.as_deref()
    }

    /// History of the open conversation.
    pub fn messages(&self) -> &[DirectMessage] {
        &self.messages
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.conversations_request.is_in_flight() || self.conversation_request.is_in_flight()
    }

    pub fn is_sending(&self) -> bool {
        self.send_request.is_in_flight()
    }

    pub fn total_unread(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    /// Open the conversation with `peer`, dropping the previous history.
    ///
    /// A send in flight stays current: the server may already have accepted
    /// it, and [`apply_send`](Self::apply_send) only appends to the
    /// conversation it belongs to.
    pub fn set_current_conversation(&mut self, peer: Option<&str>) {
        if self.current_conversation.as_deref() == peer {
            return;
        }
        self.current_conversation = peer.map(str::to_string);
        self.messages.clear();
        self.conversation_request.invalidate();
    }

    pub fn begin_conversations(&mut self) -> RequestTicket {
        self.error = None;
        self.conversations_request.begin()
    }

    pub fn apply_conversations(
        &mut self,
        ticket: RequestTicket,
        result: ApiResult<Vec<ConversationSummary>>,
    ) -> bool {
        if !self.conversations_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(conversations) => self.conversations = conversations,
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn fetch_conversations(&mut self, api: &ApiClient, username: &str) -> bool {
        let ticket = self.begin_conversations();
        let result = api.list_conversations(username).await;
        self.apply_conversations(ticket, result)
    }

    /// Begin loading the history with `other`, opening it if needed.
    pub fn begin_conversation(&mut self, other: &str) -> RequestTicket {
        self.set_current_conversation(Some(other));
        self.error = None;
        self.conversation_request.begin()
    }

    /// Replace the history with the fetched one.
    pub fn apply_conversation(
        &mut self,
        ticket: RequestTicket,
        other: &str,
        result: ApiResult<Vec<DirectMessage>>,
    ) -> bool {
        if self.current_conversation() != Some(other) || !self.conversation_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(messages) => self.messages = messages,
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn fetch_conversation(
        &mut self,
        api: &ApiClient,
        username: &str,
        other: &str,
        limit: usize,
    ) -> bool {
        let ticket = self.begin_conversation(other);
        let result = api.get_conversation(username, other, limit).await;
        self.apply_conversation(ticket, other, result)
    }

    /// Validate and begin sending `message`.
    ///
    /// Blank content is refused without a request.
    pub fn begin_send(&mut self, message: &NewMessage) -> ApiResult<RequestTicket> {
        if message.receiver_username.trim().is_empty() {
            return Err(self.reject(ApiError::validation(
                "receiver_username",
                "Choose someone to message",
            )));
        }
        if message.content.trim().is_empty() {
            return Err(self.reject(ApiError::validation(
                "content",
                "Message cannot be empty",
            )));
        }
        self.error = None;
        Ok(self.send_request.begin())
    }

    /// Append the server-confirmed message to the open conversation.
    ///
    /// The caller re-fetches the conversation afterwards.
    pub fn apply_send(&mut self, ticket: RequestTicket, result: ApiResult<DirectMessage>) -> bool {
        if !self.send_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(message) => {
                if self.current_conversation() == Some(message.receiver_username.as_str()) {
                    self.messages.push(message);
                }
            }
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn send_message(&mut self, api: &ApiClient, message: &NewMessage) -> ApiResult<DirectMessage> {
        let ticket = self.begin_send(message)?;
        let result = api.send_message(message).await;
        self.apply_send(ticket, result.clone());
        result
    }

    fn reject(&mut self, err: ApiError) -> ApiError {
        self.error = Some(ErrorNotice::from_api(&err));
        err
    }
}
