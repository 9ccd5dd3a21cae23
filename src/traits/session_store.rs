//! Session persistence trait abstraction.
//!
//! The signed-in user is the only state that survives a restart. It is kept
//! behind [`SessionStore`] so the session container can be tested against an
//! in-memory store.

use crate::models::SessionUser;

/// Session storage errors.
#[derive(Debug, Clone)]
pub enum SessionStoreError {
    /// The stored session exists but cannot be parsed
    Corrupt(String),
    /// Failed to save the session
    SaveFailed(String),
    /// Failed to clear the session
    ClearFailed(String),
    /// IO error while reading
    Io(String),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::Corrupt(msg) => write!(f, "Stored session is corrupt: {}", msg),
            SessionStoreError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            SessionStoreError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            SessionStoreError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Trait for storing the signed-in user between runs.
///
/// Operations are synchronous: restoring a session happens before the first
/// frame is drawn and must not await anything.
pub trait SessionStore: Send + Sync {
    /// Load the persisted session.
    ///
    /// # Returns
    /// - `Ok(Some(user))` if a session is stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(SessionStoreError::Corrupt(_))` if the stored data is unreadable
    fn load(&self) -> Result<Option<SessionUser>, SessionStoreError>;

    /// Persist the session, replacing any previous one.
    fn save(&self, user: &SessionUser) -> Result<(), SessionStoreError>;

    /// Remove the persisted session. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_store_error_display() {
        assert_eq!(
            SessionStoreError::Corrupt("expected value".to_string()).to_string(),
            "Stored session is corrupt: expected value"
        );
        assert_eq!(
            SessionStoreError::SaveFailed("disk full".to_string()).to_string(),
            "Failed to save session: disk full"
        );
        assert_eq!(
            SessionStoreError::ClearFailed("permission denied".to_string()).to_string(),
            "Failed to clear session: permission denied"
        );
    }

    #[test]
    fn test_session_store_error_implements_error_trait() {
        let err = SessionStoreError::Io("broken pipe".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
