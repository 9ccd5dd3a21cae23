//! In-memory session store for testing.

use std::sync::{Arc, Mutex};

use crate::models::SessionUser;
use crate::traits::{SessionStore, SessionStoreError};

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Empty,
    Stored(SessionUser),
    Corrupt,
}

/// Session store kept in memory, shareable between clones.
///
/// `corrupt()` simulates an unreadable persisted session.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    slot: Arc<Mutex<Slot>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `user`.
    pub fn with_user(user: SessionUser) -> Self {
        let store = Self::new();
        *store.slot.lock().unwrap() = Slot::Stored(user);
        store
    }

    /// Create a store whose contents cannot be parsed.
    pub fn corrupt() -> Self {
        let store = Self::new();
        *store.slot.lock().unwrap() = Slot::Corrupt;
        store
    }

    /// Make subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    /// The stored user, if any.
    pub fn stored(&self) -> Option<SessionUser> {
        match &*self.slot.lock().unwrap() {
            Slot::Stored(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// True when nothing (not even corrupt data) is stored.
    pub fn is_empty(&self) -> bool {
        matches!(*self.slot.lock().unwrap(), Slot::Empty)
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionStoreError> {
        match &*self.slot.lock().unwrap() {
            Slot::Empty => Ok(None),
            Slot::Stored(user) => Ok(Some(user.clone())),
            Slot::Corrupt => Err(SessionStoreError::Corrupt(
                "expected value at line 1 column 1".to_string(),
            )),
        }
    }

    fn save(&self, user: &SessionUser) -> Result<(), SessionStoreError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(SessionStoreError::SaveFailed("read-only store".to_string()));
        }
        *self.slot.lock().unwrap() = Slot::Stored(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.lock().unwrap() = Slot::Empty;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> SessionUser {
        SessionUser {
            id: None,
            username: "bob".to_string(),
            email: "bob@redk.com".to_string(),
            name: None,
            bio: None,
        }
    }

    #[test]
    fn test_save_load_clear() {
        let store = InMemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&bob()).unwrap();
        assert_eq!(store.load().unwrap(), Some(bob()));

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_store() {
        let store = InMemorySessionStore::corrupt();
        assert!(matches!(store.load(), Err(SessionStoreError::Corrupt(_))));
        assert!(!store.is_empty());
    }

    #[test]
    fn test_failing_saves() {
        let store = InMemorySessionStore::new();
        store.fail_saves(true);
        assert!(store.save(&bob()).is_err());
        assert!(store.stored().is_none());
    }
}
