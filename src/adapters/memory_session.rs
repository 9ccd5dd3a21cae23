//! Session store for machines without a home directory.
//!
//! The signed-in user lives only as long as the process.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::SessionUser;
use crate::traits::{SessionStore, SessionStoreError};

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<SessionUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<SessionUser>> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionStoreError> {
        Ok(self.slot().clone())
    }

    fn save(&self, user: &SessionUser) -> Result<(), SessionStoreError> {
        *self.slot() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_keeps_user_until_cleared() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&SessionUser::demo()).unwrap();
        assert_eq!(store.load().unwrap().unwrap().username, "alice");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(&SessionUser::demo()).unwrap();

        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.user.lock().unwrap();
            panic!("poison the session lock");
        })
        .join();

        assert!(store.user.is_poisoned());
        assert_eq!(store.load().unwrap().unwrap().username, "alice");
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
