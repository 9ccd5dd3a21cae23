//! File-based session store.
//!
//! The signed-in user is written as pretty JSON to `~/.plaza/session.json`
//! (or the path given by the configuration).

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::models::SessionUser;
use crate::traits::{SessionStore, SessionStoreError};

/// The session directory name under the home directory.
pub const SESSION_DIR: &str = ".plaza";

/// The session file name.
pub const SESSION_FILE: &str = "session.json";

/// Default location of the session file, if a home directory exists.
pub fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SESSION_DIR).join(SESSION_FILE))
}

/// Session store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store at the default location.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        default_session_path().map(|path| Self { path })
    }

    /// Create a store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        };

        serde_json::from_str::<SessionUser>(&raw)
            .map(Some)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))
    }

    fn save(&self, user: &SessionUser) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
            }
        }

        let file =
            File::create(&self.path).map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, user)
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::ClearFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> FileSessionStore {
        FileSessionStore::at(temp_dir.path().join(SESSION_DIR).join(SESSION_FILE))
    }

    fn alice() -> SessionUser {
        SessionUser {
            id: Some("6938f6f4c4638c608cd5fc7f".to_string()),
            username: "alice".to_string(),
            email: "alice@redk.com".to_string(),
            name: Some("Alice Smith".to_string()),
            bio: None,
        }
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(!store.path().parent().unwrap().exists());

        store.save(&alice()).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Some(alice()));
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(SessionStoreError::Corrupt(_))));
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        store.save(&alice()).unwrap();

        store.clear().unwrap();

        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_default_path_ends_with_session_file() {
        if let Some(path) = default_session_path() {
            assert!(path.ends_with(Path::new(SESSION_DIR).join(SESSION_FILE)));
        }
    }
}
