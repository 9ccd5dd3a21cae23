//! Tracing setup.
//!
//! The terminal belongs to the UI, so log lines go to a file
//! (`~/.plaza/plaza.log` by default) filtered by `PLAZA_LOG`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "PLAZA_LOG";
pub const DEFAULT_FILTER: &str = "plaza=info";
pub const LOG_FILE: &str = "plaza.log";

/// Default log file location, if a home directory exists.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".plaza").join(LOG_FILE))
}

/// Filter from `PLAZA_LOG`, or [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    std::env::var(ENV_LOG)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `path`.
///
/// Subsequent calls are no-ops. Failing to open the file leaves logging
/// disabled rather than aborting startup.
pub fn init_tracing(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", path.display(), e);
            return;
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_filter_default() {
        std::env::remove_var(ENV_LOG);
        assert_eq!(env_filter().to_string(), DEFAULT_FILTER);
    }

    #[test]
    #[serial]
    fn test_env_filter_from_env() {
        std::env::set_var(ENV_LOG, "plaza=debug");
        assert_eq!(env_filter().to_string(), "plaza=debug");
        std::env::remove_var(ENV_LOG);
    }

    #[test]
    fn test_default_log_path() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with(".plaza/plaza.log"));
        }
    }
}
