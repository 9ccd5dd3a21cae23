//! Command-line interface.
//!
//! The dispatcher runs before the terminal UI starts:
//!
//! ```ignore
//! use plaza::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command, &config) {
//!     return result;
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::Result;

use crate::adapters::FileSessionStore;
use crate::config::ClientConfig;
use crate::traits::SessionStore;

/// Run a CLI command if applicable.
///
/// Returns `None` for [`CliCommand::RunTui`].
pub fn run_cli_command(command: &CliCommand, config: &ClientConfig) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Logout => Some(logout(config)),
        CliCommand::RunTui(_) => None,
    }
}

fn logout(config: &ClientConfig) -> Result<()> {
    let Some(path) = config.session_file.as_ref() else {
        println!("No session to clear.");
        return Ok(());
    };
    FileSessionStore::at(path).clear()?;
    println!("Signed out.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;
    use tempfile::TempDir;

    #[test]
    fn test_run_tui_returns_none() {
        let command = CliCommand::RunTui(RunOptions::default());
        assert!(run_cli_command(&command, &ClientConfig::default()).is_none());
    }

    #[test]
    fn test_logout_removes_session_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        FileSessionStore::at(&path).save(&SessionUser::demo()).unwrap();
        let config = ClientConfig::default().with_session_file(&path);

        let result = run_cli_command(&CliCommand::Logout, &config).unwrap();

        assert!(result.is_ok());
        assert!(!path.exists());
    }
}
