//! Command-line argument parsing.

/// Options for running the terminal UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Overrides `PLAZA_API_URL`
    pub api_url: Option<String>,
    /// Sign in as the demo account without asking the server
    pub demo: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Forget the persisted session and exit
    Logout,
    /// Run the TUI application (default)
    RunTui(RunOptions),
}

pub const USAGE: &str = "\
Usage: plaza [OPTIONS]

Options:
  --api-url <URL>  API base URL (default: $PLAZA_API_URL or http://localhost:8000)
  --demo           Sign in as the demo user
  --logout         Forget the saved session and exit
  -V, --version    Print version
  -h, --help       Print help";

/// Parse command-line arguments and return the command to execute.
///
/// Unknown arguments are ignored.
///
/// # Examples
///
/// ```
/// use plaza::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["plaza".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--logout" => return CliCommand::Logout,
            "--demo" => options.demo = true,
            "--api-url" => {
                if let Some(url) = args.next() {
                    options.api_url = Some(url);
                }
            }
            other => {
                if let Some(url) = other.strip_prefix("--api-url=") {
                    options.api_url = Some(url.to_string());
                }
            }
        }
    }
    CliCommand::RunTui(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["plaza".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_logout_and_help() {
        assert_eq!(parse(&["--logout"]), CliCommand::Logout);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::RunTui(RunOptions::default()));
    }

    #[test]
    fn test_parse_api_url_forms() {
        let expected = CliCommand::RunTui(RunOptions {
            api_url: Some("http://api:8000".to_string()),
            demo: true,
        });
        assert_eq!(parse(&["--demo", "--api-url", "http://api:8000"]), expected);
        assert_eq!(parse(&["--api-url=http://api:8000", "--demo"]), expected);
    }

    #[test]
    fn test_parse_dangling_api_url() {
        assert_eq!(parse(&["--api-url"]), CliCommand::RunTui(RunOptions::default()));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(parse(&["--unknown"]), CliCommand::RunTui(RunOptions::default()));
    }
}
