//! Coarse classification of API failures.
//!
//! Screens use the category to pick a colour and decide whether to offer the
//! retry key.

use std::fmt;

/// High-level categorization of failures for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The server could not be reached (connect failure, timeout).
    Network,

    /// The server answered with a 5xx status.
    Server,

    /// The server rejected the request with a 4xx status
    /// (unknown user, duplicate username, ...).
    Rejected,

    /// Input was refused locally before any request.
    Validation,

    /// The response could not be understood, or the client failed locally.
    Client,
}

impl ErrorCategory {
    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Rejected => "rejected",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Client => "client",
        }
    }

    /// Hint shown under the error message.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Is the API running? Press r to retry",
            ErrorCategory::Server => "The server had a problem. Press r to retry",
            ErrorCategory::Rejected => "Check the request and try again",
            ErrorCategory::Validation => "Fix the highlighted field",
            ErrorCategory::Client => "Unexpected response from the server",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Rejected.is_retryable());
        assert!(!ErrorCategory::Validation.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
    }

    #[test]
    fn test_recovery_hint_mentions_retry_when_retryable() {
        for category in [ErrorCategory::Network, ErrorCategory::Server] {
            assert!(category.recovery_hint().contains("retry"));
        }
    }
}
