//! Error handling for the client.
//!
//! - [`ApiError`] - every failure a gateway call can produce
//! - [`ErrorCategory`] - coarse classification used by the screens
//!
//! # Example
//!
//! ```ignore
//! use plaza::error::ApiError;
//!
//! match api.get_user("zed").await {
//!     Ok(user) => println!("{}", user.username),
//!     Err(err) if err.is_network() => eprintln!("offline: {}", err.user_message()),
//!     Err(err) => eprintln!("{}", err.user_message()),
//! }
//! ```

mod api;
mod category;

pub use api::{extract_detail, ApiError, ApiResult, UNREACHABLE_MESSAGE};
pub use category::ErrorCategory;
