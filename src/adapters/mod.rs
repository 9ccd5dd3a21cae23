//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSessionStore`] - JSON file holding the signed-in user
//! - [`MemorySessionStore`] - process-lifetime fallback when there is no
//!   home directory
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_session;
pub mod memory_session;
pub mod mock;
pub mod reqwest_http;

pub use file_session::{default_session_path, FileSessionStore};
pub use memory_session::MemorySessionStore;
pub use mock::{InMemorySessionStore, MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
