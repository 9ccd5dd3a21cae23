//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, DELETE)
//! - [`SessionStore`] - Persistence of the signed-in user

pub mod http;
pub mod session_store;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use session_store::{SessionStore, SessionStoreError};
