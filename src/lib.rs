//! plaza: a terminal client for the plaza social network demo.
//!
//! The library holds everything but the event loop: the REST gateway, the
//! data model, the per-feature state containers and the persisted session.
//! The binary wires them into a ratatui UI.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
