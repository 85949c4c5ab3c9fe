//! dotoday-server: to-do lists over HTTP with live sync
//!
//! Lists and tasks live in SQLite behind a small JSON API. Every committed
//! change is pushed to WebSocket clients so open views stay current.

pub mod db;
pub mod http;
pub mod models;
pub mod notify;
pub mod services;

pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
