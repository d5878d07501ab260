//! Tickdown - a persistent countdown-timer service
//!
//! This library provides a SQLite-backed store for timer sessions, an HTTP
//! API for controlling them, and a client-side watcher with a local fallback
//! countdown for when the backend is unreachable.

pub mod config;
pub mod store;
pub mod state;
pub mod api;
pub mod client;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use store::{SessionStore, SqliteSessionStore, TimerSession};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
