//! Timer session persistence module
//!
//! This module contains the session record types and the SQLite-backed store.

pub mod session;
pub mod sqlite;

// Re-export main types
pub use session::{format_mm_ss, SessionPatch, TimerSession};
pub use sqlite::{SessionStore, SqliteSessionStore, StoreError};
