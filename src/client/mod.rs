//! Timer client module
//!
//! Consumer-side pieces: the `TimerApi` boundary trait, its HTTP
//! implementation, the local fallback countdown, and the polling watcher
//! that ties them together.

pub mod api;
pub mod fallback;
pub mod watcher;

// Re-export main types
pub use api::{ClientError, HttpTimerApi, TimerApi};
pub use fallback::LocalCountdown;
pub use watcher::TimerWatcher;
