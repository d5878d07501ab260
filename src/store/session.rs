//! Timer session record and display formatting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted countdown timer session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSession {
    pub id: i64,
    /// Total duration in seconds, fixed at creation
    pub duration_seconds: i64,
    /// Countdown value, decremented by callers (never by the store)
    pub remaining_seconds: i64,
    pub is_running: bool,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimerSession {
    /// The MM:SS display string for the remaining time
    pub fn formatted_time(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

/// Partial update of the mutable session fields
///
/// `None` fields are left untouched by the store; `duration_seconds` and
/// `created_at` are never updatable.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub remaining_seconds: Option<i64>,
    pub is_running: Option<bool>,
    pub is_completed: Option<bool>,
}

/// Format a second count as MM:SS, zero-padding both fields
///
/// Minutes grow past two digits rather than wrapping. Negative input clamps
/// to "00:00".
pub fn format_mm_ss(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(665), "11:05");
        assert_eq!(format_mm_ss(45), "00:45");
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(240), "04:00");
    }

    #[test]
    fn long_durations_widen_the_minute_field() {
        assert_eq!(format_mm_ss(6000), "100:00");
    }

    #[test]
    fn negative_input_clamps_to_zero() {
        assert_eq!(format_mm_ss(-5), "00:00");
    }
}
