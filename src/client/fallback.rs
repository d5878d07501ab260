//! Local fallback countdown
//!
//! An explicit state machine the watcher free-runs when the backend is
//! unreachable. The caller owns the clock: each `tick()` is one elapsed
//! second.

use crate::api::responses::TimerStateView;
use crate::store::format_mm_ss;

/// Client-held countdown state, mirroring one server session
#[derive(Debug, Clone, PartialEq)]
pub struct LocalCountdown {
    pub duration_seconds: i64,
    pub remaining_seconds: i64,
    pub is_running: bool,
    pub is_completed: bool,
}

impl LocalCountdown {
    /// Fresh countdown: full duration, not running, not completed
    pub fn new(duration_seconds: i64) -> Self {
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            is_running: false,
            is_completed: false,
        }
    }

    /// Overwrite the local view with an authoritative server state
    pub fn sync(&mut self, view: &TimerStateView) {
        self.duration_seconds = view.duration_seconds;
        self.remaining_seconds = view.remaining_seconds;
        self.is_running = view.is_running;
        self.is_completed = view.is_completed;
    }

    /// Begin or resume counting down
    pub fn start(&mut self) {
        self.is_running = true;
    }

    /// Pause; ticks become no-ops until restarted
    pub fn stop(&mut self) {
        self.is_running = false;
    }

    /// Back to the full duration with both flags cleared
    pub fn reset(&mut self) {
        self.remaining_seconds = self.duration_seconds;
        self.is_running = false;
        self.is_completed = false;
    }

    /// Advance one second; completes and stops at zero
    pub fn tick(&mut self) {
        if !self.is_running || self.is_completed {
            return;
        }
        self.remaining_seconds = (self.remaining_seconds - 1).max(0);
        if self.remaining_seconds == 0 {
            self.is_completed = true;
            self.is_running = false;
        }
    }

    /// MM:SS rendering of the remaining time
    pub fn formatted_time(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_decrements_while_running() {
        let mut countdown = LocalCountdown::new(10);
        countdown.start();
        countdown.tick();
        countdown.tick();

        assert_eq!(countdown.remaining_seconds, 8);
        assert!(countdown.is_running);
        assert!(!countdown.is_completed);
    }

    #[test]
    fn tick_is_a_noop_when_stopped() {
        let mut countdown = LocalCountdown::new(10);
        countdown.tick();
        assert_eq!(countdown.remaining_seconds, 10);

        countdown.start();
        countdown.tick();
        countdown.stop();
        countdown.tick();
        assert_eq!(countdown.remaining_seconds, 9);
    }

    #[test]
    fn completes_and_stops_at_zero() {
        let mut countdown = LocalCountdown::new(2);
        countdown.start();
        countdown.tick();
        countdown.tick();

        assert_eq!(countdown.remaining_seconds, 0);
        assert!(countdown.is_completed);
        assert!(!countdown.is_running);
        assert_eq!(countdown.formatted_time(), "00:00");

        // Further ticks must not underflow or restart anything
        countdown.tick();
        assert_eq!(countdown.remaining_seconds, 0);
    }

    #[test]
    fn reset_restores_full_duration_from_any_state() {
        let mut countdown = LocalCountdown::new(3);
        countdown.start();
        countdown.tick();
        countdown.tick();
        countdown.tick();
        assert!(countdown.is_completed);

        countdown.reset();
        assert_eq!(countdown.remaining_seconds, 3);
        assert!(!countdown.is_running);
        assert!(!countdown.is_completed);
    }
}
