//! Polling watcher
//!
//! Polls the server once per second while the locally held state says the
//! timer is running, and free-runs the local countdown on any call failure.
//! There is no reconciliation when connectivity resumes; the next successful
//! poll simply overwrites the local view.

use std::time::Duration;

use tracing::{debug, warn};

use super::api::TimerApi;
use super::fallback::LocalCountdown;
use crate::api::responses::TimerStateView;
use crate::store::TimerSession;

/// Watches one timer session, keeping a local countdown in step with it
pub struct TimerWatcher<A> {
    api: A,
    session_id: i64,
    local: LocalCountdown,
    backend_available: bool,
}

impl<A: TimerApi> TimerWatcher<A> {
    /// Watch an existing session, seeding the local countdown from it
    pub fn new(api: A, session: &TimerSession) -> Self {
        let mut local = LocalCountdown::new(session.duration_seconds);
        local.remaining_seconds = session.remaining_seconds;
        local.is_running = session.is_running;
        local.is_completed = session.is_completed;
        Self {
            api,
            session_id: session.id,
            local,
            backend_available: true,
        }
    }

    /// The current view, server-fed or locally simulated
    pub fn state(&self) -> TimerStateView {
        TimerStateView {
            id: self.session_id,
            duration_seconds: self.local.duration_seconds,
            remaining_seconds: self.local.remaining_seconds,
            is_running: self.local.is_running,
            is_completed: self.local.is_completed,
            formatted_time: self.local.formatted_time(),
        }
    }

    /// Whether the last poll reached the backend
    pub fn backend_available(&self) -> bool {
        self.backend_available
    }

    /// One poll: sync from the server, or tick locally when it is unreachable
    pub async fn poll_once(&mut self) {
        match self.api.get_state(self.session_id).await {
            Ok(Some(view)) => {
                self.local.sync(&view);
                self.backend_available = true;
            }
            Ok(None) => {
                // The backend answered, it just has no row for us; that is
                // not an outage, so leave the local view frozen
                warn!("Session {} unknown to the server", self.session_id);
                self.backend_available = true;
            }
            Err(err) => {
                warn!("Poll failed, falling back to local countdown: {}", err);
                self.backend_available = false;
                self.local.tick();
            }
        }
    }

    /// Poll every second until the watched timer stops or completes
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first interval tick fires immediately; skip it so polls are
        // one second apart from the start
        interval.tick().await;
        while self.local.is_running && !self.local.is_completed {
            interval.tick().await;
            self.poll_once().await;
        }
        debug!(
            "Watcher for session {} finished ({})",
            self.session_id,
            self.state().formatted_time
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::client::api::ClientError;
    use crate::store::format_mm_ss;

    /// In-memory stand-in for the server, with a connectivity switch
    struct FakeTimerApi {
        state: Mutex<TimerStateView>,
        offline: AtomicBool,
        missing: AtomicBool,
    }

    impl FakeTimerApi {
        fn new(duration: i64) -> Self {
            Self {
                state: Mutex::new(TimerStateView {
                    id: 1,
                    duration_seconds: duration,
                    remaining_seconds: duration,
                    is_running: false,
                    is_completed: false,
                    formatted_time: format_mm_ss(duration),
                }),
                offline: AtomicBool::new(false),
                missing: AtomicBool::new(false),
            }
        }

        fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }

        fn set_missing(&self, missing: bool) {
            self.missing.store(missing, Ordering::SeqCst);
        }

        fn set_remaining(&self, remaining: i64, running: bool) {
            let mut state = self.state.lock().unwrap();
            state.remaining_seconds = remaining;
            state.is_running = running;
            state.formatted_time = format_mm_ss(remaining);
        }
    }

    #[async_trait]
    impl TimerApi for &FakeTimerApi {
        async fn create(&self, _duration_seconds: i64) -> Result<TimerSession, ClientError> {
            unimplemented!("watcher never creates sessions")
        }

        async fn get_state(&self, _id: i64) -> Result<Option<TimerStateView>, ClientError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(ClientError::Transport("connection refused".to_string()));
            }
            if self.missing.load(Ordering::SeqCst) {
                return Ok(None);
            }
            Ok(Some(self.state.lock().unwrap().clone()))
        }

        async fn start(&self, _id: i64) -> Result<Option<TimerSession>, ClientError> {
            unimplemented!()
        }

        async fn stop(&self, _id: i64) -> Result<Option<TimerSession>, ClientError> {
            unimplemented!()
        }

        async fn reset(&self, _id: i64) -> Result<Option<TimerSession>, ClientError> {
            unimplemented!()
        }
    }

    fn session(duration: i64, running: bool) -> TimerSession {
        let now = Utc::now();
        TimerSession {
            id: 1,
            duration_seconds: duration,
            remaining_seconds: duration,
            is_running: running,
            is_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn poll_syncs_the_server_view() {
        let api = FakeTimerApi::new(240);
        api.set_remaining(120, true);

        let mut watcher = TimerWatcher::new(&api, &session(240, true));
        watcher.poll_once().await;

        let state = watcher.state();
        assert_eq!(state.remaining_seconds, 120);
        assert!(state.is_running);
        assert_eq!(state.formatted_time, "02:00");
        assert!(watcher.backend_available());
    }

    #[tokio::test]
    async fn failed_polls_tick_the_local_countdown() {
        let api = FakeTimerApi::new(3);
        api.set_offline(true);

        let mut watcher = TimerWatcher::new(&api, &session(3, true));
        watcher.poll_once().await;
        watcher.poll_once().await;

        let state = watcher.state();
        assert_eq!(state.remaining_seconds, 1);
        assert!(!watcher.backend_available());

        watcher.poll_once().await;
        let state = watcher.state();
        assert_eq!(state.remaining_seconds, 0);
        assert!(state.is_completed);
        assert!(!state.is_running);
    }

    #[tokio::test]
    async fn unknown_session_is_not_treated_as_an_outage() {
        let api = FakeTimerApi::new(10);
        api.set_missing(true);

        let mut watcher = TimerWatcher::new(&api, &session(10, true));
        watcher.poll_once().await;
        watcher.poll_once().await;

        // The backend answered; the local view stays frozen instead of
        // free-running like it does during an outage
        let state = watcher.state();
        assert_eq!(state.remaining_seconds, 10);
        assert!(state.is_running);
        assert!(watcher.backend_available());
    }

    #[tokio::test]
    async fn successful_poll_overwrites_local_drift() {
        let api = FakeTimerApi::new(100);
        api.set_remaining(90, true);

        let mut watcher = TimerWatcher::new(&api, &session(100, true));

        api.set_offline(true);
        watcher.poll_once().await;
        watcher.poll_once().await;
        assert_eq!(watcher.state().remaining_seconds, 98);

        // Connectivity resumes; the server view wins, no reconciliation
        api.set_offline(false);
        watcher.poll_once().await;
        assert_eq!(watcher.state().remaining_seconds, 90);
        assert!(watcher.backend_available());
    }
}
