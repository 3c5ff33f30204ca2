//! Focus session countdown.
//!
//! A [`FocusTimer`] owns a worker thread that ticks at a fixed interval.
//! Remaining time is always recomputed from the start instant, so late or
//! spurious wake-ups never accumulate drift.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::time_format::format_countdown;

/// Whole seconds left of `duration` after `elapsed`, never negative.
pub fn remaining_secs(duration: Duration, elapsed: Duration) -> u64 {
    duration.saturating_sub(elapsed).as_secs()
}

/// Snapshot of a running countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusStatus {
    pub running: bool,
    pub started_at: DateTime<Utc>,
    pub duration_secs: u64,
    pub remaining_secs: u64,
    pub display: String,
}

/// Handle to a running countdown. Dropping it cancels the countdown.
pub struct FocusTimer {
    started: Instant,
    started_at: DateTime<Utc>,
    duration: Duration,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FocusTimer {
    /// Starts counting down `duration`.
    ///
    /// `on_tick` receives the remaining seconds once per `tick_interval`
    /// (and immediately on start). `on_expire` runs once, on the timer thread,
    /// when the countdown reaches zero. Neither runs after [`cancel`](Self::cancel).
    pub fn start<T, E>(duration: Duration, tick_interval: Duration, on_tick: T, on_expire: E) -> Self
    where
        T: Fn(u64) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        let started = Instant::now();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                let remaining = remaining_secs(duration, started.elapsed());
                on_tick(remaining);
                if remaining == 0 {
                    flag.store(false, Ordering::SeqCst);
                    on_expire();
                    break;
                }
                thread::park_timeout(tick_interval);
            }
        });

        Self {
            started,
            started_at: Utc::now(),
            duration,
            running,
            handle: Some(handle),
        }
    }

    /// Seconds left in the session.
    pub fn remaining_secs(&self) -> u64 {
        remaining_secs(self.duration, self.started.elapsed())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> FocusStatus {
        let remaining = self.remaining_secs();
        FocusStatus {
            running: self.is_running(),
            started_at: self.started_at,
            duration_secs: self.duration.as_secs(),
            remaining_secs: remaining,
            display: format_countdown(remaining),
        }
    }

    /// Stops the countdown and waits for the worker thread to exit.
    pub fn cancel(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
