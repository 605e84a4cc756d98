use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::duration::Duration;

/// Start/stop timer that accumulates running time across cycles.
///
/// The timer itself holds no clock: callers pass the instant at which each
/// operation takes effect, which is what lets a period be closed "as of" an
/// earlier time than the call itself (a retroactive stop).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    is_running: bool,
    start_time: Option<u64>,
    duration: Duration,
}

/// Persisted timer snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimerData {
    pub is_running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    pub duration: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a snapshot. A snapshot captured mid-run (`is_running`
    /// with a stored `start_time`) resumes live elapsed computation from
    /// that instant rather than resetting it.
    pub fn from_data(data: &TimerData) -> Self {
        Self {
            is_running: data.is_running,
            start_time: data.start_time,
            duration: data.duration,
        }
    }

    pub fn to_data(&self) -> TimerData {
        TimerData {
            is_running: self.is_running,
            start_time: self.start_time,
            duration: self.duration,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.is_running
    }

    /// Time accumulated by completed cycles, excluding any in-progress run.
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin a running cycle at `now_ms`. No-op when already running.
    pub fn start(&mut self, now_ms: u64) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        self.start_time = Some(now_ms);
    }

    /// End the running cycle as of `at_ms`, folding the elapsed span into the
    /// accumulated duration. `at_ms` may predate the wall-clock instant of
    /// the call; a stop earlier than the start clamps to zero. No-op when
    /// not running.
    pub fn stop(&mut self, at_ms: u64) {
        if !self.is_running {
            return;
        }
        if let Some(started) = self.start_time {
            self.duration = self.duration + Duration::from_millis(at_ms.saturating_sub(started));
        }
        self.is_running = false;
        self.start_time = None;
    }

    /// Total elapsed time as of `now_ms`, including the in-progress run.
    pub fn elapsed(&self, now_ms: u64) -> Duration {
        match self.start_time {
            Some(started) if self.is_running => {
                self.duration + Duration::from_millis(now_ms.saturating_sub(started))
            }
            _ => self.duration,
        }
    }
}
