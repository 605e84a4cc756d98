use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::{Duration, Timer, TimerData};

/// Whether being named to the starting lineup counts as a player's first
/// shift. With this set, a tracker seeded on-field begins at
/// `shift_count = 1`; a bench player begins at 0.
pub const STARTER_COUNTS_AS_SHIFT: bool = true;

/// Per-player state machine: on/off status, accumulated on-field time, and
/// how many times the player has come onto the field.
///
/// The tracker never decides on its own who is on; the owning map drives
/// every transition and supplies the clock-running context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTimeTracker {
    id: String,
    is_on: bool,
    shift_count: u32,
    timer: Timer,
}

/// Persisted tracker snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerTimeTrackerData {
    pub id: String,
    pub is_on: bool,
    pub shift_count: u32,
    pub timer: TimerData,
}

fn initial_shift_count(is_on: bool) -> u32 {
    if is_on && STARTER_COUNTS_AS_SHIFT {
        1
    } else {
        0
    }
}

impl PlayerTimeTracker {
    pub fn new(id: impl Into<String>, is_on: bool) -> Self {
        Self {
            id: id.into(),
            is_on,
            shift_count: initial_shift_count(is_on),
            timer: Timer::new(),
        }
    }

    pub fn from_data(data: &PlayerTimeTrackerData) -> Self {
        Self {
            id: data.id.clone(),
            is_on: data.is_on,
            shift_count: data.shift_count,
            timer: Timer::from_data(&data.timer),
        }
    }

    pub fn to_data(&self) -> PlayerTimeTrackerData {
        PlayerTimeTrackerData {
            id: self.id.clone(),
            is_on: self.is_on,
            shift_count: self.shift_count,
            timer: self.timer.to_data(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    pub const fn shift_count(&self) -> u32 {
        self.shift_count
    }

    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Reseed the baseline on/off state from a Setup event, discarding any
    /// status inherited from the roster snapshot. Timers are untouched;
    /// starters are seeded before any clock has run.
    pub(crate) fn seed_starting_state(&mut self, is_on: bool) {
        self.is_on = is_on;
        self.shift_count = initial_shift_count(is_on);
    }

    /// Begin accruing on-field time. The map calls this only for trackers
    /// that are currently on.
    pub fn start_shift(&mut self, now_ms: u64) {
        self.timer.start(now_ms);
    }

    /// Stop accruing, as of `at_ms` (which may be retroactive).
    pub fn stop_shift(&mut self, at_ms: u64) {
        self.timer.stop(at_ms);
    }

    /// Bring the player onto the field. Accrual begins immediately only when
    /// the game clock is running; otherwise the timer stays stopped until
    /// the clock resumes.
    pub fn substitute_in(&mut self, now_ms: u64, clock_running: bool) {
        debug_assert!(!self.is_on, "substitute_in on an on-field tracker");
        self.is_on = true;
        self.shift_count += 1;
        if clock_running {
            self.timer.start(now_ms);
        }
    }

    /// Take the player off the field, finalizing any running accrual.
    pub fn substitute_out(&mut self, at_ms: u64) {
        self.is_on = false;
        self.timer.stop(at_ms);
    }

    /// Cumulative on-field time as of `now_ms`.
    pub fn total_time(&self, now_ms: u64) -> Duration {
        self.timer.elapsed(now_ms)
    }
}
