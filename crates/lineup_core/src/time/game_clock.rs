use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::duration::Duration;
use super::timer::{Timer, TimerData};

/// Period structure for a game: how many periods and how long each runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PeriodConfig {
    pub total_periods: u8,
    pub period_length_min: u32,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self { total_periods: 2, period_length_min: 45 }
    }
}

impl PeriodConfig {
    pub const fn period_length_ms(&self) -> u64 {
        self.period_length_min as u64 * 60_000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// No period underway (before kickoff or between periods).
    Pending,
    Running,
    /// Running past the period's nominal length, awaiting the whistle.
    Overdue,
    Done,
}

/// The single game clock: which period is underway and how long it has run.
///
/// A sibling of the per-player shift timers, built on the same `Timer`
/// primitive. An overdue period is typically ended retroactively at its
/// nominal end rather than at the instant the whistle is finally recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    timer: Timer,
    config: PeriodConfig,
    current_period: u8,
    period_status: PeriodStatus,
    period_start_ms: Option<u64>,
}

/// Persisted game-clock snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameClockData {
    pub timer: TimerData,
    pub current_period: u8,
    pub period_status: PeriodStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start_time: Option<u64>,
    pub total_periods: u8,
    pub period_length_min: u32,
}

impl GameClock {
    pub fn new(config: PeriodConfig) -> Self {
        Self {
            timer: Timer::new(),
            config,
            current_period: 0,
            period_status: PeriodStatus::Pending,
            period_start_ms: None,
        }
    }

    pub fn from_data(data: &GameClockData) -> Self {
        Self {
            timer: Timer::from_data(&data.timer),
            config: PeriodConfig {
                total_periods: data.total_periods,
                period_length_min: data.period_length_min,
            },
            current_period: data.current_period,
            period_status: data.period_status,
            period_start_ms: data.period_start_time,
        }
    }

    pub fn to_data(&self) -> GameClockData {
        GameClockData {
            timer: self.timer.to_data(),
            current_period: self.current_period,
            period_status: self.period_status,
            period_start_time: self.period_start_ms,
            total_periods: self.config.total_periods,
            period_length_min: self.config.period_length_min,
        }
    }

    pub const fn config(&self) -> PeriodConfig {
        self.config
    }

    pub const fn current_period(&self) -> u8 {
        self.current_period
    }

    pub const fn period_status(&self) -> PeriodStatus {
        self.period_status
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Wall-clock instant at which the current period nominally ends.
    pub fn nominal_end_ms(&self) -> Option<u64> {
        self.period_start_ms.map(|start| start + self.config.period_length_ms())
    }

    /// Begin the next period at `now_ms`. Returns `false` when a period is
    /// already underway or all periods have been played.
    pub fn start_period(&mut self, now_ms: u64) -> bool {
        let between_periods = matches!(
            self.period_status,
            PeriodStatus::Pending | PeriodStatus::Done
        );
        if !between_periods || self.current_period >= self.config.total_periods {
            return false;
        }
        self.current_period += 1;
        self.period_status = PeriodStatus::Running;
        self.period_start_ms = Some(now_ms);
        // Each period gets a fresh timer; elapsed() reads the current
        // period only.
        self.timer = Timer::new();
        self.timer.start(now_ms);
        debug!(period = self.current_period, start_ms = now_ms, "period started");
        true
    }

    /// Pause or resume the clock mid-period. Returns the running state after
    /// the toggle. No-op outside a period.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.timer.is_running() {
            self.timer.stop(now_ms);
            return false;
        }
        if matches!(self.period_status, PeriodStatus::Running | PeriodStatus::Overdue) {
            self.timer.start(now_ms);
            return true;
        }
        false
    }

    /// Flag the period as overdue once its nominal length has elapsed.
    /// Returns whether the flag was set by this call.
    pub fn mark_overdue(&mut self, now_ms: u64) -> bool {
        if self.period_status != PeriodStatus::Running {
            return false;
        }
        if self.timer.elapsed(now_ms).seconds() >= self.config.period_length_min as u64 * 60 {
            self.period_status = PeriodStatus::Overdue;
            return true;
        }
        false
    }

    /// End the current period, stopping the clock as of `at_ms` when given
    /// (the retroactive-whistle case) or `now_ms` otherwise.
    pub fn end_period(&mut self, at_ms: Option<u64>, now_ms: u64) -> bool {
        if !matches!(self.period_status, PeriodStatus::Running | PeriodStatus::Overdue) {
            return false;
        }
        let stop_ms = at_ms.unwrap_or(now_ms);
        self.timer.stop(stop_ms);
        self.period_status = PeriodStatus::Done;
        debug!(period = self.current_period, stop_ms, "period ended");
        true
    }

    /// Running time of the current period as of `now_ms`.
    pub fn elapsed(&self, now_ms: u64) -> Duration {
        self.timer.elapsed(now_ms)
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(PeriodConfig::default())
    }
}
