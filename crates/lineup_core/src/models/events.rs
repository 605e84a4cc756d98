use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::PeriodConfig;

/// Timestamped entry in a game's append-only event log.
///
/// The log is externally ordered by insertion, which group commits and
/// concurrent writers do not guarantee to be temporal order, so replay
/// re-sorts by `timestamp_ms` before folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Epoch milliseconds at which the event occurred.
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: GameEventKind,
}

/// Event taxonomy for a tracked game.
///
/// `SubOut` and `Swap` are recorded for audit and lineup views only; the
/// `SubIn` event alone drives both sides of a substitution during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GameEventKind {
    Setup(SetupDetails),
    PeriodStart(PeriodStartDetails),
    PeriodEnd(PeriodEndDetails),
    ClockToggle(ClockToggleDetails),
    SubIn(SubInDetails),
    SubOut(SubOutDetails),
    Swap(SwapDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SetupDetails {
    /// Ids of the players occupying field positions at kickoff.
    #[serde(default)]
    pub starters: Vec<String>,
    #[serde(default)]
    pub clock: PeriodConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PeriodStartDetails {
    pub period: u8,
    /// Instant the period clock actually started.
    pub start_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PeriodEndDetails {
    pub period: u8,
    /// Instant the period clock stopped (the nominal end when an overdue
    /// period is closed retroactively).
    pub end_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClockToggleDetails {
    /// Clock state *after* the toggle.
    pub is_running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubInDetails {
    /// Player coming onto the field.
    pub player_id: String,
    /// Player being replaced.
    pub replaced_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubOutDetails {
    pub player_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SwapDetails {
    pub player_id: String,
    pub position: String,
    pub previous_position: String,
}

impl GameEvent {
    pub fn setup(timestamp_ms: u64, starters: Vec<String>, clock: PeriodConfig) -> Self {
        Self {
            id: None,
            timestamp_ms,
            kind: GameEventKind::Setup(SetupDetails { starters, clock }),
        }
    }

    /// Period start whose clock-start instant is the event timestamp itself.
    pub fn period_start(timestamp_ms: u64, period: u8) -> Self {
        Self {
            id: None,
            timestamp_ms,
            kind: GameEventKind::PeriodStart(PeriodStartDetails {
                period,
                start_time_ms: timestamp_ms,
            }),
        }
    }

    pub fn period_end(timestamp_ms: u64, period: u8, end_time_ms: u64) -> Self {
        Self {
            id: None,
            timestamp_ms,
            kind: GameEventKind::PeriodEnd(PeriodEndDetails { period, end_time_ms }),
        }
    }

    pub fn clock_toggle(timestamp_ms: u64, is_running: bool) -> Self {
        Self {
            id: None,
            timestamp_ms,
            kind: GameEventKind::ClockToggle(ClockToggleDetails { is_running }),
        }
    }

    pub fn sub_in(
        timestamp_ms: u64,
        player_id: impl Into<String>,
        replaced_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            timestamp_ms,
            kind: GameEventKind::SubIn(SubInDetails {
                player_id: player_id.into(),
                replaced_id: replaced_id.into(),
                position: None,
            }),
        }
    }

    pub fn sub_out(timestamp_ms: u64, player_id: impl Into<String>) -> Self {
        Self {
            id: None,
            timestamp_ms,
            kind: GameEventKind::SubOut(SubOutDetails { player_id: player_id.into() }),
        }
    }

    pub fn swap(
        timestamp_ms: u64,
        player_id: impl Into<String>,
        position: impl Into<String>,
        previous_position: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            timestamp_ms,
            kind: GameEventKind::Swap(SwapDetails {
                player_id: player_id.into(),
                position: position.into(),
                previous_position: previous_position.into(),
            }),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
