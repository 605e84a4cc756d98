//! # lineup_core - Roster and Playing-Time Tracking Core
//!
//! This library implements the shift-tracking model behind a live-game
//! roster application: per-player on-field timers and shift counts, the
//! single game clock they all follow, and deterministic reconstruction of
//! tracker state from a game's event log.
//!
//! ## Features
//! - Deterministic replay (same roster + same events = same snapshot)
//! - Retroactive clock stops for overdue periods
//! - Lossless JSON snapshots for persistence
//! - Injected time source, so tests and replay never read the wall clock

// Duration keeps an explicit `add` alongside the operator impl
#![allow(clippy::should_implement_trait)]

pub mod api;
pub mod error;
pub mod models;
pub mod time;
pub mod tracking;

pub use api::{
    rebuild_tracker_json, tracker_map_from_json, tracker_map_to_json, RebuildRequest,
    RebuildResponse,
};
pub use error::{Result, TrackerError};
pub use models::{
    GameEvent, GameEventKind, GameStatus, LiveGame, Player, PlayerStatus, SetupDetails,
    SubInDetails,
};
pub use time::{
    Duration, FakeTimeProvider, GameClock, GameClockData, PeriodConfig, PeriodStatus,
    SystemTimeProvider, TimeProvider, Timer, TimerData,
};
pub use tracking::{
    create_shift_tracker_from_events, create_shift_tracker_with_clock, PlayerTimeTracker,
    PlayerTimeTrackerData, PlayerTimeTrackerMap, PlayerTimeTrackerMapData, Validate,
    STARTER_COUNTS_AS_SHIFT,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
