//! Shift tracking: per-player on-field time and shift counts, the
//! roster-wide tracker map, and reconstruction of a map from a game's
//! event log.

pub mod map;
pub mod replay;
pub mod tracker;
pub mod validation;

pub use map::{PlayerTimeTrackerMap, PlayerTimeTrackerMapData};
pub use replay::{create_shift_tracker_from_events, create_shift_tracker_with_clock};
pub use tracker::{PlayerTimeTracker, PlayerTimeTrackerData, STARTER_COUNTS_AS_SHIFT};
pub use validation::Validate;
