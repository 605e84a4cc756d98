//! JSON boundary for host applications.
//!
//! String-in/string-out seams so the hosting state layer can rebuild and
//! persist tracker snapshots without touching the core types directly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::models::{GameEvent, LiveGame};
use crate::time::TimeProvider;
use crate::tracking::{
    create_shift_tracker_from_events, PlayerTimeTrackerMap, PlayerTimeTrackerMapData, Validate,
};
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct RebuildRequest {
    pub schema_version: u8,
    pub game: LiveGame,
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Serialize)]
pub struct RebuildResponse {
    pub schema_version: u8,
    pub tracker_map: PlayerTimeTrackerMapData,
}

/// Replay a `{schema_version, game, events}` request into a serialized
/// tracker-map snapshot.
pub fn rebuild_tracker_json(request_json: &str) -> Result<String> {
    let request: RebuildRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(TrackerError::UnsupportedSchemaVersion(request.schema_version));
    }
    debug!(game_id = %request.game.id, events = request.events.len(), "rebuild requested");

    let map = create_shift_tracker_from_events(&request.game, &request.events)?;
    let response = RebuildResponse { schema_version: SCHEMA_VERSION, tracker_map: map.to_data() };
    Ok(serde_json::to_string(&response)?)
}

/// Deserialize and validate a persisted snapshot, then rebuild the live map
/// around the given clock.
pub fn tracker_map_from_json(
    snapshot_json: &str,
    clock: Arc<dyn TimeProvider>,
) -> Result<PlayerTimeTrackerMap> {
    let data: PlayerTimeTrackerMapData = serde_json::from_str(snapshot_json)?;
    data.validate()?;
    Ok(PlayerTimeTrackerMap::from_data(data, clock))
}

pub fn tracker_map_to_json(map: &PlayerTimeTrackerMap) -> Result<String> {
    Ok(serde_json::to_string(&map.to_data())?)
}
