use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{GameEvent, GameEventKind, LiveGame};
use crate::time::{SystemTimeProvider, TimeProvider};

use super::map::PlayerTimeTrackerMap;

/// Rebuild a tracker map from scratch by replaying a game's full event log.
///
/// Events are stable-sorted by timestamp first (group commits do not
/// guarantee temporal insertion order; ties keep their insertion order),
/// then folded over a map freshly seeded from the game's roster. Pure given
/// its inputs: replaying the same log twice yields identical snapshots.
pub fn create_shift_tracker_with_clock(
    game: &LiveGame,
    events: &[GameEvent],
    clock: Arc<dyn TimeProvider>,
) -> Result<PlayerTimeTrackerMap> {
    let mut ordered: Vec<&GameEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.timestamp_ms);

    let mut map = PlayerTimeTrackerMap::create_from_game(game, clock)?;
    debug!(game_id = %game.id, events = ordered.len(), "replaying event log");

    for event in ordered {
        // Exhaustive on purpose: a new event type must be wired in here
        // deliberately, not skipped.
        match &event.kind {
            GameEventKind::Setup(details) => {
                map.set_starters(&details.starters);
            }
            GameEventKind::PeriodStart(details) => {
                map.start_shift_timers(Some(details.start_time_ms));
            }
            GameEventKind::PeriodEnd(details) => {
                map.stop_shift_timers(Some(details.end_time_ms));
            }
            GameEventKind::ClockToggle(details) => {
                // Payload carries the clock state after the toggle.
                if details.is_running {
                    map.start_shift_timers(Some(event.timestamp_ms));
                } else {
                    map.stop_shift_timers(Some(event.timestamp_ms));
                }
            }
            GameEventKind::SubIn(details) => {
                map.substitute_player(
                    &details.player_id,
                    &details.replaced_id,
                    Some(event.timestamp_ms),
                )?;
            }
            // Audit-only events: SubIn drives both sides of a substitution,
            // and repositioning never touches shift timing.
            GameEventKind::SubOut(_) | GameEventKind::Swap(_) => {}
        }
    }
    Ok(map)
}

/// `create_shift_tracker_with_clock` against the system wall clock. Replay
/// itself stays deterministic (every fold step passes an explicit instant),
/// so the injected clock only matters for live queries afterwards.
pub fn create_shift_tracker_from_events(
    game: &LiveGame,
    events: &[GameEvent],
) -> Result<PlayerTimeTrackerMap> {
    create_shift_tracker_with_clock(game, events, Arc::new(SystemTimeProvider))
}
