use std::fmt;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::models::{LiveGame, Player};
use crate::time::{Duration, TimeProvider};

use super::tracker::{PlayerTimeTracker, PlayerTimeTrackerData};

/// The aggregate: one tracker per roster player plus the single game-clock
/// running flag. Only one game clock exists, so the map keeps exactly one
/// global running state and holds every tracker to it. An on-field
/// player's timer runs iff the clock is running, and an off-field player's
/// timer never runs.
///
/// Trackers are kept in roster order so serialized snapshots are
/// deterministic. Rosters are small enough that lookups stay linear.
#[derive(Clone)]
pub struct PlayerTimeTrackerMap {
    id: String,
    trackers: Vec<PlayerTimeTracker>,
    clock_running: bool,
    clock: Arc<dyn TimeProvider>,
}

/// Persisted map snapshot, the unit of persistence for shift tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerTimeTrackerMapData {
    pub id: String,
    #[serde(default)]
    pub trackers: Vec<PlayerTimeTrackerData>,
    #[serde(default)]
    pub clock_running: bool,
}

impl fmt::Debug for PlayerTimeTrackerMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PlayerTimeTrackerMap")
            .field("id", &self.id)
            .field("trackers", &self.trackers)
            .field("clock_running", &self.clock_running)
            .finish()
    }
}

impl PlayerTimeTrackerMap {
    /// Build one tracker per roster player, seeding `is_on` from each
    /// player's status. The clock starts stopped.
    pub fn initialize(
        id: impl Into<String>,
        players: &[Player],
        clock: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        if players.is_empty() {
            return Err(TrackerError::EmptyRoster);
        }
        let mut trackers: Vec<PlayerTimeTracker> = Vec::with_capacity(players.len());
        for player in players {
            if trackers.iter().any(|t| t.id() == player.id) {
                return Err(TrackerError::DuplicatePlayer(player.id.clone()));
            }
            trackers.push(PlayerTimeTracker::new(&player.id, player.status.is_on()));
        }
        Ok(Self { id: id.into(), trackers, clock_running: false, clock })
    }

    pub fn create_from_game(game: &LiveGame, clock: Arc<dyn TimeProvider>) -> Result<Self> {
        Self::initialize(game.id.clone(), &game.players, clock)
    }

    /// Rebuild from a persisted snapshot. The snapshot is trusted as written
    /// by `to_data`; callers holding foreign JSON validate it first.
    pub fn from_data(data: PlayerTimeTrackerMapData, clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            id: data.id,
            trackers: data.trackers.iter().map(PlayerTimeTracker::from_data).collect(),
            clock_running: data.clock_running,
            clock,
        }
    }

    pub fn to_data(&self) -> PlayerTimeTrackerMapData {
        PlayerTimeTrackerMapData {
            id: self.id.clone(),
            trackers: self.trackers.iter().map(PlayerTimeTracker::to_data).collect(),
            clock_running: self.clock_running,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn clock_running(&self) -> bool {
        self.clock_running
    }

    pub fn trackers(&self) -> &[PlayerTimeTracker] {
        &self.trackers
    }

    /// Lookup by player id. Unknown ids yield `None`; the UI probes for
    /// players that may not be loaded yet.
    pub fn get(&self, player_id: &str) -> Option<&PlayerTimeTracker> {
        self.trackers.iter().find(|t| t.id() == player_id)
    }

    fn index_of(&self, player_id: &str) -> Option<usize> {
        self.trackers.iter().position(|t| t.id() == player_id)
    }

    /// Reseed every tracker's baseline on/off state from the starter list
    /// (Setup replay). Players absent from the list go to the bench.
    pub fn set_starters<S: AsRef<str>>(&mut self, starters: &[S]) {
        for tracker in &mut self.trackers {
            let is_on = starters.iter().any(|s| s.as_ref() == tracker.id());
            tracker.seed_starting_state(is_on);
        }
        debug!(map_id = %self.id, starters = starters.len(), "starters seeded");
    }

    /// Mark the game clock running and start every on-field tracker's timer,
    /// backdated to `at` when replaying a historical period start.
    pub fn start_shift_timers(&mut self, at: Option<u64>) {
        let at_ms = at.unwrap_or_else(|| self.clock.now_ms());
        self.clock_running = true;
        for tracker in &mut self.trackers {
            if tracker.is_on() {
                tracker.start_shift(at_ms);
            }
        }
        debug!(map_id = %self.id, at_ms, "shift timers started");
    }

    /// Mark the game clock stopped and stop every running tracker's timer,
    /// retroactively at `at` when given.
    pub fn stop_shift_timers(&mut self, at: Option<u64>) {
        let at_ms = at.unwrap_or_else(|| self.clock.now_ms());
        self.clock_running = false;
        for tracker in &mut self.trackers {
            tracker.stop_shift(at_ms);
        }
        debug!(map_id = %self.id, at_ms, "shift timers stopped");
    }

    /// Swap one player off and another on, atomically with respect to the
    /// pair: both ids are validated before either tracker is touched. The
    /// outgoing player's time is finalized as of `at`; the incoming
    /// player's timer reflects the current clock state.
    pub fn substitute_player(
        &mut self,
        in_player_id: &str,
        out_player_id: &str,
        at: Option<u64>,
    ) -> Result<()> {
        let in_idx = self
            .index_of(in_player_id)
            .ok_or_else(|| TrackerError::UnknownPlayer(in_player_id.to_string()))?;
        let out_idx = self
            .index_of(out_player_id)
            .ok_or_else(|| TrackerError::UnknownPlayer(out_player_id.to_string()))?;

        let at_ms = at.unwrap_or_else(|| self.clock.now_ms());
        let clock_running = self.clock_running;
        self.trackers[out_idx].substitute_out(at_ms);
        self.trackers[in_idx].substitute_in(at_ms, clock_running);
        debug!(
            map_id = %self.id,
            player_in = in_player_id,
            player_out = out_player_id,
            at_ms,
            "substitution applied"
        );
        Ok(())
    }

    /// Apply a batch of (in, out) substitution pairs at one instant. Every
    /// pair is validated before any is applied.
    pub fn substitute_players(&mut self, pairs: &[(String, String)], at: Option<u64>) -> Result<()> {
        for (in_id, out_id) in pairs {
            if self.index_of(in_id).is_none() {
                return Err(TrackerError::UnknownPlayer(in_id.clone()));
            }
            if self.index_of(out_id).is_none() {
                return Err(TrackerError::UnknownPlayer(out_id.clone()));
            }
        }
        let at_ms = at.unwrap_or_else(|| self.clock.now_ms());
        for (in_id, out_id) in pairs {
            self.substitute_player(in_id, out_id, Some(at_ms))?;
        }
        Ok(())
    }

    /// Cumulative on-field time for one player as of the injected clock's
    /// "now". `None` for unknown ids.
    pub fn total_time(&self, player_id: &str) -> Option<Duration> {
        let now_ms = self.clock.now_ms();
        self.get(player_id).map(|t| t.total_time(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerStatus;
    use crate::time::FakeTimeProvider;

    fn roster() -> Vec<Player> {
        vec![
            Player::new("p1", "Ada", PlayerStatus::On),
            Player::new("p2", "Grace", PlayerStatus::Off),
            Player::new("p3", "Joan", PlayerStatus::On),
        ]
    }

    fn map_with_clock(start_ms: u64) -> (PlayerTimeTrackerMap, Arc<FakeTimeProvider>) {
        let clock = Arc::new(FakeTimeProvider::new(start_ms));
        let map = PlayerTimeTrackerMap::initialize("game1", &roster(), clock.clone()).unwrap();
        (map, clock)
    }

    /// Every on-field tracker's timer must agree with the map's clock flag,
    /// and no off-field timer may run.
    fn assert_clock_invariant(map: &PlayerTimeTrackerMap) {
        for tracker in map.trackers() {
            if tracker.is_on() {
                assert_eq!(
                    tracker.timer().is_running(),
                    map.clock_running(),
                    "on-field tracker {} disagrees with clock",
                    tracker.id()
                );
            } else {
                assert!(!tracker.timer().is_running(), "off-field tracker {} running", tracker.id());
            }
        }
    }

    #[test]
    fn test_initialize_seeds_on_from_status() {
        let (map, _) = map_with_clock(0);
        assert!(map.get("p1").unwrap().is_on());
        assert!(!map.get("p2").unwrap().is_on());
        assert!(map.get("p3").unwrap().is_on());
        assert!(!map.clock_running());
        assert_clock_invariant(&map);
    }

    #[test]
    fn test_initialize_rejects_empty_roster() {
        let clock = Arc::new(FakeTimeProvider::new(0));
        let err = PlayerTimeTrackerMap::initialize("game1", &[], clock).unwrap_err();
        assert!(matches!(err, TrackerError::EmptyRoster));
    }

    #[test]
    fn test_initialize_rejects_duplicate_ids() {
        let clock = Arc::new(FakeTimeProvider::new(0));
        let players = vec![
            Player::new("p1", "Ada", PlayerStatus::On),
            Player::new("p1", "Imposter", PlayerStatus::Off),
        ];
        let err = PlayerTimeTrackerMap::initialize("game1", &players, clock).unwrap_err();
        assert!(matches!(err, TrackerError::DuplicatePlayer(id) if id == "p1"));
    }

    #[test]
    fn test_get_unknown_returns_none() {
        let (map, _) = map_with_clock(0);
        assert!(map.get("p99").is_none());
        assert!(map.total_time("p99").is_none());
    }

    #[test]
    fn test_clock_invariant_through_operation_sequence() {
        let (mut map, _clock) = map_with_clock(0);

        map.start_shift_timers(Some(0));
        assert_clock_invariant(&map);

        map.substitute_player("p2", "p1", Some(10_000)).unwrap();
        assert_clock_invariant(&map);

        map.stop_shift_timers(Some(20_000));
        assert_clock_invariant(&map);

        map.substitute_player("p1", "p3", Some(25_000)).unwrap();
        assert_clock_invariant(&map);

        map.start_shift_timers(Some(30_000));
        assert_clock_invariant(&map);
    }

    #[test]
    fn test_basic_substitution_timing() {
        let (mut map, clock) = map_with_clock(0);

        map.start_shift_timers(Some(0));
        map.substitute_player("p2", "p1", Some(10_000)).unwrap();
        map.stop_shift_timers(Some(40_000));
        clock.set(40_000);

        let p1 = map.get("p1").unwrap();
        assert_eq!(p1.total_time(40_000), Duration::new(10));
        assert_eq!(p1.shift_count(), 1); // starter's initial value, unchanged

        let p2 = map.get("p2").unwrap();
        assert_eq!(p2.total_time(40_000), Duration::new(30));
        assert_eq!(p2.shift_count(), 1);
    }

    #[test]
    fn test_retroactive_stop_records_earlier_elapsed() {
        let (mut map, clock) = map_with_clock(0);
        map.start_shift_timers(Some(0));

        // The call happens at wall-clock 40s but closes the period at 25s.
        clock.set(40_000);
        map.stop_shift_timers(Some(25_000));
        assert_eq!(map.get("p1").unwrap().total_time(40_000), Duration::new(25));
    }

    #[test]
    fn test_substitution_while_clock_stopped_defers_timing() {
        let (mut map, _clock) = map_with_clock(0);

        map.substitute_player("p2", "p1", Some(5_000)).unwrap();
        let p2 = map.get("p2").unwrap();
        assert!(p2.is_on());
        assert_eq!(p2.shift_count(), 1);
        assert!(!p2.timer().is_running());

        map.start_shift_timers(Some(60_000));
        assert_eq!(map.get("p2").unwrap().total_time(90_000), Duration::new(30));
    }

    #[test]
    fn test_substitute_unknown_player_leaves_map_untouched() {
        let (mut map, _clock) = map_with_clock(0);
        map.start_shift_timers(Some(0));

        let before = map.to_data();
        let err = map.substitute_player("p99", "p1", Some(10_000)).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownPlayer(id) if id == "p99"));

        let err = map.substitute_player("p2", "p99", Some(10_000)).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownPlayer(id) if id == "p99"));
        assert_eq!(map.to_data(), before);
    }

    #[test]
    fn test_substitute_players_validates_all_pairs_first() {
        let (mut map, _clock) = map_with_clock(0);
        map.start_shift_timers(Some(0));

        let before = map.to_data();
        let pairs = vec![("p2".to_string(), "p1".to_string()), ("p99".to_string(), "p3".to_string())];
        assert!(map.substitute_players(&pairs, Some(10_000)).is_err());
        assert_eq!(map.to_data(), before);

        let pairs = vec![("p2".to_string(), "p1".to_string())];
        map.substitute_players(&pairs, Some(10_000)).unwrap();
        assert!(map.get("p2").unwrap().is_on());
        assert!(!map.get("p1").unwrap().is_on());
    }

    #[test]
    fn test_set_starters_reseeds_baseline() {
        let (mut map, _clock) = map_with_clock(0);
        map.set_starters(&["p2", "p3"]);

        assert!(!map.get("p1").unwrap().is_on());
        assert_eq!(map.get("p1").unwrap().shift_count(), 0);
        assert!(map.get("p2").unwrap().is_on());
        assert_eq!(map.get("p2").unwrap().shift_count(), 1);
        assert_clock_invariant(&map);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_running_state() {
        let (mut map, clock) = map_with_clock(0);
        map.start_shift_timers(Some(0));
        map.substitute_player("p2", "p1", Some(10_000)).unwrap();

        let data = map.to_data();
        assert!(data.clock_running);

        let restored = PlayerTimeTrackerMap::from_data(data.clone(), clock);
        assert_eq!(restored.to_data(), data);
        // A running tracker resumes live accrual after the round trip.
        assert_eq!(restored.get("p2").unwrap().total_time(40_000), Duration::new(30));
        assert_clock_invariant(&restored);
    }
}
