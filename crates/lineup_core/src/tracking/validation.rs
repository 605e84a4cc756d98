use std::collections::HashSet;

use crate::error::{Result, TrackerError};
use crate::time::TimerData;

use super::map::PlayerTimeTrackerMapData;
use super::tracker::PlayerTimeTrackerData;

/// Structural checks applied to foreign snapshots at the JSON boundary.
///
/// The in-memory types trust their callers (contract errors there are bugs
/// to fix, not inputs to sanitize); snapshots arriving from storage get
/// checked once, here, before a map is rebuilt from them.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for TimerData {
    fn validate(&self) -> Result<()> {
        if self.is_running && self.start_time.is_none() {
            return Err(TrackerError::InvalidSnapshot(
                "running timer has no start_time".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for PlayerTimeTrackerData {
    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(TrackerError::InvalidSnapshot("tracker with empty id".to_string()));
        }
        self.timer.validate()?;
        if self.timer.is_running && !self.is_on {
            return Err(TrackerError::InvalidSnapshot(format!(
                "off-field tracker {} has a running timer",
                self.id
            )));
        }
        Ok(())
    }
}

impl Validate for PlayerTimeTrackerMapData {
    fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.trackers.len());
        for tracker in &self.trackers {
            tracker.validate()?;
            if !seen.insert(tracker.id.as_str()) {
                return Err(TrackerError::InvalidSnapshot(format!(
                    "duplicate tracker id {}",
                    tracker.id
                )));
            }
            // One game clock: on-field timers agree with it in both
            // directions.
            if tracker.is_on && tracker.timer.is_running != self.clock_running {
                return Err(TrackerError::InvalidSnapshot(format!(
                    "on-field tracker {} disagrees with clock_running",
                    tracker.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Duration;

    fn stopped_timer() -> TimerData {
        TimerData { is_running: false, start_time: None, duration: Duration::new(30) }
    }

    fn running_timer(start_ms: u64) -> TimerData {
        TimerData { is_running: true, start_time: Some(start_ms), duration: Duration::zero() }
    }

    fn tracker(id: &str, is_on: bool, timer: TimerData) -> PlayerTimeTrackerData {
        PlayerTimeTrackerData { id: id.to_string(), is_on, shift_count: 1, timer }
    }

    #[test]
    fn test_running_timer_requires_start_time() {
        let timer = TimerData { is_running: true, start_time: None, duration: Duration::zero() };
        assert!(timer.validate().is_err());
        assert!(running_timer(1_000).validate().is_ok());
        assert!(stopped_timer().validate().is_ok());
    }

    #[test]
    fn test_off_field_tracker_must_be_stopped() {
        assert!(tracker("p1", false, running_timer(0)).validate().is_err());
        assert!(tracker("p1", false, stopped_timer()).validate().is_ok());
    }

    #[test]
    fn test_map_rejects_duplicate_tracker_ids() {
        let data = PlayerTimeTrackerMapData {
            id: "game1".to_string(),
            trackers: vec![
                tracker("p1", false, stopped_timer()),
                tracker("p1", false, stopped_timer()),
            ],
            clock_running: false,
        };
        assert!(matches!(data.validate(), Err(TrackerError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_map_rejects_clock_disagreement() {
        // Clock stopped but an on-field tracker is still running.
        let data = PlayerTimeTrackerMapData {
            id: "game1".to_string(),
            trackers: vec![tracker("p1", true, running_timer(0))],
            clock_running: false,
        };
        assert!(data.validate().is_err());

        // Clock running but an on-field tracker is stopped.
        let data = PlayerTimeTrackerMapData {
            id: "game1".to_string(),
            trackers: vec![tracker("p1", true, stopped_timer())],
            clock_running: true,
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_consistent_map_passes() {
        let data = PlayerTimeTrackerMapData {
            id: "game1".to_string(),
            trackers: vec![
                tracker("p1", true, running_timer(10_000)),
                tracker("p2", false, stopped_timer()),
            ],
            clock_running: true,
        };
        assert!(data.validate().is_ok());
    }
}
