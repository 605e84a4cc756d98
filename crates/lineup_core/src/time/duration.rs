use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Non-negative span of wall-clock time, stored with second resolution.
///
/// Serializes as `{"seconds": N}`, the shape embedded in every persisted
/// timer snapshot.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    /// Build from a whole number of seconds. Negative input clamps to zero.
    pub fn new(seconds: i64) -> Self {
        Self { seconds: seconds.max(0) as u64 }
    }

    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    /// Build from milliseconds, truncating to whole seconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self { seconds: millis / 1000 }
    }

    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    pub const fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    /// Sum of the two spans. Neither operand is mutated.
    pub fn add(&self, other: Duration) -> Duration {
        Duration { seconds: self.seconds.saturating_add(other.seconds) }
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration { seconds: self.seconds.saturating_add(other.seconds) }
    }
}

/// Renders as `MM:SS` with both fields zero-padded to two digits. Minutes
/// are unbounded, so long totals read as e.g. `75:03`.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_pads_both_fields() {
        assert_eq!(Duration::new(125).to_string(), "02:05");
        assert_eq!(Duration::zero().to_string(), "00:00");
        assert_eq!(Duration::new(9).to_string(), "00:09");
        assert_eq!(Duration::new(600).to_string(), "10:00");
    }

    #[test]
    fn test_format_minutes_exceed_fifty_nine() {
        assert_eq!(Duration::new(3661).to_string(), "61:01");
        assert_eq!(Duration::new(4503).to_string(), "75:03");
    }

    #[test]
    fn test_negative_input_clamps_to_zero() {
        assert_eq!(Duration::new(-30), Duration::zero());
    }

    #[test]
    fn test_from_millis_truncates() {
        assert_eq!(Duration::from_millis(1999), Duration::new(1));
        assert_eq!(Duration::from_millis(999), Duration::zero());
    }

    #[test]
    fn test_add_does_not_mutate_operands() {
        let a = Duration::new(30);
        let b = Duration::new(40);
        assert_eq!(a.add(b), Duration::new(70));
        assert_eq!(a, Duration::new(30));
        assert_eq!(b, Duration::new(40));
        assert_eq!(a + b, Duration::new(70));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Duration::new(125)).unwrap();
        assert_eq!(json, r#"{"seconds":125}"#);

        let back: Duration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Duration::new(125));
    }

    proptest! {
        #[test]
        fn prop_format_round_trips_total_seconds(s in 0u64..=360_000) {
            let rendered = Duration::new(s as i64).to_string();
            let (minutes, seconds) = rendered.split_once(':').unwrap();
            let minutes: u64 = minutes.parse().unwrap();
            let seconds: u64 = seconds.parse().unwrap();
            prop_assert!(seconds < 60);
            prop_assert_eq!(minutes * 60 + seconds, s);
        }

        #[test]
        fn prop_serde_round_trip(s in 0u64..=1_000_000) {
            let d = Duration::new(s as i64);
            let json = serde_json::to_string(&d).unwrap();
            let back: Duration = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(d, back);
        }
    }
}
