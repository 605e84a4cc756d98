use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Roster entry for a live game.
///
/// Only `id` and `status` matter to the shift-tracking core; the remaining
/// fields ride along for the host application's roster views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniform_number: Option<u8>,
    #[serde(default)]
    pub status: PlayerStatus,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Occupies a field position.
    On,
    /// Available on the bench.
    #[default]
    Off,
    /// Queued to come on at the next substitution.
    Next,
    /// Unavailable for this game.
    Out,
}

impl PlayerStatus {
    pub const fn is_on(&self) -> bool {
        matches!(self, PlayerStatus::On)
    }
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: PlayerStatus) -> Self {
        Self { id: id.into(), name: name.into(), uniform_number: None, status }
    }

    pub fn with_uniform_number(mut self, number: u8) -> Self {
        self.uniform_number = Some(number);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_on() {
        assert!(PlayerStatus::On.is_on());
        assert!(!PlayerStatus::Off.is_on());
        assert!(!PlayerStatus::Next.is_on());
        assert!(!PlayerStatus::Out.is_on());
    }

    #[test]
    fn test_status_defaults_to_off() {
        let player: Player = serde_json::from_str(r#"{"id":"p1","name":"Ada"}"#).unwrap();
        assert_eq!(player.status, PlayerStatus::Off);
        assert_eq!(player.uniform_number, None);
    }

    #[test]
    fn test_serde_round_trip() {
        let player = Player::new("p1", "Ada", PlayerStatus::Next).with_uniform_number(7);
        let json = serde_json::to_string(&player).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, player);
        assert!(json.contains(r#""status":"next""#));
    }
}
