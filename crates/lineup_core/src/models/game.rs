use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::player::Player;

/// Lifecycle of a scheduled game as the host application tracks it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    New,
    Start,
    Live,
    Break,
    Done,
}

/// A game plus the roster snapshot the tracker map is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LiveGame {
    pub id: String,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl LiveGame {
    pub fn new(id: impl Into<String>, players: Vec<Player>) -> Self {
        Self { id: id.into(), status: GameStatus::New, players }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }
}
