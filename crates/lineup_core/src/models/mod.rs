pub mod events;
pub mod game;
pub mod player;

pub use events::{
    ClockToggleDetails, GameEvent, GameEventKind, PeriodEndDetails, PeriodStartDetails,
    SetupDetails, SubInDetails, SubOutDetails, SwapDetails,
};
pub use game::{GameStatus, LiveGame};
pub use player::{Player, PlayerStatus};
