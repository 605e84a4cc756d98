//! Wall-clock primitives: duration arithmetic, the start/stop timer, the
//! injected time source, and the game-level period clock.

pub mod duration;
pub mod game_clock;
pub mod provider;
pub mod timer;

pub use duration::Duration;
pub use game_clock::{GameClock, GameClockData, PeriodConfig, PeriodStatus};
pub use provider::{FakeTimeProvider, SystemTimeProvider, TimeProvider};
pub use timer::{Timer, TimerData};
