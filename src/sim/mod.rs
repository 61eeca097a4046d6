//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collision};
pub use obstacle::{Obstacle, ObstacleField};
pub use player::Player;
pub use state::{DifficultyPreset, GameEvent, World};
pub use tick::{TickInput, TickOutcome, tick};
