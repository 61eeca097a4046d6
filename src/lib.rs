//! Road Skater - A road-dodging skateboard arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, obstacles, collisions)
//! - `game`: Menu / running / game-over state machine
//! - `renderer`: Draw list construction and the WebGPU pipeline
//! - `platform`: Frame clock and keyboard abstraction
//! - `persistence`: Named storage slots (LocalStorage on web)
//! - `highscores`: Top-10 ranking per player name

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, SessionPhase};
pub use highscores::{Ranking, RankingEntry};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical drawing surface (origin top-left)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Horizontal band occupied by the road
    pub const ROAD_LEFT: f32 = 50.0;
    pub const ROAD_RIGHT: f32 = 350.0;

    /// Player box. Height is re-derived from the sprite aspect ratio once it loads.
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_DEFAULT_HEIGHT: f32 = 72.0;
    /// Gap between the player's feet and the bottom edge when grounded
    pub const GROUND_MARGIN: f32 = 20.0;

    /// Jump kinematics (units/tick and units/tick²)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Jump height at which the ground shadow reaches its smallest size
    pub const JUMP_APEX_REFERENCE: f32 = 120.0;

    /// Obstacle geometry
    pub const OBSTACLE_MIN_WIDTH: f32 = 40.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 120.0;
    pub const OBSTACLE_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_SPAWN_Y: f32 = -40.0;

    /// Score awarded for each obstacle that leaves the bottom edge
    pub const POINTS_PER_OBSTACLE: u32 = 10;

    /// Dashed centerline
    pub const DASH_PERIOD: f32 = 40.0;
    pub const DASH_LENGTH: f32 = 20.0;
    pub const DASH_WIDTH: f32 = 4.0;
}
