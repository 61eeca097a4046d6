//! Axis-aligned collision detection
//!
//! Boundary-exclusive: rectangles that only share an edge do not collide.

use glam::Vec2;

use super::obstacle::Obstacle;
use super::player::Player;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Returns true at the first obstacle overlapping the player
pub fn check_collision(player: &Player, obstacles: &[Obstacle]) -> bool {
    let player_rect = player.rect();
    obstacles.iter().any(|o| player_rect.overlaps(&o.rect()))
}
