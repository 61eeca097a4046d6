//! Player controller: horizontal steering and jump kinematics

use glam::Vec2;

use super::collision::Rect;
use crate::consts::*;

/// The skater
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal displacement per tick while steering
    pub speed_x: f32,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub gravity: f32,
    /// Resting y (top edge while grounded)
    pub ground_y: f32,
    /// Jump height used to scale the ground shadow
    pub apex_reference: f32,
    pub airborne: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_WIDTH, PLAYER_DEFAULT_HEIGHT)
    }
}

impl Player {
    pub fn new(width: f32, height: f32) -> Self {
        let ground_y = ground_for_height(height);
        Self {
            pos: Vec2::new(CANVAS_WIDTH / 2.0 - width / 2.0, ground_y),
            size: Vec2::new(width, height),
            speed_x: 6.0,
            vel_y: 0.0,
            gravity: GRAVITY,
            ground_y,
            apex_reference: JUMP_APEX_REFERENCE,
            airborne: false,
        }
    }

    /// Derive height from the sprite's aspect ratio (height / width).
    ///
    /// Non-finite or non-positive ratios leave the current box untouched.
    pub fn fit_aspect(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            log::warn!("Ignoring sprite aspect ratio {aspect}");
            return;
        }
        self.size.y = (self.size.x * aspect).round();
        self.ground_y = ground_for_height(self.size.y);
        self.land();
    }

    /// Back to the center of the road, standing still
    pub fn reset(&mut self, speed_x: f32) {
        self.pos.x = CANVAS_WIDTH / 2.0 - self.size.x / 2.0;
        self.speed_x = speed_x;
        self.land();
    }

    /// Steer left/right; opposing keys cancel out
    pub fn apply_horizontal_input(&mut self, left: bool, right: bool) {
        let dir = f32::from(u8::from(right)) - f32::from(u8::from(left));
        let max_x = ROAD_RIGHT - self.size.x;
        self.pos.x = (self.pos.x + dir * self.speed_x).clamp(ROAD_LEFT, max_x);
    }

    /// Start a jump. Returns false if already in the air.
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.vel_y = JUMP_IMPULSE;
        true
    }

    /// Integrate one tick of vertical motion (semi-implicit Euler)
    pub fn tick(&mut self) {
        if !self.airborne {
            return;
        }
        self.pos.y += self.vel_y;
        self.vel_y += self.gravity;

        if self.pos.y >= self.ground_y {
            self.land();
        }
    }

    /// Height of the feet above the resting line
    pub fn height_above_ground(&self) -> f32 {
        (self.ground_y - self.pos.y).max(0.0)
    }

    /// 0 on the ground, 1 at or above the apex reference
    pub fn jump_ratio(&self) -> f32 {
        (self.height_above_ground() / self.apex_reference).min(1.0)
    }

    /// Highest point reachable with the fixed impulse/gravity pair.
    ///
    /// Discrete sum of the per-tick displacements until velocity turns
    /// positive: `v0²/2g + |v0|/2`.
    pub fn max_jump_height(&self) -> f32 {
        let v0 = JUMP_IMPULSE.abs();
        v0 * v0 / (2.0 * self.gravity) + v0 / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    fn land(&mut self) {
        self.pos.y = self.ground_y;
        self.vel_y = 0.0;
        self.airborne = false;
    }
}

fn ground_for_height(height: f32) -> f32 {
    CANVAS_HEIGHT - (height + GROUND_MARGIN)
}
