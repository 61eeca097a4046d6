//! Per-frame draw list
//!
//! Built from a read-only view of the world. Layers are always emitted back
//! to front: road, ground shadow, obstacles, player. The player goes last so
//! a jumping skater is drawn over both the obstacles and its own shadow.

use glam::Vec2;

use super::shapes;
use super::sprite::Sprite;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Player, World};

/// Draw order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Road,
    Shadow,
    Obstacles,
    Player,
}

/// A primitive in logical surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: [f32; 4],
    },
    /// The player sprite stretched over a box
    Sprite { min: Vec2, size: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub shape: Shape,
}

/// Ordered draw list for one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub items: Vec<DrawItem>,
}

const SHADOW_SEGMENTS: u32 = 24;
/// Shadow width relative to the player, and fixed height, when grounded
const SHADOW_BASE_WIDTH_FACTOR: f32 = 0.7;
const SHADOW_BASE_HEIGHT: f32 = 10.0;
/// Fraction of the shadow lost at full jump height
const SHADOW_SHRINK: f32 = 0.6;
/// Shadow center sits this far above the bottom of the resting box
const SHADOW_FEET_OFFSET: f32 = 6.0;

/// Vertical offset of the dashed centerline
pub fn dash_phase(ticks: u64, scroll_speed: f32) -> f32 {
    ((ticks as f64 * f64::from(scroll_speed)) % f64::from(DASH_PERIOD)) as f32
}

/// Ground shadow as (center, radii). Always on the resting line.
pub fn shadow_ellipse(player: &Player) -> (Vec2, Vec2) {
    let scale = 1.0 - SHADOW_SHRINK * player.jump_ratio();
    let width = player.size.x * SHADOW_BASE_WIDTH_FACTOR * scale;
    let height = SHADOW_BASE_HEIGHT * scale;
    let center = Vec2::new(
        player.pos.x + player.size.x / 2.0,
        player.ground_y + player.size.y - SHADOW_FEET_OFFSET,
    );
    (center, Vec2::new(width / 2.0, height / 2.0))
}

impl Scene {
    pub fn build(world: &World) -> Self {
        let mut items = Vec::new();
        let mut push = |layer, shape| items.push(DrawItem { layer, shape });

        // 1. Road and scrolling centerline
        push(
            Layer::Road,
            Shape::Rect {
                min: Vec2::new(ROAD_LEFT, 0.0),
                size: Vec2::new(ROAD_RIGHT - ROAD_LEFT, CANVAS_HEIGHT),
                color: colors::ROAD,
            },
        );
        let mut y = dash_phase(world.ticks, world.preset.scroll_speed) - DASH_PERIOD;
        while y < CANVAS_HEIGHT {
            push(
                Layer::Road,
                Shape::Rect {
                    min: Vec2::new(CANVAS_WIDTH / 2.0 - DASH_WIDTH / 2.0, y),
                    size: Vec2::new(DASH_WIDTH, DASH_LENGTH),
                    color: colors::LANE_MARK,
                },
            );
            y += DASH_PERIOD;
        }

        // 2. Shadow on the ground
        let (center, radii) = shadow_ellipse(&world.player);
        push(
            Layer::Shadow,
            Shape::Ellipse {
                center,
                radii,
                color: colors::SHADOW,
            },
        );

        // 3. Obstacles
        for o in world.obstacles.as_slice() {
            push(
                Layer::Obstacles,
                Shape::Rect {
                    min: o.pos,
                    size: o.size,
                    color: colors::OBSTACLE,
                },
            );
        }

        // 4. Player on top
        push(
            Layer::Player,
            Shape::Sprite {
                min: world.player.pos,
                size: world.player.size,
            },
        );

        Self { items }
    }

    /// Triangles in draw order. Without a sprite the player is a flat block.
    pub fn tessellate(&self, sprite: Option<&Sprite>) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for item in &self.items {
            match item.shape {
                Shape::Rect { min, size, color } => {
                    vertices.extend_from_slice(&shapes::rect(min, size, color))
                }
                Shape::Ellipse {
                    center,
                    radii,
                    color,
                } => vertices.extend(shapes::ellipse(center, radii, color, SHADOW_SEGMENTS)),
                Shape::Sprite { min, size } => match sprite {
                    Some(sprite) => vertices.extend(sprite.vertices(min, size)),
                    None => vertices.extend_from_slice(&shapes::rect(
                        min,
                        size,
                        colors::PLAYER_PLACEHOLDER,
                    )),
                },
            }
        }
        vertices
    }
}
