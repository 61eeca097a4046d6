//! Obstacle manager: spawning, scrolling and clearing road blocks

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use crate::consts::*;

/// A road block falling toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(pos: Vec2, width: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(width, OBSTACLE_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The set of active obstacles
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Place an obstacle directly (scripted setups, tests)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Spawn one obstacle above the top edge, fully inside the road
    pub fn spawn(&mut self, rng: &mut impl Rng) -> &Obstacle {
        let width = rng.random_range(OBSTACLE_MIN_WIDTH..=OBSTACLE_MAX_WIDTH);
        let max_x = ROAD_RIGHT - width;
        let x = if max_x > ROAD_LEFT {
            rng.random_range(ROAD_LEFT..=max_x)
        } else {
            ROAD_LEFT
        };

        log::debug!("Spawned obstacle at x={x:.1} width={width:.1}");
        self.obstacles.push(Obstacle::new(Vec2::new(x, OBSTACLE_SPAWN_Y), width));
        // Just pushed
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every obstacle down and drop those past the bottom edge.
    ///
    /// Returns how many were cleared.
    pub fn advance(&mut self, scroll_speed: f32) -> u32 {
        let before = self.obstacles.len();
        self.obstacles.retain_mut(|o| {
            o.pos.y += scroll_speed;
            o.pos.y <= CANVAS_HEIGHT
        });
        (before - self.obstacles.len()) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_road() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();
        for _ in 0..500 {
            let o = field.spawn(&mut rng).clone();
            assert!(o.size.x >= OBSTACLE_MIN_WIDTH && o.size.x <= OBSTACLE_MAX_WIDTH);
            assert!(o.pos.x >= ROAD_LEFT);
            assert!(o.pos.x + o.size.x <= ROAD_RIGHT);
            // Entirely above the visible area
            assert!(o.pos.y + o.size.y < 0.0);
        }
        assert_eq!(field.len(), 500);
    }

    #[test]
    fn test_spawn_reproducible_with_seed() {
        let spawn_all = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ObstacleField::new();
            for _ in 0..10 {
                field.spawn(&mut rng);
            }
            field.as_slice().to_vec()
        };
        assert_eq!(spawn_all(42), spawn_all(42));
        assert_ne!(spawn_all(42), spawn_all(43));
    }

    #[test]
    fn test_advance_removes_past_bottom() {
        let mut field = ObstacleField::new();
        field.push(Obstacle::new(Vec2::new(100.0, 595.0), 50.0));
        field.push(Obstacle::new(Vec2::new(100.0, 100.0), 50.0));

        // 600 exactly is still on screen
        assert_eq!(field.advance(5.0), 0);
        assert_eq!(field.len(), 2);

        assert_eq!(field.advance(5.0), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.as_slice()[0].pos.y, 110.0);
    }

    #[test]
    fn test_every_obstacle_eventually_clears() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        for _ in 0..5 {
            field.spawn(&mut rng);
        }
        let mut cleared = 0;
        let mut ticks = 0;
        while !field.is_empty() {
            let last_y: Vec<f32> = field.as_slice().iter().map(|o| o.pos.y).collect();
            cleared += field.advance(4.0);
            for (o, y) in field.as_slice().iter().zip(last_y) {
                assert!(o.pos.y > y);
            }
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(cleared, 5);
    }
}
