//! World state and core simulation types
//!
//! Everything a round mutates lives in [`World`]; there are no globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::obstacle::ObstacleField;
use super::player::Player;

/// Tuning selected when a round starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreset {
    /// Downward displacement per tick for obstacles and road markings
    pub scroll_speed: f32,
    /// Ticks between obstacle spawns
    pub spawn_interval: u32,
    /// Player steering speed
    pub horizontal_speed: f32,
}

/// Fire-and-forget notifications for audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player left the ground
    Jump,
    /// An obstacle left the screen; carries the new score
    Point { score: u32 },
    /// Player hit an obstacle
    Crash,
    /// Round committed to the ranking
    RoundOver { score: u32, best: u32 },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub score: u32,
    /// Running ticks since the round started
    pub ticks: u64,
    pub preset: DifficultyPreset,
    /// Pending notifications, drained by the host each frame
    pub events: Vec<GameEvent>,
}

impl World {
    pub fn new(seed: u64, preset: DifficultyPreset) -> Self {
        let mut player = Player::default();
        player.reset(preset.horizontal_speed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player,
            obstacles: ObstacleField::new(),
            score: 0,
            ticks: 0,
            preset,
            events: Vec::new(),
        }
    }

    /// Prepare a fresh round, keeping the fitted player box and the RNG stream
    pub fn reset(&mut self, preset: DifficultyPreset) {
        self.preset = preset;
        self.player.reset(preset.horizontal_speed);
        self.obstacles.clear();
        self.score = 0;
        self.ticks = 0;
        self.events.clear();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Difficulty;

    #[test]
    fn test_reset_clears_round() {
        let mut world = World::new(5, Difficulty::Easy.preset());
        world.obstacles.spawn(&mut world.rng);
        world.score = 120;
        world.ticks = 400;
        world.player.pos.x = ROAD_LEFT;
        world.player.jump();
        world.events.push(GameEvent::Jump);

        world.reset(Difficulty::Hard.preset());
        assert!(world.obstacles.is_empty());
        assert_eq!(world.score, 0);
        assert_eq!(world.ticks, 0);
        assert!(world.events.is_empty());
        assert!(!world.player.airborne);
        assert_eq!(world.player.pos.y, world.player.ground_y);
        assert_eq!(world.player.pos.x, CANVAS_WIDTH / 2.0 - world.player.size.x / 2.0);
        assert_eq!(world.player.speed_x, 6.5);
        assert_eq!(world.preset.spawn_interval, 70);
    }

    #[test]
    fn test_drain_events() {
        let mut world = World::new(5, Difficulty::Medium.preset());
        world.events.push(GameEvent::Point { score: 10 });
        assert_eq!(world.drain_events(), vec![GameEvent::Point { score: 10 }]);
        assert!(world.drain_events().is_empty());
    }
}
