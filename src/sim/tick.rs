//! Fixed-step simulation tick
//!
//! One call advances a running round by exactly one frame:
//! input, player physics, obstacle scroll/scoring, collision, spawn.

use super::collision::check_collision;
use super::state::{GameEvent, World};
use crate::consts::POINTS_PER_OBSTACLE;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Steering keys currently held
    pub left: bool,
    pub right: bool,
    /// Jump requested since the last tick (edge-triggered)
    pub jump: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Collided,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickOutcome {
    world.ticks += 1;

    world.player.apply_horizontal_input(input.left, input.right);
    if input.jump && world.player.jump() {
        world.events.push(GameEvent::Jump);
    }
    world.player.tick();

    let cleared = world.obstacles.advance(world.preset.scroll_speed);
    for _ in 0..cleared {
        world.score += POINTS_PER_OBSTACLE;
        world.events.push(GameEvent::Point { score: world.score });
    }

    if check_collision(&world.player, world.obstacles.as_slice()) {
        world.events.push(GameEvent::Crash);
        return TickOutcome::Collided;
    }

    let interval = u64::from(world.preset.spawn_interval.max(1));
    if world.ticks.is_multiple_of(interval) {
        world.obstacles.spawn(&mut world.rng);
    }

    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::settings::Difficulty;
    use crate::sim::Obstacle;

    #[test]
    fn test_first_spawn_on_interval() {
        let mut world = World::new(12345, Difficulty::Medium.preset());
        for _ in 0..89 {
            assert_eq!(tick(&mut world, &TickInput::default()), TickOutcome::Continue);
        }
        assert!(world.obstacles.is_empty());

        tick(&mut world, &TickInput::default());
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles.as_slice()[0].pos.y, OBSTACLE_SPAWN_Y);
    }

    #[test]
    fn test_clearing_scores_ten() {
        let mut world = World::new(1, Difficulty::Medium.preset());
        // Far left lane, away from the centered player
        world.obstacles.push(Obstacle::new(Vec2::new(ROAD_LEFT, 592.0), 40.0));

        tick(&mut world, &TickInput::default());
        assert_eq!(world.score, 0);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.score, 10);
        assert!(world.drain_events().contains(&GameEvent::Point { score: 10 }));
    }

    #[test]
    fn test_collision_reported() {
        let mut world = World::new(1, Difficulty::Medium.preset());
        let p = world.player.pos;
        world.obstacles.push(Obstacle::new(Vec2::new(p.x, p.y - 32.0), 40.0));

        assert_eq!(tick(&mut world, &TickInput::default()), TickOutcome::Collided);
        assert_eq!(world.events.last(), Some(&GameEvent::Crash));
    }

    #[test]
    fn test_jump_event_once() {
        let mut world = World::new(1, Difficulty::Medium.preset());
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump);
        tick(&mut world, &jump);
        let jumps = world
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Jump)
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_determinism() {
        let mut world1 = World::new(99999, Difficulty::Hard.preset());
        let mut world2 = World::new(99999, Difficulty::Hard.preset());

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..300 {
            let input = inputs[i % inputs.len()];
            let a = tick(&mut world1, &input);
            let b = tick(&mut world2, &input);
            assert_eq!(a, b);
        }

        assert_eq!(world1.obstacles.as_slice(), world2.obstacles.as_slice());
        assert_eq!(world1.player, world2.player);
        assert_eq!(world1.score, world2.score);
    }
}
