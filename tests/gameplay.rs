use road_skater::consts::*;
use road_skater::game::{Game, SessionPhase};
use road_skater::highscores::Ranking;
use road_skater::persistence::{MemoryStorage, Storage};
use road_skater::platform::{FrameClock, ManualClock};
use road_skater::settings::Difficulty;
use road_skater::sim::{GameEvent, Obstacle, TickInput, TickOutcome, World, tick};

fn idle() -> TickInput {
    TickInput::default()
}

/// Steer to the far side of the road from `obstacle`
fn dodge(obstacle: &Obstacle) -> TickInput {
    let go_right = obstacle.pos.x + obstacle.size.x / 2.0 < CANVAS_WIDTH / 2.0;
    TickInput {
        left: !go_right,
        right: go_right,
        jump: false,
    }
}

#[test]
fn test_first_obstacle_scrolls_off_and_scores() {
    for seed in 0..20 {
        let mut game = Game::new(ManualClock::new(), MemoryStorage::new(), seed);
        assert!(game.start(Difficulty::Medium, "Ana"));

        for _ in 0..89 {
            game.frame(&idle());
        }
        assert!(game.world().obstacles.is_empty());
        game.frame(&idle());

        let spawned = game.world().obstacles.as_slice()[0].clone();
        assert_eq!(spawned.pos.y, OBSTACLE_SPAWN_Y);
        assert!(spawned.pos.x >= ROAD_LEFT && spawned.pos.x + spawned.size.x <= ROAD_RIGHT);
        game.drain_events();

        let steer = dodge(&spawned);
        let mut points = Vec::new();
        let mut frames = 0;
        while game.world().score == 0 && frames < 200 {
            assert_eq!(game.frame(&steer), Some(TickOutcome::Continue), "seed {seed}");
            points.extend(
                game.drain_events()
                    .into_iter()
                    .filter(|e| matches!(e, GameEvent::Point { .. })),
            );
            frames += 1;
        }

        // -40 + 129 * 5 = 605, the first position past the bottom edge
        assert_eq!(frames, 129, "seed {seed}");
        assert_eq!(game.world().score, POINTS_PER_OBSTACLE);
        assert_eq!(points, vec![GameEvent::Point { score: 10 }]);
        assert_eq!(game.phase(), SessionPhase::Running);
        // Only the tick-180 obstacle is left, still near the top
        assert_eq!(game.world().obstacles.len(), 1);
        assert!(game.world().obstacles.as_slice()[0].pos.y < CANVAS_HEIGHT / 2.0);
    }
}

#[test]
fn test_jump_ignores_second_press_in_air() {
    let mut world = World::new(7, Difficulty::Medium.preset());
    let ground = world.player.pos.y;
    let jump = TickInput {
        jump: true,
        ..Default::default()
    };

    tick(&mut world, &jump);
    assert!(world.player.airborne);
    let after_first = world.player.pos.y;
    assert!(after_first < ground);
    let vel_after_first = world.player.vel_y;

    tick(&mut world, &jump);
    // Gravity only, no new impulse
    assert!((world.player.vel_y - (vel_after_first + GRAVITY)).abs() < 1e-5);
    let jumps = world
        .drain_events()
        .into_iter()
        .filter(|e| *e == GameEvent::Jump)
        .count();
    assert_eq!(jumps, 1);

    for _ in 0..60 {
        tick(&mut world, &idle());
    }
    assert!(!world.player.airborne);
    assert_eq!(world.player.pos.y, ground);
}

#[test]
fn test_steering_stays_on_road() {
    let mut world = World::new(7, Difficulty::Hard.preset());
    let left = TickInput {
        left: true,
        ..Default::default()
    };
    for _ in 0..80 {
        tick(&mut world, &left);
    }
    assert_eq!(world.player.pos.x, ROAD_LEFT);
}

#[test]
fn test_repeated_player_keeps_best() {
    let mut storage = MemoryStorage::new();
    Ranking::record_score(&mut storage, "Ana", 50);
    Ranking::record_score(&mut storage, "Ana", 30);
    let outcome = Ranking::record_score(&mut storage, "Ana", 80);

    assert_eq!(outcome.best, 80);
    assert_eq!(outcome.ranking.entries().len(), 1);
    assert_eq!(outcome.ranking.entries()[0].score, 80);

    let reloaded = Ranking::load(&storage);
    assert_eq!(reloaded.entries(), outcome.ranking.entries());
}

#[test]
fn test_ranking_keeps_top_ten() {
    let mut storage = MemoryStorage::new();
    for i in 1..=15u32 {
        Ranking::record_score(&mut storage, &format!("P{i}"), i * 10);
    }

    let ranking = Ranking::load(&storage);
    let scores: Vec<u32> = ranking.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, (6..=15).rev().map(|i| i * 10).collect::<Vec<_>>());
    assert!(storage.read(Ranking::STORAGE_KEY).is_some());
}

#[test]
fn test_session_schedule() {
    let mut game = Game::new(ManualClock::new(), MemoryStorage::new(), 99);
    assert_eq!(game.phase(), SessionPhase::Menu);
    assert_eq!(game.frame(&idle()), None);

    assert!(game.start(Difficulty::Medium, "Ana"));
    assert!(game.clock().is_running());

    for _ in 0..89 {
        game.frame(&idle());
    }
    assert!(game.world().obstacles.is_empty());
    game.frame(&idle());
    assert_eq!(game.world().obstacles.len(), 1);
    assert_eq!(game.world().ticks, 90);
}
