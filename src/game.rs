//! Game state controller
//!
//! Menu → Running → GameOver → Menu | Running. Owns the world, the frame
//! clock and the storage backend; the host only forwards input and draws.

use crate::highscores::{Ranking, normalize_name};
use crate::persistence::Storage;
use crate::platform::FrameClock;
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameEvent, TickInput, TickOutcome, World, tick};

/// Top-level session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Menu visible, nothing simulated
    Menu,
    Running,
    /// Round ended, result panel visible
    GameOver,
}

/// Result shown on the game-over panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub name: String,
    pub score: u32,
    pub best: u32,
}

pub struct Game<C: FrameClock, S: Storage> {
    phase: SessionPhase,
    world: World,
    clock: C,
    storage: S,
    settings: Settings,
    ranking: Ranking,
    last_round: Option<RoundSummary>,
}

impl<C: FrameClock, S: Storage> Game<C, S> {
    pub fn new(clock: C, storage: S, seed: u64) -> Self {
        let settings = Settings::load(&storage);
        let ranking = Ranking::load(&storage);
        let world = World::new(seed, settings.difficulty.preset());
        Self {
            phase: SessionPhase::Menu,
            world,
            clock,
            storage,
            settings,
            ranking,
            last_round: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// Size the player box from the sprite once it has loaded
    pub fn fit_player_sprite(&mut self, aspect: f32) {
        self.world.player.fit_aspect(aspect);
    }

    /// Start (or restart) a round. Ignored while a round is running.
    pub fn start(&mut self, difficulty: Difficulty, name: &str) -> bool {
        if self.phase == SessionPhase::Running {
            return false;
        }

        self.settings.difficulty = difficulty;
        self.settings.player_name = name.trim().to_string();
        self.settings.save(&mut self.storage);

        self.world.reset(difficulty.preset());
        self.phase = SessionPhase::Running;
        self.clock.start();

        log::info!(
            "Round started ({}, player '{}')",
            difficulty.as_str(),
            normalize_name(name)
        );
        true
    }

    /// Start from raw menu form values
    pub fn start_from_selection(&mut self, difficulty: &str, name: &str) -> bool {
        self.start(Difficulty::from_selection(difficulty), name)
    }

    /// Confirm key: only starts a round from the menu
    pub fn confirm(&mut self, difficulty: &str, name: &str) -> bool {
        self.phase == SessionPhase::Menu && self.start_from_selection(difficulty, name)
    }

    /// Restart with the last difficulty and name
    pub fn retry(&mut self) -> bool {
        let name = self.settings.player_name.clone();
        self.start(self.settings.difficulty, &name)
    }

    /// Leave the result panel for the menu
    pub fn back_to_menu(&mut self) -> bool {
        if self.phase != SessionPhase::GameOver {
            return false;
        }
        self.phase = SessionPhase::Menu;
        true
    }

    /// One scheduled frame. Stale callbacks after the round ended do nothing.
    pub fn frame(&mut self, input: &TickInput) -> Option<TickOutcome> {
        if self.phase != SessionPhase::Running || !self.clock.is_running() {
            return None;
        }

        let outcome = tick(&mut self.world, input);
        if outcome == TickOutcome::Collided {
            self.end_round();
        }
        Some(outcome)
    }

    fn end_round(&mut self) {
        self.clock.stop();
        self.phase = SessionPhase::GameOver;

        let name = normalize_name(&self.settings.player_name);
        let score = self.world.score;
        let outcome = Ranking::record_score(&mut self.storage, &name, score);
        self.ranking = outcome.ranking;

        self.world.events.push(GameEvent::RoundOver {
            score,
            best: outcome.best,
        });
        log::info!("Game over: {} scored {} (best {})", name, score, outcome.best);

        self.last_round = Some(RoundSummary {
            name,
            score,
            best: outcome.best,
        });
    }

    /// Erase the persisted ranking (after the host confirmed with the user)
    pub fn clear_ranking(&mut self) {
        Ranking::clear(&mut self.storage);
        self.ranking = Ranking::new();
    }

    pub fn set_volume(&mut self, volume: f32, muted: bool) {
        self.settings.master_volume = volume.clamp(0.0, 1.0);
        self.settings.muted = muted;
        self.settings.save(&mut self.storage);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::platform::ManualClock;
    use crate::sim::Obstacle;

    fn new_game() -> Game<ManualClock, MemoryStorage> {
        Game::new(ManualClock::new(), MemoryStorage::new(), 42)
    }

    /// Drop an obstacle right above the player's head
    fn doom(game: &mut Game<ManualClock, MemoryStorage>) {
        let p = game.world.player.pos;
        game.world
            .obstacles
            .push(Obstacle::new(Vec2::new(p.x, p.y - 32.0), 40.0));
    }

    #[test]
    fn test_menu_does_not_tick() {
        let mut game = new_game();
        assert_eq!(game.phase(), SessionPhase::Menu);
        assert_eq!(game.frame(&TickInput::default()), None);
        assert_eq!(game.world().ticks, 0);
        assert!(!game.clock().is_running());
    }

    #[test]
    fn test_start_applies_preset() {
        let mut game = new_game();
        assert!(game.start(Difficulty::Hard, "Ana"));
        assert_eq!(game.phase(), SessionPhase::Running);
        assert!(game.clock().is_running());
        assert_eq!(game.world().preset, Difficulty::Hard.preset());
        assert_eq!(game.world().player.speed_x, 6.5);

        // Already running
        assert!(!game.start(Difficulty::Easy, "Bo"));
        assert_eq!(game.world().preset, Difficulty::Hard.preset());
    }

    #[test]
    fn test_collision_ends_round() {
        let mut game = new_game();
        game.start(Difficulty::Medium, "Ana");
        game.world.score = 30;
        doom(&mut game);

        assert_eq!(game.frame(&TickInput::default()), Some(TickOutcome::Collided));
        assert_eq!(game.phase(), SessionPhase::GameOver);
        assert!(!game.clock().is_running());
        assert_eq!(
            game.last_round(),
            Some(&RoundSummary {
                name: "Ana".into(),
                score: 30,
                best: 30
            })
        );
        assert_eq!(game.ranking().best_for("ana"), Some(30));

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Crash));
        assert_eq!(events.last(), Some(&GameEvent::RoundOver { score: 30, best: 30 }));
    }

    #[test]
    fn test_stale_frame_after_game_over_is_noop() {
        let mut game = new_game();
        game.start(Difficulty::Medium, "Ana");
        doom(&mut game);
        game.frame(&TickInput::default());

        let ticks = game.world().ticks;
        let ranking = game.ranking().clone();
        assert_eq!(game.frame(&TickInput::default()), None);
        assert_eq!(game.world().ticks, ticks);
        assert_eq!(game.ranking(), &ranking);
    }

    #[test]
    fn test_best_reported_across_rounds() {
        let mut game = new_game();
        game.start(Difficulty::Medium, "Ana");
        game.world.score = 50;
        doom(&mut game);
        game.frame(&TickInput::default());

        assert!(game.retry());
        assert_eq!(game.world().score, 0);
        assert!(game.world().obstacles.is_empty());
        game.world.score = 20;
        doom(&mut game);
        game.frame(&TickInput::default());

        let round = game.last_round().unwrap();
        assert_eq!((round.score, round.best), (20, 50));
        // One clock start per round
        assert_eq!(game.clock().starts, 2);
        assert_eq!(game.ranking().top_score(), Some(50));
    }

    #[test]
    fn test_menu_navigation() {
        let mut game = new_game();
        assert!(!game.back_to_menu());

        game.start(Difficulty::Easy, "");
        assert!(!game.back_to_menu());
        doom(&mut game);
        game.frame(&TickInput::default());
        assert_eq!(game.last_round().map(|r| r.name.as_str()), Some("Player"));

        assert!(game.back_to_menu());
        assert_eq!(game.phase(), SessionPhase::Menu);
        assert_eq!(game.frame(&TickInput::default()), None);
    }

    #[test]
    fn test_confirm_only_from_menu() {
        let mut game = new_game();
        assert!(game.confirm("hard", "Ana"));
        doom(&mut game);
        game.frame(&TickInput::default());
        assert_eq!(game.phase(), SessionPhase::GameOver);

        // Enter on the result panel does nothing
        assert!(!game.confirm("hard", "Ana"));
        assert_eq!(game.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_unknown_difficulty_falls_back() {
        let mut game = new_game();
        game.start_from_selection("impossible", "Ana");
        assert_eq!(game.world().preset, Difficulty::Medium.preset());
    }

    #[test]
    fn test_settings_persist_between_sessions() {
        let mut game = new_game();
        game.start(Difficulty::Hard, "  Ana ");
        let storage = game.storage.clone();

        let game = Game::new(ManualClock::new(), storage, 1);
        assert_eq!(game.settings().difficulty, Difficulty::Hard);
        assert_eq!(game.settings().player_name, "Ana");
    }

    #[test]
    fn test_clear_ranking() {
        let mut game = new_game();
        game.start(Difficulty::Medium, "Ana");
        doom(&mut game);
        game.frame(&TickInput::default());
        assert!(!game.ranking().is_empty());

        game.clear_ranking();
        assert!(game.ranking().is_empty());
        assert!(Ranking::load(&game.storage).is_empty());
    }
}
