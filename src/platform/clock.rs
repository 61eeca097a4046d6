//! Frame clock
//!
//! The game controller only starts and stops the clock. Whoever drives the
//! clock calls `Game::frame` once per scheduled frame while it runs.

/// Start/stop primitives for the per-frame callback chain
pub trait FrameClock {
    /// Begin scheduling frames. Starting a running clock is a no-op.
    fn start(&mut self);
    /// Cancel further frames. Stopping a stopped clock is a no-op.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Deterministic stepper for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    running: bool,
    /// How many times the chain was (re)started
    pub starts: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for ManualClock {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
