//! Keyboard mapping and the live pressed-key map

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    /// Starts a run from the menu
    Confirm,
    /// Toggles sound
    Mute,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " | "ArrowUp" => Some(Key::Jump),
            "Enter" => Some(Key::Confirm),
            "m" | "M" => Some(Key::Mute),
            _ => None,
        }
    }
}

/// Held keys plus a one-shot jump latch
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
    jump_queued: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true if the key was not already held.
    pub fn key_down(&mut self, key: Key) -> bool {
        let fresh = self.pressed.insert(key);
        // Auto-repeat must not queue another jump
        if fresh && key == Key::Jump {
            self.jump_queued = true;
        }
        fresh
    }

    pub fn key_up(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Input for the next tick; consumes the queued jump
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.is_pressed(Key::Left),
            right: self.is_pressed(Key::Right),
            jump: std::mem::take(&mut self.jump_queued),
        }
    }

    /// Drop a jump pressed while no round was running
    pub fn discard_jump(&mut self) {
        self.jump_queued = false;
    }

    /// Forget everything (focus lost)
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.jump_queued = false;
    }
}
