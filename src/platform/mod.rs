//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame scheduling (requestAnimationFrame in the browser, manual stepping in tests)
//! - Keyboard input

pub mod clock;
pub mod input;

pub use clock::{FrameClock, ManualClock};
pub use input::{Key, KeyboardState};
