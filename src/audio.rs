//! Sound cues
//!
//! Game events map to short procedurally generated beeps. Playback is
//! fire-and-forget: a missing or suspended audio context just means silence.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Obstacle cleared
    Point,
    /// Player left the ground
    Jump,
    /// Player hit an obstacle
    Crash,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Point { .. } => Some(SoundEffect::Point),
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::Crash => Some(SoundEffect::Crash),
            GameEvent::RoundOver { .. } => None,
        }
    }

    /// (frequency Hz, start offset s, duration s) for each beep
    pub fn beeps(&self) -> &'static [(f32, f64, f64)] {
        match self {
            SoundEffect::Point => &[(800.0, 0.0, 0.05)],
            SoundEffect::Jump => &[(600.0, 0.0, 0.1)],
            SoundEffect::Crash => &[(200.0, 0.0, 0.1), (100.0, 0.1, 0.15)],
        }
    }
}

/// Gain of a beep at full volume
pub const BEEP_GAIN: f32 = 0.05;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{BEEP_GAIN, SoundEffect};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        /// The context is created lazily on the first cue, after a user gesture
        pub fn new() -> Self {
            Self {
                ctx: None,
                volume: 1.0,
            }
        }

        /// Set volume (0.0 - 1.0), 0 mutes
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        return None;
                    }
                }
            }
            self.ctx.as_ref()
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = self.context() else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for &(freq, offset, duration) in effect.beeps() {
                beep(ctx, freq, offset, duration, BEEP_GAIN * vol);
            }
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn beep(ctx: &AudioContext, freq: f32, offset: f64, duration: f64, level: f32) {
        let Some((osc, gain)) = create_osc(ctx, freq) else {
            return;
        };
        let t = ctx.current_time() + offset;

        gain.gain().set_value_at_time(level, t).ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }
}
