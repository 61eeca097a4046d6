//! Game settings and preferences
//!
//! Persisted separately from the ranking in its own storage slot.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;
use crate::sim::DifficultyPreset;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a UI selection, falling back to the default preset
    pub fn from_selection(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{}', using {}", s, Self::default().as_str());
            Self::default()
        })
    }

    /// Scroll speed, spawn interval and steering speed
    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                scroll_speed: 4.0,
                spawn_interval: 100,
                horizontal_speed: 6.0,
            },
            Difficulty::Medium => DifficultyPreset {
                scroll_speed: 5.0,
                spawn_interval: 90,
                horizontal_speed: 6.0,
            },
            Difficulty::Hard => DifficultyPreset {
                scroll_speed: 6.5,
                spawn_interval: 70,
                horizontal_speed: 6.5,
            },
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last difficulty picked in the menu
    pub difficulty: Difficulty,
    /// Last name typed in the menu
    pub player_name: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            player_name: String::new(),
            master_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Storage slot key
    pub const STORAGE_KEY: &'static str = "road_skater_settings";

    /// Load settings, defaulting on missing or malformed data
    pub fn load(storage: &impl Storage) -> Self {
        if let Some(json) = storage.read(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Discarding malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut impl Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.write(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("{}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }

    /// Volume actually applied to sound cues
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_presets() {
        let easy = Difficulty::Easy.preset();
        assert_eq!((easy.scroll_speed, easy.spawn_interval, easy.horizontal_speed), (4.0, 100, 6.0));
        let medium = Difficulty::Medium.preset();
        assert_eq!((medium.scroll_speed, medium.spawn_interval, medium.horizontal_speed), (5.0, 90, 6.0));
        let hard = Difficulty::Hard.preset();
        assert_eq!((hard.scroll_speed, hard.spawn_interval, hard.horizontal_speed), (6.5, 70, 6.5));
    }

    #[test]
    fn test_spawns_faster_when_harder() {
        assert!(Difficulty::Hard.preset().spawn_interval < Difficulty::Medium.preset().spawn_interval);
        assert!(Difficulty::Medium.preset().spawn_interval < Difficulty::Easy.preset().spawn_interval);
    }

    #[test]
    fn test_unknown_selection_falls_back() {
        assert_eq!(Difficulty::from_selection("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::from_selection(" easy "), Difficulty::Easy);
        assert_eq!(Difficulty::from_selection("nightmare"), Difficulty::Medium);
        assert_eq!(Difficulty::from_selection(""), Difficulty::Medium);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            difficulty: Difficulty::Hard,
            player_name: "Ana".into(),
            master_volume: 0.5,
            muted: true,
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_malformed_settings_default() {
        let mut storage = MemoryStorage::new();
        storage.write(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());

        // Missing fields fill in from defaults
        storage
            .write(Settings::STORAGE_KEY, r#"{"player_name":"Bo"}"#)
            .unwrap();
        let loaded = Settings::load(&storage);
        assert_eq!(loaded.player_name, "Bo");
        assert_eq!(loaded.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        settings.master_volume = 1.7;
        assert_eq!(settings.effective_volume(), 1.0);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
