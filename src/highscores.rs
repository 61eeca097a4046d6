//! Ranking table
//!
//! Best score per player name, persisted as a JSON array of
//! `{name, score}` objects sorted descending, top 10 only.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Maximum number of ranking entries to keep
pub const MAX_RANKING_ENTRIES: usize = 10;

/// Name recorded when the player leaves the field blank
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// A single ranking entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    /// Best score for this name
    pub score: u32,
}

/// Result of committing a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub ranking: Ranking,
    /// Caller's best, or this round's score if it didn't make the table
    pub best: u32,
}

/// Top-10 ranking, sorted by score descending, unique by case-insensitive name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    /// Storage slot key
    pub const STORAGE_KEY: &'static str = "road_skater_rank";

    /// Create empty ranking
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best recorded score for `name` (case-insensitive)
    pub fn best_for(&self, name: &str) -> Option<u32> {
        let key = normalize_name(name).to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name.to_lowercase() == key)
            .map(|e| e.score)
    }

    /// Merge a round into the table.
    ///
    /// An existing name only keeps the higher of its two scores; new names
    /// are appended. The table is then re-sorted and capped.
    pub fn insert(&mut self, name: &str, score: u32) -> u32 {
        let name = normalize_name(name);
        let key = name.to_lowercase();

        match self.entries.iter_mut().find(|e| e.name.to_lowercase() == key) {
            Some(entry) => {
                if score > entry.score {
                    entry.score = score;
                }
            }
            None => self.entries.push(RankingEntry {
                name: name.clone(),
                score,
            }),
        }

        self.normalize();
        self.best_for(&name).unwrap_or(score)
    }

    /// Trim names, sort descending (stable for ties), keep each name's best
    /// entry only and trim to max size
    fn normalize(&mut self) {
        for entry in &mut self.entries {
            entry.name = normalize_name(&entry.name);
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));

        let mut seen = HashSet::new();
        let before = self.entries.len();
        self.entries.retain(|e| seen.insert(e.name.to_lowercase()));
        if self.entries.len() < before {
            log::warn!(
                "Merged {} duplicate ranking entries",
                before - self.entries.len()
            );
        }

        self.entries.truncate(MAX_RANKING_ENTRIES);
    }

    /// `#1 Ana: 80` style lines for the ranking panel
    pub fn display_lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No ranking yet".to_string()];
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("#{} {}: {}", i + 1, e.name, e.score))
            .collect()
    }

    /// Load the persisted table. Missing or malformed data reads as empty.
    pub fn load(storage: &impl Storage) -> Self {
        let Some(json) = storage.read(Self::STORAGE_KEY) else {
            log::info!("No ranking found, starting fresh");
            return Self::new();
        };

        match serde_json::from_str::<Ranking>(&json) {
            Ok(mut ranking) => {
                ranking.normalize();
                log::info!("Loaded {} ranking entries", ranking.entries.len());
                ranking
            }
            Err(e) => {
                log::warn!("Ignoring malformed ranking data: {}", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.write(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Ranking saved ({} entries)", self.entries.len()),
                Err(e) => log::warn!("{}", e),
            },
            Err(e) => log::warn!("Could not encode ranking: {}", e),
        }
    }

    /// Load, merge one round, persist
    pub fn record_score(storage: &mut impl Storage, name: &str, score: u32) -> RecordOutcome {
        let mut ranking = Self::load(storage);
        let best = ranking.insert(name, score);
        ranking.save(storage);
        RecordOutcome { ranking, best }
    }

    /// Erase all persisted ranking data
    pub fn clear(storage: &mut impl Storage) {
        storage.remove(Self::STORAGE_KEY);
        log::info!("Ranking cleared");
    }
}

/// Trimmed name, or the default when blank
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
