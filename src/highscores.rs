//! High score leaderboard system
//!
//! Persisted through a `Storage` backend, tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Length of a pilot name
pub const NAME_LEN: usize = 3;

/// Character used to pad short names
const NAME_FILLER: char = '-';

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Three-letter pilot code
    pub name: String,
    /// Player's score
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    #[serde(rename = "time")]
    pub timestamp: f64,
}

/// High score leaderboard
///
/// Stored as a bare JSON array, best score first.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "space-race-leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: i64) -> bool {
        if score <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties lose to the older entry
        self.entries
            .last()
            .map(|e| score as u64 > e.score)
            .unwrap_or(true)
    }

    /// Add a new score to the leaderboard
    ///
    /// Non-positive scores are ignored. Returns the rank achieved (1-indexed)
    /// or None if the entry didn't survive truncation.
    pub fn add_score(&mut self, name: &str, score: i64, timestamp: f64) -> Option<usize> {
        if score <= 0 {
            return None;
        }

        let score = score as u64;
        self.entries.sort_by(rank_order);

        // After every entry that ranks at or above it
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score || (score == e.score && timestamp < e.timestamp))
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            HighScoreEntry {
                name: name.to_string(),
                score,
                timestamp,
            },
        );
        let rank = pos + 1;

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores, empty if absent or corrupt
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(json) = storage.get(Self::STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {e}");
                Self::new()
            }
        }
    }

    /// Save high scores, replacing the stored list
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Load, insert and persist a finished run's score
    ///
    /// Returns the loaded-and-updated leaderboard together with the rank
    /// achieved. A failed write is logged; the returned board still reflects
    /// the new entry.
    pub fn record(
        storage: &mut dyn Storage,
        name: &str,
        score: i64,
        timestamp: f64,
    ) -> (Self, Option<usize>) {
        let mut scores = Self::load(storage);
        if score <= 0 {
            return (scores, None);
        }

        let rank = scores.add_score(name, score, timestamp);
        if let Err(e) = scores.save(storage) {
            log::warn!("Failed to save high scores: {e}");
        }
        (scores, rank)
    }
}

/// Descending score, earlier timestamp first on ties
fn rank_order(a: &HighScoreEntry, b: &HighScoreEntry) -> std::cmp::Ordering {
    b.score
        .cmp(&a.score)
        .then(a.timestamp.total_cmp(&b.timestamp))
}

/// Normalize raw name-entry text into a pilot code
///
/// Keeps ASCII letters only, uppercases, and pads or cuts to exactly three
/// characters.
pub fn normalize_pilot_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .take(NAME_LEN)
        .collect();
    while name.len() < NAME_LEN {
        name.push(NAME_FILLER);
    }
    name
}
