//! Best-run leaderboard
//!
//! Persisted to LocalStorage in the browser, kept in memory on native. Tracks
//! the top 10 runs by carrots collected, height breaking ties.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Carrots collected
    pub carrots: u32,
    /// Height reached above the spawn (world units)
    pub height: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HighScoreEntry {
    fn beats(&self, other: &HighScoreEntry) -> bool {
        (self.carrots, self.height) > (other.carrots, other.height)
    }
}

/// Leaderboard, sorted best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bunny_hop_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run makes the leaderboard
    pub fn qualifies(&self, carrots: u32, height: u32) -> bool {
        if carrots == 0 && height == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        let candidate = HighScoreEntry {
            carrots,
            height,
            timestamp: 0.0,
        };
        self.entries.last().map(|e| candidate.beats(e)).unwrap_or(true)
    }

    /// Record a run; returns the rank achieved (1-indexed) or None
    pub fn add_run(&mut self, carrots: u32, height: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(carrots, height) {
            return None;
        }

        let entry = HighScoreEntry {
            carrots,
            height,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| entry.beats(e));
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most carrots ever collected (if any)
    pub fn best_carrots(&self) -> Option<u32> {
        self.entries.first().map(|e| e.carrots)
    }

    /// Load the leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding unreadable high scores: {}", e),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, high scores not saved");
            return;
        };
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot encode high scores: {}", e);
                return;
            }
        };
        match storage.set_item(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {:?}", e),
        }
    }

    /// Native builds have no persistent store, every process starts empty
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("High scores kept in memory ({} entries)", self.entries.len());
    }
}
