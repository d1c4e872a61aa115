//! High score ledger
//!
//! Persisted as plain text, one score per line, top 5 kept in descending
//! order. Load and save are best-effort: a missing or garbled file is an
//! empty ledger, and a failed write is logged and ignored.

use std::fs;
use std::path::Path;

/// Maximum number of scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Bounded descending leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<u64>,
}

impl HighScores {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Read persisted scores in any order; unparseable tokens are skipped
    pub fn load(path: &Path) -> Self {
        let mut scores = Self::new();
        match fs::read_to_string(path) {
            Ok(text) => {
                scores.entries = text
                    .split_whitespace()
                    .filter_map(|token| token.parse().ok())
                    .collect();
                scores.normalize();
                log::info!("loaded {} high scores", scores.entries.len());
            }
            Err(_) => {
                log::info!("no high score file at {}, starting fresh", path.display());
            }
        }
        scores
    }

    /// Insert a finished run's score, keeping the ledger sorted and bounded
    pub fn record(&mut self, score: u64) {
        self.entries.push(score);
        self.normalize();
    }

    /// Write the ledger, one score per line, overwriting prior contents.
    /// Failure has no gameplay impact and is only logged.
    pub fn save(&self, path: &Path) {
        let mut text = String::new();
        for score in &self.entries {
            text.push_str(&score.to_string());
            text.push('\n');
        }
        match fs::write(path, text) {
            Ok(()) => log::info!("high scores saved ({} entries)", self.entries.len()),
            Err(err) => log::warn!("failed to save high scores to {}: {err}", path.display()),
        }
    }

    fn normalize(&mut self) {
        self.entries.sort_unstable_by(|a, b| b.cmp(a));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Scores in descending order
    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best score on record (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().copied()
    }
}
