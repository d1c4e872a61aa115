//! Data-driven game balance
//!
//! Balance knobs live in one serde struct so they can be loaded from a
//! JSON file next to the binary; a missing or malformed file falls back
//! to the built-in values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Scroll speed below the first tier threshold (and with an empty table)
pub const BASE_SCROLL_SPEED: f32 = 2.0;

/// One speed tier, applying from `threshold` points upward
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedTier {
    pub threshold: u64,
    pub speed: f32,
}

/// Game balance values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Constant downward displacement per tick (pixels)
    pub gravity: f32,
    /// Displacement per tick while a direction key is held (pixels)
    pub move_speed: f32,
    /// x of the first tube pair
    pub base_x: f32,
    /// Horizontal distance between consecutive pairs
    pub tube_spacing: f32,
    /// Number of live pairs; each recycles once it scrolls off-screen
    pub tube_count: usize,
    /// Points awarded per passed pair
    pub score_per_tube: u64,
    /// Scroll speed tiers, kept sorted ascending by threshold. The active
    /// tier is the last one whose threshold does not exceed the score, so
    /// a later tier can never be shadowed by an earlier one.
    pub speed_tiers: Vec<SpeedTier>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.9,
            move_speed: 3.0,
            base_x: 400.0,
            tube_spacing: 280.0,
            tube_count: 8,
            score_per_tube: 100,
            speed_tiers: vec![
                SpeedTier {
                    threshold: 0,
                    speed: BASE_SCROLL_SPEED,
                },
                SpeedTier {
                    threshold: 2500,
                    speed: 3.5,
                },
                SpeedTier {
                    threshold: 4500,
                    speed: 4.0,
                },
                SpeedTier {
                    threshold: 5500,
                    speed: 6.0,
                },
            ],
        }
    }
}

impl Tuning {
    /// Scroll speed for a score: the last tier whose threshold does not
    /// exceed it
    pub fn scroll_speed_for(&self, score: u64) -> f32 {
        self.speed_tiers
            .iter()
            .take_while(|tier| tier.threshold <= score)
            .last()
            .map_or(BASE_SCROLL_SPEED, |tier| tier.speed)
    }

    /// Load tuning from a JSON file, falling back to the defaults when the
    /// file is missing or unreadable. The tier table is re-sorted so a
    /// hand-edited file keeps the last-not-exceeding selection sound.
    pub fn load_or_default(path: &Path) -> Self {
        let mut tuning = match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("ignoring malformed tuning file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        tuning.speed_tiers.sort_by_key(|tier| tier.threshold);
        tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_selection_at_thresholds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.scroll_speed_for(0), BASE_SCROLL_SPEED);
        assert_eq!(tuning.scroll_speed_for(2499), BASE_SCROLL_SPEED);
        assert_eq!(tuning.scroll_speed_for(2500), 3.5);
        assert_eq!(tuning.scroll_speed_for(4499), 3.5);
        assert_eq!(tuning.scroll_speed_for(4500), 4.0);
        // The top tier is reachable, not shadowed by the 4500 one
        assert_eq!(tuning.scroll_speed_for(5500), 6.0);
        assert_eq!(tuning.scroll_speed_for(1_000_000), 6.0);
    }

    #[test]
    fn test_empty_table_uses_base_speed() {
        let tuning = Tuning {
            speed_tiers: Vec::new(),
            ..Tuning::default()
        };
        assert_eq!(tuning.scroll_speed_for(9999), BASE_SCROLL_SPEED);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": 1.2 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.2);
        assert_eq!(tuning.tube_spacing, Tuning::default().tube_spacing);
        assert_eq!(tuning.speed_tiers.len(), 4);
    }

    #[test]
    fn test_load_sorts_an_unsorted_table() {
        let path = std::env::temp_dir().join("floppy_tuning_unsorted.json");
        let text = r#"{ "speed_tiers": [
            { "threshold": 4500, "speed": 4.0 },
            { "threshold": 0, "speed": 2.0 },
            { "threshold": 2500, "speed": 3.5 }
        ] }"#;
        fs::write(&path, text).unwrap();

        let tuning = Tuning::load_or_default(&path);
        fs::remove_file(&path).ok();

        assert!(tuning.speed_tiers.windows(2).all(|w| w[0].threshold <= w[1].threshold));
        assert_eq!(tuning.scroll_speed_for(2500), 3.5);
    }

    #[test]
    fn test_missing_and_malformed_files_fall_back() {
        let missing = std::env::temp_dir().join("floppy_tuning_does_not_exist.json");
        let tuning = Tuning::load_or_default(&missing);
        assert_eq!(tuning.score_per_tube, 100);

        let garbled = std::env::temp_dir().join("floppy_tuning_garbled.json");
        fs::write(&garbled, "not json at all").unwrap();
        let tuning = Tuning::load_or_default(&garbled);
        fs::remove_file(&garbled).ok();
        assert_eq!(tuning.score_per_tube, 100);
    }
}
