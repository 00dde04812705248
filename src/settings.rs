//! Player settings
//!
//! Persisted as a small JSON file, separate from the leaderboard. Nothing here
//! changes game balance; difficulty comes only from the wave number.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::highscores::{MAX_HIGH_SCORES, StoreError, sanitize_name};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name submitted with the final score
    pub player_name: String,
    /// Fixed run seed for reproducible sessions (random when unset)
    pub seed: Option<u64>,
    /// Where the leaderboard JSON lives
    pub leaderboard_path: String,
    /// Entries kept on the leaderboard
    pub leaderboard_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            seed: None,
            leaderboard_path: "starlane_scores.json".to_string(),
            leaderboard_capacity: MAX_HIGH_SCORES,
        }
    }
}

impl Settings {
    /// Display name, trimmed and defaulted
    pub fn display_name(&self) -> String {
        sanitize_name(&self.player_name)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
