//! High score leaderboard
//!
//! The simulation only knows the [`ScoreSink`] hook, fired once per finished
//! run. [`HighScores`] is the in-memory table; [`FileLeaderboard`] keeps it as
//! a JSON file next to the game.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 50;
/// Longest player name stored
pub const MAX_NAME_LEN: usize = 20;
/// Name used when the player gives none
pub const DEFAULT_NAME: &str = "Player";

/// Failure reading or writing a JSON store on disk
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Score persistence hook
///
/// Called with the player's display name and the final score when a run ends.
/// Errors are logged by the caller and never reach gameplay.
pub trait ScoreSink {
    fn record(&mut self, name: &str, score: u64) -> Result<(), StoreError>;
}

/// Trim a display name to something storable
pub fn sanitize_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim();
    if trimmed.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Milliseconds since the Unix epoch
fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub at: f64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    MAX_HIGH_SCORES
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::with_capacity(MAX_HIGH_SCORES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < self.capacity {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64, at: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: sanitize_name(name),
            score,
            at,
        };

        // Ties keep the earlier entry ahead
        let pos = self.entries.iter().position(|e| score > e.score);
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

        self.entries.truncate(self.capacity);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.capacity = scores.capacity.max(1);
        scores.entries.truncate(scores.capacity);
        Ok(scores)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ScoreSink for HighScores {
    fn record(&mut self, name: &str, score: u64) -> Result<(), StoreError> {
        if let Some(rank) = self.add_score(name, score, now_ms()) {
            log::info!("New high score #{}: {}", rank, score);
        }
        Ok(())
    }
}

/// Leaderboard persisted as JSON, rewritten after every recorded run
#[derive(Debug)]
pub struct FileLeaderboard {
    path: PathBuf,
    scores: HighScores,
}

impl FileLeaderboard {
    /// Open the leaderboard at `path`
    ///
    /// A missing file starts an empty board; a corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, StoreError> {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(json) => {
                let mut scores = HighScores::from_json(&json)?;
                scores.capacity = capacity.max(1);
                scores.entries.truncate(scores.capacity);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                HighScores::with_capacity(capacity)
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Write the table to disk (via a temp file, then rename)
    pub fn save(&self) -> Result<(), StoreError> {
        let json = self.scores.to_json()?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("High scores saved ({} entries)", self.scores.entries.len());
        Ok(())
    }
}

impl ScoreSink for FileLeaderboard {
    fn record(&mut self, name: &str, score: u64) -> Result<(), StoreError> {
        self.scores.record(name, score)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "starlane-{}-{}-{}.json",
            tag,
            std::process::id(),
            now_ms() as u64
        ))
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  Ace  "), "Ace");
        assert_eq!(sanitize_name(""), DEFAULT_NAME);
        assert_eq!(sanitize_name("   "), DEFAULT_NAME);
        assert_eq!(sanitize_name("abcdefghijklmnopqrstuvwxyz").len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_scores_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("a", 100, 1.0), Some(1));
        assert_eq!(scores.add_score("b", 300, 2.0), Some(1));
        assert_eq!(scores.add_score("c", 200, 3.0), Some(2));
        // Tie goes after the existing entry
        assert_eq!(scores.add_score("d", 200, 4.0), Some(3));

        let order: Vec<_> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "d", "a"]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_capacity_trims_lowest() {
        let mut scores = HighScores::with_capacity(3);
        for s in [10, 20, 30] {
            scores.add_score("p", s, 0.0);
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.add_score("p", 5, 0.0), None);
        assert_eq!(scores.potential_rank(25), Some(2));
        assert_eq!(scores.add_score("p", 25, 0.0), Some(2));
        let values: Vec<_> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![30, 25, 20]);
    }

    #[test]
    fn test_zero_score_still_recorded() {
        let mut scores = HighScores::new();
        scores.record("", 0).unwrap();
        assert_eq!(scores.entries.len(), 1);
        assert_eq!(scores.entries[0].name, DEFAULT_NAME);
    }

    #[test]
    fn test_json_round_trip_resorts() {
        let json = r#"{"entries":[{"name":"a","score":1,"at":0.0},{"name":"b","score":9,"at":0.0}]}"#;
        let scores = HighScores::from_json(json).unwrap();
        assert_eq!(scores.capacity, MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(9));
        assert!(matches!(HighScores::from_json("nope"), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_file_leaderboard_persists() {
        let path = temp_path("board");
        {
            let mut board = FileLeaderboard::open(&path, 10).unwrap();
            assert_eq!(board.path(), path.as_path());
            assert!(board.scores().is_empty());
            board.record("Ace", 420).unwrap();
        }
        let board = FileLeaderboard::open(&path, 10).unwrap();
        assert_eq!(board.scores().top_score(), Some(420));
        assert_eq!(board.scores().entries[0].name, "Ace");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_leaderboard_rejects_corrupt_file() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileLeaderboard::open(&path, 10),
            Err(StoreError::Json(_))
        ));
        let _ = fs::remove_file(&path);
    }
}
