//! High score leaderboard system
//!
//! One board per game mode, each persisted as a JSON array of integers and
//! keeping the top 3 scores in descending order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::runner::ScoreSink;
use crate::settings::Settings;
use crate::sim::Mode;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 3;

/// High score leaderboard, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<u64>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary scores, sorting and trimming
    pub fn from_scores(mut scores: Vec<u64>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { entries: scores }
    }

    /// Check if a score would change the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|&e| score > e).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // Find insertion point (sorted descending); ties go below
        let pos = self.entries.iter().position(|&e| score > e);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, score);
                i + 1
            }
            None => {
                self.entries.push(score);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a board from a JSON file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let scores: Vec<u64> = serde_json::from_str(&json)?;
        Ok(Self::from_scores(scores))
    }

    /// Like [`HighScores::read`], but a missing or corrupt file is an empty
    /// board
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Self::new();
        }
        match Self::read(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores from {}", scores.entries.len(), path.display());
                scores
            }
            Err(err) => {
                log::warn!("Discarding high scores at {}: {}", path.display(), err);
                Self::new()
            }
        }
    }

    /// Write the board as a JSON array
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string(self)?;
        fs::write(path, json).map_err(|e| StoreError::io(path, e))?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Standard and secret boards with their backing files
#[derive(Debug, Clone)]
pub struct Leaderboards {
    standard: HighScores,
    secret: HighScores,
    standard_path: PathBuf,
    secret_path: PathBuf,
}

impl Leaderboards {
    /// Load both boards from the paths in `settings`
    pub fn open(settings: &Settings) -> Self {
        let standard_path = settings.leaderboard_path(Mode::Standard).to_path_buf();
        let secret_path = settings.leaderboard_path(Mode::Secret).to_path_buf();
        Self {
            standard: HighScores::load(&standard_path),
            secret: HighScores::load(&secret_path),
            standard_path,
            secret_path,
        }
    }

    pub fn board(&self, mode: Mode) -> &HighScores {
        match mode {
            Mode::Standard => &self.standard,
            Mode::Secret => &self.secret,
        }
    }

    /// Insert a final score and persist the affected board
    pub fn record(&mut self, mode: Mode, score: u64) -> Result<&HighScores, StoreError> {
        let (board, path) = match mode {
            Mode::Standard => (&mut self.standard, &self.standard_path),
            Mode::Secret => (&mut self.secret, &self.secret_path),
        };
        if let Some(rank) = board.add_score(score) {
            log::info!("{:?} high score #{}: {}", mode, rank, score);
        }
        board.save(path)?;
        Ok(board)
    }
}

impl ScoreSink for Leaderboards {
    fn submit(&mut self, mode: Mode, score: u64) -> Vec<u64> {
        if let Err(err) = self.record(mode, score) {
            log::warn!("Could not persist {:?} leaderboard: {}", mode, err);
        }
        self.board(mode).entries().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fire_up_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_keeps_top_three_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(12), Some(1));
        assert_eq!(scores.add_score(30), Some(1));
        assert_eq!(scores.add_score(7), Some(3));
        assert_eq!(scores.add_score(20), Some(2));
        assert_eq!(scores.entries(), &[30, 20, 12]);

        // Beating nobody changes nothing
        assert_eq!(scores.add_score(5), None);
        assert_eq!(scores.add_score(12), None);
        assert_eq!(scores.entries(), &[30, 20, 12]);
    }

    #[test]
    fn test_zero_scores_are_recorded() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0), Some(1));
        assert_eq!(scores.add_score(0), Some(2));
        assert_eq!(scores.entries(), &[0, 0]);
    }

    #[test]
    fn test_json_is_a_plain_array() {
        let scores = HighScores::from_scores(vec![3, 9]);
        assert_eq!(serde_json::to_string(&scores).unwrap(), "[9,3]");
    }

    #[test]
    fn test_corrupt_or_missing_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "[1, 2,").unwrap();
        assert!(HighScores::load(&path).is_empty());
        assert!(matches!(HighScores::read(&path), Err(StoreError::Json(_))));
        let _ = fs::remove_file(&path);

        assert!(HighScores::load(temp_path("missing")).is_empty());
    }

    #[test]
    fn test_unsorted_file_is_normalised() {
        let path = temp_path("unsorted");
        fs::write(&path, "[5, 80, 13, 21]").unwrap();
        let scores = HighScores::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(scores.entries(), &[80, 21, 13]);
    }

    #[test]
    fn test_boards_are_separate_per_mode() {
        let mut settings = Settings::default();
        settings.leaderboard_path = temp_path("standard_board");
        settings.secret_leaderboard_path = temp_path("secret_board");

        let mut boards = Leaderboards::open(&settings);
        assert_eq!(boards.submit(Mode::Standard, 14), vec![14]);
        assert_eq!(boards.submit(Mode::Secret, 3), vec![3]);
        assert_eq!(boards.submit(Mode::Standard, 20), vec![20, 14]);

        let reopened = Leaderboards::open(&settings);
        let _ = fs::remove_file(&settings.leaderboard_path);
        let _ = fs::remove_file(&settings.secret_leaderboard_path);
        assert_eq!(reopened.board(Mode::Standard).entries(), &[20, 14]);
        assert_eq!(reopened.board(Mode::Secret).entries(), &[3]);
    }
}
