//! High score leaderboard
//!
//! Kept in memory for the lifetime of the process; tracks the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Distance reached
    pub distance: u32,
    /// Which run of this session (1-based)
    pub run: u32,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a finished run (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, distance: u32, run: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            distance,
            run,
        };

        // Ties keep the earlier run ahead
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

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.clone().add_score(0, 10, 1), None);
    }

    #[test]
    fn test_insert_sorted() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 10, 1), Some(1));
        assert_eq!(scores.add_score(120, 30, 2), Some(1));
        assert_eq!(scores.add_score(80, 20, 3), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![120, 80, 50]);
        assert_eq!(scores.top_score(), Some(120));
    }

    #[test]
    fn test_full_board_drops_lowest() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(i * 10, 0, i as u32);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 0, 99), None);
        assert_eq!(scores.add_score(15, 0, 100), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_tie_ranks_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score(40, 0, 1);
        assert_eq!(scores.add_score(40, 0, 2), Some(2));
        assert_eq!(scores.entries[0].run, 1);
    }
}
