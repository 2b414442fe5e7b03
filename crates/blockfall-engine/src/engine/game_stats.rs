use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base points for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Any other count scores nothing.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Points needed per level.
const SCORE_PER_LEVEL: usize = 1000;

/// Returns the base bonus for clearing `lines` rows at once.
#[must_use]
pub fn line_clear_bonus(lines: usize) -> usize {
    SCORE_TABLE.get(lines).copied().unwrap_or(0)
}

/// Returns the level reached with `score` points (`score / 1000 + 1`).
#[must_use]
pub fn level_for_score(score: usize) -> usize {
    score / SCORE_PER_LEVEL + 1
}

/// Returns the gravity period at `level`: `1000 / (level * 1.5)` milliseconds.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn fall_interval(level: usize) -> Duration {
    Duration::from_secs_f64(1.0 / (level.max(1) as f64 * 1.5))
}

/// Game statistics tracking score, level, and line clears.
///
/// - **Score**: `bonus(lines) * level` summed over every clear
/// - **Level**: derived from the score (one level per 1000 points)
/// - **Completed pieces**: total number of pieces merged into the board
/// - **Line clear distribution**: count of single, double, triple and quad clears
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop();
/// assert_eq!(stats.apply_line_clear(4), 800);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of piece drops by lines cleared.
    ///
    /// Index `0` counts drops that cleared nothing; `1..=4` count singles
    /// through quads.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a piece merged into the board.
    pub const fn complete_piece_drop(&mut self) {
        self.completed_pieces += 1;
    }

    /// Records a drop that cleared no lines.
    pub const fn record_no_clear(&mut self) {
        self.line_cleared_counter[0] += 1;
    }

    /// Scores a simultaneous clear of `lines` rows at the current level and
    /// recomputes the level from the new score.
    ///
    /// Returns the points awarded.
    pub fn apply_line_clear(&mut self, lines: usize) -> usize {
        let points = line_clear_bonus(lines) * self.level;
        self.score += points;
        self.level = level_for_score(self.score);
        self.total_cleared_lines += lines;
        if let Some(count) = self.line_cleared_counter.get_mut(lines) {
            *count += 1;
        }
        points
    }
}
