use crate::{
    PieceCollisionError,
    core::{Board, Piece, can_occupy},
};

use super::{
    GameStats,
    line_clear::{ClearTick, LineClearController, compact_rows},
};

/// Outcome of compacting the rows of a finished clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClearOutcome {
    pub lines: usize,
    pub points: usize,
    pub previous_level: usize,
    pub level: usize,
}

impl LineClearOutcome {
    #[must_use]
    pub fn level_changed(&self) -> bool {
        self.previous_level != self.level
    }
}

/// The mutable state of one game: board, active piece, statistics, clearing
/// set and autoplay flag.
///
/// Timers are not part of the state; [`GameSession`](crate::GameSession)
/// decides when each operation runs.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    falling_piece: Option<Piece>,
    stats: GameStats,
    line_clear: LineClearController,
    autoplay: bool,
    spawn_count: u64,
}

impl GameState {
    #[must_use]
    pub fn new(clear_animation_steps: usize) -> Self {
        Self {
            board: Board::EMPTY,
            falling_piece: None,
            stats: GameStats::new(),
            line_clear: LineClearController::new(clear_animation_steps),
            autoplay: false,
            spawn_count: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn line_clear(&self) -> &LineClearController {
        &self.line_clear
    }

    /// Returns whether rows are being cleared.
    ///
    /// Gravity, input and autoplay are suspended while this holds.
    #[must_use]
    pub fn is_clearing(&self) -> bool {
        self.line_clear.is_clearing()
    }

    #[must_use]
    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    /// Number of pieces spawned so far; identifies the current piece.
    #[must_use]
    pub fn spawn_count(&self) -> u64 {
        self.spawn_count
    }

    /// Returns where the falling piece would land, unless a clear is running.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        if self.is_clearing() {
            return None;
        }
        self.falling_piece.map(|piece| piece.dropped(&self.board))
    }

    /// Places a freshly spawned piece.
    ///
    /// Fails if the piece overlaps the stack, in which case there is no falling
    /// piece afterwards.
    pub fn spawn(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        self.spawn_count += 1;
        if can_occupy(&self.board, &piece, 0, 0) {
            self.falling_piece = Some(piece);
            Ok(())
        } else {
            self.falling_piece = None;
            Err(PieceCollisionError)
        }
    }

    /// Replaces the falling piece if the new one fits.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !can_occupy(&self.board, &piece, 0, 0) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = Some(piece);
        Ok(())
    }

    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .ok_or(PieceCollisionError)?
            .moved(&self.board, dx, dy)
            .ok_or(PieceCollisionError)?;
        self.falling_piece = Some(piece);
        Ok(())
    }

    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .ok_or(PieceCollisionError)?
            .try_rotated_cw(&self.board)
            .ok_or(PieceCollisionError)?;
        self.falling_piece = Some(piece);
        Ok(())
    }

    /// Moves the falling piece down until it is blocked.
    pub fn drop_to_floor(&mut self) {
        if let Some(piece) = &mut self.falling_piece {
            *piece = piece.dropped(&self.board);
        }
    }

    /// Merges the falling piece into the board and looks for full rows.
    ///
    /// Returns the number of rows that start clearing; zero when there is no
    /// falling piece.
    pub fn lock_piece(&mut self) -> usize {
        let Some(piece) = self.falling_piece.take() else {
            return 0;
        };
        self.board.merge_piece(&piece);
        self.stats.complete_piece_drop();
        let lines = self.line_clear.detect(&self.board);
        if lines == 0 {
            self.stats.record_no_clear();
        }
        lines
    }

    pub fn tick_line_clear(&mut self) -> ClearTick {
        self.line_clear.tick()
    }

    /// Scores `rows` at the current level, then removes them from the board.
    pub fn complete_line_clear(&mut self, rows: &[usize]) -> LineClearOutcome {
        let previous_level = self.stats.level();
        let points = self.stats.apply_line_clear(rows.len());
        compact_rows(&mut self.board, rows);
        LineClearOutcome {
            lines: rows.len(),
            points,
            previous_level,
            level: self.stats.level(),
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn stats_mut(&mut self) -> &mut GameStats {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BOARD_HEIGHT, TetrominoKind, board::tests::board_from_art};

    fn state_with_board(art: &[&str]) -> GameState {
        let mut state = GameState::new(10);
        *state.board_mut() = board_from_art(art);
        state
    }

    #[test]
    fn test_spawn_blocked_leaves_no_piece() {
        let mut state = GameState::new(10);
        state.board_mut().merge_piece(&Piece::spawn(TetrominoKind::O));
        assert!(state.spawn(Piece::spawn(TetrominoKind::O)).is_err());
        assert!(state.falling_piece().is_none());
        assert_eq!(state.spawn_count(), 1);
    }

    #[test]
    fn test_lock_without_full_rows() {
        let mut state = GameState::new(10);
        state.spawn(Piece::spawn(TetrominoKind::I)).unwrap();
        state.drop_to_floor();
        assert_eq!(state.lock_piece(), 0);
        assert!(state.falling_piece().is_none());
        assert!(!state.is_clearing());
        for x in 3..=6 {
            assert!(state.board().cell(x, BOARD_HEIGHT - 1).is_filled());
        }
        assert_eq!(state.stats().completed_pieces(), 1);
        assert_eq!(state.stats().line_cleared_counter()[0], 1);
        assert_eq!(state.stats().score(), 0);
    }

    #[test]
    fn test_lock_and_complete_clear() {
        let mut state = state_with_board(&["####..####"]);
        state.spawn(Piece::spawn(TetrominoKind::O)).unwrap();
        state.drop_to_floor();
        assert_eq!(state.lock_piece(), 1);
        assert!(state.is_clearing());
        assert!(state.ghost_piece().is_none());

        let rows = state.line_clear().clearing_rows().to_vec();
        let outcome = state.complete_line_clear(&rows);
        assert_eq!(outcome.lines, 1);
        assert_eq!(outcome.points, 100);
        assert!(!outcome.level_changed());
        assert_eq!(state.board().filled_count(), 2);
        assert!(state.board().cell(4, BOARD_HEIGHT - 1).is_filled());
        assert!(state.board().cell(5, BOARD_HEIGHT - 1).is_filled());
    }

    #[test]
    fn test_moves_without_piece_fail() {
        let mut state = GameState::new(10);
        assert!(state.try_move(1, 0).is_err());
        assert!(state.try_rotate().is_err());
        assert_eq!(state.lock_piece(), 0);
    }

    #[test]
    fn test_rejected_rotation_keeps_piece() {
        let mut state = GameState::new(10);
        let vertical = Piece::spawn(TetrominoKind::I).rotated_cw().translated(6, 0);
        state.set_falling_piece(vertical).unwrap();
        assert!(state.try_rotate().is_err());
        assert_eq!(state.falling_piece(), Some(&vertical));
    }
}
