//! The board after a simulated placement.
//!
//! Full rows are left in place: the heuristic looks at the merged board before
//! any line clear, so completed rows show up both as rewards and as height.

use blockfall_engine::{Board, Piece};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug)]
pub struct PlacementAnalysis {
    placement: Piece,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    /// Merges `placement` into a copy of `before_placement`.
    ///
    /// Cells of the piece that lie outside the board are dropped.
    #[must_use]
    pub fn from_board(before_placement: &Board, placement: Piece) -> Self {
        let mut board = before_placement.clone();
        board.merge_piece(&placement);
        Self {
            placement,
            board_analysis: BoardAnalysis::from_board(&board),
        }
    }

    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }
}
