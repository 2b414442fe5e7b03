//! Collision and movement rules.
//!
//! Everything here is a pure function of a board and a piece value; nothing is
//! mutated. The session applies the results.

use super::{
    board::{BOARD_HEIGHT, BOARD_WIDTH, Board},
    piece::Piece,
};

/// Returns whether `piece`, shifted by `(dx, dy)`, fits on `board`.
///
/// Each occupied cell must land in a column within `[0, BOARD_WIDTH)` and a row
/// below `BOARD_HEIGHT`. Rows above the board (negative) are allowed and never
/// collide; rows on the board must be empty.
#[must_use]
pub fn can_occupy(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    piece.occupied_positions().all(|(x, y)| {
        let (x, y) = (x + dx, y + dy);
        let Ok(col) = usize::try_from(x) else {
            return false;
        };
        if col >= BOARD_WIDTH {
            return false;
        }
        let Ok(row) = usize::try_from(y) else {
            return true;
        };
        row < BOARD_HEIGHT && board.cell(col, row).is_empty()
    })
}

impl Piece {
    /// Returns the piece moved by `(dx, dy)` if the target position is free.
    #[must_use]
    pub fn moved(&self, board: &Board, dx: i32, dy: i32) -> Option<Self> {
        can_occupy(board, self, dx, dy).then(|| self.translated(dx, dy))
    }

    /// Returns the piece rotated 90° clockwise if the rotated shape fits in
    /// place. There is no wall kick: a blocked rotation is simply rejected.
    #[must_use]
    pub fn try_rotated_cw(&self, board: &Board) -> Option<Self> {
        let rotated = self.rotated_cw();
        can_occupy(board, &rotated, 0, 0).then_some(rotated)
    }

    /// Returns how many rows the piece can fall before it is blocked.
    #[must_use]
    pub fn drop_distance(&self, board: &Board) -> i32 {
        let mut distance = 0;
        while can_occupy(board, self, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Returns the position the piece would land at on a hard drop.
    ///
    /// This is also the ghost piece shown by the renderer.
    #[must_use]
    pub fn dropped(&self, board: &Board) -> Self {
        self.translated(0, self.drop_distance(board))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{board::tests::board_from_art, piece::TetrominoKind};

    #[test]
    fn test_walls_and_floor() {
        let board = Board::EMPTY;
        let piece = Piece::spawn(TetrominoKind::I); // x = 3..=6
        assert!(can_occupy(&board, &piece, -3, 0));
        assert!(!can_occupy(&board, &piece, -4, 0));
        assert!(can_occupy(&board, &piece, 3, 0));
        assert!(!can_occupy(&board, &piece, 4, 0));
        assert!(can_occupy(&board, &piece, 0, 19));
        assert!(!can_occupy(&board, &piece, 0, 20));
    }

    #[test]
    fn test_rows_above_board_are_allowed() {
        let board = board_from_art(&["##########"]);
        let piece = Piece::spawn(TetrominoKind::O);
        assert!(can_occupy(&board, &piece, 0, -5));
        assert!(!can_occupy(&board, &piece, 0, 18));
    }

    #[test]
    fn test_blocked_by_filled_cells() {
        let board = board_from_art(&["....#....."]);
        let piece = Piece::spawn(TetrominoKind::O); // columns 4..=5
        assert_eq!(piece.drop_distance(&board), 17);
        assert!(piece.moved(&board, 0, 18).is_none());
        assert!(piece.moved(&board, -2, 18).is_some());
    }

    #[test]
    fn test_hard_drop_on_empty_board() {
        let piece = Piece::spawn(TetrominoKind::I);
        let landed = piece.dropped(&Board::EMPTY);
        assert_eq!((landed.x(), landed.y()), (3, 19));
        // The piece it was called on is untouched.
        assert_eq!(piece.y(), 0);
    }

    #[test]
    fn test_blocked_rotation_is_rejected() {
        // A vertical I next to the right wall cannot turn flat.
        let piece = Piece::spawn(TetrominoKind::I).rotated_cw().translated(6, 0);
        assert_eq!(piece.x(), 9);
        assert!(can_occupy(&Board::EMPTY, &piece, 0, 0));
        assert!(piece.try_rotated_cw(&Board::EMPTY).is_none());

        // The same rotation succeeds away from the wall.
        let free = piece.translated(-5, 0);
        let rotated = free.try_rotated_cw(&Board::EMPTY).unwrap();
        assert_eq!(rotated.shape().width(), 4);
    }

    #[test]
    fn test_rotation_blocked_by_stack() {
        let board = board_from_art(&[
            "..........",
            "..........",
            "#########.",
        ]);
        let piece = Piece::spawn(TetrominoKind::I).translated(0, 17);
        assert!(can_occupy(&board, &piece, 0, 0));
        assert!(piece.try_rotated_cw(&board).is_none());
    }
}
