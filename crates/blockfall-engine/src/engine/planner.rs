use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Board, Piece};

/// A placement chosen by a planner, relative to the piece's current state.
///
/// Apply `rotations` clockwise turns first, then shift the anchor by
/// `translation` columns, then hard-drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub rotations: u8,
    pub translation: i32,
}

/// Chooses where the active piece should go.
///
/// Implementations must be pure with respect to the board and piece they are
/// given. `None` means no legal placement was found; the session then leaves
/// the piece to gravity.
pub trait MovePlanner: fmt::Debug + Send {
    fn plan_move(&self, board: &Board, piece: &Piece) -> Option<MovePlan>;
}
