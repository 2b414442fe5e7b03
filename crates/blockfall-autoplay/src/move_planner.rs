//! Move planning: choosing the rotation and translation for the falling piece.
//!
//! [`HeuristicPlanner`] tries every rotation of the current shape and, for each,
//! every horizontal offset that keeps the anchor between column 0 and the right
//! edge. Offsets whose starting position collides are skipped; the others are
//! dropped straight down, merged into a copy of the board and scored. The
//! first candidate with the strictly highest score wins, so ties keep the
//! lowest rotation count and then the leftmost column.
//!
//! Rotations are simulated without collision checks. When the plan is executed
//! the session rotates through the normal rule, which may refuse a turn.

use arrayvec::ArrayVec;
use blockfall_engine::{BOARD_WIDTH, Board, MovePlan, MovePlanner, Piece, can_occupy};

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{HeuristicEvaluator, PlacementEvaluator},
    weights::HeuristicWeights,
};

/// A candidate placement: the plan that produces it and where the piece lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub plan: MovePlan,
    pub landing: Piece,
}

#[derive(Debug)]
pub struct HeuristicPlanner {
    placement_evaluator: Box<dyn PlacementEvaluator>,
}

impl Default for HeuristicPlanner {
    fn default() -> Self {
        Self::with_weights(HeuristicWeights::DEFAULT)
    }
}

impl HeuristicPlanner {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    #[must_use]
    pub fn with_weights(weights: HeuristicWeights) -> Self {
        Self::new(Box::new(HeuristicEvaluator::new(weights)))
    }

    /// Scores every candidate and returns the best one with its score.
    #[must_use]
    pub fn select_best(&self, board: &Board, piece: &Piece) -> Option<(Candidate, f64)> {
        let mut best: Option<(Candidate, f64)> = None;
        for candidate in candidates(board, piece) {
            let analysis = PlacementAnalysis::from_board(board, candidate.landing);
            let score = self.placement_evaluator.evaluate_placement(&analysis);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best
    }
}

impl MovePlanner for HeuristicPlanner {
    fn plan_move(&self, board: &Board, piece: &Piece) -> Option<MovePlan> {
        self.select_best(board, piece)
            .map(|(candidate, _)| candidate.plan)
    }
}

/// Enumerates the non-colliding start positions, in search order, with their
/// landing spots.
pub fn candidates<'a>(
    board: &'a Board,
    piece: &Piece,
) -> impl Iterator<Item = Candidate> + use<'a> {
    let origin_x = piece.x();
    let right_edge = i32::try_from(BOARD_WIDTH).unwrap_or(i32::MAX);
    let rotated: ArrayVec<Piece, 4> = piece
        .shape()
        .rotations()
        .into_iter()
        .map(|shape| piece.with_shape(shape))
        .collect();

    rotated
        .into_iter()
        .zip(0u8..)
        .flat_map(move |(rotated, rotations)| {
            (-origin_x..right_edge).filter_map(move |translation| {
                let start = rotated.translated(translation, 0);
                can_occupy(board, &start, 0, 0).then(|| Candidate {
                    plan: MovePlan {
                        rotations,
                        translation,
                    },
                    landing: start.dropped(board),
                })
            })
        })
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{BOARD_HEIGHT, Cell, Color, TetrominoKind};

    use super::*;

    fn board_from_art(art: &[&str]) -> Board {
        let mut board = Board::EMPTY;
        let offset = BOARD_HEIGHT - art.len();
        for (dy, line) in art.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    board.set_cell(x, offset + dy, Cell::Filled(Color::WHITE));
                }
            }
        }
        board
    }

    #[test]
    fn test_candidates_never_collide() {
        let board = board_from_art(&[
            "#.........",
            "##...#...#",
            "###.####.#",
        ]);
        for kind in TetrominoKind::ALL {
            let piece = Piece::spawn(kind);
            for candidate in candidates(&board, &piece) {
                let mut start = piece;
                for _ in 0..candidate.plan.rotations {
                    start = start.rotated_cw();
                }
                let start = start.translated(candidate.plan.translation, 0);
                assert!(can_occupy(&board, &start, 0, 0));
                assert!(can_occupy(&board, &candidate.landing, 0, 0));
                assert!(!can_occupy(&board, &candidate.landing, 0, 1));
            }
        }
    }

    #[test]
    fn test_candidate_count_on_empty_board() {
        // Horizontal I fits at 7 columns, vertical I at 10: 7 + 10 + 7 + 10.
        let piece = Piece::spawn(TetrominoKind::I);
        assert_eq!(candidates(&Board::EMPTY, &piece).count(), 34);
        // O fits at 9 columns in every rotation.
        let piece = Piece::spawn(TetrominoKind::O);
        assert_eq!(candidates(&Board::EMPTY, &piece).count(), 36);
    }

    #[test]
    fn test_translation_range_is_relative_to_anchor() {
        let piece = Piece::spawn(TetrominoKind::O);
        let plans: Vec<_> = candidates(&Board::EMPTY, &piece)
            .filter(|c| c.plan.rotations == 0)
            .map(|c| c.plan.translation)
            .collect();
        assert_eq!(plans, (-4..=4).collect::<Vec<_>>());
    }

    #[test]
    fn test_fills_the_gap() {
        // Only the two middle columns are open on the bottom row.
        let board = board_from_art(&["####..####"]);
        let planner = HeuristicPlanner::default();
        let piece = Piece::spawn(TetrominoKind::O);
        let plan = planner.plan_move(&board, &piece).unwrap();
        assert_eq!(plan.translation, 0);
    }

    #[test]
    fn test_vertical_i_into_well() {
        let row = "#########.";
        let board = board_from_art(&[row, row, row, row]);
        let planner = HeuristicPlanner::default();
        let piece = Piece::spawn(TetrominoKind::I);
        let (best, _) = planner.select_best(&board, &piece).unwrap();
        assert_eq!(best.landing.x(), 9);
        assert_eq!(best.landing.shape().height(), 4);
        assert_eq!(best.plan.rotations % 2, 1);
    }

    #[test]
    fn test_no_candidate_when_everything_collides() {
        let mut board = Board::EMPTY;
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if (x + y) % 2 == 0 {
                    board.set_cell(x, y, Cell::Filled(Color::WHITE));
                }
            }
        }
        let piece = Piece::spawn(TetrominoKind::O);
        assert!(HeuristicPlanner::default().plan_move(&board, &piece).is_none());
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        #[derive(Debug)]
        struct Flat;
        impl PlacementEvaluator for Flat {
            fn evaluate_placement(&self, _analysis: &PlacementAnalysis) -> f64 {
                0.0
            }
        }
        let planner = HeuristicPlanner::new(Box::new(Flat));
        let piece = Piece::spawn(TetrominoKind::T);
        let plan = planner.plan_move(&Board::EMPTY, &piece).unwrap();
        assert_eq!(
            plan,
            MovePlan {
                rotations: 0,
                translation: -piece.x()
            }
        );
    }
}
