//! Placement evaluation: scoring one landing spot.
//!
//! [`HeuristicEvaluator`] is a fixed linear heuristic over the metrics of
//! [`BoardAnalysis`](crate::board_analysis::BoardAnalysis), with two
//! non-linear parts: the line reward depends on the lowest run of full rows,
//! and the tallest column is penalized super-linearly.
//!
//! ```text
//! score = lines(run, completed)
//!       + w_holes·holes + w_adj·adjacent_holes + w_depth·hole_depth + w_above·blocks_above_holes
//!       + w_total·total_height + w_max·max_height^e
//!       + w_bump·bumpiness + w_contact·surface_contacts
//!       + i_piece_quad? + basin?
//! ```

use std::fmt;

use crate::{placement_analysis::PlacementAnalysis, weights::HeuristicWeights};

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64;
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

#[expect(clippy::cast_precision_loss)]
fn metric(n: usize) -> f64 {
    n as f64
}

impl PlacementEvaluator for HeuristicEvaluator {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64 {
        let w = &self.weights;
        let board = analysis.board_analysis();
        let completed = board.completed_lines();

        let mut score = match board.consecutive_lines() {
            4 => w.quad_run,
            3 => w.triple_run,
            2 => w.double_run,
            _ => w.line * metric(completed),
        };

        let holes = board.hole_profile();
        score += w.holes * metric(holes.holes());
        score += w.adjacent_holes * metric(holes.adjacent_holes);
        score += w.hole_depth * metric(holes.hole_depth());
        score += w.blocks_above_holes * metric(holes.blocks_above_holes);

        score += w.total_height * metric(board.total_height());
        score += w.max_height * metric(board.max_height()).powf(w.max_height_exponent);

        score += w.bumpiness * metric(board.bumpiness());
        score += w.surface_contacts * metric(board.surface_contacts());

        if completed == 4 && analysis.placement().shape().is_horizontal_bar() {
            score += w.i_piece_quad;
        }
        if board.is_basin() {
            score += w.basin;
        }
        score
    }
}
