use serde::{Deserialize, Serialize};

/// Weights of the placement heuristic.
///
/// Rewards are positive and penalties negative; a placement's score is the sum
/// of each weight times its board metric. Missing JSON fields keep the values
/// of [`HeuristicWeights::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Per completed row, used when the lowest run of full rows is shorter
    /// than two.
    pub line: f64,
    /// Flat reward when the lowest run of full rows is two rows long.
    pub double_run: f64,
    pub triple_run: f64,
    pub quad_run: f64,
    pub holes: f64,
    pub adjacent_holes: f64,
    pub hole_depth: f64,
    pub blocks_above_holes: f64,
    pub total_height: f64,
    /// Multiplies `max_height ^ max_height_exponent`.
    pub max_height: f64,
    pub max_height_exponent: f64,
    pub bumpiness: f64,
    pub surface_contacts: f64,
    /// Extra reward for four full rows made by the flat I piece.
    pub i_piece_quad: f64,
    pub basin: f64,
}

impl HeuristicWeights {
    pub const DEFAULT: Self = Self {
        line: 100.0,
        double_run: 200.0,
        triple_run: 300.0,
        quad_run: 600.0,
        holes: -60.0,
        adjacent_holes: -30.0,
        hole_depth: -20.0,
        blocks_above_holes: -15.0,
        total_height: -5.0,
        max_height: -4.0,
        max_height_exponent: 1.5,
        bumpiness: -8.0,
        surface_contacts: 5.0,
        i_piece_quad: 200.0,
        basin: 50.0,
    };
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
