//! Autoplay for blockfall: picks a placement for the falling piece by scoring
//! every reachable landing spot with a hand-tuned board heuristic.
//!
//! # Architecture
//!
//! ```text
//! Move Planning (best rotation + translation)
//!     ↓ uses
//! Placement Evaluation (score one landing spot)
//!     ↓ uses
//! Board Analysis (lazily computed board metrics)
//! ```
//!
//! - [`board_analysis`] - Lazy-evaluated board metrics (column tops, holes, full rows, ...)
//! - [`placement_analysis`] - The board after a simulated placement, plus its analysis
//! - [`placement_evaluator`] - The [`PlacementEvaluator`](placement_evaluator::PlacementEvaluator)
//!   trait and the weighted heuristic
//! - [`weights`] - Heuristic weights, loadable from JSON
//! - [`move_planner`] - Greedy search over rotations and translations, implementing the
//!   engine's [`MovePlanner`](blockfall_engine::MovePlanner)
//!
//! # Example
//!
//! ```
//! use blockfall_autoplay::move_planner::HeuristicPlanner;
//! use blockfall_engine::{Board, MovePlanner as _, Piece, TetrominoKind};
//!
//! let planner = HeuristicPlanner::default();
//! let piece = Piece::spawn(TetrominoKind::I);
//! let plan = planner.plan_move(&Board::EMPTY, &piece).unwrap();
//! assert!(plan.rotations < 4);
//! ```
//!
//! The planner is greedy: it looks at the current piece only and never at the
//! pieces that follow.

pub mod board_analysis;
pub mod move_planner;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod weights;
