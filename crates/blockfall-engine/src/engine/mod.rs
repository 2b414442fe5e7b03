//! Game rules and their orchestration.
//!
//! - [`GameState`] - Board, falling piece, statistics, clearing set and autoplay flag
//! - [`GameSession`] - Drives a [`GameState`] from timers and player intents
//! - [`Scheduler`] - Virtual-time timers, one per [`TimerKind`]
//! - [`LineClearController`] - Full-row detection, flash animation and compaction
//! - [`GameStats`] - Score, level and line-clear counters
//! - [`PieceGenerator`] - Uniform random piece supply
//! - [`MovePlanner`] - Seam for the autoplay planner
//!
//! # Game Flow
//!
//! 1. A piece spawns at the top center; if it does not fit the game is over
//! 2. Gravity, player intents or autoplay move the piece until it locks
//! 3. Full rows flash for a while, then are scored and removed
//! 4. The next piece spawns
//!
//! After game over every timer is stopped. Once the front end acknowledges it
//! with [`GameSession::acknowledge_game_over`], a new game starts after a short
//! delay.

pub use self::{
    config::*, event::*, game_session::*, game_state::*, game_stats::*, input::*, line_clear::*,
    piece_generator::*, planner::*, scheduler::*,
};

mod config;
mod event;
mod game_session;
mod game_state;
mod game_stats;
mod input;
mod line_clear;
mod piece_generator;
mod planner;
mod scheduler;
