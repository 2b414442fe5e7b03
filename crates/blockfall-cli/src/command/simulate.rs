use std::path::PathBuf;

use blockfall_autoplay::{move_planner::HeuristicPlanner, weights::HeuristicWeights};
use blockfall_engine::{GameConfig, GameSession};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    games: usize,
    /// Stop a game once this many pieces have been placed
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Seed for the first game; each following game uses the next seed
    #[clap(long)]
    seed: Option<u64>,
    /// Game configuration file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Autoplay heuristic weights file (JSON format)
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Output file path (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
enum GameEnd {
    #[display("topped out")]
    TopOut,
    #[display("piece limit")]
    PieceLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GameSummary {
    game: usize,
    seed: Option<u64>,
    score: usize,
    level: usize,
    lines: usize,
    pieces: usize,
    line_cleared_counter: [usize; 5],
    /// Virtual play time in milliseconds.
    duration_ms: u128,
    end: GameEnd,
}

#[derive(Debug, Clone, Serialize)]
struct SimulationSummary {
    games: Vec<GameSummary>,
    mean_score: f64,
    max_score: usize,
    mean_pieces: f64,
}

impl SimulationSummary {
    #[expect(clippy::cast_precision_loss)]
    fn new(games: Vec<GameSummary>) -> Self {
        let count = games.len().max(1) as f64;
        let mean_score = games.iter().map(|g| g.score).sum::<usize>() as f64 / count;
        let mean_pieces = games.iter().map(|g| g.pieces).sum::<usize>() as f64 / count;
        let max_score = games.iter().map(|g| g.score).max().unwrap_or(0);
        Self {
            games,
            mean_score,
            max_score,
            mean_pieces,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        max_pieces,
        seed,
        config,
        weights,
        output,
    } = arg;

    let config = util::load_game_config(config.as_deref(), *seed)?;
    let weights = util::load_weights(weights.as_deref())?;

    eprintln!("Simulating {games} games (up to {max_pieces} pieces each)...");
    let mut summaries = Vec::with_capacity(*games);
    for game in 0..*games {
        let config = game_config(&config, game);
        let summary = simulate_game(game, config, &weights, *max_pieces);
        eprintln!(
            "Game {}/{}: score {}, level {}, {} lines, {} pieces ({})",
            game + 1,
            games,
            summary.score,
            summary.level,
            summary.lines,
            summary.pieces,
            summary.end
        );
        summaries.push(summary);
    }

    let summary = SimulationSummary::new(summaries);
    eprintln!(
        "Mean score {:.1}, max score {}, mean pieces {:.1}",
        summary.mean_score, summary.max_score, summary.mean_pieces
    );
    Output::save_json(&summary, output.clone())?;
    Ok(())
}

/// Derives the configuration of the `game`-th game: seeded runs advance the
/// seed per game so every game differs but the whole run is reproducible.
fn game_config(base: &GameConfig, game: usize) -> GameConfig {
    let mut config = base.clone();
    config.seed = base.seed.map(|seed| seed.wrapping_add(game as u64));
    config
}

/// Plays one autoplay game on virtual time until it tops out or places
/// `max_pieces` pieces.
fn simulate_game(
    game: usize,
    config: GameConfig,
    weights: &HeuristicWeights,
    max_pieces: usize,
) -> GameSummary {
    let seed = config.seed;
    let planner = HeuristicPlanner::with_weights(*weights);
    let mut session = GameSession::new(config, Some(Box::new(planner)));
    session.set_autoplay(true);

    let end = loop {
        // Nothing listens to events headless; drain them to keep the queue bounded.
        session.take_events();
        if session.session_state().is_game_over() {
            break GameEnd::TopOut;
        }
        if session.stats().completed_pieces() >= max_pieces && !session.state().is_clearing() {
            break GameEnd::PieceLimit;
        }
        if !session.advance_to_next_deadline() {
            break GameEnd::TopOut;
        }
    };

    let stats = session.stats();
    GameSummary {
        game: game + 1,
        seed,
        score: stats.score(),
        level: stats.level(),
        lines: stats.total_cleared_lines(),
        pieces: stats.completed_pieces(),
        line_cleared_counter: *stats.line_cleared_counter(),
        duration_ms: session.now().as_millis(),
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> GameConfig {
        GameConfig::default().with_seed(seed)
    }

    #[test]
    fn test_game_stops_at_piece_limit() {
        let summary = simulate_game(0, seeded(11), &HeuristicWeights::default(), 15);
        assert_eq!(summary.end, GameEnd::PieceLimit);
        assert_eq!(summary.pieces, 15);
        assert_eq!(summary.game, 1);
        assert_eq!(summary.seed, Some(11));
        assert!(summary.duration_ms > 0);
        assert_eq!(
            summary.line_cleared_counter.iter().sum::<usize>(),
            summary.pieces
        );
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let weights = HeuristicWeights::default();
        let a = simulate_game(0, seeded(5), &weights, 30);
        let b = simulate_game(0, seeded(5), &weights, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_game_config_advances_seed() {
        let base = seeded(u64::MAX);
        assert_eq!(game_config(&base, 0).seed, Some(u64::MAX));
        assert_eq!(game_config(&base, 1).seed, Some(0));
        assert_eq!(game_config(&GameConfig::default(), 3).seed, None);
    }

    #[test]
    fn test_summary_statistics() {
        let game = |score, pieces| GameSummary {
            game: 1,
            seed: None,
            score,
            level: 1,
            lines: 0,
            pieces,
            line_cleared_counter: [pieces, 0, 0, 0, 0],
            duration_ms: 0,
            end: GameEnd::TopOut,
        };
        let summary = SimulationSummary::new(vec![game(100, 10), game(300, 30)]);
        assert!((summary.mean_score - 200.0).abs() < f64::EPSILON);
        assert!((summary.mean_pieces - 20.0).abs() < f64::EPSILON);
        assert_eq!(summary.max_score, 300);

        let empty = SimulationSummary::new(Vec::new());
        assert!(empty.mean_score.abs() < f64::EPSILON);
        assert_eq!(empty.max_score, 0);
    }
}
