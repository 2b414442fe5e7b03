use std::path::PathBuf;

use anyhow::Context;
use blockfall_autoplay::move_planner::HeuristicPlanner;
use blockfall_engine::GameSession;

use crate::{tui::Runtime, util};

use self::app::PlayApp;

mod app;
mod keymap;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Start with autoplay enabled
    #[clap(long)]
    autoplay: bool,
    /// Seed for the piece generator
    #[clap(long)]
    seed: Option<u64>,
    /// Game configuration file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Autoplay heuristic weights file (JSON format)
    #[clap(long)]
    weights: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        autoplay,
        seed,
        config,
        weights,
    } = arg;

    let config = util::load_game_config(config.as_deref(), *seed)?;
    let weights = util::load_weights(weights.as_deref())?;
    let planner = HeuristicPlanner::with_weights(weights);

    let mut session = GameSession::new(config, Some(Box::new(planner)));
    session.set_autoplay(*autoplay);

    let mut app = PlayApp::new(session);
    Runtime::new()
        .run(&mut app)
        .context("Failed to run the terminal UI")?;

    let stats = app.session().stats();
    eprintln!(
        "Score {}, level {}, {} lines ({} games finished)",
        stats.score(),
        stats.level(),
        stats.total_cleared_lines(),
        app.session().games_played()
    );
    Ok(())
}
