use std::time::Duration;

use rand::Rng as _;
use stackfall_engine::{GameState, PieceQueue, PieceSeed, Randomizer};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

/// Piece randomization policy selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum RandomizerArg {
    /// Shuffled bags of all seven pieces
    #[default]
    Bag,
    /// Each piece drawn independently
    Uniform,
}

impl From<RandomizerArg> for Randomizer {
    fn from(arg: RandomizerArg) -> Self {
        match arg {
            RandomizerArg::Bag => Randomizer::SevenBag,
            RandomizerArg::Uniform => Randomizer::Uniform,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Piece randomization policy
    #[clap(long, value_enum, default_value_t = RandomizerArg::Bag)]
    pub(crate) randomizer: RandomizerArg,
    /// Milliseconds between gravity steps
    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) gravity_ms: u64,
    /// Frames drawn per second
    #[clap(long, default_value_t = 60.0)]
    pub(crate) fps: f64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            randomizer: RandomizerArg::default(),
            gravity_ms: 1000,
            fps: 60.0,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        randomizer,
        gravity_ms,
        fps,
    } = arg;
    anyhow::ensure!(
        fps.is_finite() && *fps > 0.0,
        "frame rate must be positive, got {fps}"
    );

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Piece seed: {seed}");

    let queue = PieceQueue::with_seed(seed, (*randomizer).into());
    let game = GameState::with_queue(queue);
    let mut app = PlayApp::new(game, Duration::from_millis(*gravity_ms), *fps);

    Tui::new().run(&mut app)?;

    let game = app.game();
    eprintln!(
        "Score: {}, lines: {} (singles {}, doubles {}, triples {}, tetris {}), pieces: {}{}",
        game.score(),
        game.cleared_lanes(),
        game.single_count(),
        game.double_count(),
        game.triple_count(),
        game.tetris_count(),
        game.completed_pieces(),
        if game.is_game_over() { ", game over" } else { "" },
    );
    eprintln!("Replay with: --seed {seed}");

    Ok(())
}
