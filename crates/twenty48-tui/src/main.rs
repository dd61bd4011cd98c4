mod app;
mod render;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twenty48_engine::engine::Game;

use app::App;

#[derive(Parser, Debug)]
struct Args {
    /// Board side length; the grid is n x n.
    #[arg(short = 'd', long, default_value_t = 4)]
    dimension: usize,
    /// How many moves can be taken back over the whole session.
    #[arg(short = 'u', long, default_value_t = 3)]
    undos: usize,
    /// Fixed seed for tile spawning; omit for a fresh game every run.
    #[arg(long)]
    seed: Option<u64>,
    /// Optional tracing filter, e.g. "info", "debug". Logs go to stderr.
    #[arg(long, default_value = "off")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    ensure!(args.dimension >= 3, "Dimension must be an integer > 2");

    let game = match args.seed {
        Some(seed) => Game::with_seed(args.dimension, args.undos, seed)?,
        None => Game::new(args.dimension, args.undos)?,
    };
    info!(
        "dimension" = args.dimension,
        "undos" = args.undos,
        "seed" = args.seed
    );

    App::new(game).run()
}
