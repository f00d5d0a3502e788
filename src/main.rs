use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use pvz_snake::app::App;
use pvz_snake::audio::{DebugSink, NullSink, SoundSink};
use pvz_snake::game::{Difficulty, GameConfig};

#[derive(Parser)]
#[command(name = "pvz-snake")]
#[command(version, about = "Plants vs. Zombies themed snake game")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "26")]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value = "20")]
    height: i32,

    /// Starting difficulty (changeable in the menu)
    #[arg(long, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Seed for reproducible spawns
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn init_tracing(path: &PathBuf) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let sounds: Box<dyn SoundSink> = match &cli.log_file {
        Some(path) => {
            init_tracing(path)?;
            Box::new(DebugSink)
        }
        None => Box::new(NullSink),
    };

    // A config file wins over the size flags; difficulty still comes from
    // the CLI either way
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::new(cli.width, cli.height),
    };
    config.difficulty = cli.difficulty.into();
    config.validate()?;

    let mut app = App::new(config, cli.seed, sounds);
    app.run().await
}
