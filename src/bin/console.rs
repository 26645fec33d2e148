use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rookery::catalogue::{PuzzleDatabase, DEFAULT_DATABASE_PATH};
use rookery::console::Console;
use rookery::render::RenderOptions;

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Play chess or chess puzzles in the terminal")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIMESTAMP"), ")"))]
struct Args {
    /// Puzzle database file, created on exit if missing
    #[arg(short, long, default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Mark highlighted squares with <x> instead of ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let database = PuzzleDatabase::open(&args.database)
        .with_context(|| format!("loading puzzles from {}", args.database.display()))?;

    let stdin = io::stdin();
    let mut console = Console::new(
        stdin.lock(),
        io::stdout(),
        database,
        RenderOptions {
            color: !args.no_color,
        },
    );
    console.run()
}
