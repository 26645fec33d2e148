use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use rookery::engine::{pick_move, AiConfig};
use rookery::{Color, Game};

#[derive(Clone, Copy, ValueEnum)]
enum Turn {
    White,
    Black,
}

impl From<Turn> for Color {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::White => Color::White,
            Turn::Black => Color::Black,
        }
    }
}

#[derive(Parser)]
#[command(name = "selfplay")]
#[command(about = "Let the engine play itself and print one JSON record per game")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: usize,

    /// Stop a game after this many plies
    #[arg(short, long, default_value_t = 60)]
    max_moves: u32,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 2)]
    depth: u32,

    /// 64-character starting arrangement (standard position if omitted)
    #[arg(short, long)]
    arrangement: Option<String>,

    /// Side to move in the starting arrangement
    #[arg(short, long, value_enum, default_value_t = Turn::White)]
    turn: Turn,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct GameRecord {
    start: String,
    moves: Vec<String>,
    end: String,
    final_turn: Color,
    stopped_by: &'static str,
}

fn play_game(start: &Game, config: &AiConfig, max_moves: u32) -> GameRecord {
    let mut game = start.clone();
    let mut moves = Vec::new();
    let mut stopped_by = "move limit";

    while moves.len() < max_moves as usize {
        let Some(result) = pick_move(&game, config) else {
            stopped_by = "no legal moves";
            break;
        };
        if !game.perform_move(result.mv) {
            stopped_by = "engine move rejected";
            break;
        }
        moves.push(result.mv.to_uci());
    }

    GameRecord {
        start: start.board().to_arrangement(),
        moves,
        end: game.board().to_arrangement(),
        final_turn: game.turn(),
        stopped_by,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let start = match &args.arrangement {
        Some(arrangement) => Game::from_arrangement(arrangement, args.turn.into())
            .context("invalid --arrangement")?,
        None => Game::new(),
    };

    let mut config = AiConfig::new();
    config.depth = args.depth.max(1);

    for i in 0..args.games {
        let record = play_game(&start, &config, args.max_moves);
        log::info!(
            "game {} finished after {} plies ({})",
            i + 1,
            record.moves.len(),
            record.stopped_by
        );
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}
