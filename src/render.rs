//! Text rendering of a game for terminals.

use crate::game::Game;
use crate::square::{Square, BOARD_FILES, BOARD_RANKS};

const HIGHLIGHT: &str = "\u{1b}[31m";
const RESET: &str = "\u{1b}[0m";

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Mark highlighted cells with ANSI red instead of `<x>` brackets.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { color: true }
    }
}

/// Draw the board, rank 8 at the top. When `origin` is given, it and every
/// square reachable from it are highlighted.
pub fn render(game: &Game, origin: Option<Square>, options: RenderOptions) -> String {
    let highlights = origin
        .and_then(|o| game.reachable_from(o))
        .unwrap_or_default();

    let mut out = String::new();
    for rank in 0..BOARD_RANKS {
        out.push_str(&format!("{} ", BOARD_RANKS - rank));
        for file in 0..BOARD_FILES {
            let Some(sq) = Square::new(rank, file) else {
                continue;
            };
            let lit = origin == Some(sq) || highlights.contains(&sq);
            let cell = game.piece_at(sq).map_or(' ', |p| p.to_char());
            match (lit, options.color) {
                (true, true) => out.push_str(&format!("{HIGHLIGHT}[{cell}]{RESET}")),
                (true, false) => out.push_str(&format!("<{cell}>")),
                (false, _) => out.push_str(&format!("[{cell}]")),
            }
        }
        out.push('\n');
    }
    out.push_str("   A  B  C  D  E  F  G  H \n");
    out
}
