use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ArrangementError;
use crate::moves::Move;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// A game in progress: the board plus the number of committed moves. Whose
/// turn it is follows from the parity of that count, White first.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Game {
    board: Board,
    move_count: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            move_count: 0,
        }
    }

    /// Set up an arbitrary 64-cell arrangement with `turn` to move.
    pub fn from_arrangement(arrangement: &str, turn: Color) -> Result<Self, ArrangementError> {
        let board = Board::from_arrangement(arrangement)?;
        let move_count = match turn {
            Color::White => 0,
            Color::Black => 1,
        };
        Ok(Game { board, move_count })
    }

    pub fn turn(&self) -> Color {
        if self.move_count % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Always `false`: the game has no terminal state of its own and ends
    /// only when a player resigns.
    pub fn is_game_over(&self) -> bool {
        false
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A deep copy of the board for look-ahead. Changes to it never reach
    /// this game.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.board.is_empty(sq)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn reachable_from(&self, sq: Square) -> Option<Vec<Square>> {
        self.board.destinations_from(sq)
    }

    pub fn all_destinations_by_color(&self, color: Color) -> Vec<Square> {
        self.board.all_destinations_by_color(color)
    }

    pub fn king_under_attack(&self, color: Color) -> bool {
        self.board.king_under_attack(color)
    }

    /// Try to play `mv` for the side to move. Returns `false` and leaves the
    /// game untouched if the origin holds no piece of the side to move, the
    /// destination is not reachable, or the move would leave the mover's king
    /// attacked.
    pub fn perform_move(&mut self, mv: Move) -> bool {
        let (origin, destination) = (mv.origin(), mv.destination());
        let turn = self.turn();

        let piece = match self.board.piece_at(origin) {
            Some(p) if p.color() == turn => p,
            Some(_) => {
                debug!("rejected {mv}: piece on {origin} does not belong to {turn}");
                return false;
            }
            None => {
                debug!("rejected {mv}: {origin} is empty");
                return false;
            }
        };

        if !piece.destinations(&self.board, origin).contains(&destination) {
            debug!("rejected {mv}: {destination} is not reachable from {origin}");
            return false;
        }

        let rollback = self.board.clone();

        let mut moved = piece;
        moved.set_has_moved(true);
        self.board.remove(origin);
        self.board.place(destination, moved);

        if self.board.king_under_attack(turn) {
            debug!("rejected {mv}: leaves the {turn} king under attack");
            self.board = rollback;
            return false;
        }

        self.move_count += 1;
        trace!("committed {mv}, move count now {}", self.move_count);
        true
    }
}
