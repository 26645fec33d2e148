use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::square::Square;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a pawn of this color advances by. White starts on rank 6
    /// and walks toward rank 0.
    fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    fn pawn_starting_rank(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

const DIAGONALS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ORTHOGONALS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A colored piece. Rooks and kings also remember whether they have been
/// relocated; the flag is written by [`crate::game::Game::perform_move`] and
/// survives in the arrangement encoding, but move generation never reads it.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Piece {
    piece_type: PieceType,
    color: Color,
    has_moved: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece {
            piece_type,
            color,
            has_moved: false,
        }
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Only rooks and kings track movement; for every other piece this is a
    /// no-op.
    pub fn set_has_moved(&mut self, has_moved: bool) {
        if self.tracks_movement() {
            self.has_moved = has_moved;
        }
    }

    fn tracks_movement(&self) -> bool {
        matches!(self.piece_type, PieceType::Rook | PieceType::King)
    }

    /// Decode one cell of the arrangement alphabet. `-` and anything outside
    /// the alphabet yield `None`.
    pub fn from_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let (piece_type, has_moved) = match c.to_ascii_lowercase() {
            'p' => (PieceType::Pawn, false),
            'n' => (PieceType::Knight, false),
            'b' => (PieceType::Bishop, false),
            'r' => (PieceType::Rook, false),
            's' => (PieceType::Rook, true),
            'q' => (PieceType::Queen, false),
            'k' => (PieceType::King, false),
            'l' => (PieceType::King, true),
            _ => return None,
        };
        Some(Piece {
            piece_type,
            color,
            has_moved,
        })
    }

    pub fn to_char(&self) -> char {
        let c = match (self.piece_type, self.has_moved) {
            (PieceType::Pawn, _) => 'p',
            (PieceType::Knight, _) => 'n',
            (PieceType::Bishop, _) => 'b',
            (PieceType::Rook, false) => 'r',
            (PieceType::Rook, true) => 's',
            (PieceType::Queen, _) => 'q',
            (PieceType::King, false) => 'k',
            (PieceType::King, true) => 'l',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Squares this piece could move to from `at`, ignoring whether the move
    /// would leave its own king attacked.
    pub fn destinations(&self, board: &Board, at: Square) -> Vec<Square> {
        let mut result = Vec::new();
        match self.piece_type {
            PieceType::Pawn => self.pawn_destinations(board, at, &mut result),
            PieceType::Knight => self.step_destinations(board, at, &KNIGHT_OFFSETS, &mut result),
            PieceType::Bishop => self.sliding_destinations(board, at, &DIAGONALS, &mut result),
            PieceType::Rook => self.sliding_destinations(board, at, &ORTHOGONALS, &mut result),
            PieceType::Queen => {
                self.sliding_destinations(board, at, &ORTHOGONALS, &mut result);
                self.sliding_destinations(board, at, &DIAGONALS, &mut result);
            }
            PieceType::King => self.step_destinations(board, at, &KING_OFFSETS, &mut result),
        }
        result
    }

    fn is_opponent(&self, board: &Board, sq: Square) -> bool {
        board.piece_at(sq).is_some_and(|p| p.color() != self.color)
    }

    fn pawn_destinations(&self, board: &Board, at: Square, result: &mut Vec<Square>) {
        let dir = self.color.pawn_direction();

        let front = at.offset(dir, 0);
        let front_is_free = front.is_some_and(|sq| board.is_empty(sq));
        if let Some(sq) = front.filter(|_| front_is_free) {
            result.push(sq);
        }

        for df in [-1, 1] {
            if let Some(sq) = at.offset(dir, df).filter(|&sq| self.is_opponent(board, sq)) {
                result.push(sq);
            }
        }

        if at.rank() == self.color.pawn_starting_rank() && front_is_free {
            if let Some(sq) = at.offset(2 * dir, 0).filter(|&sq| board.is_empty(sq)) {
                result.push(sq);
            }
        }
    }

    fn step_destinations(
        &self,
        board: &Board,
        at: Square,
        offsets: &[(i32, i32)],
        result: &mut Vec<Square>,
    ) {
        for &(dr, df) in offsets {
            let Some(sq) = at.offset(dr, df) else {
                continue;
            };
            if board.is_empty(sq) || self.is_opponent(board, sq) {
                result.push(sq);
            }
        }
    }

    fn sliding_destinations(
        &self,
        board: &Board,
        at: Square,
        directions: &[(i32, i32)],
        result: &mut Vec<Square>,
    ) {
        for &(dr, df) in directions {
            let mut current = at.offset(dr, df);
            while let Some(sq) = current {
                if !board.is_empty(sq) {
                    if self.is_opponent(board, sq) {
                        result.push(sq);
                    }
                    break;
                }
                result.push(sq);
                current = sq.offset(dr, df);
            }
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).expect("test square")
    }

    fn sorted(mut squares: Vec<Square>) -> Vec<String> {
        squares.sort_by_key(|s| (s.file(), s.rank()));
        squares.iter().map(|s| s.to_string()).collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        let mut v: Vec<Square> = list.iter().map(|s| sq(s)).collect();
        v.sort_by_key(|s| (s.file(), s.rank()));
        v.iter().map(|s| s.to_string()).collect()
    }

    fn lone(piece: Piece, at: &str) -> (Board, Square) {
        let mut board = Board::empty();
        board.place(sq(at), piece);
        (board, sq(at))
    }

    #[test]
    fn knight_in_the_middle_has_eight_destinations() {
        let knight = Piece::new(PieceType::Knight, Color::White);
        let (board, at) = lone(knight, "d4");
        assert_eq!(
            sorted(knight.destinations(&board, at)),
            names(&["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"])
        );
    }

    #[test]
    fn knight_skips_own_pieces_and_takes_opponents() {
        let knight = Piece::new(PieceType::Knight, Color::White);
        let (mut board, at) = lone(knight, "a1");
        board.place(sq("b3"), Piece::new(PieceType::Pawn, Color::White));
        board.place(sq("c2"), Piece::new(PieceType::Pawn, Color::Black));
        assert_eq!(sorted(knight.destinations(&board, at)), names(&["c2"]));
    }

    #[test]
    fn rook_on_empty_board_covers_rank_and_file() {
        let rook = Piece::new(PieceType::Rook, Color::White);
        let (board, at) = lone(rook, "d4");
        let dests = rook.destinations(&board, at);
        assert_eq!(dests.len(), 14);
        assert!(dests.iter().all(|s| s.file() == at.file() || s.rank() == at.rank()));
        assert!(!dests.contains(&at));
    }

    #[test]
    fn rook_ray_stops_on_capture() {
        let rook = Piece::new(PieceType::Rook, Color::White);
        let (mut board, at) = lone(rook, "d4");
        board.place(sq("d7"), Piece::new(PieceType::Pawn, Color::Black));
        let dests = rook.destinations(&board, at);
        for s in ["d5", "d6", "d7"] {
            assert!(dests.contains(&sq(s)), "missing {s}");
        }
        assert!(!dests.contains(&sq("d8")));
        assert_eq!(dests.len(), 13);
    }

    #[test]
    fn bishop_ray_stops_before_own_piece() {
        let bishop = Piece::new(PieceType::Bishop, Color::Black);
        let (mut board, at) = lone(bishop, "c1");
        board.place(sq("e3"), Piece::new(PieceType::Knight, Color::Black));
        assert_eq!(
            sorted(bishop.destinations(&board, at)),
            names(&["a3", "b2", "d2"])
        );
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let queen = Piece::new(PieceType::Queen, Color::White);
        let (board, at) = lone(queen, "d4");
        let dests = queen.destinations(&board, at);
        assert_eq!(dests.len(), 27);
        let mut dedup = dests.clone();
        dedup.sort_by_key(|s| (s.rank(), s.file()));
        dedup.dedup();
        assert_eq!(dedup.len(), dests.len());
    }

    #[test]
    fn king_in_the_corner_has_three_destinations() {
        let king = Piece::new(PieceType::King, Color::White);
        let (board, at) = lone(king, "h1");
        assert_eq!(sorted(king.destinations(&board, at)), names(&["g1", "g2", "h2"]));
    }

    #[test]
    fn pawn_double_step_from_starting_rank() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let (board, at) = lone(pawn, "e2");
        assert_eq!(sorted(pawn.destinations(&board, at)), names(&["e3", "e4"]));
    }

    #[test]
    fn blocked_pawn_has_no_forward_moves() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        for blocker in [Color::White, Color::Black] {
            let (mut board, at) = lone(pawn, "e2");
            board.place(sq("e3"), Piece::new(PieceType::Knight, blocker));
            assert!(pawn.destinations(&board, at).is_empty());
        }
    }

    #[test]
    fn pawn_jump_blocked_on_target_square() {
        let pawn = Piece::new(PieceType::Pawn, Color::Black);
        let (mut board, at) = lone(pawn, "d7");
        board.place(sq("d5"), Piece::new(PieceType::Pawn, Color::White));
        assert_eq!(sorted(pawn.destinations(&board, at)), names(&["d6"]));
    }

    #[test]
    fn pawn_captures_only_occupied_diagonals() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let (mut board, at) = lone(pawn, "e4");
        board.place(sq("d5"), Piece::new(PieceType::Bishop, Color::Black));
        board.place(sq("f5"), Piece::new(PieceType::Bishop, Color::White));
        assert_eq!(sorted(pawn.destinations(&board, at)), names(&["d5", "e5"]));
    }

    #[test]
    fn pawn_on_last_rank_stays_a_pawn_without_moves() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let (board, at) = lone(pawn, "a8");
        assert!(pawn.destinations(&board, at).is_empty());
        assert_eq!(board.piece_at(at).map(|p| p.piece_type()), Some(PieceType::Pawn));
    }

    #[test]
    fn character_rendering_covers_moved_flags() {
        for c in "RNBQKPrnbqkpSsLl".chars() {
            let piece = Piece::from_char(c).expect("alphabet character");
            assert_eq!(piece.to_char(), c);
        }
        assert!(Piece::from_char('-').is_none());
        assert!(Piece::from_char('x').is_none());
        assert!(Piece::from_char('S').is_some_and(|p| p.has_moved()));
        assert!(Piece::from_char('k').is_some_and(|p| !p.has_moved()));
    }

    #[test]
    fn moved_flag_only_sticks_to_rooks_and_kings() {
        let mut pawn = Piece::new(PieceType::Pawn, Color::White);
        pawn.set_has_moved(true);
        assert!(!pawn.has_moved());

        let mut rook = Piece::new(PieceType::Rook, Color::Black);
        rook.set_has_moved(true);
        assert!(rook.has_moved());
        assert_eq!(rook.to_char(), 's');
    }

    #[test]
    fn moving_keeps_type_and_color() {
        let mut king = Piece::from_char('k').expect("black king");
        king.set_has_moved(true);
        assert_eq!(king.piece_type(), PieceType::King);
        assert_eq!(king.color(), Color::Black);
        assert_eq!(king.to_char(), 'l');
    }
}
