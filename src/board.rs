use serde::{Deserialize, Serialize};

use crate::error::ArrangementError;
use crate::piece::{Color, Piece, PieceType};
use crate::square::{Square, BOARD_FILES, BOARD_RANKS};

/// Row-major, rank 0 (Black's back rank) first.
pub const STANDARD_ARRANGEMENT: &str = concat!(
    "rnbqkbnr",
    "pppppppp",
    "--------",
    "--------",
    "--------",
    "--------",
    "PPPPPPPP",
    "RNBQKBNR",
);

const EMPTY_MARKER: char = '-';

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_FILES]; BOARD_RANKS],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; BOARD_FILES]; BOARD_RANKS],
        }
    }

    pub fn standard() -> Self {
        Self::decode(STANDARD_ARRANGEMENT)
    }

    /// Check an arrangement without building a board: length first, then the
    /// king count. Characters outside the alphabet are not errors; they
    /// decode to empty cells.
    pub fn verify_arrangement(s: &str) -> Result<(), ArrangementError> {
        let len = s.chars().count();
        if len != BOARD_RANKS * BOARD_FILES {
            return Err(ArrangementError::WrongLength(len));
        }

        let white = s.chars().filter(|&c| c == 'K' || c == 'L').count();
        let black = s.chars().filter(|&c| c == 'k' || c == 'l').count();
        if white != 1 || black != 1 {
            return Err(ArrangementError::InvalidNumberOfKings { white, black });
        }

        Ok(())
    }

    pub fn from_arrangement(s: &str) -> Result<Self, ArrangementError> {
        Self::verify_arrangement(s)?;
        Ok(Self::decode(s))
    }

    fn decode(s: &str) -> Self {
        let mut board = Board::empty();
        for (sq, c) in Square::all().zip(s.chars()) {
            board.squares[sq.rank()][sq.file()] = Piece::from_char(c);
        }
        board
    }

    pub fn to_arrangement(&self) -> String {
        Square::all()
            .map(|sq| self.piece_at(sq).map_or(EMPTY_MARKER, |p| p.to_char()))
            .collect()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank()][sq.file()]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Put `piece` on `sq`, returning whatever was there before.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.rank()][sq.file()].replace(piece)
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank()][sq.file()].take()
    }

    /// Every occupied square with its piece, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.piece_type() == PieceType::King && p.color() == color)
            .map(|(sq, _)| sq)
    }

    /// Pseudo-legal destinations of the piece on `sq`, or `None` if the
    /// square is empty.
    pub fn destinations_from(&self, sq: Square) -> Option<Vec<Square>> {
        self.piece_at(sq).map(|p| p.destinations(self, sq))
    }

    /// Union of the pseudo-legal destinations of every `color` piece, without
    /// duplicates, in first-seen order.
    pub fn all_destinations_by_color(&self, color: Color) -> Vec<Square> {
        let mut seen = [[false; BOARD_FILES]; BOARD_RANKS];
        let mut result = Vec::new();
        for (sq, piece) in self.pieces().filter(|(_, p)| p.color() == color) {
            for dest in piece.destinations(self, sq) {
                let mark = &mut seen[dest.rank()][dest.file()];
                if !*mark {
                    *mark = true;
                    result.push(dest);
                }
            }
        }
        result
    }

    /// Whether any `color.opposite()` piece can reach the `color` king. A board
    /// without that king is never in check.
    pub fn king_under_attack(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => self
                .all_destinations_by_color(color.opposite())
                .contains(&king),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).expect("test square")
    }

    fn kings_only() -> Board {
        let mut board = Board::empty();
        board.place(sq("e1"), Piece::new(PieceType::King, Color::White));
        board.place(sq("e8"), Piece::new(PieceType::King, Color::Black));
        board
    }

    #[test]
    fn standard_layout_matches_every_square() {
        let board = Board::standard();
        let back = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for sq in Square::all() {
            let expected = match sq.rank() {
                0 => Some(Piece::new(back[sq.file()], Color::Black)),
                1 => Some(Piece::new(PieceType::Pawn, Color::Black)),
                6 => Some(Piece::new(PieceType::Pawn, Color::White)),
                7 => Some(Piece::new(back[sq.file()], Color::White)),
                _ => None,
            };
            assert_eq!(board.piece_at(sq), expected, "mismatch on {sq}");
        }
        assert_eq!(board.to_arrangement(), STANDARD_ARRANGEMENT);
    }

    #[test]
    fn wrong_length_is_reported_before_kings() {
        let short = &STANDARD_ARRANGEMENT[..63];
        assert_eq!(Board::from_arrangement(short), Err(ArrangementError::WrongLength(63)));
        let long = format!("{STANDARD_ARRANGEMENT}-");
        assert_eq!(Board::from_arrangement(&long), Err(ArrangementError::WrongLength(65)));
        assert_eq!(Board::from_arrangement(""), Err(ArrangementError::WrongLength(0)));
    }

    #[test]
    fn king_count_is_checked_for_both_colors() {
        let no_white_king = STANDARD_ARRANGEMENT.replace('K', "Q");
        let err = Board::from_arrangement(&no_white_king).unwrap_err();
        assert!(err.is_king_count());
        assert_eq!(err, ArrangementError::InvalidNumberOfKings { white: 0, black: 1 });

        let two_white_kings = STANDARD_ARRANGEMENT.replacen('Q', "L", 1);
        assert_eq!(
            Board::from_arrangement(&two_white_kings),
            Err(ArrangementError::InvalidNumberOfKings { white: 2, black: 1 })
        );

        let two_black_kings = STANDARD_ARRANGEMENT.replacen('q', "k", 1);
        assert!(Board::from_arrangement(&two_black_kings).unwrap_err().is_king_count());
    }

    #[test]
    fn unknown_characters_decode_to_empty_cells() {
        // 'x' replaces the c7 pawn at cell 10.
        let mut cells: Vec<char> = STANDARD_ARRANGEMENT.chars().collect();
        cells[10] = 'x';
        let arrangement: String = cells.into_iter().collect();

        let board = Board::from_arrangement(&arrangement).expect("unknown cells are tolerated");
        assert!(board.is_empty(sq("c7")));
        assert_eq!(board.to_arrangement(), arrangement.replace('x', "-"));
        assert_eq!(board.piece_at(sq("d7")).map(|p| p.piece_type()), Some(PieceType::Pawn));
    }

    #[test]
    fn moved_markers_survive_the_round_trip() {
        let arrangement = concat!(
            "s---l---",
            "--------",
            "--------",
            "--------",
            "--------",
            "--------",
            "--------",
            "R---L---",
        );
        let board = Board::from_arrangement(arrangement).expect("valid arrangement");
        assert!(board.piece_at(sq("a8")).is_some_and(|p| p.has_moved()));
        assert!(board.piece_at(sq("a1")).is_some_and(|p| !p.has_moved()));
        assert!(board.piece_at(sq("e1")).is_some_and(|p| p.has_moved()));
        assert_eq!(board.to_arrangement(), arrangement);
    }

    #[test]
    fn all_destinations_has_no_duplicates() {
        let mut board = kings_only();
        // Both rooks reach d4 and every square between them.
        board.place(sq("a4"), Piece::new(PieceType::Rook, Color::White));
        board.place(sq("h4"), Piece::new(PieceType::Rook, Color::White));
        let all = board.all_destinations_by_color(Color::White);
        let mut dedup = all.clone();
        dedup.sort_by_key(|s| (s.rank(), s.file()));
        dedup.dedup();
        assert_eq!(dedup.len(), all.len());
        assert!(all.contains(&sq("d4")));
    }

    #[test]
    fn standard_position_mobility() {
        let board = Board::standard();
        // Pawn pushes cover ranks 3 and 4, knights add nothing new.
        assert_eq!(board.all_destinations_by_color(Color::White).len(), 16);
        assert_eq!(board.all_destinations_by_color(Color::Black).len(), 16);
    }

    #[test]
    fn rook_on_open_file_attacks_king() {
        let mut board = kings_only();
        board.place(sq("e5"), Piece::new(PieceType::Rook, Color::Black));
        assert!(board.king_under_attack(Color::White));
        assert!(!board.king_under_attack(Color::Black));

        board.place(sq("e3"), Piece::new(PieceType::Pawn, Color::White));
        assert!(!board.king_under_attack(Color::White));
    }

    #[test]
    fn pawn_attacks_only_diagonally_occupied() {
        let mut board = kings_only();
        // A black pawn on d2 can capture e1 diagonally.
        board.place(sq("d2"), Piece::new(PieceType::Pawn, Color::Black));
        assert!(board.king_under_attack(Color::White));
    }

    #[test]
    fn missing_king_is_never_attacked() {
        let mut board = Board::empty();
        board.place(sq("a1"), Piece::new(PieceType::Queen, Color::Black));
        assert!(!board.king_under_attack(Color::White));
    }

    #[test]
    fn empty_square_has_no_destinations() {
        let board = Board::standard();
        assert!(board.destinations_from(sq("e4")).is_none());
        assert_eq!(board.destinations_from(sq("e2")).map(|d| d.len()), Some(2));
        assert_eq!(board.destinations_from(sq("e1")).map(|d| d.len()), Some(0));
    }
}
