use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_RANKS: usize = 8;
pub const BOARD_FILES: usize = 8;

/// A square on the board.
///
/// Rank 0 is the back rank nearest Black (rank "8" in algebraic notation),
/// file 0 is the A-file. A `Square` is always on the board: every constructor
/// returns `None` rather than an out-of-range value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(rank: usize, file: usize) -> Option<Square> {
        if rank < BOARD_RANKS && file < BOARD_FILES {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Like [`Square::new`] but accepts signed coordinates, so callers can
    /// step off the edge and get `None` back.
    pub fn from_coords(rank: i32, file: i32) -> Option<Square> {
        if rank < 0 || file < 0 {
            return None;
        }
        Square::new(rank as usize, file as usize)
    }

    /// Parse two-character algebraic notation, e.g. "e2" or "E2".
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let (f, r) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f.to_ascii_lowercase(), r),
            _ => return None,
        };
        if !('a'..='h').contains(&f) || !('1'..='8').contains(&r) {
            return None;
        }
        let file = f as usize - 'a' as usize;
        let rank = BOARD_RANKS - (r as usize - '0' as usize);
        Square::new(rank, file)
    }

    pub fn rank(self) -> usize {
        self.rank as usize
    }

    pub fn file(self) -> usize {
        self.file as usize
    }

    pub fn offset(self, d_rank: i32, d_file: i32) -> Option<Square> {
        Square::from_coords(self.rank as i32 + d_rank, self.file as i32 + d_file)
    }

    pub fn to_algebraic(self) -> String {
        let f = (b'A' + self.file) as char;
        let r = (b'0' + (BOARD_RANKS as u8 - self.rank)) as char;
        format!("{f}{r}")
    }

    /// All 64 squares in row-major order, rank 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_RANKS).flat_map(|rank| {
            (0..BOARD_FILES).map(move |file| Square {
                rank: rank as u8,
                file: file as u8,
            })
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}
