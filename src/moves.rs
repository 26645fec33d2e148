use std::fmt;

use serde::{Deserialize, Serialize};

use crate::square::Square;

/// An origin/destination pair. `Move` is `Copy`, so every accessor hands out
/// its own value and nothing holding a move can alias game state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Move {
    origin: Square,
    destination: Square,
}

impl Move {
    pub fn new(origin: Square, destination: Square) -> Self {
        Move {
            origin,
            destination,
        }
    }

    pub fn origin(&self) -> Square {
        self.origin
    }

    pub fn destination(&self) -> Square {
        self.destination
    }

    /// Parse the console form, two squares separated by whitespace: "e2 e4".
    pub fn from_notation(s: &str) -> Option<Move> {
        let mut parts = s.split_whitespace();
        let origin = Square::from_algebraic(parts.next()?)?;
        let destination = Square::from_algebraic(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Move::new(origin, destination))
    }

    /// Convert to compact notation, e.g. "e2e4"
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.origin, self.destination).to_ascii_lowercase()
    }

    /// Parse compact notation
    pub fn from_uci(s: &str) -> Option<Move> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let origin = Square::from_algebraic(&s[0..2])?;
        let destination = Square::from_algebraic(&s[2..4])?;
        Some(Move::new(origin, destination))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.destination)
    }
}
