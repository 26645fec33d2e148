use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ArrangementError;
use crate::game::Game;
use crate::piece::Color;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("malformed puzzle: {0}")]
    Malformed(String),

    #[error(transparent)]
    Arrangement(#[from] ArrangementError),
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unspecified,
}

impl Difficulty {
    fn token(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Unspecified => "UNSPECIFIED",
        }
    }

    fn from_token(s: &str) -> Option<Self> {
        match s {
            "EASY" => Some(Difficulty::Easy),
            "MEDIUM" => Some(Difficulty::Medium),
            "HARD" => Some(Difficulty::Hard),
            "UNSPECIFIED" => Some(Difficulty::Unspecified),
            _ => None,
        }
    }
}

fn turn_token(color: Color) -> &'static str {
    match color {
        Color::White => "WHITE",
        Color::Black => "BLACK",
    }
}

fn turn_from_token(s: &str) -> Option<Color> {
    match s {
        "WHITE" => Some(Color::White),
        "BLACK" => Some(Color::Black),
        _ => None,
    }
}

/// A starting position with a side to move, a difficulty rating and a
/// free-text description. Two puzzles are equal when they set up the same
/// game at the same difficulty; the description does not take part.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Puzzle {
    arrangement: String,
    turn: Color,
    difficulty: Difficulty,
    description: String,
}

impl Puzzle {
    /// Parse a catalogue record. `details` has the form
    /// `arrangement,TURN,DIFFICULTY`, e.g. `...,WHITE,EASY`.
    pub fn parse(details: &str, description: &str) -> Result<Self, PuzzleError> {
        let fields: Vec<&str> = details.trim_end_matches('\r').split(',').collect();
        let &[arrangement, turn, difficulty] = fields.as_slice() else {
            return Err(PuzzleError::Malformed(format!(
                "expected 3 comma-separated fields, got {}",
                fields.len()
            )));
        };

        Board::verify_arrangement(arrangement)?;
        let turn = turn_from_token(turn)
            .ok_or_else(|| PuzzleError::Malformed(format!("unknown turn {turn:?}")))?;
        let difficulty = Difficulty::from_token(difficulty)
            .ok_or_else(|| PuzzleError::Malformed(format!("unknown difficulty {difficulty:?}")))?;

        Ok(Puzzle {
            arrangement: arrangement.to_string(),
            turn,
            difficulty,
            description: description.trim_end_matches('\r').to_string(),
        })
    }

    pub fn arrangement(&self) -> &str {
        &self.arrangement
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> String {
        format!(
            "{},{},{}",
            self.arrangement,
            turn_token(self.turn),
            self.difficulty.token()
        )
    }

    pub fn to_game(&self) -> Result<Game, ArrangementError> {
        Game::from_arrangement(&self.arrangement, self.turn)
    }

    fn turn_order(&self) -> u8 {
        match self.turn {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl PartialEq for Puzzle {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Puzzle {}

impl PartialOrd for Puzzle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Difficulty first, then White-to-move before Black-to-move, then the
/// arrangement text.
impl Ord for Puzzle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.difficulty
            .cmp(&other.difficulty)
            .then(self.turn_order().cmp(&other.turn_order()))
            .then_with(|| self.arrangement.cmp(&other.arrangement))
    }
}

/// The two-line catalogue record: details, then the description.
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.details(), self.description)
    }
}
