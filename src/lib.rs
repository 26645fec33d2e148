pub mod board;
pub mod catalogue;
pub mod console;
pub mod engine;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
pub mod puzzle;
pub mod render;
pub mod square;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::Board;
pub use error::ArrangementError;
pub use game::Game;
pub use moves::Move;
pub use piece::{Color, Piece, PieceType};
pub use square::Square;
