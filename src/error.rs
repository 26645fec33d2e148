//! Errors raised while building a board from an arrangement string.

/// Why an arrangement string was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrangementError {
    /// The arrangement does not describe exactly 64 cells
    #[error("invalid arrangement: expected 64 cells, got {0}")]
    WrongLength(usize),

    /// Each side needs exactly one king
    #[error("invalid number of kings: {white} white, {black} black")]
    InvalidNumberOfKings { white: usize, black: usize },
}

impl ArrangementError {
    pub fn is_king_count(&self) -> bool {
        matches!(self, ArrangementError::InvalidNumberOfKings { .. })
    }
}
