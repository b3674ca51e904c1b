use thiserror::Error;

use crate::*;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid tableau column {0}")]
    InvalidColumn(Column),
    #[error("Deck must hold 52 distinct cards")]
    InvalidDeck,
    #[error("Board breaks a pile invariant")]
    InvalidBoard,
    #[error("No more moves to undo")]
    NothingToUndo,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
