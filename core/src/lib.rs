#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use history::*;
pub use pile::*;
pub use rules::*;
pub use types::*;

mod board;
mod card;
mod deck;
mod engine;
mod error;
mod history;
mod pile;
mod rules;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// How many state-changing operations can be undone.
    pub history_depth: usize,
}

impl GameConfig {
    pub const fn new_unchecked(history_depth: usize) -> Self {
        Self { history_depth }
    }

    pub fn new(history_depth: usize) -> Self {
        Self::new_unchecked(history_depth.clamp(1, MAX_HISTORY_DEPTH))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_HISTORY_DEPTH)
    }
}

/// Why a move left the board untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// No pile holds the card.
    CardNotFound,
    /// Card is face-down and cannot be picked up.
    FaceDown,
    /// Card is buried in the stock, under the waste top or under a foundation top.
    NotMovable,
    /// Only the top card of a column can go to a foundation.
    NotOnTop,
    /// Dropped back onto the pile it came from.
    SamePile,
    /// Empty column and the card is not a King.
    NeedsKing,
    /// Card is not one rank below and opposite in colour to the column top.
    DoesNotFit,
    /// Foundation belongs to another suit.
    WrongSuit,
    /// Foundation is not waiting for this rank.
    OutOfSequence,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Rejected(Rejection),
    Moved,
    /// The move completed the last foundation.
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            Rejected(_) => false,
            Moved => true,
            Won => true,
        }
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// Both stock and waste are empty.
    NoChange,
    Drawn,
    /// Stock was empty and the waste went back into it.
    Recycled,
}

impl DrawOutcome {
    pub const fn has_update(self) -> bool {
        use DrawOutcome::*;
        match self {
            NoChange => false,
            Drawn => true,
            Recycled => true,
        }
    }
}
