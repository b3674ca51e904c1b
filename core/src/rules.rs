//! Placement predicates. Pure functions over cards and piles, the engine
//! decides what to do with the answer.

use crate::*;

pub const fn rank_index(rank: Rank) -> u8 {
    rank.index()
}

pub const fn is_red(suit: Suit) -> bool {
    suit.is_red()
}

/// `moving` goes directly on top of `target`: one rank lower, opposite colour.
pub const fn can_place_on_tableau(moving: &Card, target: &Card) -> bool {
    rank_index(moving.rank) + 1 == rank_index(target.rank)
        && is_red(moving.suit) != is_red(target.suit)
}

/// An empty column only takes a King as its base card.
pub const fn can_place_on_empty_tableau(moving: &Card) -> bool {
    moving.is_king()
}

/// Same suit, and the foundation already holds exactly the ranks below `moving`.
pub fn can_place_on_foundation(moving: &Card, foundation: &Foundation) -> bool {
    moving.suit == foundation.suit && foundation.len() == usize::from(rank_index(moving.rank))
}

/// Whether `cards` is a run that may sit in a column: each card one rank
/// below and opposite in colour to the one under it.
pub fn is_valid_run<'a>(cards: impl IntoIterator<Item = &'a Card>) -> bool {
    let mut below: Option<&Card> = None;
    for card in cards {
        if let Some(below) = below {
            if !can_place_on_tableau(card, below) {
                return false;
            }
        }
        below = Some(card);
    }
    true
}
