use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered run of cards. Which end counts as the top depends on the role:
/// stock and waste read from the front, tableau and foundations from the back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: VecDeque<Card>,
}

impl Pile {
    pub const fn new() -> Self {
        Self {
            cards: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn front(&self) -> Option<&Card> {
        self.cards.front()
    }

    pub fn back(&self) -> Option<&Card> {
        self.cards.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Card> + ExactSizeIterator {
        self.cards.iter()
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    pub fn push_front(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    pub fn push_back(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn pop_front(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    pub fn remove(&mut self, index: usize) -> Option<Card> {
        self.cards.remove(index)
    }

    /// Detaches `index..` into a new pile, keeping order.
    pub fn split_off(&mut self, index: usize) -> Pile {
        Self {
            cards: self.cards.split_off(index),
        }
    }

    /// Moves every card of `other` onto the back of this pile, leaving `other` empty.
    pub fn append(&mut self, other: &mut Pile) {
        self.cards.append(&mut other.cards);
    }

    /// Turns the back card face-up, returns whether anything flipped.
    pub fn expose_back(&mut self) -> bool {
        match self.cards.back_mut() {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        for card in self.cards.iter_mut() {
            card.face_up = face_up;
        }
    }

    /// Index of the first card of the face-up run at the back.
    pub fn face_up_start(&self) -> usize {
        self.cards
            .iter()
            .rposition(|card| !card.face_up)
            .map_or(0, |index| index + 1)
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Card>> for Pile {
    fn from(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = alloc::collections::vec_deque::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// A suit's destination pile, built from Ace up to King.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foundation {
    pub suit: Suit,
    pub pile: Pile,
}

impl Foundation {
    pub const fn new(suit: Suit) -> Self {
        Self {
            suit,
            pile: Pile::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.pile.back()
    }

    pub fn is_complete(&self) -> bool {
        self.pile.len() == RANK_COUNT
    }

    /// Whether the pile reads `A, 2, 3, ...` of its own suit from the bottom.
    pub fn is_ordered(&self) -> bool {
        self.pile.iter().enumerate().all(|(position, card)| {
            card.suit == self.suit && usize::from(card.rank.index()) == position
        })
    }
}

/// Where a card currently sits. Resolved once per move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardLocation {
    Stock(usize),
    Waste(usize),
    Tableau { column: Column, index: usize },
    Foundation { suit: Suit, index: usize },
}
