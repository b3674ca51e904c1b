use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every pile of a game. Cloning a board gives a fully independent copy, which
/// is what undo history stores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub tableau: [Pile; TABLEAU_COLUMNS],
    pub stock: Pile,
    pub waste: Pile,
    pub foundations: [Foundation; SUIT_COUNT],
}

impl Board {
    /// No cards anywhere, foundations assigned in [`Suit::ALL`] order.
    pub fn empty() -> Self {
        Self {
            tableau: Default::default(),
            stock: Pile::new(),
            waste: Pile::new(),
            foundations: Suit::ALL.map(Foundation::new),
        }
    }

    /// Lays out a full deck: column `n` gets `n + 1` cards with only the last
    /// face-up, the rest becomes the stock.
    pub fn deal(deck: Vec<Card>) -> Result<Self> {
        if deck.len() != DECK_SIZE || !is_complete_deck(&deck) {
            return Err(GameError::InvalidDeck);
        }
        Ok(Self::lay_out(deck))
    }

    pub(crate) fn lay_out(deck: Vec<Card>) -> Self {
        let mut board = Self::empty();
        let mut cards = deck.into_iter();
        for (column, pile) in board.tableau.iter_mut().enumerate() {
            for (row, card) in cards.by_ref().take(column + 1).enumerate() {
                pile.push_back(Card {
                    face_up: row == column,
                    ..card
                });
            }
        }
        board.stock = cards.map(|card| Card { face_up: false, ..card }).collect();
        board
    }

    pub fn column(&self, column: Column) -> Result<&Pile> {
        self.tableau.get(column).ok_or(GameError::InvalidColumn(column))
    }

    pub fn foundation(&self, suit: Suit) -> &Foundation {
        &self.foundations[suit.index()]
    }

    pub(crate) fn foundation_mut(&mut self, suit: Suit) -> &mut Foundation {
        &mut self.foundations[suit.index()]
    }

    pub fn iter_cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.tableau.iter().flat_map(|pile| pile.iter()))
            .chain(self.foundations.iter().flat_map(|f| f.pile.iter()))
    }

    pub fn card_count(&self) -> usize {
        self.stock.len()
            + self.waste.len()
            + self.tableau.iter().map(Pile::len).sum::<usize>()
            + self.foundations.iter().map(Foundation::len).sum::<usize>()
    }

    pub fn locate(&self, id: CardId) -> Option<CardLocation> {
        if let Some(index) = self.waste.position(id) {
            return Some(CardLocation::Waste(index));
        }
        for (column, pile) in self.tableau.iter().enumerate() {
            if let Some(index) = pile.position(id) {
                return Some(CardLocation::Tableau { column, index });
            }
        }
        for foundation in &self.foundations {
            if let Some(index) = foundation.pile.position(id) {
                return Some(CardLocation::Foundation {
                    suit: foundation.suit,
                    index,
                });
            }
        }
        self.stock.position(id).map(CardLocation::Stock)
    }

    pub fn card_at(&self, location: CardLocation) -> Option<&Card> {
        match location {
            CardLocation::Stock(index) => self.stock.get(index),
            CardLocation::Waste(index) => self.waste.get(index),
            CardLocation::Tableau { column, index } => self.tableau.get(column)?.get(index),
            CardLocation::Foundation { suit, index } => self.foundation(suit).pile.get(index),
        }
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(Foundation::is_complete)
    }

    /// Checks every pile invariant: one copy of each card, stock face-down,
    /// waste and foundations face-up, foundations ordered, and each column a
    /// face-down prefix under a legal face-up run with a visible top.
    pub fn validate(&self) -> Result<()> {
        let cards: Vec<Card> = self.iter_cards().copied().collect();
        if !is_complete_deck(&cards) {
            log::warn!("Board holds {} cards, not a complete deck", cards.len());
            return Err(GameError::InvalidBoard);
        }

        if self.stock.iter().any(|card| card.face_up) || self.waste.iter().any(|card| !card.face_up) {
            log::warn!("Stock or waste card on the wrong side");
            return Err(GameError::InvalidBoard);
        }

        for (expected, foundation) in Suit::ALL.iter().zip(&self.foundations) {
            if foundation.suit != *expected
                || !foundation.is_ordered()
                || foundation.pile.iter().any(|card| !card.face_up)
            {
                log::warn!("Foundation {:?} is out of order", foundation.suit);
                return Err(GameError::InvalidBoard);
            }
        }

        for (column, pile) in self.tableau.iter().enumerate() {
            let start = pile.face_up_start();
            let top_hidden = pile.back().is_some_and(|card| !card.face_up);
            if top_hidden || !is_valid_run(pile.iter().skip(start)) {
                log::warn!("Tableau column {} is not a legal layout", column);
                return Err(GameError::InvalidBoard);
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
