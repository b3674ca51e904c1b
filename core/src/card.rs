use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// Foundation order, also the order the deck is built in.
    pub const ALL: [Suit; SUIT_COUNT] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn index(self) -> usize {
        match self {
            Self::Hearts => 0,
            Self::Diamonds => 1,
            Self::Clubs => 2,
            Self::Spades => 3,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Hearts | Self::Diamonds => Color::Red,
            Self::Clubs | Self::Spades => Color::Black,
        }
    }

    pub const fn is_red(self) -> bool {
        matches!(self.color(), Color::Red)
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
            Self::Spades => '♠',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; RANK_COUNT] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Zero based position within `A..=K`.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// Identity of a card within one deck, stable across moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(u8);

impl CardId {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self(suit.index() as u8 * RANK_COUNT as u8 + rank.index())
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
    pub id: CardId,
}

impl Card {
    /// A face-down card, the way every card leaves the deck builder.
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
            id: CardId::new(suit, rank),
        }
    }

    pub const fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    pub const fn is_red(&self) -> bool {
        self.suit.is_red()
    }

    pub const fn is_king(&self) -> bool {
        matches!(self.rank, Rank::King)
    }

    pub const fn symbol(&self) -> char {
        self.suit.symbol()
    }
}

impl fmt::Display for Card {
    /// Formats as `10♥`, regardless of which side is showing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
