use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// All 52 cards, face-down, suit by suit from Ace to King.
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Fisher-Yates: walk down from the last slot, swapping each with a uniform
/// pick from the slots at or below it.
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}

pub fn create_shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = create_deck();
    shuffle(&mut deck, rng);
    deck
}

/// Deterministic deal for a given seed.
pub fn create_seeded_deck(seed: u64) -> Vec<Card> {
    let mut rng = SmallRng::seed_from_u64(seed);
    create_shuffled_deck(&mut rng)
}

/// Whether `cards` is exactly one copy of every card of the deck.
pub fn is_complete_deck(cards: &[Card]) -> bool {
    let mut seen = [false; DECK_SIZE];
    for card in cards {
        let id = usize::from(card.id.get());
        if id >= DECK_SIZE || seen[id] || card.id != CardId::new(card.suit, card.rank) {
            return false;
        }
        seen[id] = true;
    }
    seen.iter().all(|&present| present)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_every_card_once_face_down() {
        let deck = create_deck();

        assert_eq!(deck.len(), DECK_SIZE);
        assert!(is_complete_deck(&deck));
        assert!(deck.iter().all(|card| !card.face_up));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let deck = create_seeded_deck(7);

        assert!(is_complete_deck(&deck));
        assert_ne!(deck, create_deck());
    }

    #[test]
    fn same_seed_same_order() {
        assert_eq!(create_seeded_deck(42), create_seeded_deck(42));
        assert_ne!(create_seeded_deck(42), create_seeded_deck(43));
    }

    #[test]
    fn shuffle_spreads_every_card_over_every_slot() {
        // 52 * 52 slot counts over 4000 deals, each should be hit at least once
        let mut hits = [[0u16; DECK_SIZE]; DECK_SIZE];
        let mut rng = SmallRng::seed_from_u64(1234);
        for _ in 0..4000 {
            let deck = create_shuffled_deck(&mut rng);
            for (slot, card) in deck.iter().enumerate() {
                hits[usize::from(card.id.get())][slot] += 1;
            }
        }

        assert!(hits.iter().flatten().all(|&count| count > 0));
    }

    #[test]
    fn incomplete_or_duplicated_decks_are_detected() {
        let mut deck = create_deck();
        deck.pop();
        assert!(!is_complete_deck(&deck));

        deck.push(deck[0]);
        assert!(!is_complete_deck(&deck));
    }
}
