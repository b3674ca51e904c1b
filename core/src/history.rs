use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Bounded stack of board snapshots. Once full, saving drops the oldest entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: VecDeque<Board>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_DEPTH);
        Self {
            snapshots: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Stores a deep copy of `board`.
    pub fn save(&mut self, board: &Board) {
        self.push(board.clone());
    }

    pub fn push(&mut self, snapshot: Board) {
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            log::trace!("History full, dropped oldest snapshot");
        }
    }

    /// Most recent snapshot, removed from the stack.
    pub fn undo(&mut self) -> Option<Board> {
        self.snapshots.pop_back()
    }

    pub fn peek(&self) -> Option<&Board> {
        self.snapshots.back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Boards told apart by how many cards sit in the waste.
    fn marked(mark: usize) -> Board {
        let mut board = Board::empty();
        for card in create_deck().into_iter().take(mark) {
            board.waste.push_back(card.face_up());
        }
        board
    }

    #[test]
    fn undo_pops_in_reverse_order() {
        let mut history = History::default();
        history.save(&marked(1));
        history.save(&marked(2));

        assert_eq!(history.undo(), Some(marked(2)));
        assert_eq!(history.undo(), Some(marked(1)));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn keeps_only_the_most_recent_ten() {
        let mut history = History::default();
        for mark in 0..15 {
            history.save(&marked(mark));
        }

        assert_eq!(history.len(), DEFAULT_HISTORY_DEPTH);
        let restored: Vec<usize> = core::iter::from_fn(|| history.undo())
            .map(|board| board.waste.len())
            .collect();
        assert_eq!(restored, (5..15).rev().collect::<Vec<_>>());
    }

    #[test]
    fn saved_snapshot_is_independent_of_the_live_board() {
        let mut history = History::default();
        let mut live = marked(3);
        history.save(&live);

        live.waste.pop_front();
        if let Some(card) = live.waste.pop_front() {
            live.stock.push_back(Card { face_up: false, ..card });
        }

        assert_eq!(history.peek(), Some(&marked(3)));
    }

    #[test]
    fn clear_forgets_every_snapshot() {
        let mut history = History::new(3);
        history.save(&marked(1));
        history.save(&marked(2));

        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.undo(), None);
        assert_eq!(history.capacity(), 3);
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(History::new(0).capacity(), 1);
        assert_eq!(History::new(usize::MAX).capacity(), MAX_HISTORY_DEPTH);
    }
}
