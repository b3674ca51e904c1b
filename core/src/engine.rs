use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// A Klondike game: the board, the undo history and whether it has been won.
///
/// Every mutating call snapshots the board first and commits the snapshot to
/// history only when the board actually changed, so a rejected move never
/// costs an undo step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    history: History,
    state: EngineState,
    config: GameConfig,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_config(GameConfig::default(), rng)
    }

    pub fn with_config<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let board = Board::lay_out(create_shuffled_deck(rng));
        Self::from_parts(board, config)
    }

    pub fn from_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::new(&mut rng)
    }

    /// Deals `deck` in the given order instead of shuffling.
    pub fn from_deck(deck: Vec<Card>) -> Result<Self> {
        Ok(Self::from_parts(Board::deal(deck)?, GameConfig::default()))
    }

    /// Resumes from an arbitrary layout, provided it keeps every pile invariant.
    pub fn from_board(board: Board) -> Result<Self> {
        Self::from_board_with_config(board, GameConfig::default())
    }

    pub fn from_board_with_config(board: Board, config: GameConfig) -> Result<Self> {
        board.validate()?;
        Ok(Self::from_parts(board, config))
    }

    fn from_parts(board: Board, config: GameConfig) -> Self {
        let state = if board.is_won() {
            EngineState::Won
        } else {
            EngineState::Playing
        };
        Self {
            board,
            history: History::new(config.history_depth),
            state,
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tableau(&self) -> &[Pile; TABLEAU_COLUMNS] {
        &self.board.tableau
    }

    pub fn stock(&self) -> &Pile {
        &self.board.stock
    }

    pub fn waste(&self) -> &Pile {
        &self.board.waste
    }

    pub fn foundations(&self) -> &[Foundation; SUIT_COUNT] {
        &self.board.foundations
    }

    pub fn foundation(&self, suit: Suit) -> &Foundation {
        self.board.foundation(suit)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether all four foundations are complete.
    pub fn check_win_condition(&self) -> bool {
        self.board.is_won()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn locate(&self, card: CardId) -> Option<CardLocation> {
        self.board.locate(card)
    }

    /// The cards that travel together when `card` is picked up, bottom first.
    /// `None` when the card cannot be picked up at all.
    pub fn movable_run(&self, card: CardId) -> Option<Vec<Card>> {
        let location = self.board.locate(card)?;
        self.check_source(location).ok()?;
        Some(match location {
            CardLocation::Tableau { column, index } => {
                self.board.tableau[column].iter().skip(index).copied().collect()
            }
            _ => self.board.card_at(location).copied().into_iter().collect(),
        })
    }

    /// Turns the front of the stock over onto the front of the waste. With an
    /// empty stock the waste goes back, face-down and in the same order.
    pub fn draw_from_stock(&mut self) -> Result<DrawOutcome> {
        self.check_not_finished()?;

        let snapshot = self.board.clone();
        let board = &mut self.board;
        let outcome = if let Some(card) = board.stock.pop_front() {
            log::trace!("Draw {} from stock", card);
            board.waste.push_front(card.face_up());
            DrawOutcome::Drawn
        } else if !board.waste.is_empty() {
            log::debug!("Recycle {} waste cards into stock", board.waste.len());
            board.stock = core::mem::take(&mut board.waste);
            board.stock.set_face_up(false);
            DrawOutcome::Recycled
        } else {
            DrawOutcome::NoChange
        };

        self.commit(snapshot, outcome.has_update());
        Ok(outcome)
    }

    /// Drops `card` (and for tableau sources the run above it) on `column`.
    pub fn move_to_tableau(&mut self, card: CardId, column: Column) -> Result<MoveOutcome> {
        self.check_not_finished()?;
        self.board.column(column)?;

        let snapshot = self.board.clone();
        let outcome = self.apply_move_to_tableau(card, column);
        self.commit(snapshot, outcome.has_update());
        Ok(outcome)
    }

    /// Drops the single card `card` on the foundation of `suit`.
    pub fn move_to_foundation(&mut self, card: CardId, suit: Suit) -> Result<MoveOutcome> {
        self.check_not_finished()?;

        let snapshot = self.board.clone();
        let outcome = self.apply_move_to_foundation(card, suit, false);
        self.commit(snapshot, outcome.has_update());
        Ok(outcome)
    }

    /// Sends `card` from the waste or a column to its own foundation.
    pub fn auto_move_to_foundation(&mut self, card: CardId) -> Result<MoveOutcome> {
        self.check_not_finished()?;

        let suit = match self.board.locate(card).and_then(|at| self.board.card_at(at)) {
            Some(found) => found.suit,
            None => {
                log::debug!("Auto-move of {}: card not found", card);
                return Ok(MoveOutcome::Rejected(Rejection::CardNotFound));
            }
        };

        let snapshot = self.board.clone();
        let outcome = self.apply_move_to_foundation(card, suit, true);
        self.commit(snapshot, outcome.has_update());
        Ok(outcome)
    }

    /// Restores the board as it was before the last state-changing operation.
    /// Undoing the winning move puts the game back into play.
    pub fn undo(&mut self) -> Result<()> {
        let previous = self.history.undo().ok_or(GameError::NothingToUndo)?;
        log::debug!("Undo, {} steps left", self.history.len());
        self.board = previous;
        if !self.board.is_won() {
            self.state = EngineState::Playing;
        }
        Ok(())
    }

    fn apply_move_to_tableau(&mut self, card: CardId, column: Column) -> MoveOutcome {
        use MoveOutcome::*;

        let Some(location) = self.board.locate(card) else {
            log::debug!("Move of {} to column {}: card not found", card, column);
            return Rejected(Rejection::CardNotFound);
        };
        if let Err(reason) = self.check_source(location) {
            log::debug!("Move of {} to column {}: {:?}", card, column, reason);
            return Rejected(reason);
        }
        if matches!(location, CardLocation::Tableau { column: source, .. } if source == column) {
            return Rejected(Rejection::SamePile);
        }

        let Some(&moving) = self.board.card_at(location) else {
            return Rejected(Rejection::CardNotFound);
        };
        let target = &self.board.tableau[column];
        let fits = match target.back() {
            None => can_place_on_empty_tableau(&moving),
            Some(top) => can_place_on_tableau(&moving, top),
        };
        if !fits {
            let reason = if target.is_empty() {
                Rejection::NeedsKing
            } else {
                Rejection::DoesNotFit
            };
            log::debug!("Move of {} to column {}: {:?}", moving, column, reason);
            return Rejected(reason);
        }

        let mut run = self.detach(location);
        log::trace!("Move {} cards from {:?} to column {}", run.len(), location, column);
        self.board.tableau[column].append(&mut run);
        Moved
    }

    fn apply_move_to_foundation(&mut self, card: CardId, suit: Suit, auto: bool) -> MoveOutcome {
        use MoveOutcome::*;

        let Some(location) = self.board.locate(card) else {
            log::debug!("Move of {} to {:?} foundation: card not found", card, suit);
            return Rejected(Rejection::CardNotFound);
        };
        let Some(&moving) = self.board.card_at(location) else {
            return Rejected(Rejection::CardNotFound);
        };

        let source_check = match location {
            CardLocation::Foundation { .. } if auto => Err(Rejection::SamePile),
            CardLocation::Foundation { suit: source, .. } if source == suit => Err(Rejection::SamePile),
            CardLocation::Tableau { column, index } => self.check_source(location).and_then(|()| {
                if index + 1 == self.board.tableau[column].len() {
                    Ok(())
                } else {
                    Err(Rejection::NotOnTop)
                }
            }),
            _ => self.check_source(location),
        };
        let check = source_check.and_then(|()| {
            let foundation = self.board.foundation(suit);
            if moving.suit != suit {
                Err(Rejection::WrongSuit)
            } else if !can_place_on_foundation(&moving, foundation) {
                Err(Rejection::OutOfSequence)
            } else {
                Ok(())
            }
        });
        if let Err(reason) = check {
            log::debug!("Move of {} to {:?} foundation: {:?}", moving, suit, reason);
            return Rejected(reason);
        }

        let mut single = self.detach(location);
        log::trace!("Move {} from {:?} to {:?} foundation", moving, location, suit);
        self.board.foundation_mut(suit).pile.append(&mut single);

        if self.board.is_won() {
            log::debug!("All foundations complete");
            self.state = EngineState::Won;
            Won
        } else {
            Moved
        }
    }

    /// Whether the card at `location` may be picked up: the waste and
    /// foundation tops, or any face-up card of a column.
    fn check_source(&self, location: CardLocation) -> core::result::Result<(), Rejection> {
        match location {
            CardLocation::Stock(_) => Err(Rejection::NotMovable),
            CardLocation::Waste(0) => Ok(()),
            CardLocation::Waste(_) => Err(Rejection::NotMovable),
            CardLocation::Foundation { suit, index } => {
                if index + 1 == self.board.foundation(suit).len() {
                    Ok(())
                } else {
                    Err(Rejection::NotMovable)
                }
            }
            CardLocation::Tableau { column, index } => match self.board.tableau[column].get(index) {
                Some(card) if card.face_up => Ok(()),
                Some(_) => Err(Rejection::FaceDown),
                None => Err(Rejection::CardNotFound),
            },
        }
    }

    /// Lifts the card at `location` off its pile, together with everything
    /// above it for columns, and turns over a newly exposed column top.
    fn detach(&mut self, location: CardLocation) -> Pile {
        let board = &mut self.board;
        match location {
            CardLocation::Stock(index) => board.stock.remove(index).into_iter().collect(),
            CardLocation::Waste(_) => board.waste.pop_front().into_iter().collect(),
            CardLocation::Foundation { suit, .. } => {
                board.foundation_mut(suit).pile.pop_back().into_iter().collect()
            }
            CardLocation::Tableau { column, index } => {
                let source = &mut board.tableau[column];
                let run = source.split_off(index);
                if source.expose_back() {
                    log::trace!("Flip top of column {}", column);
                }
                run
            }
        }
    }

    fn commit(&mut self, snapshot: Board, changed: bool) {
        if changed {
            self.history.push(snapshot);
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
