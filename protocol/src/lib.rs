//! Messages exchanged between a front end and the engine.
//!
//! The front end sends a [`Command`] for every gesture and gets back a
//! [`Response`] carrying what happened and a fresh [`BoardView`] to draw.

use klondike_core::{
    Board, Card, CardId, CardLocation, Column, DrawOutcome, Game, GameError, MoveOutcome, Pile,
    Rank, Rejection, Suit,
};
use serde::{Deserialize, Serialize};

/// Which pile a dragged card was picked up from, as the front end saw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum PileRef {
    Stock,
    Waste,
    Tableau(Column),
    Foundation(Suit),
}

impl PileRef {
    pub fn of(location: CardLocation) -> Self {
        match location {
            CardLocation::Stock(_) => Self::Stock,
            CardLocation::Waste(_) => Self::Waste,
            CardLocation::Tableau { column, .. } => Self::Tableau(column),
            CardLocation::Foundation { suit, .. } => Self::Foundation(suit),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    DrawFromStock,
    /// Card dropped on a tableau column.
    DropOnTableau {
        card: CardId,
        #[serde(default)]
        source: Option<PileRef>,
        column: Column,
    },
    /// Card dropped on a foundation.
    DropOnFoundation {
        card: CardId,
        #[serde(default)]
        source: Option<PileRef>,
        suit: Suit,
    },
    /// Double click on a face-up card.
    AutoMove { card: CardId },
    Undo,
    /// Leaving the table, the game itself is untouched.
    Quit,
}

impl Command {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Drew { outcome: DrawOutcome },
    Moved,
    Rejected { reason: Rejection },
    /// All foundations are complete. Sent once, by the move that finished them.
    Won,
    Undone,
    NothingToUndo,
    Quit,
    /// The command could not apply to this game at all.
    Refused { message: String },
}

impl From<MoveOutcome> for Event {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Rejected(reason) => Self::Rejected { reason },
            MoveOutcome::Moved => Self::Moved,
            MoveOutcome::Won => Self::Won,
        }
    }
}

impl From<GameError> for Event {
    fn from(err: GameError) -> Self {
        match err {
            GameError::NothingToUndo => Self::NothingToUndo,
            other => Self::Refused {
                message: other.to_string(),
            },
        }
    }
}

/// A card as the player may see it. Face-down cards carry no identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "side", rename_all = "snake_case")]
pub enum CardView {
    Hidden,
    Shown {
        id: CardId,
        suit: Suit,
        rank: Rank,
        label: String,
        red: bool,
    },
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        if card.face_up {
            Self::Shown {
                id: card.id,
                suit: card.suit,
                rank: card.rank,
                label: card.to_string(),
                red: card.is_red(),
            }
        } else {
            Self::Hidden
        }
    }
}

fn pile_view(pile: &Pile) -> Vec<CardView> {
    pile.iter().map(CardView::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundationView {
    pub suit: Suit,
    pub cards: Vec<CardView>,
}

/// Observable state of a game, pile order as the engine keeps it: stock and
/// waste top first, tableau and foundations top last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub tableau: Vec<Vec<CardView>>,
    pub stock: Vec<CardView>,
    pub waste: Vec<CardView>,
    pub foundations: Vec<FoundationView>,
    pub won: bool,
    pub can_undo: bool,
}

impl BoardView {
    pub fn of(game: &Game) -> Self {
        let Board {
            tableau,
            stock,
            waste,
            foundations,
        } = game.board();
        Self {
            tableau: tableau.iter().map(pile_view).collect(),
            stock: pile_view(stock),
            waste: pile_view(waste),
            foundations: foundations
                .iter()
                .map(|foundation| FoundationView {
                    suit: foundation.suit,
                    cards: pile_view(&foundation.pile),
                })
                .collect(),
            won: game.is_won(),
            can_undo: game.can_undo(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub event: Event,
    pub board: BoardView,
}

impl Response {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Runs one command against `game` and reports the result.
pub fn handle(game: &mut Game, command: Command) -> Response {
    log::debug!("Handle {:?}", command);
    let event = match command {
        Command::DrawFromStock => game
            .draw_from_stock()
            .map(|outcome| Event::Drew { outcome })
            .unwrap_or_else(Event::from),
        Command::DropOnTableau {
            card,
            source,
            column,
        } => match check_source(game, card, source) {
            Some(rejected) => rejected,
            None => game
                .move_to_tableau(card, column)
                .map(Event::from)
                .unwrap_or_else(Event::from),
        },
        Command::DropOnFoundation { card, source, suit } => match check_source(game, card, source) {
            Some(rejected) => rejected,
            None => game
                .move_to_foundation(card, suit)
                .map(Event::from)
                .unwrap_or_else(Event::from),
        },
        Command::AutoMove { card } => game
            .auto_move_to_foundation(card)
            .map(Event::from)
            .unwrap_or_else(Event::from),
        Command::Undo => game.undo().map(|()| Event::Undone).unwrap_or_else(Event::from),
        Command::Quit => Event::Quit,
    };
    log::debug!("Result {:?}", event);

    Response {
        event,
        board: BoardView::of(game),
    }
}

/// A drop whose claimed source no longer holds the card is stale, and treated
/// like a card that cannot be found.
fn check_source(game: &Game, card: CardId, source: Option<PileRef>) -> Option<Event> {
    let claimed = source?;
    let actual = game.locate(card).map(PileRef::of);
    if actual == Some(claimed) {
        None
    } else {
        log::debug!("Card {} claimed from {:?} but is at {:?}", card, claimed, actual);
        Some(Event::Rejected {
            reason: Rejection::CardNotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_core::{create_deck, TABLEAU_COLUMNS};

    fn ordered_game() -> Game {
        Game::from_deck(create_deck()).unwrap()
    }

    #[test]
    fn commands_parse_from_json() {
        let command = Command::from_json(r#"{"type":"drop_on_tableau","card":12,"column":3}"#).unwrap();
        assert_eq!(
            command,
            Command::DropOnTableau {
                card: CardId::new(Suit::Hearts, Rank::King),
                source: None,
                column: 3,
            }
        );

        let command = Command::from_json(
            r#"{"type":"drop_on_foundation","card":0,"source":{"kind":"waste"},"suit":"Hearts"}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::DropOnFoundation {
                card: CardId::new(Suit::Hearts, Rank::Ace),
                source: Some(PileRef::Waste),
                suit: Suit::Hearts,
            }
        );

        assert_eq!(Command::from_json(r#"{"type":"undo"}"#).unwrap(), Command::Undo);
        assert!(Command::from_json(r#"{"type":"shuffle"}"#).is_err());
    }

    #[test]
    fn view_hides_face_down_cards() {
        let game = ordered_game();
        let view = BoardView::of(&game);

        assert_eq!(view.tableau.len(), TABLEAU_COLUMNS);
        assert!(view.stock.iter().all(|card| *card == CardView::Hidden));
        for column in &view.tableau {
            let (top, rest) = column.split_last().unwrap();
            assert!(matches!(top, CardView::Shown { .. }));
            assert!(rest.iter().all(|card| *card == CardView::Hidden));
        }
        assert_eq!(
            view.tableau[0][0],
            CardView::Shown {
                id: CardId::new(Suit::Hearts, Rank::Ace),
                suit: Suit::Hearts,
                rank: Rank::Ace,
                label: "A♥".to_string(),
                red: true,
            }
        );
        assert!(!view.won && !view.can_undo);
    }

    #[test]
    fn draw_then_undo_round_trip() {
        let mut game = ordered_game();

        let response = handle(&mut game, Command::DrawFromStock);
        assert_eq!(
            response.event,
            Event::Drew {
                outcome: DrawOutcome::Drawn
            }
        );
        assert_eq!(response.board.waste.len(), 1);
        assert!(response.board.can_undo);

        let response = handle(&mut game, Command::Undo);
        assert_eq!(response.event, Event::Undone);
        assert!(response.board.waste.is_empty());

        let response = handle(&mut game, Command::Undo);
        assert_eq!(response.event, Event::NothingToUndo);
    }

    #[test]
    fn ace_goes_home_on_auto_move() {
        // unshuffled deck puts the Ace of hearts alone in the first column
        let mut game = ordered_game();
        let ace = CardId::new(Suit::Hearts, Rank::Ace);

        let response = handle(&mut game, Command::AutoMove { card: ace });

        assert_eq!(response.event, Event::Moved);
        assert!(response.board.tableau[0].is_empty());
        assert_eq!(response.board.foundations[0].cards.len(), 1);
    }

    #[test]
    fn stale_source_is_rejected() {
        let mut game = ordered_game();
        let ace = CardId::new(Suit::Hearts, Rank::Ace);

        let response = handle(
            &mut game,
            Command::DropOnFoundation {
                card: ace,
                source: Some(PileRef::Waste),
                suit: Suit::Hearts,
            },
        );
        assert_eq!(
            response.event,
            Event::Rejected {
                reason: Rejection::CardNotFound
            }
        );

        let response = handle(
            &mut game,
            Command::DropOnFoundation {
                card: ace,
                source: Some(PileRef::Tableau(0)),
                suit: Suit::Hearts,
            },
        );
        assert_eq!(response.event, Event::Moved);
    }

    #[test]
    fn bad_column_is_refused_not_fatal() {
        let mut game = ordered_game();
        let ace = CardId::new(Suit::Hearts, Rank::Ace);

        let response = handle(
            &mut game,
            Command::DropOnTableau {
                card: ace,
                source: None,
                column: 9,
            },
        );

        assert_eq!(
            response.event,
            Event::Refused {
                message: "Invalid tableau column 9".to_string()
            }
        );
    }

    #[test]
    fn quit_leaves_the_game_alone() {
        let mut game = ordered_game();
        let before = game.clone();

        let response = handle(&mut game, Command::Quit);

        assert_eq!(response.event, Event::Quit);
        assert_eq!(game, before);
    }

    #[test]
    fn response_serializes_to_json() {
        let mut game = ordered_game();
        let json = handle(&mut game, Command::DrawFromStock).to_json().unwrap();

        assert!(json.starts_with(r#"{"event":{"type":"drew""#));
        assert!(json.contains(r#""won":false"#));
    }
}
