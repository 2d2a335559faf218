//! Rules engine for single-player blackjack against an automated dealer.
//! Rendering and input handling live outside this crate.
mod card;
mod deck;
mod error;
mod hand;
mod ledger;
mod rules;
mod session;

pub use card::{card_value, Card, Rank, Suit};
pub use deck::{Deck, DeckSource, ShuffledDecks, StackedDecks, DECK_SIZE};
pub use error::GameError;
pub use hand::{calculate_hand_value, compare_totals, is_busted, is_soft_hand, Hand, Outcome};
pub use ledger::{Bet, Ledger};
pub use rules::{PayoutRatio, TableRules};
pub use session::{
    play_dealer, ActionHints, GameSession, RoundState, RoundSummary, TableObserver, TableView,
};
