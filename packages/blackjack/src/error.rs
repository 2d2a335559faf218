use thiserror::Error;

use crate::RoundState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Bet was not a positive whole number. Nothing was deducted.
    #[error("Invalid bet: {0}")]
    InvalidBet(String),

    #[error("Cannot {action} while the round is {state:?}")]
    IllegalAction {
        action: &'static str,
        state: RoundState,
    },

    /// The deck ran out of cards. A single deck never runs dry in two-party play,
    /// so this points at a broken deck source.
    #[error("Deck is empty")]
    EmptyDeck,
}
