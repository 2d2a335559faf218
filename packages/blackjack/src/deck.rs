use std::collections::VecDeque;

use rand::Rng;

use crate::{Card, GameError, Rank, Suit};

pub const DECK_SIZE: usize = 52;

/// Cards waiting to be dealt. The top of the deck is the end of the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in a fixed order: suit by suit, ace through king.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// A pre-arranged deck. `deal_order[0]` is the first card dealt.
    pub fn stacked(deal_order: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = deal_order.into_iter().collect();
        cards.reverse();
        Self { cards }
    }

    /// Fisher–Yates: walk from the last index down to 1, swapping each slot with a
    /// uniformly chosen slot in `[0, i]`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    pub fn deal_one(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in storage order, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Supplies the deck for each new round.
pub trait DeckSource {
    fn fresh_deck(&mut self) -> Deck;
}

/// Builds a full deck per round and shuffles it with the wrapped generator.
#[derive(Debug, Clone)]
pub struct ShuffledDecks<R> {
    rng: R,
}

impl<R: Rng> ShuffledDecks<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DeckSource for ShuffledDecks<R> {
    fn fresh_deck(&mut self) -> Deck {
        let mut deck = Deck::new();
        deck.shuffle(&mut self.rng);
        deck
    }
}

/// Replays queued decks in order, then falls back to unshuffled full decks.
#[derive(Debug, Clone, Default)]
pub struct StackedDecks {
    decks: VecDeque<Deck>,
}

impl StackedDecks {
    pub fn new(decks: impl IntoIterator<Item = Deck>) -> Self {
        Self {
            decks: decks.into_iter().collect(),
        }
    }

    pub fn push(&mut self, deck: Deck) {
        self.decks.push_back(deck);
    }
}

impl DeckSource for StackedDecks {
    fn fresh_deck(&mut self) -> Deck {
        self.decks.pop_front().unwrap_or_else(|| {
            log::warn!("Stacked decks exhausted, dealing from an unshuffled deck");
            Deck::new()
        })
    }
}
