use crate::Card;
use serde::{Deserialize, Serialize};

/// How a settled round ended, from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWin,
    Push,
    DealerWin,
    /// Player went over 21 before standing. The dealer never draws.
    Bust,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::PlayerWin => "You win!",
            Outcome::Push => "It's a push.",
            Outcome::Bust => "You busted and lost the hand.",
            Outcome::DealerWin => "Dealer wins.",
        }
    }
}

/// Compare final totals once the dealer has finished drawing.
pub fn compare_totals(player: u16, dealer: u16) -> Outcome {
    if player > 21 {
        Outcome::Bust
    } else if dealer > 21 || player > dealer {
        Outcome::PlayerWin
    } else if player == dealer {
        Outcome::Push
    } else {
        Outcome::DealerWin
    }
}

/// Score a set of cards, treating as many aces as needed as 1 to stay at or under 21.
/// A busted total is returned as-is; callers check `> 21` themselves.
pub fn calculate_hand_value(cards: &[Card]) -> u16 {
    let mut total: u16 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value() as u16;
    }

    // Downgrade aces from 11 to 1
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard_total: u16 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() as u16 })
        .sum();
    cards.iter().any(|c| c.is_ace()) && hard_total + 10 == calculate_hand_value(cards)
}

pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Cards held by the player or the dealer for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u16 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
