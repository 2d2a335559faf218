use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    calculate_hand_value, compare_totals, Bet, Card, Deck, DeckSource, GameError, Hand, Ledger,
    Outcome, ShuffledDecks, TableRules,
};

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Idle,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// Which controls a UI should enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionHints {
    pub deal: bool,
    pub hit: bool,
    pub stand: bool,
}

impl ActionHints {
    pub fn for_state(state: RoundState) -> Self {
        let can_deal = matches!(state, RoundState::Idle | RoundState::Settled);
        let playing = state == RoundState::PlayerTurn;
        Self {
            deal: can_deal,
            hit: playing,
            stand: playing,
        }
    }
}

/// Snapshot of everything a presentation layer needs after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub state: RoundState,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    /// The dealer's first card should be drawn face-down
    pub hole_card_hidden: bool,
    pub player_score: u16,
    /// Only the face-up card counts while the hole card is hidden
    pub dealer_score: u16,
    pub player_soft: bool,
    pub balance: i64,
    pub current_bet: Option<u64>,
    pub outcome: Option<Outcome>,
    pub message: Option<String>,
    pub hints: ActionHints,
}

/// Receives a fresh [`TableView`] after every command that changed the table.
pub trait TableObserver {
    fn table_changed(&mut self, view: &TableView);
}

impl<F: FnMut(&TableView)> TableObserver for F {
    fn table_changed(&mut self, view: &TableView) {
        self(view)
    }
}

/// Record of one settled round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub outcome: Outcome,
    pub bet: u64,
    pub payout: u64,
    pub player_score: u16,
    pub dealer_score: u16,
    pub balance_after: i64,
}

/// Draw for the dealer until the total reaches `stands_on`.
pub fn play_dealer(deck: &mut Deck, dealer: &mut Hand, stands_on: u8) -> Result<(), GameError> {
    while dealer.value() < u16::from(stands_on) {
        let card = deck.deal_one()?;
        debug!("Dealer draws {card}");
        dealer.add_card(card);
    }
    Ok(())
}

/// One player against the dealer, from the first bet until reset.
///
/// All mutation goes through the command methods. A command that returns an error
/// leaves the session exactly as it was.
pub struct GameSession<D = ShuffledDecks<StdRng>> {
    rules: TableRules,
    source: D,
    deck: Option<Deck>,
    player: Hand,
    dealer: Hand,
    state: RoundState,
    outcome: Option<Outcome>,
    hole_card_revealed: bool,
    ledger: Ledger,
    history: Vec<RoundSummary>,
    observers: Vec<Box<dyn TableObserver>>,
}

impl GameSession<ShuffledDecks<StdRng>> {
    /// Session shuffling with an OS-seeded generator.
    pub fn new(rules: TableRules) -> Self {
        Self::with_source(rules, ShuffledDecks::new(StdRng::from_entropy()))
    }

    pub fn seeded(rules: TableRules, seed: u64) -> Self {
        Self::with_source(rules, ShuffledDecks::new(StdRng::seed_from_u64(seed)))
    }
}

impl Default for GameSession<ShuffledDecks<StdRng>> {
    fn default() -> Self {
        Self::new(TableRules::default())
    }
}

impl<D: DeckSource> GameSession<D> {
    pub fn with_source(rules: TableRules, source: D) -> Self {
        Self {
            rules,
            source,
            deck: None,
            player: Hand::new(),
            dealer: Hand::new(),
            state: RoundState::Idle,
            outcome: None,
            hole_card_revealed: false,
            ledger: Ledger::new(rules.initial_balance),
            history: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl TableObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn hole_card_hidden(&self) -> bool {
        !self.hole_card_revealed && !self.dealer.is_empty()
    }

    pub fn player_score(&self) -> u16 {
        self.player.value()
    }

    /// Dealer total as the player may see it. While the hole card is hidden
    /// this is the value of the second dealt card alone.
    pub fn dealer_visible_score(&self) -> u16 {
        if self.hole_card_hidden() {
            self.dealer
                .cards()
                .get(1)
                .map(|card| calculate_hand_value(std::slice::from_ref(card)))
                .unwrap_or(0)
        } else {
            self.dealer.value()
        }
    }

    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }

    pub fn current_bet(&self) -> Option<Bet> {
        self.ledger.current_bet()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn hints(&self) -> ActionHints {
        ActionHints::for_state(self.state)
    }

    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.as_ref().map_or(0, Deck::remaining)
    }

    pub fn view(&self) -> TableView {
        TableView {
            state: self.state,
            player_cards: self.player.cards().to_vec(),
            dealer_cards: self.dealer.cards().to_vec(),
            hole_card_hidden: self.hole_card_hidden(),
            player_score: self.player_score(),
            dealer_score: self.dealer_visible_score(),
            player_soft: self.player.is_soft(),
            balance: self.balance(),
            current_bet: self.current_bet().map(|bet| bet.amount()),
            outcome: self.outcome,
            message: self.outcome.map(|o| o.message().to_string()),
            hints: self.hints(),
        }
    }

    /// Take the bet, deal a fresh deck and hand the turn to the player.
    pub fn start_round(&mut self, amount: i64) -> Result<(), GameError> {
        self.ensure_can_deal()?;
        let bet = Bet::new(amount).inspect_err(|e| warn!("{e}"))?;
        self.begin_round(bet)
    }

    /// Same as [`start_round`](Self::start_round) for raw text input.
    pub fn start_round_with_input(&mut self, input: &str) -> Result<(), GameError> {
        self.ensure_can_deal()?;
        let bet: Bet = input.parse().inspect_err(|e| warn!("{e}"))?;
        self.begin_round(bet)
    }

    pub fn player_hit(&mut self) -> Result<(), GameError> {
        self.ensure_state("hit", RoundState::PlayerTurn)?;
        let deck = self.deck.as_mut().ok_or(GameError::EmptyDeck)?;
        let card = deck.deal_one()?;
        debug!("Player draws {card}");
        self.player.add_card(card);

        if self.player.is_busted() {
            self.settle(Outcome::Bust);
        }
        self.notify();
        Ok(())
    }

    /// End the player's turn, run the dealer and settle.
    pub fn player_stand(&mut self) -> Result<(), GameError> {
        self.ensure_state("stand", RoundState::PlayerTurn)?;

        // Draw on copies so an exhausted deck leaves the round untouched.
        let mut deck = self.deck.clone().ok_or(GameError::EmptyDeck)?;
        let mut dealer = self.dealer.clone();
        play_dealer(&mut deck, &mut dealer, self.rules.dealer_stands_on)?;

        self.state = RoundState::DealerTurn;
        self.hole_card_revealed = true;
        self.deck = Some(deck);
        self.dealer = dealer;

        let outcome = compare_totals(self.player.value(), self.dealer.value());
        self.settle(outcome);
        self.notify();
        Ok(())
    }

    /// Hard reset: empty hands, no bet, initial balance, no history.
    pub fn reset(&mut self) {
        self.deck = None;
        self.player.clear();
        self.dealer.clear();
        self.state = RoundState::Idle;
        self.outcome = None;
        self.hole_card_revealed = false;
        self.ledger.reset();
        self.history.clear();
        info!("Session reset, balance {}", self.ledger.balance());
        self.notify();
    }

    fn begin_round(&mut self, bet: Bet) -> Result<(), GameError> {
        let mut deck = self.source.fresh_deck();
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        for _ in 0..2 {
            player.add_card(deck.deal_one()?);
            dealer.add_card(deck.deal_one()?);
        }

        self.ledger.place_bet(bet);
        self.deck = Some(deck);
        self.player = player;
        self.dealer = dealer;
        self.outcome = None;
        self.hole_card_revealed = false;
        self.state = RoundState::PlayerTurn;

        info!(
            "Round started: bet {}, balance {}",
            bet.amount(),
            self.ledger.balance()
        );
        self.notify();
        Ok(())
    }

    fn settle(&mut self, outcome: Outcome) {
        self.state = RoundState::Settled;
        self.outcome = Some(outcome);

        if let Some(bet) = self.ledger.current_bet() {
            let payout = self
                .ledger
                .apply_outcome(outcome, bet, self.rules.win_payout);
            self.history.push(RoundSummary {
                outcome,
                bet: bet.amount(),
                payout,
                player_score: self.player.value(),
                dealer_score: self.dealer.value(),
                balance_after: self.ledger.balance(),
            });
            info!(
                "Round settled: {:?}, payout {}, balance {}",
                outcome,
                payout,
                self.ledger.balance()
            );
        }
    }

    fn ensure_can_deal(&self) -> Result<(), GameError> {
        match self.state {
            RoundState::Idle | RoundState::Settled => Ok(()),
            state => Err(self.illegal("deal", state)),
        }
    }

    fn ensure_state(&self, action: &'static str, expected: RoundState) -> Result<(), GameError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.illegal(action, self.state))
        }
    }

    fn illegal(&self, action: &'static str, state: RoundState) -> GameError {
        let err = GameError::IllegalAction { action, state };
        warn!("{err}");
        err
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in &mut self.observers {
            observer.table_changed(&view);
        }
    }
}
