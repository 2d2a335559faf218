use std::io::{self, BufRead, Write};

use clap::Parser;
use solo_blackjack::{Card, GameError, GameSession, TableRules, TableView};

#[derive(Parser)]
#[command(
    name = "console-table",
    about = "Play single-player blackjack against the dealer in the terminal"
)]
struct Args {
    /// Starting balance, restored on reset
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    balance: i64,

    /// Seed the shuffle for a repeatable session
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let rules = TableRules::default().with_initial_balance(args.balance);
    let mut session = match args.seed {
        Some(seed) => GameSession::seeded(rules, seed),
        None => GameSession::new(rules),
    };
    session.subscribe(render);

    println!("Balance: {}", format_chips(session.balance()));
    println!("Commands: deal <amount>, hit, stand, reset, quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let mut words = line.split_whitespace();
        let result = match words.next() {
            Some("deal") => session.start_round_with_input(words.next().unwrap_or("")),
            Some("hit") => session.player_hit(),
            Some("stand") => session.player_stand(),
            Some("reset") => {
                session.reset();
                Ok(())
            }
            Some("quit") => break,
            Some(other) => {
                eprintln!("Unknown command '{other}'");
                Ok(())
            }
            None => Ok(()),
        };

        match result {
            Err(GameError::InvalidBet(reason)) => eprintln!("{reason}. Enter a whole number of chips."),
            Err(e) => eprintln!("{e}"),
            Ok(()) => {}
        }
    }
}

fn render(view: &TableView) {
    let dealer: Vec<String> = view
        .dealer_cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            if i == 0 && view.hole_card_hidden {
                "??".to_string()
            } else {
                card.to_display()
            }
        })
        .collect();

    println!("Dealer: {} ({})", dealer.join(" "), view.dealer_score);
    println!(
        "You:    {} ({}{})",
        join_cards(&view.player_cards),
        if view.player_soft { "soft " } else { "" },
        view.player_score
    );
    if let Some(message) = &view.message {
        println!("{message}");
    }
    println!("Balance: {}", format_chips(view.balance));

    let mut actions = Vec::new();
    if view.hints.deal {
        actions.push("deal");
    }
    if view.hints.hit {
        actions.push("hit");
    }
    if view.hints.stand {
        actions.push("stand");
    }
    println!("Available: {}", actions.join(", "));
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_display)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_chips(amount: i64) -> String {
    if amount < 0 {
        format!("-${}", amount.unsigned_abs())
    } else {
        format!("${amount}")
    }
}
