//! Shared helpers for the integration test binaries.
//!
//! Logging honours `RUST_LOG` and defaults to `warn`:
//!
//! ```bash
//! RUST_LOG=rust_durak=debug cargo test --test match_tests -- --nocapture
//! ```

#![allow(dead_code)]

use rust_durak::{Card, Deck, Game, GameConfig, Phase, Player, Rank, Stack, Suit, Table};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the test subscriber. Safe to call from every test.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

pub fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

/// Player with a 3-slot hand holding `cards`.
pub fn seated(name: &str, cards: &[Card]) -> Player {
    let mut player = Player::ai(name);
    player.set_hand(3, cards.iter().copied());
    player
}

/// Arranged position with hearts as trump. `stack` is drawn front first.
pub fn arranged(p1: &[Card], p2: &[Card], stack: &[Card], phase: Phase) -> Game {
    let stack = Stack::from_cards(Deck::mini(), stack.iter().copied());
    let table = Table::with_trump(stack, card(Rank::Ace, Suit::Hearts));
    let config = GameConfig::new().with_deck(rust_durak::DeckKind::Mini).with_hand_slots(3);
    Game::with_state(config, seated("one", p1), seated("two", p2), table, phase)
}
