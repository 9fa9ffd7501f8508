//! Turn engine integration tests: phase transitions, refills and results.

mod common;

use std::time::{Duration, Instant};

use common::{arranged, card, init_logging};
use rust_durak::{DeckKind, Game, GameConfig, Phase, Player, Rank, Side, Suit};

// =============================================================================
// Transition Table
// =============================================================================

#[test]
fn test_attack_phase_needs_live_card() {
    init_logging();
    let game = arranged(
        &[card(Rank::Ten, Suit::Clubs)],
        &[card(Rank::Jack, Suit::Clubs)],
        &[card(Rank::King, Suit::Diamonds)],
        Phase::Player1Attack,
    );
    let table = game.table();

    for next in [
        Phase::Player2Defend,
        Phase::Player1Defend,
        Phase::Player2Attack,
        Phase::Player1CounterAttack,
        Phase::Player1Wins,
    ] {
        assert!(!table.can_transition(Phase::Player1Attack, next), "{next}");
    }
}

#[test]
fn test_attack_phase_only_moves_to_defend() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs)],
        &[card(Rank::Jack, Suit::Clubs)],
        &[card(Rank::King, Suit::Diamonds)],
        Phase::Player1Attack,
    );
    assert!(game.actions().attack(&[card(Rank::Ten, Suit::Clubs)]));
    let table = game.table();

    assert!(table.can_transition(Phase::Player1Attack, Phase::Player2Defend));
    assert!(!table.can_transition(Phase::Player1Attack, Phase::Player1Defend));
    assert!(!table.can_transition(Phase::Player1Attack, Phase::Player2Attack));
    assert!(!table.can_transition(Phase::Player1Attack, Phase::Player1CounterAttack));
}

#[test]
fn test_result_phases_are_final() {
    let game = arranged(&[], &[], &[], Phase::Player1Attack);
    for result in [Phase::Player1Wins, Phase::Player2Wins, Phase::Draw] {
        assert!(!game.table().can_transition(result, Phase::Player1Attack));
    }
}

// =============================================================================
// done() and Flags
// =============================================================================

#[test]
fn test_done_without_action_is_noop() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs)],
        &[card(Rank::Jack, Suit::Clubs)],
        &[card(Rank::King, Suit::Diamonds)],
        Phase::Player1Attack,
    );
    assert!(!game.actions().done());
    assert_eq!(game.phase(), Phase::Player1Attack);
    assert_eq!(game.turn(), 0);
}

#[test]
fn test_done_clears_flags_and_counts_turns() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs), card(Rank::Queen, Suit::Spades)],
        &[card(Rank::Jack, Suit::Clubs), card(Rank::King, Suit::Diamonds)],
        &[card(Rank::King, Suit::Spades)],
        Phase::Player1Attack,
    );
    assert!(game.actions().attack(&[card(Rank::Ten, Suit::Clubs)]));
    assert!(game.actions().is_action_done());

    assert!(game.actions().done());
    assert!(!game.actions().is_action_done());
    assert_eq!(game.turn(), 1);
    assert_eq!(game.phase(), Phase::Player2Defend);

    // Actions of the wrong role are refused in the new phase.
    assert!(!game.actions().attack(&[card(Rank::Queen, Suit::Spades)]));
    assert!(!game.actions().done());
}

#[test]
fn test_draw_swaps_attacker_and_refills() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs), card(Rank::Queen, Suit::Spades)],
        &[card(Rank::Jack, Suit::Clubs), card(Rank::King, Suit::Diamonds)],
        &[card(Rank::King, Suit::Spades), card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Clubs)],
        Phase::Player1Attack,
    );
    let ten = card(Rank::Ten, Suit::Clubs);
    assert!(game.actions().attack(&[ten]));
    assert!(game.actions().done());
    assert!(game.actions().defend(ten, card(Rank::Jack, Suit::Clubs)));
    assert!(game.actions().done());
    assert_eq!(game.phase(), Phase::Player1CounterAttack);

    assert!(game.actions().can_draw());
    assert!(game.actions().done());
    assert_eq!(game.phase(), Phase::Player2Attack);
    assert_eq!(game.grave_len(), 2);
    assert!(game.table().board().is_empty());

    // Player 1 no longer attacks, so they draw first.
    assert!(game.player1().hand.contains(&card(Rank::King, Suit::Spades)));
    assert!(game.player1().hand.contains(&card(Rank::Ace, Suit::Spades)));
    assert!(game.player2().hand.contains(&card(Rank::Ace, Suit::Clubs)));
    assert_eq!(game.stack_len(), 0);
}

#[test]
fn test_take_up_keeps_attacker_and_taker_draws_first() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs), card(Rank::Queen, Suit::Spades)],
        &[card(Rank::Jack, Suit::Diamonds)],
        &[card(Rank::King, Suit::Spades), card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Clubs), card(Rank::King, Suit::Clubs)],
        Phase::Player1Attack,
    );
    assert!(game.actions().attack(&[card(Rank::Ten, Suit::Clubs)]));
    assert!(game.actions().done());
    assert!(game.actions().take_up());
    assert!(game.actions().done());

    assert_eq!(game.phase(), Phase::Player1Attack);
    assert_eq!(game.grave_len(), 0);
    // Taker had 2 of 3 slots: one card. Attacker had 1: two cards.
    assert!(game.player2().hand.contains(&card(Rank::King, Suit::Spades)));
    assert!(game.player1().hand.contains(&card(Rank::Ace, Suit::Spades)));
    assert!(game.player1().hand.contains(&card(Rank::Ace, Suit::Clubs)));
    assert_eq!(game.stack_len(), 1);
}

#[test]
fn test_counter_attack_phase_passes_without_action() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs), card(Rank::Queen, Suit::Spades)],
        &[card(Rank::Jack, Suit::Clubs), card(Rank::King, Suit::Diamonds)],
        &[card(Rank::King, Suit::Spades)],
        Phase::Player1Attack,
    );
    let ten = card(Rank::Ten, Suit::Clubs);
    assert!(game.actions().attack(&[ten]));
    assert!(game.actions().done());
    assert!(!game.actions().can_draw());
    assert!(game.actions().defend(ten, card(Rank::Jack, Suit::Clubs)));
    assert!(game.actions().done());

    let turn = game.turn();
    assert!(game.actions().done());
    assert_eq!(game.turn(), turn + 1);
    assert_eq!(game.phase(), Phase::Player2Attack);
}

// =============================================================================
// Results
// =============================================================================

#[test]
fn test_emptying_hand_on_empty_stack_wins() {
    init_logging();
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs)],
        &[card(Rank::Jack, Suit::Diamonds), card(Rank::Queen, Suit::Diamonds)],
        &[],
        Phase::Player1Attack,
    );
    assert!(game.actions().attack(&[card(Rank::Ten, Suit::Clubs)]));

    assert!(game.is_over());
    assert_eq!(game.phase(), Phase::Player1Wins);
    assert_eq!(game.winner(), Some(Side::One));
    assert_eq!(game.turn(), 1);
    assert!(!game.actions().done());
    assert!(!game.actions().can_take_up());
}

#[test]
fn test_result_phase_follows_empty_hands() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs)],
        &[card(Rank::Jack, Suit::Clubs)],
        &[],
        Phase::Player1Attack,
    );
    let ten = card(Rank::Ten, Suit::Clubs);
    assert!(game.actions().attack(&[ten]));
    assert_eq!(game.phase(), Phase::Player1Wins);

    let mut game = arranged(&[ten, card(Rank::Queen, Suit::Spades)], &[card(Rank::Jack, Suit::Clubs)], &[], Phase::Player1Attack);
    assert!(game.actions().attack(&[ten]));
    assert!(game.actions().done());
    assert!(game.actions().defend(ten, card(Rank::Jack, Suit::Clubs)));
    assert_eq!(game.phase(), Phase::Player2Wins);

    let mut game = arranged(&[], &[], &[], Phase::Player1Attack);
    assert!(game.determine_winner());
    assert_eq!(game.phase(), Phase::Draw);
    assert_eq!(game.winner(), None);
    assert!(!game.determine_winner());
}

#[test]
fn test_no_result_while_stack_has_cards() {
    let mut game = arranged(
        &[card(Rank::Ten, Suit::Clubs)],
        &[card(Rank::Jack, Suit::Diamonds)],
        &[card(Rank::King, Suit::Spades)],
        Phase::Player1Attack,
    );
    assert!(game.actions().attack(&[card(Rank::Ten, Suit::Clubs)]));
    assert!(!game.is_over());
}

// =============================================================================
// Pacing and Reset
// =============================================================================

#[test]
fn test_attack_delay_before_player2_attack() {
    let delay = Duration::from_millis(20);
    let config = GameConfig::new()
        .with_deck(DeckKind::Mini)
        .with_hand_slots(3)
        .with_attack_delay(delay);
    let base = arranged(
        &[card(Rank::Ten, Suit::Clubs), card(Rank::Queen, Suit::Spades)],
        &[card(Rank::Jack, Suit::Clubs), card(Rank::King, Suit::Diamonds)],
        &[card(Rank::King, Suit::Spades)],
        Phase::Player1Attack,
    );
    let mut game = Game::with_state(
        config,
        base.player1().clone(),
        base.player2().clone(),
        base.table().clone(),
        base.phase(),
    );

    let ten = card(Rank::Ten, Suit::Clubs);
    assert!(game.actions().attack(&[ten]));
    assert!(game.actions().done());
    assert!(game.actions().defend(ten, card(Rank::Jack, Suit::Clubs)));
    assert!(game.actions().done());

    let started = Instant::now();
    assert!(game.actions().done());
    assert_eq!(game.phase(), Phase::Player2Attack);
    assert!(started.elapsed() >= delay);
}

#[test]
fn test_reset_is_reproducible() {
    let config = GameConfig::new().with_deck(DeckKind::Mini).with_hand_slots(3).with_seed(7);
    let mut a = Game::new(config.clone(), Player::passive("a"), Player::passive("b"));
    let mut b = Game::new(config, Player::passive("a"), Player::passive("b"));
    a.reset();
    b.reset();

    assert_eq!(a.table(), b.table());
    assert_eq!(a.player2().hand, b.player2().hand);
    assert_eq!(a.stack_len() + 6, 20);
}
