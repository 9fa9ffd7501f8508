//! Game tree integration tests: expansion, evaluation, re-rooting, resolve and act.

mod common;

use common::{arranged, card, init_logging};
use rust_durak::{AiError, AiPlayer, DeckKind, Game, GameConfig, Move, NodeKind, Phase, Player, Rank, Suit, Tree, TreeConfig};

fn dealt(seed: u64) -> Game {
    let config = GameConfig::new()
        .with_deck(DeckKind::Mini)
        .with_hand_slots(3)
        .with_seed(seed)
        .with_starting_phase(Phase::Player1Attack);
    Game::new(config, Player::ai("one"), Player::ai("two"))
}

fn small_tree() -> TreeConfig {
    TreeConfig::default().with_horizon(4)
}

// =============================================================================
// Expansion
// =============================================================================

#[test]
fn test_generate_respects_horizon() {
    init_logging();
    let game = dealt(1);
    let mut tree = Tree::new("one", small_tree());
    tree.generate(&game);

    let stats = tree.stats();
    assert!(stats.node_count > 2);
    assert!(stats.max_depth <= 4 + 1);
    for (_, node) in tree.iter() {
        assert_eq!(node.expanded, node.depth <= 4, "{node}");
    }
}

#[test]
fn test_only_player_nodes_branch() {
    let game = dealt(2);
    let mut tree = Tree::new("one", small_tree());
    tree.generate(&game);

    for (id, node) in tree.iter() {
        if !node.expanded || node.terminal {
            continue;
        }
        let children = tree.children(id);
        if node.kind.is_player() {
            assert!(children.iter().all(|c| !tree.get(*c).kind.is_player()));
        } else {
            assert_eq!(children.len(), 1, "{node}");
            let child = tree.get(children[0]);
            assert!(child.kind.is_player());
            assert_eq!(child.state.table, node.state.table);
        }
    }
}

#[test]
fn test_branches_own_their_state() {
    let game = dealt(3);
    let mut tree = Tree::new("one", small_tree());
    tree.generate(&game);

    let player = tree.children(tree.root())[0];
    let attacks = tree.children(player);
    assert!(attacks.len() >= 2);
    // Each attack removed its own cards and nobody else's.
    for id in attacks {
        let NodeKind::Attack { cards } = &tree.get(*id).kind else {
            panic!("expected an attack");
        };
        let hand = &tree.get(*id).state.player.hand;
        assert_eq!(hand.len() + cards.len(), 3);
        assert!(cards.iter().all(|c| !hand.contains(c)));
        assert!(cards.iter().all(|c| game.player1().hand.contains(c)));
    }
    assert_eq!(tree.get(player).state.player.hand, game.player1().hand);
}

#[test]
fn test_take_up_child_refills_both_hands() {
    let game = arranged(
        &[card(Rank::Ten, Suit::Clubs), card(Rank::Queen, Suit::Spades)],
        &[card(Rank::Jack, Suit::Diamonds)],
        &[card(Rank::King, Suit::Spades), card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Clubs)],
        Phase::Player1Attack,
    );
    let mut tree = Tree::new("two", small_tree());
    tree.generate(&game);

    let take_up = tree
        .iter()
        .find(|(_, node)| node.kind == NodeKind::TakeUp)
        .map(|(_, node)| node)
        .unwrap();
    let state = &take_up.state;
    assert_eq!(state.player.name(), "two");
    assert!(state.table.board().is_empty());
    assert!(state.player.hand.len() >= 3);
    assert_eq!(state.opponent.hand.len(), 3);
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_finality_is_monotone_and_backup_is_mean() {
    let game = dealt(4);
    let mut tree = Tree::new("one", small_tree());
    tree.generate(&game);

    for (id, node) in tree.iter() {
        let children = tree.children(id);
        if node.is_final && !children.is_empty() {
            assert!(children.iter().all(|c| tree.get(*c).is_final), "{node}");
        }
        if node.expanded && !children.is_empty() {
            let mean = children
                .iter()
                .map(|c| f64::from(tree.get(*c).evaluation))
                .sum::<f64>()
                / children.len() as f64;
            assert!((f64::from(node.evaluation) - mean).abs() < 1e-5, "{node}");
        }
    }
}

#[test]
fn test_evaluations_are_bounded() {
    let game = dealt(5);
    let mut tree = Tree::new("two", small_tree());
    tree.generate(&game);

    // Overfull hands after a take-up score below zero, so the spread is wider than one.
    assert!(tree.iter().all(|(_, node)| node.evaluation.abs() < 2.0));
    for (_, node) in tree.iter().filter(|(_, node)| node.terminal) {
        assert!([-1.0, 0.0, 1.0].contains(&node.evaluation));
    }
}

// =============================================================================
// Re-rooting
// =============================================================================

#[test]
fn test_update_root_frees_siblings() {
    let game = dealt(6);
    let mut tree = Tree::new("one", small_tree());
    tree.generate(&game);

    let player = tree.children(tree.root())[0];
    let chosen = *tree.children(player).last().unwrap();
    let kept = tree.get(chosen).state.clone();
    tree.update_root(chosen);

    assert_eq!(tree.root_node().state, kept);
    assert_eq!(tree.len(), tree.total_nodes());
    assert!(tree.iter().all(|(_, node)| node.depth >= 2));
    assert!(tree.iter().all(|(_, node)| node.expanded == (node.depth <= 2 + 4)));
}

// =============================================================================
// Resolve
// =============================================================================

#[test]
fn test_resolve_selects_the_recorded_child() {
    init_logging();
    let mut game = dealt(7);
    let mut ai = AiPlayer::new("two", small_tree());
    ai.generate(&game);

    let first = game.player1().hand.get(0).unwrap();
    assert!(game.actions().attack(&[first]));
    assert!(game.actions().done());

    ai.resolve(&game).unwrap();
    let root = ai.tree().root_node();
    assert_eq!(root.kind, NodeKind::Attack { cards: smallvec::smallvec![first] });
    assert!(root.state.matches(&game));
}

#[test]
fn test_resolve_rejects_corrupted_state() {
    let mut game = dealt(8);
    let mut ai = AiPlayer::new("two", small_tree());
    ai.generate(&game);

    // Replace the position with one the tree never saw.
    let mut one = game.player1().clone();
    one.set_hand(3, [card(Rank::Ace, Suit::Spades)]);
    game = Game::with_state(game.config().clone(), one, game.player2().clone(), game.table().clone(), game.phase());

    let err = ai.resolve(&game).unwrap_err();
    assert!(err.is_desync());
    assert!(matches!(err, AiError::NoMatchingNode { .. }));
}

// =============================================================================
// Act
// =============================================================================

#[test]
fn test_act_recurses_into_own_decision() {
    let mut game = dealt(9);
    let mut ai = AiPlayer::new("one", small_tree());
    ai.generate(&game);
    assert_eq!(ai.tree().root_node().kind, NodeKind::Entry);

    let action = ai.act(&mut game).unwrap().unwrap();
    assert!(matches!(action, Move::Attack(_)));
    assert!(game.actions().done());
    assert_eq!(game.phase(), Phase::Player2Defend);
}

#[test]
fn test_two_agents_stay_in_step() {
    init_logging();
    let mut game = dealt(10);
    let mut one = AiPlayer::new("one", small_tree());
    let mut two = AiPlayer::new("two", small_tree());
    one.generate(&game);
    two.generate(&game);

    for _ in 0..6 {
        if game.is_over() {
            break;
        }
        let actor = if game.phase().is_player1_turn() { &mut one } else { &mut two };
        let action = actor.act(&mut game).unwrap().unwrap();
        if !action.is_draw() {
            assert!(game.actions().done() || game.is_over());
        }
        if game.is_over() {
            break;
        }
        one.resolve(&game).unwrap();
        two.resolve(&game).unwrap();
        assert!(one.tree().root_node().state.matches(&game));
        assert!(two.tree().root_node().state.matches(&game));
    }
}

#[test]
fn test_self_turn_guard() {
    let mut game = dealt(11);
    let mut ai = AiPlayer::new("one", TreeConfig::default().with_horizon(4).with_max_self_turns(0));
    ai.generate(&game);

    assert_eq!(ai.act(&mut game), Err(AiError::SelfTurnLimit { limit: 0 }));
}
