//! The shared table and every board rule.
//!
//! The live turn engine and the AI's game tree both go through these
//! predicates and mutations, so a state the tree simulates is always a state
//! the engine can reach.
//!
//! ## Legality
//!
//! - **Attack**: the defender must hold at least as many cards as the new
//!   plus still-live attacking cards, and either all of those share one rank
//!   or every new card's rank is already on the board.
//! - **Defense**: higher rank of the same suit, or any trump against a
//!   non-trump. Trumps only fall to higher trumps.
//! - **Take-up**: whenever some attacking card is still live.
//! - **Pass-back**: nothing defended yet, one rank on the board, pass cards
//!   of that rank, and the original attacker can cover the grown board.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::phase::Phase;
use crate::cards::{Card, Grave, Rank, Stack, Suit};
use crate::core::Player;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    stack: Stack,
    board: Board,
    trump_card: Card,
}

impl Table {
    /// Lay out a table over `stack`. Its last card becomes the trump card.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[must_use]
    pub fn new(stack: Stack) -> Self {
        let trump_card = stack.last().expect("Stack must hold a trump card");
        Self::with_trump(stack, trump_card)
    }

    /// Table with an explicit trump card, for a stack that has already been
    /// drawn down.
    #[must_use]
    pub fn with_trump(stack: Stack, trump_card: Card) -> Self {
        Self {
            stack,
            board: Board::new(),
            trump_card,
        }
    }

    #[inline]
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub fn trump_card(&self) -> Card {
        self.trump_card
    }

    #[inline]
    #[must_use]
    pub fn trump_suit(&self) -> Suit {
        self.trump_card.suit
    }

    #[must_use]
    pub fn is_trump(&self, card: &Card) -> bool {
        card.suit == self.trump_suit()
    }

    /// Attacking cards with their defenders, for rendering.
    #[must_use]
    pub fn pairs(&self) -> Vec<(Card, Option<Card>)> {
        self.board.pairs().collect()
    }

    #[must_use]
    pub fn cards_flat(&self) -> Vec<Card> {
        self.board.cards()
    }

    /// Ranks of every card on the board, attacking or defending.
    #[must_use]
    pub fn ranks_on_board(&self) -> FxHashSet<Rank> {
        self.board.cards().iter().map(|card| card.rank).collect()
    }

    /// Whether the state machine may move from `current` to `next` given the
    /// board as it is now.
    #[must_use]
    pub fn can_transition(&self, current: Phase, next: Phase) -> bool {
        let live = self.board.has_live_attack();
        let defended = self.board.all_defended();
        let Some(attacker) = current.attacker() else {
            return false;
        };
        let defender = attacker.other();

        if current.is_attack() {
            next == Phase::defend(defender) && live
        } else if current.is_defend() {
            ((next == Phase::counter_attack(attacker) || next == Phase::attack(attacker)) && defended)
                || (next == Phase::defend(attacker) && live)
        } else {
            (next == Phase::defend(defender) && live) || (next == Phase::attack(defender) && defended)
        }
    }

    /// Pure defense rule for one attacking/defending pair.
    #[must_use]
    pub fn beats(&self, attacking: &Card, defending: &Card) -> bool {
        let att_trump = self.is_trump(attacking);
        let def_trump = self.is_trump(defending);

        if attacking.suit != defending.suit && !def_trump {
            return false;
        }
        if att_trump && !def_trump {
            return false;
        }
        attacking.rank < defending.rank || (!att_trump && def_trump)
    }

    #[must_use]
    pub fn can_attack(&self, attacker: &Player, defender: &Player, cards: &[Card]) -> bool {
        if cards.is_empty() || !attacker.hand.contains_all(cards) {
            return false;
        }
        if has_duplicates(cards) || cards.iter().any(|card| self.board.contains(card)) {
            return false;
        }

        let live = self.board.attacking_cards();
        if defender.hand.len() < cards.len() + live.len() {
            return false;
        }

        let first_rank = cards[0].rank;
        let same_rank = live.iter().chain(cards).all(|card| card.rank == first_rank);
        if same_rank {
            return true;
        }
        let on_board = self.ranks_on_board();
        cards.iter().all(|card| on_board.contains(&card.rank))
    }

    #[must_use]
    pub fn can_defend(&self, defender: &Player, attacking: &Card, defending: &Card) -> bool {
        self.board.is_live(attacking)
            && defender.hand.contains(defending)
            && self.beats(attacking, defending)
    }

    #[must_use]
    pub fn can_take_up(&self) -> bool {
        !self.board.all_defended()
    }

    #[must_use]
    pub fn can_pass(&self, attacker: &Player, defender: &Player, cards: &[Card]) -> bool {
        if self.board.is_empty() || cards.is_empty() || !self.board.none_defended() {
            return false;
        }
        if !defender.hand.contains_all(cards) || has_duplicates(cards) {
            return false;
        }
        if attacker.hand.len() < self.board.len() + cards.len() {
            return false;
        }

        let mut board_ranks = self.board.attacking_ranks();
        let Some(rank) = board_ranks.next() else {
            return false;
        };
        board_ranks.all(|r| r == rank) && cards.iter().all(|card| card.rank == rank)
    }

    /// Play `cards` from the attacker's hand onto the board as live attacks.
    pub fn attack(&mut self, attacker: &mut Player, defender: &Player, cards: &[Card]) -> bool {
        if !self.can_attack(attacker, defender, cards) {
            return false;
        }
        attacker.hand.play(cards);
        for card in cards {
            self.board.add_attack(*card);
        }
        true
    }

    pub fn defend(&mut self, defender: &mut Player, attacking: Card, defending: Card) -> bool {
        if !self.can_defend(defender, &attacking, &defending) {
            return false;
        }
        defender.hand.play(&[defending]);
        self.board.set_defense(attacking, defending);
        true
    }

    /// Move every board card into the defender's hand.
    pub fn take_up(&mut self, defender: &mut Player) -> bool {
        if !self.can_take_up() {
            return false;
        }
        let cards = self.board.take_all();
        defender.hand.take(cards);
        true
    }

    /// Add `cards` from the defender's hand as new live attacks, handing the
    /// defense back to the original attacker.
    pub fn pass(&mut self, attacker: &Player, defender: &mut Player, cards: &[Card]) -> bool {
        if !self.can_pass(attacker, defender, cards) {
            return false;
        }
        defender.hand.play(cards);
        for card in cards {
            self.board.add_attack(*card);
        }
        true
    }

    /// Discard the board without keeping the cards.
    pub fn clear_board(&mut self) {
        self.board.take_all();
    }

    /// Discard the board into `grave`.
    pub fn clear_into(&mut self, grave: &mut Grave) {
        grave.add(self.board.take_all());
    }

    /// Top both hands back up from the stack, `first` before `second`.
    pub fn refill(&mut self, first: &mut Player, second: &mut Player) {
        first.draw_from(&mut self.stack);
        second.draw_from(&mut self.stack);
    }

    /// Deal `slots` cards straight off the stack.
    pub fn deal(&mut self, player: &mut Player, slots: usize) {
        let cards = self.stack.draw(slots);
        player.set_hand(slots, cards);
    }
}

fn has_duplicates(cards: &[Card]) -> bool {
    let mut seen = FxHashSet::default();
    !cards.iter().all(|card| seen.insert(*card))
}
