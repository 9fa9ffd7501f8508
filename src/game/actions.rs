//! Gated action surface.
//!
//! Every mutator has a `can_*` twin and returns `false` without touching
//! state when the move is illegal. A successful action only records that
//! something happened this step; `done()` is what moves the phase on.

use tracing::debug;

use super::engine::{ActionFlags, Game};
use crate::cards::{format_cards, Card};
use crate::core::Side;
use crate::rules::Phase;

/// Actions for whoever holds the current phase, borrowed from a [`Game`].
pub struct PlayerActions<'a> {
    game: &'a mut Game,
}

impl<'a> PlayerActions<'a> {
    pub(super) fn new(game: &'a mut Game) -> Self {
        Self { game }
    }

    /// Whether an action has been accepted since the last transition.
    #[must_use]
    pub fn is_action_done(&self) -> bool {
        self.game.flags.action_done
    }

    #[must_use]
    pub fn is_take_up(&self) -> bool {
        self.game.flags.take_up
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.game.flags.pass
    }

    fn roles(&self) -> Option<(Side, Side)> {
        let attacker = self.game.phase.attacker()?;
        Some((attacker, attacker.other()))
    }

    #[must_use]
    pub fn can_attack(&self, cards: &[Card]) -> bool {
        let phase = self.game.phase;
        if !(phase.is_attack() || phase.is_counter_attack()) {
            return false;
        }
        let Some((attacker, defender)) = self.roles() else {
            return false;
        };
        self.game
            .table
            .can_attack(self.game.player(attacker), self.game.player(defender), cards)
    }

    pub fn attack(&mut self, cards: &[Card]) -> bool {
        if !self.can_attack(cards) {
            return false;
        }
        let Some((attacker, _)) = self.roles() else {
            return false;
        };
        let (attacker, defender, table) = self.game.seats_mut(attacker);
        if !table.attack(attacker, defender, cards) {
            return false;
        }
        debug!(player = attacker.name(), cards = %format_cards(cards), "attacked");

        self.game.flags.action_done = true;
        self.game.determine_winner();
        true
    }

    #[must_use]
    pub fn can_defend(&self, attacking: Card, defending: Card) -> bool {
        if !self.game.phase.is_defend() {
            return false;
        }
        let Some((_, defender)) = self.roles() else {
            return false;
        };
        self.game
            .table
            .can_defend(self.game.player(defender), &attacking, &defending)
    }

    pub fn defend(&mut self, attacking: Card, defending: Card) -> bool {
        if !self.can_defend(attacking, defending) {
            return false;
        }
        let Some((_, defender)) = self.roles() else {
            return false;
        };
        let (defender, _, table) = self.game.seats_mut(defender);
        if !table.defend(defender, attacking, defending) {
            return false;
        }
        debug!(player = defender.name(), %attacking, %defending, "defended");

        self.game.flags.action_done = true;
        self.game.determine_winner();
        true
    }

    #[must_use]
    pub fn can_take_up(&self) -> bool {
        self.game.phase.is_defend() && self.game.table.can_take_up()
    }

    pub fn take_up(&mut self) -> bool {
        if !self.can_take_up() {
            return false;
        }
        let Some((_, defender)) = self.roles() else {
            return false;
        };
        let (defender, _, table) = self.game.seats_mut(defender);
        if !table.take_up(defender) {
            return false;
        }
        debug!(player = defender.name(), hand = defender.hand.len(), "took up");

        self.game.flags.action_done = true;
        self.game.flags.take_up = true;
        true
    }

    #[must_use]
    pub fn can_pass(&self, cards: &[Card]) -> bool {
        if !self.game.phase.is_defend() {
            return false;
        }
        let Some((attacker, defender)) = self.roles() else {
            return false;
        };
        self.game
            .table
            .can_pass(self.game.player(attacker), self.game.player(defender), cards)
    }

    pub fn pass(&mut self, cards: &[Card]) -> bool {
        if !self.can_pass(cards) {
            return false;
        }
        let Some((_, defender)) = self.roles() else {
            return false;
        };
        let (defender, attacker, table) = self.game.seats_mut(defender);
        if !table.pass(attacker, defender, cards) {
            return false;
        }
        debug!(player = defender.name(), cards = %format_cards(cards), "passed back");

        self.game.flags.action_done = true;
        self.game.flags.pass = true;
        self.game.determine_winner();
        true
    }

    /// Whether the counter-attacker may end the round without acting.
    #[must_use]
    pub fn can_draw(&self) -> bool {
        let phase = self.game.phase;
        let Some((_, defender)) = self.roles() else {
            return false;
        };
        !self.game.flags.action_done
            && phase.is_counter_attack()
            && self.game.table.can_transition(phase, Phase::attack(defender))
    }

    /// Advance the phase if this step's actions allow it.
    ///
    /// Returns `false`, changing nothing, when no transition is available.
    pub fn done(&mut self) -> bool {
        let Some(next) = self.pending_transition() else {
            return false;
        };
        self.game.flags = ActionFlags::default();
        self.game.next_turn(next);
        true
    }

    fn pending_transition(&self) -> Option<Phase> {
        let phase = self.game.phase;
        let flags = self.game.flags;
        let table = &self.game.table;
        let (attacker, defender) = self.roles()?;

        // Taking up hands the attack back to the same attacker.
        let retry = Phase::attack(attacker);
        if flags.action_done && flags.take_up && phase.is_defend() && table.can_transition(phase, retry) {
            return Some(retry);
        }
        if flags.action_done && table.can_transition(phase, phase.next()) {
            return Some(phase.next());
        }
        let switch = Phase::attack(defender);
        if !flags.action_done && phase.is_counter_attack() && table.can_transition(phase, switch) {
            return Some(switch);
        }
        if flags.action_done && flags.pass && phase.is_defend() && table.can_transition(phase, phase.inverse()) {
            return Some(phase.inverse());
        }
        None
    }
}
