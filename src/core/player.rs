//! Players and table sides.
//!
//! ## Side
//!
//! Which seat a player occupies (`One` or `Two`). Phases name their acting
//! side; `Side::other` gives the opponent.
//!
//! ## Player
//!
//! A name and a hand. The name is the identity key: game-tree states are
//! matched back to live players by name, never by reference.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Hand, Stack};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::One => write!(f, "Player 1"),
            Side::Two => write!(f, "Player 2"),
        }
    }
}

/// Who drives a player's moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Moves come from outside (a UI, a test).
    #[default]
    Passive,
    /// Moves come from a game tree.
    Ai,
}

/// A named participant holding a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    pub hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hand: Hand::default(),
        }
    }

    pub fn passive(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Passive)
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Ai)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.kind == PlayerKind::Ai
    }

    /// Replace the hand with a fresh one holding `cards`.
    pub fn set_hand(&mut self, slots: usize, cards: impl IntoIterator<Item = Card>) {
        self.hand = Hand::with_cards(slots, cards);
    }

    /// Draw until the hand's slots are filled or the stack runs out.
    pub fn draw_from(&mut self, stack: &mut Stack) {
        let cards = stack.draw(self.hand.missing());
        self.hand.take(cards);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player(name='{}'; hand={})", self.name, self.hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::core::GameRng;

    #[test]
    fn test_side_other() {
        assert_eq!(Side::One.other(), Side::Two);
        assert_eq!(Side::Two.other(), Side::One);
        assert_eq!(Side::One.to_string(), "Player 1");
    }

    #[test]
    fn test_player_kinds() {
        assert!(Player::ai("bot").is_ai());
        assert!(!Player::passive("human").is_ai());
        assert_eq!(Player::passive("human").kind(), PlayerKind::Passive);
    }

    #[test]
    fn test_draw_fills_missing_slots() {
        let mut stack = Stack::shuffled(Deck::mini(), &mut GameRng::new(1));
        let mut player = Player::passive("alice");
        player.set_hand(3, stack.draw(1));
        assert_eq!(player.hand.len(), 1);

        player.draw_from(&mut stack);
        assert_eq!(player.hand.len(), 3);
        assert_eq!(stack.len(), 17);

        player.draw_from(&mut stack);
        assert_eq!(player.hand.len(), 3);
        assert_eq!(stack.len(), 17);
    }

    #[test]
    fn test_draw_from_empty_stack() {
        let mut stack = Stack::from_cards(Deck::mini(), []);
        let mut player = Player::passive("bob");
        player.set_hand(6, []);

        player.draw_from(&mut stack);
        assert!(player.hand.is_empty());
    }
}
