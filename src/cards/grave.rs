//! Discard pile.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// Unordered, append-only set of discarded cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grave {
    cards: OrdSet<Card>,
}

impl Grave {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.cards.insert(card);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
