//! A player's hand.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// Fixed-capacity set of unique cards.
///
/// `slots` is the capacity refills aim for. Taking up the board can push a
/// hand past its slots; `missing()` then reports zero so refills never
/// overdraw. Two hands are equal iff they have the same slots and cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: usize,
    cards: OrdSet<Card>,
}

impl Hand {
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            cards: OrdSet::new(),
        }
    }

    pub fn with_cards(slots: usize, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            slots,
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn slots(&self) -> usize {
        self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Free slots a refill should fill.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.slots.saturating_sub(self.cards.len())
    }

    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    #[must_use]
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        cards.iter().all(|card| self.cards.contains(card))
    }

    /// The card at `index` in rank order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.iter().nth(index).copied()
    }

    #[must_use]
    pub fn cards(&self) -> &OrdSet<Card> {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Add cards. Cards already held are ignored.
    pub fn take(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.cards.insert(card);
        }
    }

    /// Remove cards. Cards not held are ignored.
    pub fn play(&mut self, cards: &[Card]) {
        for card in cards {
            self.cards.remove(card);
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hand(slots={}; cards=[", self.slots)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "])")
    }
}
