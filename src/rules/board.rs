//! The attacking board: attacking card -> optional defending card.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardVec, Rank};

/// Cards in play this round.
///
/// A key with no value is a live (undefended) attacking card. Iteration is
/// in card order, so the live attacking cards always come out in the same
/// sequence for the same board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    entries: OrdMap<Card, Option<Card>>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `card` is an attacking card on the board.
    #[must_use]
    pub fn contains_attack(&self, card: &Card) -> bool {
        self.entries.contains_key(card)
    }

    /// Whether `card` is on the board in either role.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.entries
            .iter()
            .any(|(attacking, defending)| attacking == card || defending.as_ref() == Some(card))
    }

    /// The defender of `attacking`: `None` if the card is not on the board,
    /// `Some(None)` if it is still live.
    #[must_use]
    pub fn get(&self, attacking: &Card) -> Option<Option<Card>> {
        self.entries.get(attacking).copied()
    }

    #[must_use]
    pub fn is_live(&self, attacking: &Card) -> bool {
        matches!(self.get(attacking), Some(None))
    }

    /// Undefended attacking cards, in board order.
    #[must_use]
    pub fn attacking_cards(&self) -> CardVec {
        self.entries
            .iter()
            .filter(|(_, defending)| defending.is_none())
            .map(|(attacking, _)| *attacking)
            .collect()
    }

    #[must_use]
    pub fn defending_cards(&self) -> CardVec {
        self.entries.values().filter_map(|defending| *defending).collect()
    }

    #[must_use]
    pub fn has_live_attack(&self) -> bool {
        self.entries.values().any(Option::is_none)
    }

    /// True when every attacking card has a defender. Vacuously true for an
    /// empty board.
    #[must_use]
    pub fn all_defended(&self) -> bool {
        self.entries.values().all(Option::is_some)
    }

    /// True when no attacking card has been defended yet.
    #[must_use]
    pub fn none_defended(&self) -> bool {
        self.entries.values().all(Option::is_none)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (Card, Option<Card>)> + '_ {
        self.entries.iter().map(|(attacking, defending)| (*attacking, *defending))
    }

    /// Every card on the board, attacking and defending.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.entries
            .iter()
            .flat_map(|(attacking, defending)| std::iter::once(*attacking).chain(*defending))
            .collect()
    }

    /// Ranks of the attacking cards only.
    pub fn attacking_ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.entries.keys().map(|card| card.rank)
    }

    pub(crate) fn add_attack(&mut self, card: Card) {
        self.entries.insert(card, None);
    }

    pub(crate) fn set_defense(&mut self, attacking: Card, defending: Card) {
        self.entries.insert(attacking, Some(defending));
    }

    /// Empty the board, returning every card that was on it.
    pub(crate) fn take_all(&mut self) -> Vec<Card> {
        let cards = self.cards();
        self.entries.clear();
        cards
    }
}
