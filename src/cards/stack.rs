//! The draw pile.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::deck::Deck;
use super::CardVec;
use crate::core::GameRng;

/// Shuffled draw pile built from a [`Deck`].
///
/// Cards are drawn from the front. The last card of the initial shuffle is
/// the trump card; it stays in the pile and is drawn last.
///
/// Invariant: `len() + drawn() == deck().len()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    deck: Deck,
    cards: Vector<Card>,
    drawn: usize,
}

impl Stack {
    /// Shuffle every card of `deck` into a new pile.
    pub fn shuffled(deck: Deck, rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = deck.cards().iter().copied().collect();
        rng.shuffle(&mut cards);
        Self {
            deck,
            cards: cards.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Build a pile with a fixed order. `cards` must be drawn from `deck`.
    ///
    /// Cards of the deck missing from `cards` count as already drawn.
    pub fn from_cards(deck: Deck, cards: impl IntoIterator<Item = Card>) -> Self {
        let cards: Vector<Card> = cards.into_iter().collect();
        debug_assert!(cards.iter().all(|c| deck.contains(c)), "stack card outside its deck");
        let drawn = deck.len().saturating_sub(cards.len());
        Self { deck, cards, drawn }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// How many cards have left the pile so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Remove up to `count` cards from the front.
    ///
    /// Returns fewer cards once the pile runs out; never fails.
    pub fn draw(&mut self, count: usize) -> CardVec {
        let mut drawn = CardVec::new();
        for _ in 0..count {
            match self.cards.pop_front() {
                Some(card) => {
                    self.drawn += 1;
                    drawn.push(card);
                }
                None => break,
            }
        }
        drawn
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
