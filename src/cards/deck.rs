//! Deck factories.
//!
//! A deck is an immutable set of unique cards. The three variants differ
//! only in the lowest rank they include.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};

/// Which rank subset a deck is built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    /// All 52 cards.
    Full,
    /// 36 cards: the four lowest ranks dropped (Six and up).
    #[default]
    Small,
    /// 20 cards: the eight lowest ranks dropped (Ten and up).
    Mini,
}

impl DeckKind {
    /// Number of low ranks dropped from the full deck.
    #[must_use]
    pub const fn dropped_ranks(self) -> usize {
        match self {
            DeckKind::Full => 0,
            DeckKind::Small => 4,
            DeckKind::Mini => 8,
        }
    }

    #[must_use]
    pub fn lowest_rank(self) -> Rank {
        Rank::ALL[self.dropped_ranks()]
    }
}

/// An immutable set of unique cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    kind: DeckKind,
    cards: OrdSet<Card>,
}

impl Deck {
    /// Build the deck for `kind` from the rank × suit cross product.
    #[must_use]
    pub fn new(kind: DeckKind) -> Self {
        let cards = Rank::ALL[kind.dropped_ranks()..]
            .iter()
            .flat_map(|&rank| Suit::ALL.iter().map(move |&suit| Card::new(rank, suit)))
            .collect();
        Self { kind, cards }
    }

    #[must_use]
    pub fn full() -> Self {
        Self::new(DeckKind::Full)
    }

    #[must_use]
    pub fn small() -> Self {
        Self::new(DeckKind::Small)
    }

    #[must_use]
    pub fn mini() -> Self {
        Self::new(DeckKind::Mini)
    }

    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    #[must_use]
    pub fn cards(&self) -> &OrdSet<Card> {
        &self.cards
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
}
