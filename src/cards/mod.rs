//! Card system: values, decks and the card containers of a game.
//!
//! ## Key Types
//!
//! - `Card`: Immutable `(rank, suit)` value
//! - `Deck`: Immutable set of unique cards (`Full`, `Small`, `Mini`)
//! - `Stack`: Shuffled draw pile; its last card is the trump
//! - `Hand`: Fixed-slot set of cards held by a player
//! - `Grave`: Discarded cards
//!
//! Every container is backed by `im` collections, so cloning one for a
//! search-tree snapshot shares structure instead of copying cards.

pub mod card;
pub mod deck;
pub mod grave;
pub mod hand;
pub mod stack;

use smallvec::SmallVec;

pub use card::{Card, CardColor, Rank, Suit};
pub use deck::{Deck, DeckKind};
pub use grave::Grave;
pub use hand::Hand;
pub use stack::Stack;

/// Cards of a single move. Stays inline up to a full default hand.
pub type CardVec = SmallVec<[Card; 6]>;

/// Space-separated card list for log lines, e.g. `H10 SA`.
#[must_use]
pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
