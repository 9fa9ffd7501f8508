//! # rust-durak
//!
//! A two-player Durak-style card game engine with a lazily expanded
//! game-tree AI.
//!
//! ## Design Principles
//!
//! 1. **One Rule Book**: `Table` owns every legality check and board
//!    mutation. The live engine and the AI's tree expansion both go through
//!    it, so the two can never disagree about what a move does.
//!
//! 2. **Rejected, Not Failed**: An illegal action returns `false` and leaves
//!    the game untouched. `Result` is reserved for the AI drifting out of
//!    step with the game.
//!
//! 3. **Persistent Data Structures**: Hands, stack, board and grave are
//!    `im-rs` collections, so every tree node can own its own copy of the
//!    position cheaply.
//!
//! ## Modules
//!
//! - `core`: Players, seats, RNG, match configuration
//! - `cards`: Cards, decks and card containers
//! - `rules`: Phase machine, board and table rules
//! - `game`: Turn engine and the gated action surface
//! - `ai`: Game tree, AI player and match driver
//! - `error`: AI and match errors

pub mod core;
pub mod cards;
pub mod rules;
pub mod game;
pub mod ai;
pub mod error;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, Player, PlayerKind, Side};

pub use crate::cards::{Card, CardColor, CardVec, Deck, DeckKind, Grave, Hand, Rank, Stack, Suit};

pub use crate::rules::{Board, Phase, Table};

pub use crate::game::{Game, PlayerActions};

pub use crate::ai::{
    Agent, AiPlayer, Match, Move,
    Node, NodeId, NodeKind, State,
    Tree, TreeConfig, TreeStats,
};

pub use crate::error::{AiError, MatchError};
