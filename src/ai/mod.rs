//! Game-tree AI.
//!
//! ## Key Types
//!
//! - `Tree`: Lazily expanded, re-rootable tree of hypothetical positions
//! - `Node` / `NodeKind`: One position and the action that produced it
//! - `State`: Table plus both players, from the side to act
//! - `AiPlayer`: Keeps a tree in step with the live game and plays from it
//! - `Match`: Drives a game between agents until it ends
//!
//! Expansion reuses the engine's `Table` rules on cloned states, so every
//! node holds a position the live engine can actually reach.

pub mod agent;
pub mod combinatorics;
pub mod config;
pub mod node;
pub mod player;
pub mod session;
pub mod state;
pub mod stats;
pub mod tree;

pub use agent::Agent;
pub use config::TreeConfig;
pub use node::{Defenses, Node, NodeId, NodeKind};
pub use player::{AiPlayer, Move};
pub use session::Match;
pub use state::State;
pub use stats::TreeStats;
pub use tree::Tree;
