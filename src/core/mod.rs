//! Core types shared by the rules engine and the AI: players, seats, RNG and
//! match configuration.

pub mod config;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use player::{Player, PlayerKind, Side};
pub use rng::GameRng;
