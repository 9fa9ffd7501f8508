//! Turn engine: `Game` (phase machine, turn counter, win detection and the
//! read-only query surface) and `PlayerActions` (the gated action surface).

pub mod actions;
pub mod engine;

pub use actions::PlayerActions;
pub use engine::Game;
