//! The seam between the match driver and whatever plays a seat.

use super::player::{AiPlayer, Move};
use crate::error::AiError;
use crate::game::Game;

/// A participant driven by [`Match`](super::Match).
///
/// The driver calls `generate` once before the first move, `act` whenever
/// the agent's seat holds the turn and `resolve` on every agent after each
/// completed step.
pub trait Agent: Send {
    /// Seat name this agent plays.
    fn name(&self) -> &str;

    fn generate(&mut self, game: &Game);

    /// Catch up with the live game.
    fn resolve(&mut self, game: &Game) -> Result<(), AiError>;

    /// Issue one move. `Ok(None)` means nothing is available.
    fn act(&mut self, game: &mut Game) -> Result<Option<Move>, AiError>;
}

impl Agent for AiPlayer {
    fn name(&self) -> &str {
        AiPlayer::name(self)
    }

    fn generate(&mut self, game: &Game) {
        AiPlayer::generate(self, game);
    }

    fn resolve(&mut self, game: &Game) -> Result<(), AiError> {
        AiPlayer::resolve(self, game)
    }

    fn act(&mut self, game: &mut Game) -> Result<Option<Move>, AiError> {
        AiPlayer::act(self, game)
    }
}
