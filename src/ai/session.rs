//! Match driver: steps a [`Game`] between agents until it ends.
//!
//! One step is one decision by the side holding the turn:
//!
//! 1. the agent for that seat acts;
//! 2. the driver closes the step with `done()` (a `Draw` already did);
//! 3. every agent resolves against the new position.
//!
//! Seats without an agent are driven from outside through
//! [`Match::game_mut`] followed by [`Match::sync`].

use tracing::{info, warn};

use super::agent::Agent;
use super::player::Move;
use crate::error::{AiError, MatchError};
use crate::game::Game;
use crate::rules::Phase;

pub struct Match {
    game: Game,
    agents: Vec<Box<dyn Agent>>,
    started: bool,
}

impl Match {
    /// # Panics
    ///
    /// Panics if two agents claim the same seat or an agent's name is not
    /// seated in `game`.
    pub fn new(game: Game, agents: Vec<Box<dyn Agent>>) -> Self {
        for (i, agent) in agents.iter().enumerate() {
            assert!(
                game.side_of(agent.name()).is_some(),
                "Agent {} is not seated in the game",
                agent.name()
            );
            assert!(
                agents[..i].iter().all(|other| other.name() != agent.name()),
                "Agent {} seated twice",
                agent.name()
            );
        }
        Self {
            game,
            agents,
            started: false,
        }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Direct access for seats without an agent. Call [`Match::sync`] after
    /// closing the step.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    #[must_use]
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Generate every agent's tree. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        for agent in &mut self.agents {
            agent.generate(&self.game);
        }
        self.started = true;
        info!(
            agents = self.agents.len(),
            phase = %self.game.phase(),
            "match driver started"
        );
    }

    /// Let every agent catch up with the live game.
    pub fn sync(&mut self) -> Result<(), MatchError> {
        if !self.started {
            self.start();
            return Ok(());
        }
        if self.game.is_over() {
            return Ok(());
        }
        for agent in &mut self.agents {
            agent.resolve(&self.game)?;
        }
        Ok(())
    }

    /// Play one decision for the side holding the turn.
    ///
    /// Returns `Ok(None)` once the game is over.
    pub fn step(&mut self) -> Result<Option<Move>, MatchError> {
        self.start();
        let phase = self.game.phase();
        let Some(side) = phase.turn() else {
            return Ok(None);
        };
        let name = self.game.player(side).name().to_string();

        let agent = self
            .agents
            .iter_mut()
            .find(|agent| agent.name() == name)
            .ok_or_else(|| MatchError::NoAgent { name: name.clone() })?;

        let Some(action) = agent.act(&mut self.game)? else {
            if self.game.is_over() {
                return Ok(None);
            }
            warn!(player = %name, phase = %phase, "agent has no move");
            return Err(MatchError::Stalled { name, phase });
        };

        if !action.is_draw() && !self.game.actions().done() && !self.game.is_over() {
            return Err(AiError::TransitionRefused { phase: self.game.phase() }.into());
        }

        self.sync()?;
        Ok(Some(action))
    }

    /// Step until the game ends or `max_turns` engine turns have passed.
    pub fn run(&mut self, max_turns: u32) -> Result<Phase, MatchError> {
        self.start();
        while !self.game.is_over() {
            if self.game.turn() >= max_turns {
                return Err(MatchError::TurnLimit { limit: max_turns });
            }
            self.step()?;
        }

        match self.game.winner() {
            Some(side) => info!(winner = self.game.player(side).name(), turn = self.game.turn(), "match over"),
            None => info!(turn = self.game.turn(), "match over in a draw"),
        }
        Ok(self.game.phase())
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let agents: Vec<&str> = self.agents.iter().map(|agent| agent.name()).collect();
        f.debug_struct("Match")
            .field("phase", &self.game.phase())
            .field("turn", &self.game.turn())
            .field("agents", &agents)
            .field("started", &self.started)
            .finish()
    }
}
