//! Error types for the AI layer and the match driver.
//!
//! Rule violations in the engine are not errors: actions return `false` and
//! leave the game untouched. Errors only arise when an AI's tree no longer
//! agrees with the live game or a match cannot make progress.

use thiserror::Error;

use crate::ai::NodeId;
use crate::rules::Phase;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    /// No node one or two plies below the root matches the live game.
    #[error("no tree node matches the live game (root {root}, {candidates} candidates)")]
    NoMatchingNode { root: String, candidates: usize },

    /// The engine refused the move stored in the chosen node.
    #[error("engine rejected {action} from {node}: {detail}")]
    RejectedAction {
        node: NodeId,
        action: String,
        detail: String,
    },

    /// `done()` declined to leave the current phase.
    #[error("engine refused to leave {phase}")]
    TransitionRefused { phase: Phase },

    /// The tree kept handing the decision back to its owner.
    #[error("walked through {limit} own decision points without acting")]
    SelfTurnLimit { limit: u32 },

    #[error("tree has not been generated")]
    NotGenerated,
}

impl AiError {
    /// Tree and live game have drifted apart.
    #[must_use]
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            AiError::NoMatchingNode { .. } | AiError::RejectedAction { .. } | AiError::TransitionRefused { .. }
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("match still running after {limit} turns")]
    TurnLimit { limit: u32 },

    #[error("no agent seated for {name}")]
    NoAgent { name: String },

    /// The agent holding the turn had no move while the game was running.
    #[error("{name} has no move in {phase}")]
    Stalled { name: String, phase: Phase },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desync_classification() {
        assert!(AiError::NoMatchingNode { root: "Entry".into(), candidates: 3 }.is_desync());
        assert!(AiError::TransitionRefused { phase: Phase::Player1Defend }.is_desync());
        assert!(!AiError::NotGenerated.is_desync());
        assert!(!AiError::SelfTurnLimit { limit: 4 }.is_desync());
    }

    #[test]
    fn test_messages() {
        let err = AiError::TransitionRefused { phase: Phase::Player2Attack };
        assert_eq!(err.to_string(), "engine refused to leave PLAYER2_ATTACK");

        let err: MatchError = AiError::NotGenerated.into();
        assert_eq!(err.to_string(), "tree has not been generated");
    }
}
