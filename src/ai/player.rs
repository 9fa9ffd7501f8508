//! Tree-driven AI player.
//!
//! `AiPlayer` keeps its tree's root in step with the live game:
//!
//! - [`AiPlayer::resolve`] follows whatever happened since the last call by
//!   matching the live game against the root's children and grandchildren.
//! - [`AiPlayer::act`] picks the best child of the root, plays it through the
//!   engine's action surface and moves the root onto it.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::config::TreeConfig;
use super::node::{Defenses, NodeId, NodeKind};
use super::tree::Tree;
use crate::cards::{format_cards, CardVec};
use crate::error::AiError;
use crate::game::Game;

/// A move issued by an AI.
///
/// Everything except `Draw` still needs a `done()` from the caller to close
/// the step. `Draw` is itself the transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Attack(CardVec),
    Defend(Defenses),
    TakeUp,
    Draw,
}

impl Move {
    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, Move::Draw)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Attack(cards) => write!(f, "Attack({})", format_cards(cards)),
            Move::Defend(pairs) => {
                let pairs: Vec<String> = pairs.iter().map(|(att, def)| format!("{att}>{def}")).collect();
                write!(f, "Defend({})", pairs.join(" "))
            }
            Move::TakeUp => f.write_str("TakeUp"),
            Move::Draw => f.write_str("Draw"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AiPlayer {
    name: String,
    tree: Tree,
}

impl AiPlayer {
    /// AI for the seat named `name`. The tree is empty until
    /// [`AiPlayer::generate`].
    pub fn new(name: impl Into<String>, config: TreeConfig) -> Self {
        let name = name.into();
        let tree = Tree::new(name.clone(), config);
        Self { name, tree }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Build the tree from the live game.
    pub fn generate(&mut self, game: &Game) {
        self.tree.generate(game);
    }

    /// Move the root onto the node that matches the live game.
    ///
    /// Children are checked before grandchildren and the first match wins.
    /// A root without children has nothing to follow and is left alone.
    pub fn resolve(&mut self, game: &Game) -> Result<(), AiError> {
        if !self.tree.is_generated() {
            return Err(AiError::NotGenerated);
        }

        let candidates = self.tree.candidates();
        if candidates.is_empty() {
            return Ok(());
        }

        let found = candidates
            .iter()
            .copied()
            .find(|id| self.tree.get(*id).state.matches(game));
        match found {
            Some(id) => {
                debug!(player = %self.name, node = %id, kind = %self.tree.get(id).kind, "resolved");
                self.tree.update_root(id);
                Ok(())
            }
            None => {
                let root = self.tree.root_node();
                error!(
                    player = %self.name,
                    root = %root,
                    candidates = candidates.len(),
                    phase = %game.phase(),
                    "no tree node matches the live game"
                );
                Err(AiError::NoMatchingNode {
                    root: root.kind.to_string(),
                    candidates: candidates.len(),
                })
            }
        }
    }

    /// Play the best move available at the root.
    ///
    /// Decision points of this player below the root are stepped into first,
    /// so a root sitting on the opponent's last action still works. Returns
    /// `Ok(None)` when the root has no children.
    pub fn act(&mut self, game: &mut Game) -> Result<Option<Move>, AiError> {
        if !self.tree.is_generated() {
            return Err(AiError::NotGenerated);
        }

        let limit = self.tree.config().max_self_turns;
        let mut self_turns = 0;
        let best = loop {
            let Some(best) = self.tree.next_best_node() else {
                return Ok(None);
            };
            let node = self.tree.get(best);
            if !(node.kind.is_player() && node.actor() == self.name) {
                break best;
            }
            self_turns += 1;
            if self_turns > limit {
                return Err(AiError::SelfTurnLimit { limit });
            }
            self.tree.update_root(best);
        };

        let root = self.tree.root_node();
        if !(root.kind.is_player() && root.actor() == self.name) {
            return Err(self.rejected(best, "not this player's decision point"));
        }

        let action = self.issue(best, game)?;
        debug!(
            player = %self.name,
            action = %action,
            evaluation = self.tree.get(best).evaluation,
            "ai move"
        );
        self.tree.update_root(best);
        Ok(Some(action))
    }

    fn issue(&self, best: NodeId, game: &mut Game) -> Result<Move, AiError> {
        let phase = game.phase();
        let mut actions = game.actions();

        let (accepted, action) = match &self.tree.get(best).kind {
            NodeKind::Attack { cards } => (actions.attack(cards), Move::Attack(cards.clone())),
            NodeKind::Defense { defended } => (
                defended.iter().all(|(att, def)| actions.defend(*att, *def)),
                Move::Defend(defended.clone()),
            ),
            NodeKind::TakeUp => (actions.take_up(), Move::TakeUp),
            NodeKind::Draw => {
                if !actions.can_draw() {
                    return Err(self.rejected(best, "round cannot end yet"));
                }
                if !actions.done() {
                    return Err(AiError::TransitionRefused { phase });
                }
                (true, Move::Draw)
            }
            NodeKind::Entry | NodeKind::Player { .. } => {
                return Err(self.rejected(best, "node carries no action"));
            }
        };

        if accepted {
            Ok(action)
        } else {
            Err(self.rejected(best, &format!("engine refused in {phase}")))
        }
    }

    fn rejected(&self, node: NodeId, detail: &str) -> AiError {
        let kind = &self.tree.get(node).kind;
        error!(player = %self.name, node = %node, action = %kind, detail, "action rejected");
        AiError::RejectedAction {
            node,
            action: kind.to_string(),
            detail: detail.to_string(),
        }
    }
}
