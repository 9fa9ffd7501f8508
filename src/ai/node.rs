//! Game-tree nodes.
//!
//! Nodes live in a flat arena owned by [`Tree`](super::Tree) and refer to
//! each other by [`NodeId`]. The variant records the action that produced
//! the node; every variant carries its own copy of the resulting [`State`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::state::State;
use crate::cards::{Card, CardVec};

/// Index into the tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Attacking card paired with the card that beat it.
pub type Defenses = SmallVec<[(Card, Card); 6]>;

/// What produced a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The position the tree was generated from.
    Entry,
    /// A decision point for `state.player`.
    Player {
        /// Reached straight after a full defense, so ending the round is an
        /// option.
        after_defense: bool,
    },
    /// `cards` were played as new attacks.
    Attack { cards: CardVec },
    /// Every live attacking card was beaten, pairwise.
    Defense { defended: Defenses },
    /// The defender took the board and both hands were refilled.
    TakeUp,
    /// The round ended after a full defense; board cleared, hands refilled.
    Draw,
}

impl NodeKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Entry => "Entry",
            NodeKind::Player { .. } => "Player",
            NodeKind::Attack { .. } => "Attack",
            NodeKind::Defense { .. } => "Defense",
            NodeKind::TakeUp => "TakeUp",
            NodeKind::Draw => "Draw",
        }
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self, NodeKind::Player { .. })
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,

    /// Position after this node's action.
    pub state: State,

    /// Parent node (NONE for the root).
    pub parent: NodeId,

    pub children: SmallVec<[NodeId; 8]>,

    /// Plies from the position the tree was first generated from. Stays
    /// absolute across re-rooting.
    pub depth: u32,

    /// Children have been generated.
    pub expanded: bool,

    /// The state is a finished game.
    pub terminal: bool,

    /// `evaluation` will not change any more.
    pub is_final: bool,

    /// Last computed score; positive favours the tree owner.
    pub evaluation: f32,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind, state: State, parent: NodeId, depth: u32) -> Self {
        Self {
            kind,
            state,
            parent,
            children: SmallVec::new(),
            depth,
            expanded: false,
            terminal: false,
            is_final: false,
            evaluation: 0.0,
        }
    }

    /// Name of the player deciding at this node.
    #[inline]
    #[must_use]
    pub fn actor(&self) -> &str {
        self.state.player.name()
    }

    /// Expanded without producing any children and not a finished game.
    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.expanded && self.children.is_empty() && !self.terminal
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(depth={}; eval={:.3}; {})", self.kind, self.depth, self.evaluation, self.state)
    }
}
