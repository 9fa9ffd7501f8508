//! Game-tree search parameters.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Plies expanded beyond the current root (default: 10).
    pub horizon: u32,

    /// Stop expanding once the arena holds this many nodes (0 = unlimited).
    /// Unexpanded nodes keep their heuristic score and are picked up again
    /// after the next re-root.
    pub max_nodes: usize,

    /// Consecutive own decision points `act` may walk through before giving
    /// up on a malformed tree.
    pub max_self_turns: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            horizon: 10,
            max_nodes: 0,
            max_self_turns: 32,
        }
    }
}

impl TreeConfig {
    #[must_use]
    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    #[must_use]
    pub fn with_max_self_turns(mut self, limit: u32) -> Self {
        self.max_self_turns = limit;
        self
    }
}
