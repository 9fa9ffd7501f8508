//! Tree diagnostics.

use serde::{Deserialize, Serialize};

/// Shape of the tree under the current root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub node_count: usize,

    /// Deepest node, in absolute plies.
    pub max_depth: u32,

    pub expanded_count: usize,

    /// Nodes holding a finished game.
    pub terminal_count: usize,

    /// Expanded, non-terminal nodes that produced no children.
    pub dead_end_count: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            self.node_count.saturating_sub(1) as f64 / self.expanded_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branching_factor() {
        let stats = TreeStats {
            node_count: 7,
            expanded_count: 3,
            ..TreeStats::default()
        };
        assert!((stats.branching_factor() - 2.0).abs() < f64::EPSILON);
        assert_eq!(TreeStats::default().branching_factor(), 0.0);
    }
}
