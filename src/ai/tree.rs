//! Lazily expanded, re-rootable game tree.
//!
//! ## Expansion
//!
//! Breadth-first from the root down to `root.depth + horizon`. Only `Player`
//! nodes branch; every other variant has exactly one `Player` child with the
//! roles swapped. Children are built by running the same [`Table`] rules the
//! live engine uses on a private copy of the parent's state.
//!
//! ## Evaluation
//!
//! - Finished games score `+1`/`-1` from the owner's point of view (`0` for
//!   a draw) and are final.
//! - Unexpanded nodes get a heuristic from hand composition.
//! - Expanded nodes take the plain mean of their children, and are final
//!   once every child is.
//!
//! ## Re-rooting
//!
//! `update_root` keeps only the chosen subtree, compacts the arena and tops
//! the expansion back up to the horizon below the new root.
//!
//! [`Table`]: crate::rules::Table

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use tracing::{debug, info};

use super::combinatorics::{combinations_up_to_k, grouped_moves, variations};
use super::config::TreeConfig;
use super::node::{Defenses, Node, NodeId, NodeKind};
use super::state::State;
use super::stats::TreeStats;
use crate::cards::{Card, CardVec, Hand, Rank, Suit};
use crate::game::Game;

/// Value of the best possible card: a trump ace.
pub const MAX_CARD_VALUE: i64 = 100 + Rank::Ace.value() as i64;

/// Arena-backed game tree owned by one player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tree {
    owner: String,
    config: TreeConfig,
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Empty tree for the player named `owner`. Call [`Tree::generate`]
    /// before using it.
    pub fn new(owner: impl Into<String>, config: TreeConfig) -> Self {
        Self {
            owner: owner.into(),
            config,
            nodes: Vec::new(),
            root: NodeId::NONE,
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    #[must_use]
    pub fn is_generated(&self) -> bool {
        !self.root.is_none()
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// # Panics
    ///
    /// Panics before the first `generate`.
    #[must_use]
    pub fn root_node(&self) -> &Node {
        self.get(self.root)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }

    /// Build a fresh tree from the live game, expand it to the horizon and
    /// evaluate it.
    ///
    /// # Panics
    ///
    /// Panics if the owner is not seated in `game`.
    pub fn generate(&mut self, game: &Game) {
        assert!(
            game.side_of(&self.owner).is_some(),
            "Tree owner must be seated in the game"
        );

        self.nodes.clear();
        self.nodes
            .push(Node::new(NodeKind::Entry, State::from_game(game), NodeId::NONE, 0));
        self.root = NodeId::new(0);
        self.generate_up_to_depth(self.config.horizon);

        let stats = self.stats();
        info!(
            owner = %self.owner,
            nodes = stats.node_count,
            dead_ends = stats.dead_end_count,
            root_eval = self.root_node().evaluation,
            "tree generated"
        );
    }

    fn generate_up_to_depth(&mut self, limit: u32) {
        let mut current_depth = self.root_node().depth;
        let mut waiting = VecDeque::from([self.root]);

        while let Some(id) = waiting.pop_front() {
            if self.config.max_nodes > 0 && self.nodes.len() >= self.config.max_nodes {
                debug!(nodes = self.nodes.len(), "node cap reached");
                break;
            }
            let depth = self.get(id).depth;
            if depth > limit {
                continue;
            }
            self.expand(id);
            if depth != current_depth {
                current_depth = depth;
                debug!(depth, "generating");
            }
            waiting.extend(self.get(id).children.iter().copied());
        }

        self.evaluate(self.root);
    }

    /// Generate the children of `id`. No-op on an already expanded node.
    pub fn expand(&mut self, id: NodeId) {
        if self.get(id).expanded {
            return;
        }
        let terminal = self.terminal_value(&self.get(id).state);
        let node = &mut self.nodes[id.index()];
        node.expanded = true;

        if let Some(value) = terminal {
            node.terminal = true;
            node.is_final = true;
            node.evaluation = value;
            return;
        }

        let children = match &node.kind {
            NodeKind::Entry => vec![(NodeKind::Player { after_defense: false }, node.state.clone())],
            NodeKind::Player { after_defense } => player_moves(&node.state, *after_defense),
            kind => {
                let after_defense = matches!(kind, NodeKind::Defense { .. });
                vec![(NodeKind::Player { after_defense }, node.state.swapped())]
            }
        };

        let depth = node.depth + 1;
        for (kind, state) in children {
            let child = NodeId::new(self.nodes.len() as u32);
            self.nodes.push(Node::new(kind, state, id, depth));
            self.nodes[id.index()].children.push(child);
        }
    }

    /// Score of `id`, refreshing every non-final node below it.
    pub fn evaluate(&mut self, id: NodeId) -> f32 {
        let node = self.get(id);
        if node.is_final && node.expanded {
            return node.evaluation;
        }

        if !node.expanded || node.children.is_empty() {
            let value = self.heuristic(&node.state);
            // An expanded node with no moves will never gain children.
            let dead_end = node.expanded;
            let node = &mut self.nodes[id.index()];
            node.evaluation = value;
            node.is_final = dead_end;
            return value;
        }

        let children = node.children.clone();
        let mut sum = 0.0_f64;
        let mut all_final = true;
        for child in &children {
            sum += f64::from(self.evaluate(*child));
            all_final &= self.get(*child).is_final;
        }

        let node = &mut self.nodes[id.index()];
        node.evaluation = (sum / children.len() as f64) as f32;
        node.is_final = all_final;
        node.evaluation
    }

    /// Hand-composition score of a position: the owner's hand strength minus
    /// the opponent's. An emptier hand is stronger, so positive favours the
    /// owner just as a terminal win does.
    #[must_use]
    pub fn heuristic(&self, state: &State) -> f32 {
        let trump = state.table.trump_suit();
        let (owner, opponent) = if state.player.name() == self.owner {
            (&state.player, &state.opponent)
        } else {
            (&state.opponent, &state.player)
        };
        hand_strength(&owner.hand, trump) - hand_strength(&opponent.hand, trump)
    }

    /// Final score of a finished game, `None` while it is still running.
    fn terminal_value(&self, state: &State) -> Option<f32> {
        if !state.table.stack().is_empty() {
            return None;
        }
        let win_for = |name: &str| if name == self.owner { 1.0 } else { -1.0 };
        match (state.player.hand.is_empty(), state.opponent.hand.is_empty()) {
            (true, true) => Some(0.0),
            (true, false) => Some(win_for(state.player.name())),
            (false, true) => Some(win_for(state.opponent.name())),
            (false, false) => None,
        }
    }

    /// Root child with the highest evaluation; the first one on ties.
    #[must_use]
    pub fn next_best_node(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for &child in self.children(self.root) {
            let evaluation = self.get(child).evaluation;
            if best.map_or(true, |(_, top)| evaluation > top) {
                best = Some((child, evaluation));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Root children followed by root grandchildren, in generation order.
    #[must_use]
    pub fn candidates(&self) -> Vec<NodeId> {
        let children = self.children(self.root);
        let mut candidates = children.to_vec();
        for &child in children {
            candidates.extend_from_slice(self.children(child));
        }
        candidates
    }

    /// Make `new_root` the root, dropping every node outside its subtree,
    /// then expand back out to the horizon.
    pub fn update_root(&mut self, new_root: NodeId) {
        if new_root != self.root {
            self.compact(new_root);
        }
        let limit = self.root_node().depth + self.config.horizon;
        self.generate_up_to_depth(limit);

        let root = self.root_node();
        info!(
            owner = %self.owner,
            kind = %root.kind,
            depth = root.depth,
            evaluation = root.evaluation,
            nodes = self.nodes.len(),
            "re-rooted"
        );
    }

    fn compact(&mut self, new_root: NodeId) {
        let mut order = Vec::new();
        let mut queue = VecDeque::from([new_root]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.get(id).children.iter().copied());
        }

        let mut remap = vec![NodeId::NONE; self.nodes.len()];
        for (index, old) in order.iter().enumerate() {
            remap[old.index()] = NodeId::new(index as u32);
        }

        let mut old_nodes: Vec<Option<Node>> = std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        self.nodes = order
            .iter()
            .filter_map(|old| old_nodes[old.index()].take())
            .map(|mut node| {
                node.parent = if node.parent.is_none() { NodeId::NONE } else { remap[node.parent.index()] };
                for child in &mut node.children {
                    *child = remap[child.index()];
                }
                node
            })
            .collect();
        self.root = NodeId::new(0);
        self.nodes[0].parent = NodeId::NONE;
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            expanded_count: self.nodes.iter().filter(|n| n.expanded).count(),
            terminal_count: self.nodes.iter().filter(|n| n.terminal).count(),
            dead_end_count: self.nodes.iter().filter(|n| n.is_dead_end()).count(),
        }
    }

    #[must_use]
    pub fn dead_end_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_dead_end())
            .map(|(id, _)| id)
            .collect()
    }

    /// Nodes reachable from the root, the root included.
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        if !self.is_generated() {
            return 0;
        }
        let mut total = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            total += 1;
            stack.extend_from_slice(self.children(id));
        }
        total
    }
}

fn card_value(card: &Card, trump: Suit) -> i64 {
    let rank = i64::from(card.rank.value());
    if card.suit == trump {
        100 + rank
    } else {
        rank
    }
}

/// Held cards plus one best-card value per empty slot, normalised to `[0, 1]`
/// for hands within their slots.
fn hand_strength(hand: &Hand, trump: Suit) -> f32 {
    let held: i64 = hand.iter().map(|card| card_value(card, trump)).sum();
    let slots = hand.slots() as i64;
    let len = hand.len() as i64;
    let scale = slots.max(len) * MAX_CARD_VALUE;
    if scale == 0 {
        return 1.0;
    }
    (held + (slots - len) * MAX_CARD_VALUE) as f32 / scale as f32
}

/// Moves available to `state.player`.
fn player_moves(state: &State, after_defense: bool) -> Vec<(NodeKind, State)> {
    let board = state.table.board();
    let hand: Vec<Card> = state.player.hand.iter().copied().collect();
    let cap = state.player.hand.len().min(state.opponent.hand.len());
    let mut moves = Vec::new();

    if board.has_live_attack() {
        moves.push(take_up(state));
        moves.extend(defenses(state, &hand));
    } else if board.is_empty() {
        for cards in grouped_moves(&hand, cap).into_iter().rev() {
            moves.extend(attack(state, cards));
        }
    } else {
        let on_board = state.table.ranks_on_board();
        let matching: Vec<Card> = hand.into_iter().filter(|card| on_board.contains(&card.rank)).collect();
        for cards in combinations_up_to_k(&matching, cap).into_iter().rev() {
            moves.extend(attack(state, cards.into_iter().collect()));
        }
        if after_defense {
            moves.push(draw(state));
        }
    }
    moves
}

fn attack(state: &State, cards: CardVec) -> Option<(NodeKind, State)> {
    let mut next = state.clone();
    if !next.table.attack(&mut next.player, &next.opponent, &cards) {
        return None;
    }
    Some((NodeKind::Attack { cards }, next))
}

/// The player takes the board; the taker refills first.
fn take_up(state: &State) -> (NodeKind, State) {
    let mut next = state.clone();
    next.table.take_up(&mut next.player);
    next.table.refill(&mut next.player, &mut next.opponent);
    (NodeKind::TakeUp, next)
}

/// Round over after a full defense; the finishing attacker refills first.
fn draw(state: &State) -> (NodeKind, State) {
    let mut next = state.clone();
    next.table.clear_board();
    next.table.refill(&mut next.player, &mut next.opponent);
    (NodeKind::Draw, next)
}

/// One child per ordered assignment of hand cards that beats every live
/// attacking card position by position.
fn defenses(state: &State, hand: &[Card]) -> Vec<(NodeKind, State)> {
    let attacking = state.table.board().attacking_cards();
    let mut moves = Vec::new();

    for assignment in variations(hand, attacking.len()) {
        let beats_all = attacking
            .iter()
            .zip(&assignment)
            .all(|(att, def)| state.table.beats(att, def));
        if !beats_all {
            continue;
        }

        let mut next = state.clone();
        let mut defended: Defenses = smallvec![];
        for (att, def) in attacking.iter().zip(&assignment) {
            if next.table.defend(&mut next.player, *att, *def) {
                defended.push((*att, *def));
            }
        }
        moves.push((NodeKind::Defense { defended }, next));
    }
    moves
}
