//! Arena-based ISMCTS tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. The four
//! search phases are methods on the tree:
//!
//! - `select`: descend to a node with untried moves (or a leaf)
//! - `expand`: apply one untried move to a copy of the node's board
//! - `simulate`: determinize for the next player and play out
//! - `backpropagate`: add the reward to every node up to the root

use serde::{Deserialize, Serialize};

use super::config::MCTSConfig;
use super::node::{NodeId, SearchNode};
use super::policy::{choose_move, rollout, Rollout, SelectionPolicy};
use crate::cards::Suit;
use crate::core::{Error, GameRng, Move, Result};
use crate::rules::Board;

/// Arena of search nodes. The root, when present, is always `NodeId(0)`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Tree whose root holds `board`.
    pub fn new(board: Board) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(1024),
        };
        tree.nodes.push(SearchNode::root(board));
        tree
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node. The tree is empty until `set_game_state` is called.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    /// Install `board` at the root, discarding anything already there.
    pub fn set_game_state(&mut self, board: Board) -> NodeId {
        self.reset();
        self.alloc(SearchNode::root(board))
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    // === Search phases ===

    /// Walk down from `from` to the node the next expansion should target.
    ///
    /// A node with untried moves, or with no children, is selected. Otherwise
    /// `policy` picks among the children that still have untried moves; if
    /// none do, among non-terminal children with children of their own; if
    /// none qualify, among all children.
    pub fn select(&self, from: NodeId, policy: &dyn SelectionPolicy, rng: &mut GameRng) -> NodeId {
        let mut current = from;
        loop {
            let node = self.get(current);
            if node.is_leaf() || node.has_untried() {
                return current;
            }

            let children: Vec<(NodeId, &SearchNode)> =
                node.children.iter().map(|&id| (id, self.get(id))).collect();
            let mut candidates: Vec<(NodeId, &SearchNode)> =
                children.iter().copied().filter(|(_, c)| c.has_untried()).collect();
            if candidates.is_empty() {
                candidates = children
                    .iter()
                    .copied()
                    .filter(|(_, c)| !c.is_terminal && !c.is_leaf())
                    .collect();
            }
            if candidates.is_empty() {
                candidates = children;
            }

            current = policy.select(node, &candidates, rng);
        }
    }

    /// Expand one untried move of `id`.
    ///
    /// Returns `Ok(None)` when the node is terminal or has nothing left to
    /// try.
    pub fn expand(&mut self, id: NodeId, config: &MCTSConfig, rng: &mut GameRng) -> Result<Option<NodeId>> {
        let node = self.get(id);
        if node.is_terminal || !node.has_untried() {
            return Ok(None);
        }

        let idx = choose_move(config.expansion, &node.untried, &node.board, &config.heuristic, rng)
            .ok_or(Error::NoLegalMoves)?;
        let depth = node.depth + 1;
        let mut board = node.board.clone();
        let mv = self.get_mut(id).untried.remove(idx);
        board.next_state(&mv, rng)?;

        let child = self.alloc(SearchNode::new(id, depth, board, Some(mv)));
        self.get_mut(id).children.push(child);
        Ok(Some(child))
    }

    /// Play out from `id` on a determinization for the player to move.
    ///
    /// The node's own board is never touched.
    pub fn simulate(&self, id: NodeId, config: &MCTSConfig, rng: &mut GameRng) -> Result<Rollout> {
        let node = self.get(id);
        let root = &self.get(self.root()).board;

        let mover_holds_diamonds = node
            .board
            .actions()
            .last()
            .map_or(true, |a| node.board.player(a.actor).holds_suit(Suit::Diamonds));

        if node.outcome.is_terminal() {
            return Ok(Rollout::between(root, &node.board, node.outcome, mover_holds_diamonds));
        }

        let sample = node.board.clone_and_randomize(node.to_move, rng)?;
        let (end, outcome) = rollout(sample, config, rng)?;
        Ok(Rollout::between(root, &end, outcome, mover_holds_diamonds))
    }

    /// Add `reward` to `id` and every ancestor, counting one visit each.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let mut current = id;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.ranking += reward;
            node.visits += 1;
            current = node.parent;
        }
    }

    /// Child of `id` with the highest mean ranking; the first maximum wins.
    #[must_use]
    pub fn find_highest_ranking_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.get(id).children {
            let node = self.get(child);
            if node.visits == 0 {
                continue;
            }
            let mean = node.mean_ranking();
            if best.map_or(true, |(_, b)| mean > b) {
                best = Some((child, mean));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Move leading to each root child with its visits and mean ranking.
    #[must_use]
    pub fn root_statistics(&self) -> Vec<(Move, u32, f64)> {
        if self.is_empty() {
            return Vec::new();
        }
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&id| {
                let node = self.get(id);
                node.action
                    .clone()
                    .map(|mv| (mv, node.visits, node.mean_ranking()))
            })
            .collect()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let total_children: usize = self.nodes.iter().map(|n| n.children.len()).sum();
        let untried_moves: usize = self.nodes.iter().map(|n| n.untried.len()).sum();
        let interior = self.nodes.iter().filter(|n| !n.is_leaf()).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            interior_count: interior,
            total_children,
            untried_moves,
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,

    pub max_depth: u16,

    /// Nodes where the game is over or no move is legal.
    pub terminal_count: usize,

    /// Nodes with at least one child.
    pub interior_count: usize,

    pub total_children: usize,

    /// Moves still waiting to be expanded, summed over all nodes.
    pub untried_moves: usize,
}

impl TreeStats {
    /// Average children per interior node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.interior_count == 0 {
            0.0
        } else {
            self.total_children as f64 / self.interior_count as f64
        }
    }
}
