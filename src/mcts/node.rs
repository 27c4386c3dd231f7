//! Search tree nodes.
//!
//! Nodes live in the `SearchTree` arena and refer to each other by `NodeId`.
//! Each node owns its own `Board` snapshot; no two nodes share mutable state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Move, PlayerId};
use crate::rules::{Board, Outcome};

/// Index into the `SearchTree` node arena.
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
    pub const fn raw(self) -> u32 {
        self.0
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

/// A node in the search tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Expanded children, in expansion order.
    pub children: SmallVec<[NodeId; 8]>,

    /// Depth in tree (root = 0).
    pub depth: u16,

    pub visits: u32,

    /// Sum of backpropagated rewards.
    pub ranking: f64,

    /// Move that led here from the parent (`None` at the root).
    pub action: Option<Move>,

    /// Legal moves not yet expanded.
    pub untried: Vec<Move>,

    /// Seat to move in `board`.
    pub to_move: PlayerId,

    /// `board.winner()` when the node was set up.
    pub outcome: Outcome,

    /// Game over or no legal move remains.
    pub is_terminal: bool,

    pub board: Board,
}

impl SearchNode {
    /// Node for `board`, reached from `parent` via `action`.
    pub fn new(parent: NodeId, depth: u16, board: Board, action: Option<Move>) -> Self {
        let mut node = Self {
            parent,
            children: SmallVec::new(),
            depth,
            visits: 0,
            ranking: 0.0,
            action,
            untried: Vec::new(),
            to_move: PlayerId::new(0),
            outcome: Outcome::Alive,
            is_terminal: false,
            board,
        };
        node.refresh_moves();
        node
    }

    /// Root node for `board`.
    pub fn root(board: Board) -> Self {
        Self::new(NodeId::NONE, 0, board, None)
    }

    /// Install `board` as this node's state and regenerate its untried moves.
    pub fn set_game_state(&mut self, board: Board, action: Option<Move>) {
        self.board = board;
        self.action = action;
        self.refresh_moves();
    }

    fn refresh_moves(&mut self) {
        self.to_move = self.board.current_player();
        self.outcome = self.board.winner();
        self.untried = if self.outcome.is_terminal() {
            Vec::new()
        } else {
            self.board.legal_moves()
        };
        self.is_terminal = self.outcome.is_terminal() || self.untried.is_empty();
    }

    /// Mean reward per visit.
    #[must_use]
    pub fn mean_ranking(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.ranking / f64::from(self.visits)
        }
    }

    #[must_use]
    pub fn has_untried(&self) -> bool {
        !self.untried.is_empty()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
