//! Information-Set Monte Carlo Tree Search for Regicide.
//!
//! ## Overview
//!
//! Every decision builds a fresh tree rooted at `Board::clone_and_randomize`
//! for the player to move, and each simulation determinizes again for the
//! player to move at the expanded node. The tree never depends on cards the
//! searcher cannot see.
//!
//! - **Arena tree**: nodes addressed by `NodeId`, each with its own `Board`
//! - **Selection**: uniform or UCB1 over mean ranking
//! - **Expansion/rollout**: uniform or heuristic move weighting
//! - **Reward shaping**: wins dominate; bosses felled and turns survived
//!   grade everything else
//! - **Budget**: iteration count, optional wall clock, and a dud breaker
//!
//! ## Usage
//!
//! ```rust
//! use regicide_ismcts::core::GameRng;
//! use regicide_ismcts::mcts::{MCTSConfig, MCTSSearch};
//! use regicide_ismcts::rules::Board;
//!
//! let mut rng = GameRng::new(7);
//! let mut board = Board::start_default(2, &mut rng).unwrap();
//!
//! let mut search = MCTSSearch::new(MCTSConfig::deterministic(50, 1));
//! let mv = search.search(&board).unwrap();
//! board.next_state(&mv, &mut rng).unwrap();
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::{HeuristicWeights, MCTSConfig, MovePolicy, RewardConfig, SelectionMode};
pub use node::{NodeId, SearchNode};
pub use policy::{
    choose_move, move_weight, rollout, score_rollout, Rollout, SelectionPolicy, UniformSelection,
    UCB1,
};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
