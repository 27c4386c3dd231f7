//! # regicide-ismcts
//!
//! A rules engine for the cooperative card game Regicide, with an
//! Information-Set Monte Carlo Tree Search player.
//!
//! ## Design Principles
//!
//! 1. **Cheap clones**: the board keeps its action log in persistent
//!    structures, so search can copy it once per node
//! 2. **Hidden information**: search never sees the true deal; every rollout
//!    runs on a determinized copy consistent with one seat's view
//! 3. **Deterministic**: all shuffles and choices draw from a seeded
//!    ChaCha stream, so games and searches replay exactly
//! 4. **Fail loudly**: illegal moves and broken card conservation are errors,
//!    never silently repaired
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                   SelfPlayRunner                  │
//! ├───────────────────────────────────────────────────┤
//! │  MCTSSearch  │  SearchTree  │  SelectionPolicy    │
//! ├───────────────────────────────────────────────────┤
//! │  Board: turns, combat, suit powers, determinize   │
//! ├───────────────────────────────────────────────────┤
//! │  Castle  │  Tavern  │  Discard  │  Players        │
//! ├───────────────────────────────────────────────────┤
//! │  Card  │  Boss  │  Move  │  GameRng  │  Error     │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`core`]: errors, players, moves, configuration, RNG
//! - [`cards`]: card and boss value types
//! - [`zones`]: the castle, tavern and discard piles
//! - [`rules`]: the board, legal plays, suit powers, determinization
//! - [`mcts`]: the ISMCTS search
//! - [`selfplay`]: full games with the search at every seat
//!
//! ## Example
//!
//! ```rust
//! use regicide_ismcts::{Board, GameRng, MCTSConfig, MCTSSearch};
//!
//! let mut rng = GameRng::new(7);
//! let mut board = Board::start_default(2, &mut rng).unwrap();
//!
//! let mut search = MCTSSearch::new(MCTSConfig::deterministic(30, 7));
//! let mv = search.search(&board).unwrap();
//! board.next_state(&mv, &mut rng).unwrap();
//!
//! assert_eq!(board.actions().len(), 1);
//! ```

pub mod cards;
pub mod core;
pub mod mcts;
pub mod rules;
pub mod selfplay;
pub mod zones;

// Re-exports for convenience
pub use crate::cards::{Boss, Card, Suit};
pub use crate::core::{
    ActionRecord, AutoDiscard, DiscardPolicy, Error, GameConfig, GameRng, Move, Player, PlayerId,
    PlayerMap, Result,
};
pub use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats, SearchTree};
pub use crate::rules::{Board, Outcome};
pub use crate::selfplay::{GameRecord, SelfPlayConfig, SelfPlayRunner};
pub use crate::zones::{Castle, Discard, Tavern};
