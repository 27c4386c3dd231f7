//! Self-play: full games with the search deciding for every seat.
//!
//! - **SelfPlayRunner**: deals a seeded game and plays it to the end
//! - **GameRecord**: action log, per-decision visit counts, outcome
//! - **SelfPlaySummary**: win rate and bosses felled across many games
//!
//! ## Usage
//!
//! ```rust
//! use regicide_ismcts::mcts::MCTSConfig;
//! use regicide_ismcts::selfplay::{SelfPlayConfig, SelfPlayRunner};
//!
//! let config = SelfPlayConfig::new()
//!     .with_players(3)
//!     .with_search(MCTSConfig::deterministic(10, 1))
//!     .with_seed(5);
//!
//! let record = SelfPlayRunner::new(config).play_game().unwrap();
//! println!("{} after {} moves", record.outcome, record.game_length());
//! ```

pub mod record;
pub mod runner;

pub use record::{Decision, GameRecord, SelfPlaySummary};
pub use runner::{SelfPlayConfig, SelfPlayRunner};
