//! Core engine types: errors, players, moves, RNG, configuration.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{ActionRecord, Move, PlayCards};
pub use config::GameConfig;
pub use error::{Error, Result};
pub use player::{AutoDiscard, DamageOutcome, DiscardPolicy, Player, PlayerId, PlayerMap};
pub use rng::GameRng;
