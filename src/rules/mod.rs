//! Regicide rules.
//!
//! - `Board`: full game state, turn order, and the transition function
//! - `combos`: legal play enumeration
//! - `powers`: Hearts and Diamonds resolution
//! - `determinize`: information-set sampling for search
//! - `Outcome`: game status after the last action

pub mod board;
pub mod combos;
pub mod determinize;
pub mod outcome;
pub mod powers;

pub use board::Board;
pub use combos::{is_legal_combo, legal_plays};
pub use outcome::Outcome;
