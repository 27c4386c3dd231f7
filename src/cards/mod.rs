//! Card and boss value types.
//!
//! - `Card`: immutable rank/suit pair with a total order
//! - `Boss`: a face card embedded in combat stats

pub mod boss;
pub mod card;

pub use boss::Boss;
pub use card::{total_rank, Card, Suit, COMPANION_RANK, FACE_RANKS, MAX_TAVERN_RANK};
