//! Card piles.
//!
//! Each pile composes a `CardPile` rather than sharing a mutable base:
//! - `Castle`: undrawn bosses and the active boss
//! - `Tavern`: draw pile plus the perfect-hit boss overlay
//! - `Discard`: spent cards

pub mod castle;
pub mod discard;
pub mod pile;
pub mod tavern;

pub use castle::Castle;
pub use discard::Discard;
pub use pile::{CardPile, ZonePosition};
pub use tavern::Tavern;
