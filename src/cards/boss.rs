//! Boss cards: a face card carrying combat stats while it defends the castle.

use serde::{Deserialize, Serialize};

use super::card::{total_rank, Card, Suit};
use crate::core::error::{Error, Result};

/// The active castle defender.
///
/// Attack and health start from the card's rank and are worn down by plays.
/// Once defeated, only the embedded `Card` goes back into circulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    card: Card,
    attack: u32,
    health: u32,
}

impl Boss {
    /// Promote a face card to a boss. Non-face ranks are rejected.
    pub fn new(card: Card) -> Result<Self> {
        let (attack, health) = match card.rank() {
            11 => (10, 20),
            12 => (15, 30),
            13 => (20, 40),
            other => return Err(Error::Validation(format!("rank {other} cannot be a boss"))),
        };
        Ok(Self { card, attack, health })
    }

    #[must_use]
    pub fn card(&self) -> Card {
        self.card
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.card.suit()
    }

    #[must_use]
    pub fn attack(&self) -> u32 {
        self.attack
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Resolve a play against this boss.
    ///
    /// Spades (off-suit) lowers attack by the undoubled combo total, Clubs
    /// (off-suit) doubles the damage, then health drops, floored at zero.
    /// Returns `true` for a perfect hit: damage equal to remaining health.
    pub fn card_effect(&mut self, cards: &[Card]) -> bool {
        let mut damage = total_rank(cards);
        let suit = self.suit();
        let off_suit = |s: Suit| cards.iter().any(|c| c.suit() == s && s != suit);

        if off_suit(Suit::Spades) {
            self.attack = self.attack.saturating_sub(damage);
        }
        if off_suit(Suit::Clubs) {
            damage *= 2;
        }

        let perfect = damage == self.health;
        self.health = self.health.saturating_sub(damage);
        perfect
    }
}

impl std::fmt::Display for Boss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (atk {}, hp {})", self.card, self.attack, self.health)
    }
}
