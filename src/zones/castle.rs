//! The castle: undefeated bosses plus the one currently in play.

use serde::{Deserialize, Serialize};

use super::pile::CardPile;
use crate::cards::{Boss, Card, Suit, FACE_RANKS};
use crate::core::error::{Error, Result};
use crate::core::rng::GameRng;

/// Castle deck. Jacks sit on top, Kings at the bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Castle {
    cards: CardPile<Card>,
    boss: Option<Boss>,
}

impl Castle {
    /// Build the twelve-card castle with each rank group shuffled on its own.
    pub fn create(rng: &mut GameRng) -> Result<Self> {
        let mut cards = Vec::with_capacity(12);
        for &rank in FACE_RANKS.iter().rev() {
            let mut group = Suit::ALL
                .into_iter()
                .map(|suit| Card::new(rank, suit))
                .collect::<Result<Vec<_>>>()?;
            rng.shuffle(&mut group);
            cards.extend(group);
        }
        Ok(Self {
            cards: CardPile::from_vec(cards),
            boss: None,
        })
    }

    /// Castle with explicit contents (bottom-to-top), for setting up positions.
    #[must_use]
    pub fn from_parts(cards: Vec<Card>, boss: Option<Boss>) -> Self {
        Self {
            cards: CardPile::from_vec(cards),
            boss,
        }
    }

    /// Reveal the next boss.
    pub fn draw_boss(&mut self) -> Result<&Boss> {
        if let Some(boss) = &self.boss {
            return Err(Error::DuplicateState(format!("boss {} already in play", boss.card())));
        }
        let card = self.cards.pop().ok_or(Error::EmptyPile("castle"))?;
        let boss = self.boss.insert(Boss::new(card)?);
        Ok(&*boss)
    }

    /// Resolve a play against the active boss. Returns the perfect-hit flag.
    pub fn strike(&mut self, cards: &[Card]) -> Result<bool> {
        let boss = self.boss.as_mut().ok_or_else(no_boss)?;
        Ok(boss.card_effect(cards))
    }

    /// Remove the active boss from play.
    pub fn take_boss(&mut self) -> Result<Boss> {
        self.boss.take().ok_or_else(no_boss)
    }

    #[must_use]
    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    /// Remaining undrawn bosses, bottom to top.
    #[must_use]
    pub fn remaining(&self) -> &[Card] {
        self.cards.as_slice()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle the remaining bosses, then restore draw order by rank.
    ///
    /// Ranks stay in draw order; suits within a rank are randomised.
    pub fn reshuffle_by_rank(&mut self, rng: &mut GameRng) {
        let mut cards = self.cards.as_slice().to_vec();
        rng.shuffle(&mut cards);
        cards.sort_by(|a, b| b.rank().cmp(&a.rank()));
        self.cards.replace(cards);
    }
}

fn no_boss() -> Error {
    Error::InvalidState("no boss in play".into())
}
