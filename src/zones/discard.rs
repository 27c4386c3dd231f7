//! Discard pile.

use serde::{Deserialize, Serialize};

use super::pile::{CardPile, ZonePosition};
use crate::cards::Card;
use crate::core::error::{Error, Result};
use crate::core::rng::GameRng;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    cards: CardPile<Card>,
}

impl Discard {
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: CardPile::from_vec(cards),
        }
    }

    pub fn draw(&mut self) -> Result<Card> {
        self.cards.pop().ok_or(Error::EmptyPile("discard"))
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) -> Result<()> {
        let cards: Vec<Card> = cards.into_iter().collect();
        if cards.is_empty() {
            return Err(Error::InvalidArgument("no cards to discard".into()));
        }
        self.cards.insert(cards, ZonePosition::Top);
        Ok(())
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        self.cards.shuffle(rng);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.cards.as_slice()
    }
}
