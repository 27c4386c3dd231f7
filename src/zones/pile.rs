//! LIFO card sequence shared by every pile.
//!
//! The top of a pile is the end of the backing `Vec`, so draws are `pop`.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;

/// Where cards are inserted into a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Drawn next.
    Top,
    /// Drawn last.
    Bottom,
}

/// Ordered stack of cards. Index 0 is the bottom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPile<T> {
    cards: Vec<T>,
}

impl<T> Default for CardPile<T> {
    fn default() -> Self {
        Self { cards: Vec::new() }
    }
}

impl<T> CardPile<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pile from bottom-to-top order.
    #[must_use]
    pub fn from_vec(cards: Vec<T>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Place a single card on top.
    pub fn push(&mut self, card: T) {
        self.cards.push(card);
    }

    /// Take the top card.
    pub fn pop(&mut self) -> Option<T> {
        self.cards.pop()
    }

    /// Insert a batch, keeping the batch's own bottom-to-top order.
    pub fn insert(&mut self, cards: impl IntoIterator<Item = T>, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.cards.extend(cards),
            ZonePosition::Bottom => {
                let mut batch: Vec<T> = cards.into_iter().collect();
                batch.append(&mut self.cards);
                self.cards = batch;
            }
        }
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Cards from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cards.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.cards
    }

    /// Replace the whole contents (bottom-to-top order).
    pub fn replace(&mut self, cards: Vec<T>) {
        self.cards = cards;
    }
}
