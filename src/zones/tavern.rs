//! The tavern: draw pile of non-face cards plus an overlay of perfectly
//! defeated bosses that are drawn first.

use serde::{Deserialize, Serialize};

use super::pile::{CardPile, ZonePosition};
use crate::cards::{Card, Suit, COMPANION_RANK, MAX_TAVERN_RANK};
use crate::core::error::{Error, Result};
use crate::core::rng::GameRng;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tavern {
    cards: CardPile<Card>,
    overlay: CardPile<Card>,
}

impl Tavern {
    /// The forty cards of rank 1..=10, shuffled.
    pub fn create(rng: &mut GameRng) -> Result<Self> {
        let mut cards = (COMPANION_RANK..=MAX_TAVERN_RANK)
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
            .collect::<Result<Vec<_>>>()?;
        rng.shuffle(&mut cards);
        Ok(Self {
            cards: CardPile::from_vec(cards),
            overlay: CardPile::new(),
        })
    }

    /// Tavern with explicit contents (bottom-to-top).
    #[must_use]
    pub fn from_parts(cards: Vec<Card>, overlay: Vec<Card>) -> Self {
        Self {
            cards: CardPile::from_vec(cards),
            overlay: CardPile::from_vec(overlay),
        }
    }

    /// Draw from the overlay first, then the main stack.
    pub fn draw(&mut self) -> Result<Card> {
        self.overlay
            .pop()
            .or_else(|| self.cards.pop())
            .ok_or(Error::EmptyPile("tavern"))
    }

    /// Slide cards under the main stack.
    pub fn add_cards_bottom(&mut self, cards: Vec<Card>) -> Result<()> {
        if cards.is_empty() {
            return Err(Error::InvalidArgument("no cards to add to tavern".into()));
        }
        self.cards.insert(cards, ZonePosition::Bottom);
        Ok(())
    }

    /// Place a perfectly defeated boss face-up on top.
    pub fn add_boss(&mut self, card: Card) -> Result<()> {
        if !card.is_face() {
            return Err(Error::InvalidArgument(format!("{card} is not a boss card")));
        }
        self.overlay.push(card);
        Ok(())
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cards.is_empty() && self.overlay.is_empty()
    }

    /// Main stack, bottom to top.
    #[must_use]
    pub fn main_stack(&self) -> &[Card] {
        self.cards.as_slice()
    }

    /// Visible boss overlay, bottom to top.
    #[must_use]
    pub fn overlay(&self) -> &[Card] {
        self.overlay.as_slice()
    }

    pub(crate) fn replace_main_stack(&mut self, cards: Vec<Card>) {
        self.cards.replace(cards);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tavern_create() {
        let tavern = Tavern::create(&mut GameRng::new(5)).unwrap();
        assert_eq!(tavern.main_stack().len(), 40);
        assert!(tavern.main_stack().iter().all(|c| c.rank() <= 10));
        assert!(tavern.overlay().is_empty());
    }

    #[test]
    fn test_overlay_drawn_first() {
        let mut tavern = Tavern::create(&mut GameRng::new(5)).unwrap();
        let queen = Card::parse("QH").unwrap();
        tavern.add_boss(queen).unwrap();

        assert_eq!(tavern.draw().unwrap(), queen);
        assert!(tavern.overlay().is_empty());
        assert_eq!(tavern.main_stack().len(), 40);
    }

    #[test]
    fn test_add_boss_rejects_non_face() {
        let mut tavern = Tavern::default();
        assert!(matches!(
            tavern.add_boss(Card::parse("5H").unwrap()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_draw() {
        let mut tavern = Tavern::from_parts(vec![Card::parse("2C").unwrap()], vec![]);
        assert!(tavern.draw().is_ok());
        assert!(tavern.is_exhausted());
        assert!(matches!(tavern.draw(), Err(Error::EmptyPile("tavern"))));
    }

    #[test]
    fn test_bottom_insert_drawn_last() {
        let top = Card::parse("9S").unwrap();
        let mut tavern = Tavern::from_parts(vec![top], vec![]);
        tavern.add_cards_bottom(vec![Card::parse("2C").unwrap()]).unwrap();
        assert_eq!(tavern.draw().unwrap(), top);
    }
}
