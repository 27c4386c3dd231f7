//! Moves and the action log.
//!
//! A move is either a yield or a non-empty, sorted set of cards played
//! together. The board records every transition as an `ActionRecord`; the
//! log alone decides whose turn it is.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{Error, Result};
use super::player::PlayerId;
use crate::cards::{total_rank, Card, Suit};

/// Cards in a single play. Combos never exceed four cards.
pub type PlayCards = SmallVec<[Card; 4]>;

/// A move available to the acting player.
///
/// ```
/// use regicide_ismcts::cards::Card;
/// use regicide_ismcts::core::Move;
///
/// let pair = Move::play(vec![Card::parse("3S").unwrap(), Card::parse("3D").unwrap()]).unwrap();
/// assert_eq!(pair.total_rank(), 6);
/// assert_eq!(pair.to_string(), "[3D 3S]");
/// assert!(Move::Yield.cards().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Take the boss's attack without playing.
    Yield,
    /// Play these cards together, sorted ascending.
    Play(PlayCards),
}

impl Move {
    /// Build a play from any card order. Empty plays are rejected.
    pub fn play(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut cards: PlayCards = cards.into_iter().collect();
        if cards.is_empty() {
            return Err(Error::InvalidArgument("a play needs at least one card".into()));
        }
        cards.sort();
        Ok(Move::Play(cards))
    }

    /// Play of a single card.
    #[must_use]
    pub fn single(card: Card) -> Self {
        let mut cards = PlayCards::new();
        cards.push(card);
        Move::Play(cards)
    }

    #[must_use]
    pub fn is_yield(&self) -> bool {
        matches!(self, Move::Yield)
    }

    /// Cards played; empty for a yield.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Move::Yield => &[],
            Move::Play(cards) => cards.as_slice(),
        }
    }

    #[must_use]
    pub fn total_rank(&self) -> u32 {
        total_rank(self.cards())
    }

    /// Whether any card in the play has this suit.
    #[must_use]
    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards().iter().any(|c| c.suit() == suit)
    }

    /// Distinct suits in the play, ascending.
    #[must_use]
    pub fn suits(&self) -> SmallVec<[Suit; 4]> {
        let mut suits: SmallVec<[Suit; 4]> = self.cards().iter().map(|c| c.suit()).collect();
        suits.sort();
        suits.dedup();
        suits
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Yield => write!(f, "yield"),
            Move::Play(cards) => {
                write!(f, "[")?;
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{card}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// One entry in the append-only action log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that moved.
    pub actor: PlayerId,

    /// The move taken.
    pub play: Move,

    /// The move brought the boss to zero health.
    pub boss_defeated: bool,

    /// The actor could not absorb the boss's attack.
    pub player_died: bool,
}

impl ActionRecord {
    #[must_use]
    pub fn new(actor: PlayerId, play: Move, boss_defeated: bool, player_died: bool) -> Self {
        Self {
            actor,
            play,
            boss_defeated,
            player_died,
        }
    }
}
