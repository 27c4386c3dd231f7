//! Playing cards: rank and suit.
//!
//! Rank 1 is the companion card (printed `A`), ranks 11/12/13 are the face
//! ranks J/Q/K. Cards order by rank first, then suit (`C < D < H < S`).

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Lowest legal rank (the companion).
pub const COMPANION_RANK: u8 = 1;

/// Highest rank found in the tavern at game start.
pub const MAX_TAVERN_RANK: u8 = 10;

/// Face ranks, which are the bosses.
pub const FACE_RANKS: [u8; 3] = [11, 12, 13];

const RANK_GLYPHS: &[u8; 14] = b"?A23456789TJQK";

/// Card suit. Declaration order is the tie-break order for cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All four suits in order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Parse a suit letter (`C`, `D`, `H`, `S`).
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'C' => Ok(Suit::Clubs),
            'D' => Ok(Suit::Diamonds),
            'H' => Ok(Suit::Hearts),
            'S' => Ok(Suit::Spades),
            other => Err(Error::Validation(format!("unrecognised suit '{other}'"))),
        }
    }

    /// Single-letter representation.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// An immutable playing card.
///
/// Field order matters: the derived ordering compares rank before suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// Create a card, rejecting ranks outside `[1, 13]`.
    pub fn new(rank: u8, suit: Suit) -> Result<Self> {
        if !(COMPANION_RANK..=13).contains(&rank) {
            return Err(Error::Validation(format!("invalid rank {rank}")));
        }
        Ok(Self { rank, suit })
    }

    /// Parse a two-character card such as `"AS"`, `"TH"` or `"KD"`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        let (Some(r), Some(s), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(Error::Validation(format!("malformed card '{text}'")));
        };
        let rank = RANK_GLYPHS
            .iter()
            .skip(1)
            .position(|&g| g as char == r)
            .map(|i| i as u8 + 1)
            .ok_or_else(|| Error::Validation(format!("invalid rank '{r}'")))?;
        Self::new(rank, Suit::from_char(s)?)
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Jack, Queen or King.
    #[must_use]
    pub const fn is_face(self) -> bool {
        self.rank >= 11
    }

    /// The wild rank that pairs with any other card.
    #[must_use]
    pub const fn is_companion(self) -> bool {
        self.rank == COMPANION_RANK
    }

    /// The standard 52-card deck in ascending order.
    #[must_use]
    pub fn full_deck() -> Vec<Card> {
        (COMPANION_RANK..=13)
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card { rank, suit }))
            .collect()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", RANK_GLYPHS[self.rank as usize] as char, self.suit)
    }
}

/// Sum of ranks over a set of cards.
#[must_use]
pub fn total_rank(cards: &[Card]) -> u32 {
    cards.iter().map(|c| u32::from(c.rank())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_validation() {
        assert!(Card::new(1, Suit::Spades).is_ok());
        assert!(Card::new(13, Suit::Hearts).is_ok());
        assert!(matches!(Card::new(0, Suit::Clubs), Err(Error::Validation(_))));
        assert!(matches!(Card::new(14, Suit::Clubs), Err(Error::Validation(_))));
        assert!(matches!(Suit::from_char('X'), Err(Error::Validation(_))));
    }

    #[test]
    fn test_card_ordering() {
        let two_spades = Card::new(2, Suit::Spades).unwrap();
        let three_clubs = Card::new(3, Suit::Clubs).unwrap();
        let three_hearts = Card::new(3, Suit::Hearts).unwrap();

        assert!(two_spades < three_clubs);
        assert!(three_clubs < three_hearts);
    }

    #[test]
    fn test_parse_and_display() {
        for text in ["AS", "2C", "TH", "JD", "QS", "KH"] {
            assert_eq!(Card::parse(text).unwrap().to_string(), text);
        }
        assert_eq!(Card::parse("AS").unwrap().rank(), 1);
        assert_eq!(Card::parse("TH").unwrap().rank(), 10);
        assert!(Card::parse("1S").is_err());
        assert!(Card::parse("KX").is_err());
        assert!(Card::parse("KHH").is_err());
    }

    #[test]
    fn test_full_deck() {
        let deck = Card::full_deck();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.iter().filter(|c| c.is_face()).count(), 12);
        assert_eq!(deck.iter().filter(|c| c.is_companion()).count(), 4);

        let mut sorted = deck.clone();
        sorted.sort();
        assert_eq!(sorted, deck);
    }
}
