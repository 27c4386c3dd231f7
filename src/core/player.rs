//! Players: seat identifiers, per-seat storage, and the seat itself.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Turn order rotates through `PlayerId::next`.
//!
//! ## Player
//!
//! A hand plus the staged `played` buffer. Damage is absorbed by discarding
//! cards chosen by a `DiscardPolicy`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{Error, Result};
use super::rng::GameRng;
use crate::cards::{total_rank, Card, Suit};

/// Seat identifier. The first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use regicide_ismcts::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat storage indexed by `PlayerId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build from one entry per seat, in seat order.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Result of absorbing boss damage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The player survived by discarding these cards (possibly none).
    Absorbed(Vec<Card>),
    /// The hand could not cover the damage. The hand is left as it was.
    Died,
}

/// Chooses which card to discard next when absorbing damage.
pub trait DiscardPolicy {
    /// Index into `hand` of the card to give up. `hand` is never empty.
    /// An index past the end makes `Player::take_damage` fail.
    fn choose_discard(&mut self, hand: &[Card], remaining: u32, rng: &mut GameRng) -> usize;
}

/// Automated discarding that protects Diamonds and face cards.
///
/// Tiers, first non-empty wins: non-Diamond non-face cards, then
/// non-Diamond cards, then anything. Uniform within the tier.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoDiscard;

impl DiscardPolicy for AutoDiscard {
    fn choose_discard(&mut self, hand: &[Card], _remaining: u32, rng: &mut GameRng) -> usize {
        let tier = |keep: &dyn Fn(&Card) -> bool| -> Vec<usize> {
            hand.iter()
                .enumerate()
                .filter(|(_, c)| keep(c))
                .map(|(i, _)| i)
                .collect()
        };

        let mut candidates = tier(&|c| c.suit() != Suit::Diamonds && !c.is_face());
        if candidates.is_empty() {
            candidates = tier(&|c| c.suit() != Suit::Diamonds);
        }
        if candidates.is_empty() {
            return rng.gen_range_usize(0..hand.len());
        }
        candidates[rng.gen_range_usize(0..candidates.len())]
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hand: Vec<Card>,
    /// Cards played against the current boss, discarded when it falls.
    pub played: Vec<Card>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            played: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hand(name: impl Into<String>, hand: Vec<Card>) -> Self {
        Self {
            hand,
            ..Self::new(name)
        }
    }

    /// Total rank held in hand.
    #[must_use]
    pub fn health(&self) -> u32 {
        total_rank(&self.hand)
    }

    #[must_use]
    pub fn holds_suit(&self, suit: Suit) -> bool {
        self.hand.iter().any(|c| c.suit() == suit)
    }

    /// Move a card from hand to the played buffer.
    pub fn set_card_to_played(&mut self, card: Card) -> Result<()> {
        let pos = self
            .hand
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| Error::IllegalMove(format!("{card} is not in {}'s hand", self.name)))?;
        self.hand.remove(pos);
        self.played.push(card);
        Ok(())
    }

    /// Absorb `damage` by discarding cards.
    ///
    /// Fails with `InvalidArgument` if the policy picks an index outside the
    /// hand; the hand is left as it was.
    pub fn take_damage(
        &mut self,
        damage: u32,
        policy: &mut dyn DiscardPolicy,
        rng: &mut GameRng,
    ) -> Result<DamageOutcome> {
        if damage == 0 {
            return Ok(DamageOutcome::Absorbed(Vec::new()));
        }
        if damage >= self.health() {
            return Ok(DamageOutcome::Died);
        }

        let mut hand = self.hand.clone();
        let mut defence = 0;
        let mut discarded = Vec::new();
        while defence < damage {
            if hand.is_empty() {
                return Ok(DamageOutcome::Died);
            }
            let idx = policy.choose_discard(&hand, damage - defence, rng);
            if idx >= hand.len() {
                return Err(Error::InvalidArgument(format!(
                    "discard index {idx} out of range for a hand of {}",
                    hand.len()
                )));
            }
            let card = hand.remove(idx);
            defence += u32::from(card.rank());
            discarded.push(card);
        }
        self.hand = hand;
        Ok(DamageOutcome::Absorbed(discarded))
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(texts: &[&str]) -> Vec<Card> {
        texts.iter().map(|t| Card::parse(t).unwrap()).collect()
    }

    #[test]
    fn test_player_id_rotation() {
        assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
        assert_eq!(format!("{}", PlayerId::new(1)), "Player 1");
    }

    #[test]
    fn test_player_map_indexing() {
        let mut map = PlayerMap::from_vec(vec![10, 20]);
        map[PlayerId::new(1)] += 5;
        assert_eq!(map[PlayerId::new(1)], 25);
        assert_eq!(map.player_count(), 2);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], (PlayerId::new(0), &10));
    }

    #[test]
    fn test_health_and_played() {
        let mut player = Player::with_hand("Noah", cards(&["6C", "3H", "3C", "TD", "AS"]));
        assert_eq!(player.health(), 23);

        player.set_card_to_played(Card::parse("3H").unwrap()).unwrap();
        assert_eq!(player.hand.len(), 4);
        assert_eq!(player.played, cards(&["3H"]));

        let err = player.set_card_to_played(Card::parse("3H").unwrap());
        assert!(matches!(err, Err(Error::IllegalMove(_))));
    }

    #[test]
    fn test_take_damage_zero_is_noop() {
        let mut player = Player::with_hand("A", cards(&["2C"]));
        let out = player.take_damage(0, &mut AutoDiscard, &mut GameRng::new(1)).unwrap();
        assert_eq!(out, DamageOutcome::Absorbed(vec![]));
        assert_eq!(player.hand.len(), 1);
    }

    #[test]
    fn test_take_damage_lethal_leaves_hand() {
        let mut player = Player::with_hand("A", cards(&["6C", "3H"]));
        let out = player.take_damage(9, &mut AutoDiscard, &mut GameRng::new(1)).unwrap();
        assert_eq!(out, DamageOutcome::Died);
        assert_eq!(player.hand.len(), 2);
    }

    struct PastTheEnd;

    impl DiscardPolicy for PastTheEnd {
        fn choose_discard(&mut self, hand: &[Card], _remaining: u32, _rng: &mut GameRng) -> usize {
            hand.len()
        }
    }

    #[test]
    fn test_take_damage_rejects_out_of_range_discard() {
        let mut player = Player::with_hand("A", cards(&["6C", "3H", "TD"]));
        let out = player.take_damage(5, &mut PastTheEnd, &mut GameRng::new(1));
        assert!(matches!(out, Err(Error::InvalidArgument(_))));
        assert_eq!(player.hand, cards(&["6C", "3H", "TD"]));
    }

    #[test]
    fn test_take_damage_covers_amount() {
        let mut player = Player::with_hand("A", cards(&["6C", "3H", "3C", "TD", "AS"]));
        let DamageOutcome::Absorbed(discarded) =
            player.take_damage(5, &mut AutoDiscard, &mut GameRng::new(9)).unwrap()
        else {
            panic!("player should survive");
        };
        assert!(total_rank(&discarded) >= 5);
        assert_eq!(player.hand.len() + discarded.len(), 5);
    }

    #[test]
    fn test_auto_discard_protects_diamonds_and_faces() {
        let hand = cards(&["TD", "KS", "4H"]);
        let mut rng = GameRng::new(11);
        for _ in 0..20 {
            assert_eq!(AutoDiscard.choose_discard(&hand, 3, &mut rng), 2);
        }

        let hand = cards(&["TD", "KS"]);
        for _ in 0..20 {
            assert_eq!(AutoDiscard.choose_discard(&hand, 3, &mut rng), 1);
        }
    }
}
