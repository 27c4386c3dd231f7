//! Legal play enumeration.
//!
//! A play is one of:
//! - a single card
//! - a companion (rank 1) plus any non-companion card
//! - two to four cards of one rank whose total stays within 10
//!   (pairs of 2-5, triples of 2-3, the four 2s)
//!
//! A yield is legal unless every other player has yielded in a row.

use crate::cards::Card;
use crate::core::Move;

/// Largest same-rank group allowed for `rank`.
#[must_use]
pub fn max_group_size(rank: u8) -> usize {
    match rank {
        2 => 4,
        3 => 3,
        4 | 5 => 2,
        _ => 1,
    }
}

/// Whether `player_count - 1` consecutive yields still leave room for one more.
#[must_use]
pub fn can_yield(consecutive_yields: u32, player_count: usize) -> bool {
    (consecutive_yields as usize) < player_count.saturating_sub(1)
}

/// Every legal move for `hand`, in a fixed order: singles, companion pairs,
/// same-rank pairs, triples, the quad, then the yield if allowed.
#[must_use]
pub fn legal_plays(hand: &[Card], consecutive_yields: u32, player_count: usize) -> Vec<Move> {
    let mut sorted = hand.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut plays: Vec<Move> = sorted.iter().map(|&c| Move::single(c)).collect();

    for companion in sorted.iter().filter(|c| c.is_companion()) {
        for &other in sorted.iter().filter(|c| !c.is_companion()) {
            plays.push(pair(*companion, other));
        }
    }

    let groups: Vec<Vec<Card>> = (2..=5u8)
        .map(|rank| sorted.iter().copied().filter(|c| c.rank() == rank).collect())
        .collect();

    for size in 2..=4 {
        for group in &groups {
            if group.len() < size || size > max_group_size(group[0].rank()) {
                continue;
            }
            for mask in 1u32..(1 << group.len()) {
                if mask.count_ones() as usize != size {
                    continue;
                }
                let cards = group
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, &c)| c);
                if let Ok(mv) = Move::play(cards) {
                    plays.push(mv);
                }
            }
        }
    }

    if can_yield(consecutive_yields, player_count) {
        plays.push(Move::Yield);
    }
    plays
}

/// Whether `cards` form a single legal play (ignoring hand membership).
#[must_use]
pub fn is_legal_combo(cards: &[Card]) -> bool {
    match cards {
        [] => false,
        [_] => true,
        [a, b] if a.is_companion() != b.is_companion() => true,
        [first, rest @ ..] => {
            rest.iter().all(|c| c.rank() == first.rank())
                && cards.len() <= max_group_size(first.rank())
        }
    }
}

fn pair(a: Card, b: Card) -> Move {
    let mut cards = crate::core::PlayCards::new();
    cards.push(a.min(b));
    cards.push(a.max(b));
    Move::Play(cards)
}
