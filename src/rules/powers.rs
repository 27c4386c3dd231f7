//! Hearts and Diamonds suit powers.
//!
//! Spades and Clubs only touch the active boss and live on `Boss`. These two
//! move cards between piles and hands, so they operate on the board's parts.

use rustc_hash::FxHashSet;

use crate::core::error::Result;
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::zones::{Discard, Tavern};

/// Hearts: shuffle the discard, then move up to `power` cards from it to the
/// bottom of the tavern. Returns the number moved.
pub fn apply_hearts(
    discard: &mut Discard,
    tavern: &mut Tavern,
    power: u32,
    rng: &mut GameRng,
) -> Result<usize> {
    if discard.is_empty() || power == 0 {
        return Ok(0);
    }
    discard.shuffle(rng);

    let mut healed = Vec::new();
    while (healed.len() as u32) < power && !discard.is_empty() {
        healed.push(discard.draw()?);
    }
    let moved = healed.len();
    tavern.add_cards_bottom(healed)?;
    Ok(moved)
}

/// Diamonds: deal up to `power` tavern cards round-robin starting at `start`.
///
/// Players already at `hand_size` are skipped and marked full; dealing stops
/// once `power` cards are drawn, the tavern runs dry, or every player is full.
/// Returns the number drawn.
pub fn apply_diamonds(
    players: &mut PlayerMap<Player>,
    tavern: &mut Tavern,
    start: PlayerId,
    power: u32,
    hand_size: usize,
) -> Result<u32> {
    let player_count = players.player_count();
    let mut current = start;
    let mut drawn = 0;
    let mut full: FxHashSet<PlayerId> = FxHashSet::default();

    while drawn < power && !tavern.is_exhausted() && full.len() < player_count {
        let player = &mut players[current];
        if player.hand.len() < hand_size {
            player.hand.push(tavern.draw()?);
            drawn += 1;
        } else {
            full.insert(current);
        }
        current = current.next(player_count);
    }
    Ok(drawn)
}
