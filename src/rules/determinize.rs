//! Information-set sampling.
//!
//! An observer knows their own hand, every `played` buffer, the discard, the
//! tavern overlay, the active boss and which bosses remain in the castle.
//! Everything else (the tavern's main stack and the other hands) is dealt
//! afresh from the cards the observer cannot account for, preserving sizes.

use rustc_hash::FxHashSet;

use super::board::Board;
use crate::cards::{Boss, Card};
use crate::core::error::{Error, Result};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

impl Board {
    /// Cards `observer` can account for without peeking.
    #[must_use]
    pub fn visible_cards(&self, observer: PlayerId) -> FxHashSet<Card> {
        let mut seen: FxHashSet<Card> = FxHashSet::default();
        seen.extend(&self.players[observer].hand);
        for player in self.players.values() {
            seen.extend(&player.played);
        }
        seen.extend(self.tavern.overlay());
        seen.extend(self.discard.cards());
        seen.extend(self.castle.boss().map(Boss::card));
        seen.extend(self.castle.remaining());
        seen
    }

    /// A copy of this board consistent with what `observer` can see, with all
    /// hidden cards redistributed at random.
    ///
    /// The castle's hidden order is also resampled, keeping rank groups
    /// intact (Jacks on top, Kings at the bottom).
    pub fn clone_and_randomize(&self, observer: PlayerId, rng: &mut GameRng) -> Result<Board> {
        if observer.index() >= self.player_count() {
            return Err(Error::InvalidArgument(format!(
                "{observer} is not seated at a {}-player table",
                self.player_count()
            )));
        }

        let seen = self.visible_cards(observer);
        let mut unseen: Vec<Card> = Card::full_deck()
            .into_iter()
            .filter(|c| !seen.contains(c))
            .collect();

        let hidden_slots = self.tavern.main_stack().len()
            + self
                .players
                .iter()
                .filter(|(id, _)| *id != observer)
                .map(|(_, p)| p.hand.len())
                .sum::<usize>();
        if unseen.len() != hidden_slots {
            return Err(Error::InvalidState(format!(
                "{} unseen cards for {hidden_slots} hidden slots",
                unseen.len()
            )));
        }

        rng.shuffle(&mut unseen);
        let mut unseen = unseen.into_iter();

        let mut state = self.clone();
        let tavern_len = state.tavern.main_stack().len();
        state
            .tavern
            .replace_main_stack(unseen.by_ref().take(tavern_len).collect());
        for (id, player) in state.players.iter_mut() {
            if id != observer {
                let n = player.hand.len();
                player.hand = unseen.by_ref().take(n).collect();
            }
        }
        state.castle.reshuffle_by_rank(rng);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    #[test]
    fn test_randomize_preserves_visible_information() {
        let mut rng = GameRng::new(11);
        let mut board = Board::start_default(3, &mut rng).unwrap();
        let mv = board.legal_moves()[0].clone();
        board.next_state(&mv, &mut rng).unwrap();

        let observer = board.current_player();
        let sample = board.clone_and_randomize(observer, &mut rng).unwrap();

        assert_eq!(sample.player(observer).hand, board.player(observer).hand);
        assert_eq!(sample.discard(), board.discard());
        assert_eq!(sample.tavern().overlay(), board.tavern().overlay());
        assert_eq!(sample.boss(), board.boss());
        assert_eq!(sample.actions(), board.actions());
        assert_eq!(sample.tavern().main_stack().len(), board.tavern().main_stack().len());
        for id in PlayerId::all(3) {
            assert_eq!(sample.player(id).hand.len(), board.player(id).hand.len());
            assert_eq!(sample.player(id).played, board.player(id).played);
        }
        assert_eq!(sample.card_census(), Card::full_deck());
    }

    #[test]
    fn test_randomize_keeps_castle_rank_order() {
        let mut rng = GameRng::new(5);
        let board = Board::start_default(2, &mut rng).unwrap();
        let sample = board.clone_and_randomize(PlayerId::new(1), &mut rng).unwrap();

        let ranks: Vec<u8> = sample.castle().remaining().iter().map(|c| c.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_randomize_rejects_unknown_seat() {
        let mut rng = GameRng::new(5);
        let board = Board::start_default(2, &mut rng).unwrap();
        assert!(matches!(
            board.clone_and_randomize(PlayerId::new(3), &mut rng),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_randomize_after_yield() {
        let mut rng = GameRng::new(9);
        let mut board = Board::start_default(2, &mut rng).unwrap();
        board.next_state(&Move::Yield, &mut rng).unwrap();
        let sample = board.clone_and_randomize(PlayerId::new(0), &mut rng).unwrap();
        assert_eq!(sample.card_census(), Card::full_deck());
    }
}
