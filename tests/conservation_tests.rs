//! Property tests: card conservation across random play and determinization.

use proptest::prelude::*;

use regicide_ismcts::{Board, Card, GameRng, PlayerId};

/// Play up to `moves` uniformly random legal moves.
fn random_game(players: usize, seed: u64, moves: usize) -> Board {
    let mut rng = GameRng::new(seed);
    let mut board = Board::start_default(players, &mut rng).unwrap();
    for _ in 0..moves {
        if board.winner().is_terminal() {
            break;
        }
        let legal = board.legal_moves();
        if legal.is_empty() {
            break;
        }
        let mv = legal[rng.gen_range_usize(0..legal.len())].clone();
        board.next_state(&mv, &mut rng).unwrap();
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_play_conserves_deck(
        players in 2usize..=4,
        seed in any::<u64>(),
        moves in 0usize..120,
    ) {
        let board = random_game(players, seed, moves);
        prop_assert_eq!(board.card_census(), Card::full_deck());
        for player in board.players().values() {
            prop_assert!(player.hand.len() <= board.hand_size());
        }
    }

    #[test]
    fn test_determinization_keeps_what_observer_sees(
        players in 2usize..=4,
        seed in any::<u64>(),
        moves in 0usize..60,
        observer in 0u8..4,
    ) {
        let board = random_game(players, seed, moves);
        let observer = PlayerId::new(observer % players as u8);
        let mut rng = GameRng::new(seed ^ 0x5eed);
        let sample = board.clone_and_randomize(observer, &mut rng).unwrap();

        prop_assert_eq!(sample.card_census(), Card::full_deck());
        prop_assert_eq!(sample.visible_cards(observer), board.visible_cards(observer));
        prop_assert_eq!(&sample.player(observer).hand, &board.player(observer).hand);
        prop_assert_eq!(sample.discard(), board.discard());
        prop_assert_eq!(sample.boss(), board.boss());
        prop_assert_eq!(sample.actions(), board.actions());
        prop_assert_eq!(sample.consecutive_yields(), board.consecutive_yields());
        prop_assert_eq!(
            sample.tavern().main_stack().len(),
            board.tavern().main_stack().len()
        );
        for id in PlayerId::all(players) {
            prop_assert_eq!(sample.player(id).hand.len(), board.player(id).hand.len());
            prop_assert_eq!(&sample.player(id).played, &board.player(id).played);
        }

        let ranks = |b: &Board| b.castle().remaining().iter().map(|c| c.rank()).collect::<Vec<_>>();
        prop_assert_eq!(ranks(&sample), ranks(&board));
    }
}
