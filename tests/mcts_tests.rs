//! Search integration tests on dealt and hand-built Regicide positions.

use std::time::Duration;

use regicide_ismcts::mcts::{MovePolicy, SelectionMode, UniformSelection};
use regicide_ismcts::{
    Board, Boss, Card, Castle, Discard, Error, GameRng, MCTSConfig, MCTSSearch, Move, Player,
    Tavern,
};

fn dealt(players: usize, seed: u64) -> Board {
    Board::start_default(players, &mut GameRng::new(seed)).unwrap()
}

fn card(text: &str) -> Card {
    Card::parse(text).unwrap()
}

fn position(boss: &str, hands: [Vec<Card>; 2]) -> Board {
    let players = hands
        .into_iter()
        .enumerate()
        .map(|(i, hand)| Player::with_hand(format!("p{i}"), hand))
        .collect();
    let castle = Castle::from_parts(Vec::new(), Some(Boss::new(card(boss)).unwrap()));
    Board::from_parts(players, castle, Tavern::default(), Discard::default()).unwrap()
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_search_returns_legal_move_for_every_table_size() {
    for players in 2..=4 {
        let board = dealt(players, 42);
        let mut search = MCTSSearch::new(MCTSConfig::deterministic(40, 1));
        let mv = search.search(&board).unwrap();
        assert!(board.legal_moves().contains(&mv), "{players} players");
    }
}

#[test]
fn test_single_legal_move_returned_without_searching() {
    let mut board = position(
        "JH",
        [vec![card("TC"), card("9C"), card("2D")], vec![card("3S")]],
    );
    board.next_state(&Move::Yield, &mut GameRng::new(0)).unwrap();
    assert_eq!(board.legal_moves(), vec![Move::single(card("3S"))]);

    let mut search = MCTSSearch::new(MCTSConfig::deterministic(100, 1));
    let mv = search.search(&board).unwrap();

    assert_eq!(mv, Move::single(card("3S")));
    assert_eq!(search.stats().iterations, 0);
}

#[test]
fn test_search_after_loss_has_no_moves() {
    let mut board = position("JH", [vec![card("2C")], vec![card("3S")]]);
    board.next_state(&Move::Yield, &mut GameRng::new(0)).unwrap();
    assert!(board.winner().is_terminal());

    let mut search = MCTSSearch::new(MCTSConfig::deterministic(10, 1));
    assert_eq!(search.search(&board), Err(Error::NoLegalMoves));
}

#[test]
fn test_search_leaves_board_untouched() {
    let board = dealt(3, 11);
    let before = board.clone();

    let mut search = MCTSSearch::new(MCTSConfig::deterministic(60, 4));
    search.search(&board).unwrap();

    assert_eq!(board, before);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_search_deterministic_with_seed() {
    let board = dealt(2, 5);
    let config = MCTSConfig::deterministic(120, 12345);

    let mut a = MCTSSearch::new(config.clone());
    let mut b = MCTSSearch::new(config);

    assert_eq!(a.search(&board).unwrap(), b.search(&board).unwrap());
    assert_eq!(a.stats().iterations, b.stats().iterations);
    assert_eq!(a.action_visits(), b.action_visits());
}

#[test]
fn test_every_policy_combination_yields_legal_moves() {
    let board = dealt(2, 8);
    for selection in [SelectionMode::Random, SelectionMode::Ucb1] {
        for policy in [MovePolicy::Uniform, MovePolicy::Heuristic] {
            let config = MCTSConfig::deterministic(30, 2)
                .with_selection(selection)
                .with_move_policy(policy);
            let mv = MCTSSearch::new(config).search(&board).unwrap();
            assert!(board.legal_moves().contains(&mv));
        }
    }
}

#[test]
fn test_custom_selection_policy() {
    let board = dealt(2, 8);
    let mut search =
        MCTSSearch::new(MCTSConfig::deterministic(30, 2)).with_selection(UniformSelection);
    let mv = search.search(&board).unwrap();
    assert!(board.legal_moves().contains(&mv));
}

// =============================================================================
// Tree Tests
// =============================================================================

#[test]
fn test_tree_grows_with_expansions() {
    let board = dealt(2, 21);
    let mut search = MCTSSearch::new(MCTSConfig::deterministic(80, 3).with_dud_ratio(1.0));
    search.search(&board).unwrap();

    let stats = search.tree().stats();
    assert_eq!(stats.node_count as u32, search.stats().expansions + 1);
    assert!(stats.max_depth >= 1);
    assert!(stats.branching_factor() >= 1.0);

    // Every child sits one level below its parent
    for (_, node) in search.tree().iter() {
        for &child in &node.children {
            assert_eq!(search.tree().get(child).depth, node.depth + 1);
        }
    }
}

#[test]
fn test_root_children_are_legal_moves() {
    let board = dealt(4, 13);
    let mut search = MCTSSearch::new(MCTSConfig::deterministic(50, 3));
    search.search(&board).unwrap();

    let legal = board.legal_moves();
    for (mv, visits) in search.action_visits() {
        assert!(legal.contains(&mv));
        assert!(visits >= 1);
    }
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_dud_breaker_stops_search() {
    let board = dealt(2, 30);
    let config = MCTSConfig::deterministic(500, 9).with_dud_ratio(0.0);
    let mut search = MCTSSearch::new(config);
    let mv = search.search(&board).unwrap();

    assert!(board.legal_moves().contains(&mv));
    assert!(search.stats().duds <= 1);
    assert!(search.stats().iterations <= 500);
}

#[test]
fn test_time_budget_stops_search() {
    let board = dealt(2, 31);
    let config = MCTSConfig::default()
        .with_seed(1)
        .with_runs(u32::MAX)
        .with_time_limit(Some(Duration::from_millis(50)));
    let mut search = MCTSSearch::new(config);
    search.search(&board).unwrap();

    assert!(search.stats().iterations < u32::MAX);
    assert!(search.stats().time_us >= 50_000);
}
