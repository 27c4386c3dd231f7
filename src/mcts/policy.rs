//! Search policies: child selection, move choice, rollouts and reward shaping.
//!
//! - `SelectionPolicy`: which child to descend into (uniform, UCB1)
//! - `choose_move`: which move to expand or play in a rollout
//! - `rollout` / `score_rollout`: play a determinized game out and score it

use crate::cards::Suit;
use crate::core::{GameRng, Move, Result};
use crate::rules::{Board, Outcome};

use super::config::{HeuristicWeights, MCTSConfig, MovePolicy, RewardConfig, SelectionMode};
use super::node::{NodeId, SearchNode};

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for picking which child to descend into.
pub trait SelectionPolicy: Send + Sync {
    /// Pick one of `candidates` (never empty) under `parent`.
    fn select(
        &self,
        parent: &SearchNode,
        candidates: &[(NodeId, &SearchNode)],
        rng: &mut GameRng,
    ) -> NodeId;
}

/// Uniformly random child.
#[derive(Clone, Debug, Default)]
pub struct UniformSelection;

impl SelectionPolicy for UniformSelection {
    fn select(
        &self,
        _parent: &SearchNode,
        candidates: &[(NodeId, &SearchNode)],
        rng: &mut GameRng,
    ) -> NodeId {
        candidates[rng.gen_range_usize(0..candidates.len())].0
    }
}

/// UCB1 (Upper Confidence Bound) selection.
///
/// Formula: ranking/visits + c * sqrt(ln(N) / visits). Unvisited children
/// score infinity. When every score ties, or any is NaN, the choice is
/// uniform.
#[derive(Clone, Debug)]
pub struct UCB1 {
    pub exploration_constant: f64,
}

impl UCB1 {
    #[must_use]
    pub fn score(&self, parent_visits: u32, child: &SearchNode) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }
        let ln_parent = f64::from(parent_visits.max(1)).ln();
        child.mean_ranking()
            + self.exploration_constant * (ln_parent / f64::from(child.visits)).sqrt()
    }
}

impl SelectionPolicy for UCB1 {
    fn select(
        &self,
        parent: &SearchNode,
        candidates: &[(NodeId, &SearchNode)],
        rng: &mut GameRng,
    ) -> NodeId {
        let scores: Vec<f64> = candidates
            .iter()
            .map(|(_, child)| self.score(parent.visits, child))
            .collect();

        let degenerate = scores.iter().any(|s| s.is_nan())
            || scores.windows(2).all(|pair| pair[0] == pair[1]);
        if degenerate {
            return UniformSelection.select(parent, candidates, rng);
        }

        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }
        candidates[best].0
    }
}

/// Build the policy named by the config.
#[must_use]
pub fn selection_policy(config: &MCTSConfig) -> Box<dyn SelectionPolicy> {
    match config.selection {
        SelectionMode::Random => Box::new(UniformSelection),
        SelectionMode::Ucb1 => Box::new(UCB1 {
            exploration_constant: config.exploration_constant,
        }),
    }
}

// =============================================================================
// Move choice
// =============================================================================

/// Heuristic weight of `mv` against a boss of `boss_suit`.
#[must_use]
pub fn move_weight(mv: &Move, boss_suit: Option<Suit>, weights: &HeuristicWeights) -> f32 {
    let cards = mv.cards();
    if cards.is_empty() {
        return weights.yield_weight;
    }

    let mut weight = 1.0 + weights.combo_bonus * (cards.len() - 1) as f32;
    if cards.iter().any(|c| Some(c.suit()) != boss_suit) {
        weight += weights.off_suit_bonus;
    }
    if cards.len() > 1 && mv.suits().len() == cards.len() {
        weight += weights.distinct_suit_bonus;
    }
    weight
}

/// Index of the move to take from `moves`, or `None` if `moves` is empty.
pub fn choose_move(
    policy: MovePolicy,
    moves: &[Move],
    board: &Board,
    weights: &HeuristicWeights,
    rng: &mut GameRng,
) -> Option<usize> {
    if moves.is_empty() {
        return None;
    }
    match policy {
        MovePolicy::Uniform => Some(rng.gen_range_usize(0..moves.len())),
        MovePolicy::Heuristic => {
            let boss_suit = board.boss().map(|b| b.suit());
            let w: Vec<f32> = moves
                .iter()
                .map(|m| move_weight(m, boss_suit, weights))
                .collect();
            rng.choose_weighted(&w)
        }
    }
}

// =============================================================================
// Rollouts
// =============================================================================

/// Summary of one playout, measured from the search root.
#[derive(Clone, Debug, PartialEq)]
pub struct Rollout {
    /// `Win`/`Loss` if the game ended, otherwise the status when the cap hit.
    pub outcome: Outcome,

    /// Bosses felled since the root position.
    pub bosses_defeated: usize,

    /// Moves made since the root that did not kill the mover.
    pub turns_survived: usize,

    /// Whether the player who made the node's move still holds a Diamond.
    pub mover_holds_diamonds: bool,
}

impl Rollout {
    /// Measure the stretch of play from `root` to `end`.
    #[must_use]
    pub fn between(root: &Board, end: &Board, outcome: Outcome, mover_holds_diamonds: bool) -> Self {
        let appended = end.actions().len().saturating_sub(root.actions().len());
        let fatal = end.actions().last().is_some_and(|a| a.player_died);
        Self {
            outcome,
            bosses_defeated: end.bosses_defeated().saturating_sub(root.bosses_defeated()),
            turns_survived: appended.saturating_sub(usize::from(fatal)),
            mover_holds_diamonds,
        }
    }
}

/// Play `board` forward with `config.rollout` until the game ends, no move is
/// available, or `config.max_rollout_turns` moves have been made.
///
/// Returns the final board and its status. Running out of moves counts as a
/// loss.
pub fn rollout(mut board: Board, config: &MCTSConfig, rng: &mut GameRng) -> Result<(Board, Outcome)> {
    for _ in 0..config.max_rollout_turns {
        let status = board.winner();
        if status.is_terminal() {
            return Ok((board, status));
        }
        let moves = board.legal_moves();
        let Some(idx) = choose_move(config.rollout, &moves, &board, &config.heuristic, rng) else {
            return Ok((board, Outcome::Loss));
        };
        board.next_state(&moves[idx], rng)?;
    }
    let status = board.winner();
    Ok((board, status))
}

/// Scalar reward for a finished rollout started below a node at `depth`.
///
/// A win dominates. A loss right after the root decision (the move itself
/// was fatal, or it left the mover without Diamonds) takes the
/// `immediate_loss` penalty. Everything else earns the boss and survival
/// bonuses.
#[must_use]
pub fn score_rollout(rollout: &Rollout, depth: u16, rewards: &RewardConfig) -> f64 {
    let shaped = rollout.bosses_defeated as f64 * rewards.boss_defeated
        + rollout.turns_survived as f64 * rewards.turn_survived;
    match rollout.outcome {
        Outcome::Win => rewards.win,
        Outcome::Loss
            if depth <= 1 && (rollout.turns_survived == 0 || !rollout.mover_holds_diamonds) =>
        {
            rewards.immediate_loss
        }
        _ => shaped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::rules::Board;

    fn card(text: &str) -> Card {
        Card::parse(text).unwrap()
    }

    fn node_with(visits: u32, ranking: f64) -> SearchNode {
        let board = Board::start_default(2, &mut GameRng::new(1)).unwrap();
        let mut node = SearchNode::root(board);
        node.visits = visits;
        node.ranking = ranking;
        node
    }

    #[test]
    fn test_ucb1_selects_unvisited() {
        let parent = node_with(111, 0.0);
        let a = node_with(100, 8000.0);
        let b = node_with(10, 700.0);
        let c = node_with(0, 0.0);
        let candidates = vec![(NodeId::new(1), &a), (NodeId::new(2), &b), (NodeId::new(3), &c)];

        let ucb1 = UCB1 { exploration_constant: 35.0 };
        let mut rng = GameRng::new(0);
        assert_eq!(ucb1.select(&parent, &candidates, &mut rng), NodeId::new(3));
    }

    #[test]
    fn test_ucb1_prefers_higher_mean() {
        let parent = node_with(40, 0.0);
        let a = node_with(20, 200.0);
        let b = node_with(20, 2000.0);
        let candidates = vec![(NodeId::new(1), &a), (NodeId::new(2), &b)];

        let ucb1 = UCB1 { exploration_constant: 1.0 };
        let mut rng = GameRng::new(0);
        assert_eq!(ucb1.select(&parent, &candidates, &mut rng), NodeId::new(2));
    }

    #[test]
    fn test_ucb1_ties_fall_back_to_uniform() {
        let parent = node_with(40, 0.0);
        let a = node_with(20, 100.0);
        let b = node_with(20, 100.0);
        let candidates = vec![(NodeId::new(1), &a), (NodeId::new(2), &b)];

        let ucb1 = UCB1 { exploration_constant: 1.0 };
        let mut rng = GameRng::new(3);
        let mut seen = [false; 2];
        for _ in 0..64 {
            let picked = ucb1.select(&parent, &candidates, &mut rng);
            seen[picked.raw() as usize - 1] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_move_weights() {
        let weights = HeuristicWeights::default();
        let spade_boss = Some(Suit::Spades);

        assert_eq!(move_weight(&Move::Yield, spade_boss, &weights), 0.5);
        assert_eq!(move_weight(&Move::single(card("5S")), spade_boss, &weights), 1.0);
        assert_eq!(move_weight(&Move::single(card("5H")), spade_boss, &weights), 2.0);

        let pair = Move::play(vec![card("3H"), card("3D")]).unwrap();
        assert_eq!(move_weight(&pair, spade_boss, &weights), 1.0 + 1.0 + 1.0 + 0.5);
    }

    #[test]
    fn test_choose_move_empty() {
        let board = Board::start_default(2, &mut GameRng::new(1)).unwrap();
        let mut rng = GameRng::new(0);
        let weights = HeuristicWeights::default();
        assert_eq!(choose_move(MovePolicy::Uniform, &[], &board, &weights, &mut rng), None);
        assert_eq!(choose_move(MovePolicy::Heuristic, &[], &board, &weights, &mut rng), None);
    }

    #[test]
    fn test_rollout_reaches_terminal() {
        let board = Board::start_default(2, &mut GameRng::new(8)).unwrap();
        let config = MCTSConfig::deterministic(10, 0);
        let mut rng = GameRng::new(4);
        let (end, outcome) = rollout(board.clone(), &config, &mut rng).unwrap();

        assert!(outcome.is_terminal());
        assert!(end.actions().len() > board.actions().len());
        assert_eq!(end.card_census(), Card::full_deck());
    }

    #[test]
    fn test_rollout_turn_cap() {
        let board = Board::start_default(2, &mut GameRng::new(8)).unwrap();
        let config = MCTSConfig::deterministic(10, 0).with_max_rollout_turns(0);
        let mut rng = GameRng::new(4);
        let (end, outcome) = rollout(board.clone(), &config, &mut rng).unwrap();

        assert_eq!(outcome, Outcome::Alive);
        assert_eq!(end, board);
    }

    #[test]
    fn test_score_rollout() {
        let rewards = RewardConfig::default();
        let mut r = Rollout {
            outcome: Outcome::Win,
            bosses_defeated: 12,
            turns_survived: 40,
            mover_holds_diamonds: true,
        };
        assert_eq!(score_rollout(&r, 1, &rewards), rewards.win);

        r.outcome = Outcome::Loss;
        r.bosses_defeated = 2;
        r.turns_survived = 10;
        assert_eq!(score_rollout(&r, 1, &rewards), 2.0 * 50.0 + 10.0);

        r.turns_survived = 0;
        assert_eq!(score_rollout(&r, 1, &rewards), rewards.immediate_loss);
        assert_eq!(score_rollout(&r, 3, &rewards), 100.0);

        r.turns_survived = 5;
        r.mover_holds_diamonds = false;
        assert_eq!(score_rollout(&r, 1, &rewards), rewards.immediate_loss);

        r.outcome = Outcome::Alive;
        assert_eq!(score_rollout(&r, 1, &rewards), 2.0 * 50.0 + 5.0);
    }
}
