//! The budgeted ISMCTS decision loop.
//!
//! Each decision builds a fresh tree rooted at a determinization of the
//! real board for the player to move: their own hand is kept, every hidden
//! card is redealt. Every iteration selects a node, expands one move, plays
//! a determinized rollout from the new child and backpropagates its shaped
//! reward. The loop stops on
//! the first of: `max_runs` iterations, `max_time` elapsed, or more than
//! `dud_ratio * max_runs` failed expansions.

use std::time::Instant;

use log::debug;

use crate::core::{Error, GameRng, Move, Result};
use crate::rules::Board;

use super::config::MCTSConfig;
use super::node::NodeId;
use super::policy::{score_rollout, selection_policy, SelectionPolicy};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Search context: configuration, RNG, and the tree of the latest decision.
pub struct MCTSSearch {
    config: MCTSConfig,
    tree: SearchTree,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    stats: SearchStats,
}

impl MCTSSearch {
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let selection = selection_policy(&config);
        Self {
            config,
            tree: SearchTree::default(),
            rng,
            selection,
            stats: SearchStats::default(),
        }
    }

    /// Replace the selection policy named in the config.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Choose a move for the player to act on `board`.
    ///
    /// Fails with `NoLegalMoves` if the game is over or the player has no
    /// move. The chosen move is always one of `board.legal_moves()`.
    pub fn search(&mut self, board: &Board) -> Result<Move> {
        let start = Instant::now();
        self.stats.reset();

        let legal = board.legal_moves();
        if board.winner().is_terminal() || legal.is_empty() {
            return Err(Error::NoLegalMoves);
        }
        if let [only] = legal.as_slice() {
            self.stats.time_us = start.elapsed().as_micros() as u64;
            return Ok(only.clone());
        }

        // The root keeps the mover's own hand, so its moves match `legal`.
        let sample = board.clone_and_randomize(board.current_player(), &mut self.rng)?;
        let root = self.tree.set_game_state(sample);

        while !self.budget_exhausted(start) {
            self.iteration(root)?;
            self.stats.iterations += 1;
        }
        self.stats.time_us = start.elapsed().as_micros() as u64;

        let best = self
            .tree
            .find_highest_ranking_child(root)
            .ok_or(Error::NoLegalMoves)?;
        let chosen = self
            .tree
            .get(best)
            .action
            .clone()
            .ok_or_else(|| Error::InvalidState(format!("{best} has no move")))?;
        if !legal.contains(&chosen) {
            return Err(Error::IllegalMove(format!("search chose {chosen}, which is not legal")));
        }

        debug!(
            "{} chose {chosen}: {} iterations, {} duds, {} nodes, mean {:.1}",
            board.current_player(),
            self.stats.iterations,
            self.stats.duds,
            self.tree.len(),
            self.tree.get(best).mean_ranking()
        );
        Ok(chosen)
    }

    /// Select, expand, simulate, backpropagate.
    fn iteration(&mut self, root: NodeId) -> Result<()> {
        let selected = self.tree.select(root, self.selection.as_ref(), &mut self.rng);
        let Some(child) = self.tree.expand(selected, &self.config, &mut self.rng)? else {
            self.stats.duds += 1;
            return Ok(());
        };
        self.stats.expansions += 1;

        let depth = self.tree.get(child).depth;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let rollout = self.tree.simulate(child, &self.config, &mut self.rng)?;
        self.stats.simulations += 1;
        let reward = score_rollout(&rollout, depth, &self.config.rewards);
        self.tree.backpropagate(child, reward);
        Ok(())
    }

    fn budget_exhausted(&self, start: Instant) -> bool {
        if self.stats.iterations >= self.config.max_runs {
            return true;
        }
        if self.config.max_time.is_some_and(|limit| start.elapsed() >= limit) {
            return true;
        }
        f64::from(self.stats.duds) > self.config.dud_ratio * f64::from(self.config.max_runs)
    }

    /// Statistics from the latest decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree from the latest decision.
    #[must_use]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Root moves with visit counts from the latest decision.
    pub fn action_visits(&self) -> Vec<(Move, u32)> {
        self.tree
            .root_statistics()
            .into_iter()
            .map(|(mv, visits, _)| (mv, visits))
            .collect()
    }

    /// Discard the tree from the latest decision.
    pub fn reset(&mut self) {
        self.tree.reset();
    }
}
