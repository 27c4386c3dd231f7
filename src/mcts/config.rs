//! ISMCTS configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the search descends through fully expanded nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Uniformly random child.
    Random,
    /// Upper Confidence Bound over mean ranking.
    Ucb1,
}

/// How a move is picked from a list during expansion or rollout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePolicy {
    /// Every move equally likely.
    Uniform,
    /// Weighted by `HeuristicWeights`.
    Heuristic,
}

/// Reward shaping for a finished rollout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Reward for beating the last boss. Dominates every other signal.
    pub win: f64,

    /// Reward for a loss straight after the root decision.
    pub immediate_loss: f64,

    /// Bonus per boss felled between the root and the end of the rollout.
    pub boss_defeated: f64,

    /// Bonus per move survived between the root and the end of the rollout.
    pub turn_survived: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            win: 1000.0,
            immediate_loss: -100.0,
            boss_defeated: 50.0,
            turn_survived: 1.0,
        }
    }
}

/// Move weights for `MovePolicy::Heuristic`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Weight of a yield. Plays start at 1.0.
    pub yield_weight: f32,

    /// Added per card beyond the first.
    pub combo_bonus: f32,

    /// Added when any card's suit differs from the boss suit (its power fires).
    pub off_suit_bonus: f32,

    /// Added when a multi-card play has no repeated suit.
    pub distinct_suit_bonus: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            yield_weight: 0.5,
            combo_bonus: 1.0,
            off_suit_bonus: 1.0,
            distinct_suit_bonus: 0.5,
        }
    }
}

/// Search configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Iteration budget per decision.
    pub max_runs: u32,

    /// Wall-clock budget per decision (`None` = iterations only).
    /// Set to `None` for reproducible searches.
    pub max_time: Option<Duration>,

    /// Stop once failed expansions exceed `dud_ratio * max_runs`.
    pub dud_ratio: f64,

    pub selection: SelectionMode,

    pub expansion: MovePolicy,

    pub rollout: MovePolicy,

    /// UCB1 exploration constant, on the scale of `RewardConfig`.
    pub exploration_constant: f64,

    pub rewards: RewardConfig,

    pub heuristic: HeuristicWeights,

    /// Rollouts stop after this many moves and are scored as unfinished.
    pub max_rollout_turns: u32,

    /// Seed for the search RNG.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            max_runs: 100,
            max_time: Some(Duration::from_secs(1)),
            dud_ratio: 0.5,
            selection: SelectionMode::Ucb1,
            expansion: MovePolicy::Heuristic,
            rollout: MovePolicy::Uniform,
            exploration_constant: 35.0,
            rewards: RewardConfig::default(),
            heuristic: HeuristicWeights::default(),
            max_rollout_turns: 500,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    pub fn with_runs(mut self, runs: u32) -> Self {
        self.max_runs = runs;
        self
    }

    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.max_time = limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }

    /// Use `policy` for both expansion and rollouts.
    pub fn with_move_policy(mut self, policy: MovePolicy) -> Self {
        self.expansion = policy;
        self.rollout = policy;
        self
    }

    pub fn with_dud_ratio(mut self, ratio: f64) -> Self {
        self.dud_ratio = ratio;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_max_rollout_turns(mut self, turns: u32) -> Self {
        self.max_rollout_turns = turns;
        self
    }

    /// Reproducible config: iteration budget only.
    pub fn deterministic(runs: u32, seed: u64) -> Self {
        Self::default()
            .with_runs(runs)
            .with_time_limit(None)
            .with_seed(seed)
    }
}
