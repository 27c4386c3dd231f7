//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Select/expand rounds performed.
    pub iterations: u32,

    /// Nodes added to the tree.
    pub expansions: u32,

    /// Rollouts performed.
    pub simulations: u32,

    /// Rounds whose selected node could not be expanded.
    pub duds: u32,

    /// Deepest node created.
    pub max_depth: u16,

    /// Time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold another decision's counters into this one.
    pub fn accumulate(&mut self, other: &SearchStats) {
        self.iterations += other.iterations;
        self.expansions += other.expansions;
        self.simulations += other.simulations;
        self.duds += other.duds;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_us += other.time_us;
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of iterations that were duds.
    #[must_use]
    pub fn dud_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.duds as f64 / self.iterations as f64
        }
    }
}
