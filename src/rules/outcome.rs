//! Game status as seen after the most recent action.

use serde::{Deserialize, Serialize};

/// Status reported by `Board::winner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game continues.
    Alive,
    /// The last action felled a boss; the same player moves again.
    BossDefeated,
    /// The final boss fell.
    Win,
    /// A player died or was left empty-handed before a live boss.
    Loss,
}

impl Outcome {
    /// `Win` and `Loss` end the game.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Win | Outcome::Loss)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Outcome::Alive => "alive",
            Outcome::BossDefeated => "boss defeated",
            Outcome::Win => "win",
            Outcome::Loss => "loss",
        };
        f.write_str(text)
    }
}
