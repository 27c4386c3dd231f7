//! Records of completed self-play games.

use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, Move, PlayerId};
use crate::mcts::SearchStats;
use crate::rules::Outcome;

/// One search decision taken during a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Seat that decided.
    pub player: PlayerId,

    /// The move played.
    pub chosen: Move,

    /// Visits per root move at decision time.
    pub visits: Vec<(Move, u32)>,

    /// Move number in the game (0-indexed).
    pub move_number: usize,
}

impl Decision {
    /// Share of root visits that went to the chosen move.
    #[must_use]
    pub fn chosen_visit_share(&self) -> f64 {
        let total: u32 = self.visits.iter().map(|(_, v)| v).sum();
        if total == 0 {
            return 0.0;
        }
        self.visits
            .iter()
            .find(|(mv, _)| mv == &self.chosen)
            .map_or(0.0, |(_, v)| f64::from(*v) / f64::from(total))
    }
}

/// A complete game played by the search at every seat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    /// Seed that dealt the game.
    pub seed: u64,

    /// Final status. `Alive` or `BossDefeated` only when the move cap hit.
    pub outcome: Outcome,

    /// The full action log.
    pub actions: Vec<ActionRecord>,

    pub decisions: Vec<Decision>,

    pub bosses_defeated: usize,

    /// Search counters summed over every decision.
    pub search_stats: SearchStats,
}

impl GameRecord {
    #[must_use]
    pub fn game_length(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}

/// Aggregate over many games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfPlaySummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub unfinished: usize,
    pub total_bosses: usize,
    pub total_moves: usize,
}

impl SelfPlaySummary {
    #[must_use]
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.games += 1;
            match record.outcome {
                Outcome::Win => summary.wins += 1,
                Outcome::Loss => summary.losses += 1,
                Outcome::Alive | Outcome::BossDefeated => summary.unfinished += 1,
            }
            summary.total_bosses += record.bosses_defeated;
            summary.total_moves += record.game_length();
        }
        summary
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    #[must_use]
    pub fn mean_bosses(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_bosses as f64 / self.games as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: Outcome, bosses: usize, moves: usize) -> GameRecord {
        GameRecord {
            seed: 0,
            outcome,
            actions: (0..moves)
                .map(|_| ActionRecord::new(PlayerId::new(0), Move::Yield, false, false))
                .collect(),
            decisions: Vec::new(),
            bosses_defeated: bosses,
            search_stats: SearchStats::default(),
        }
    }

    #[test]
    fn test_summary() {
        let records = vec![
            record(Outcome::Win, 12, 40),
            record(Outcome::Loss, 2, 10),
            record(Outcome::Loss, 4, 10),
            record(Outcome::Alive, 0, 5),
        ];
        let summary = SelfPlaySummary::from_records(&records);

        assert_eq!(summary.games, 4);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.total_moves, 65);
        assert_eq!(summary.win_rate(), 0.25);
        assert_eq!(summary.mean_bosses(), 4.5);
    }

    #[test]
    fn test_empty_summary() {
        let summary = SelfPlaySummary::from_records(&[]);
        assert_eq!(summary.win_rate(), 0.0);
        assert_eq!(summary.mean_bosses(), 0.0);
    }

    #[test]
    fn test_chosen_visit_share() {
        let decision = Decision {
            player: PlayerId::new(0),
            chosen: Move::Yield,
            visits: vec![(Move::Yield, 30), (Move::single(crate::cards::Card::parse("5H").unwrap()), 10)],
            move_number: 0,
        };
        assert_eq!(decision.chosen_visit_share(), 0.75);
    }

    #[test]
    fn test_record_serialization() {
        let record = record(Outcome::Loss, 1, 3);
        let json = serde_json::to_string(&record).unwrap();
        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcome, Outcome::Loss);
        assert_eq!(back.actions, record.actions);
    }
}
