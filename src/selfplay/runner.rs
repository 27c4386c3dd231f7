//! Self-play loop: the search plays every seat until the game ends.

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{Error, GameRng, Result};
use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};
use crate::rules::{Board, Outcome};

use super::record::{Decision, GameRecord, SelfPlaySummary};

/// Configuration for self-play.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Seats at the table (2-4).
    pub player_count: usize,

    /// Search settings used for every decision.
    pub search: MCTSConfig,

    /// Maximum moves per game.
    pub max_moves: usize,

    /// Seed for dealing; game `i` of a batch uses `seed + i`.
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            search: MCTSConfig::default(),
            max_moves: 500,
            seed: 0,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    pub fn with_search(mut self, search: MCTSConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Runs self-play games.
pub struct SelfPlayRunner {
    config: SelfPlayConfig,
}

impl SelfPlayRunner {
    pub fn new(config: SelfPlayConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play one game dealt from `config.seed`.
    pub fn play_game(&self) -> Result<GameRecord> {
        self.play_seeded(self.config.seed)
    }

    /// Play `count` games with consecutive seeds.
    pub fn play_games(&self, count: usize) -> Result<(Vec<GameRecord>, SelfPlaySummary)> {
        let records = (0..count as u64)
            .map(|i| self.play_seeded(self.config.seed.wrapping_add(i)))
            .collect::<Result<Vec<_>>>()?;
        let summary = SelfPlaySummary::from_records(&records);
        info!(
            "{} games: {} wins, {} losses, {:.2} bosses per game",
            summary.games,
            summary.wins,
            summary.losses,
            summary.mean_bosses()
        );
        Ok((records, summary))
    }

    fn play_seeded(&self, seed: u64) -> Result<GameRecord> {
        let mut rng = GameRng::new(seed);
        let mut board = Board::start_default(self.config.player_count, &mut rng)?;

        let search_seed = rng.fork().seed() ^ self.config.search.seed;
        let search_config = self.config.search.clone().with_seed(search_seed);
        let mut search = MCTSSearch::new(search_config);
        let mut totals = SearchStats::new();
        let mut decisions = Vec::new();

        for move_number in 0..self.config.max_moves {
            if board.winner().is_terminal() {
                break;
            }
            let player = board.current_player();
            let chosen = match search.search(&board) {
                Ok(mv) => mv,
                Err(Error::NoLegalMoves) => break,
                Err(e) => return Err(e),
            };
            totals.accumulate(search.stats());
            decisions.push(Decision {
                player,
                chosen: chosen.clone(),
                visits: search.action_visits(),
                move_number,
            });
            search.reset();

            board.next_state(&chosen, &mut rng)?;
        }

        let outcome = match board.winner() {
            status if status.is_terminal() => status,
            _ if board.legal_moves().is_empty() => Outcome::Loss,
            status => status,
        };

        let record = GameRecord {
            seed,
            outcome,
            actions: board.actions().iter().cloned().collect(),
            decisions,
            bosses_defeated: board.bosses_defeated(),
            search_stats: totals,
        };
        info!(
            "game {seed}: {outcome} after {} moves, {} bosses defeated",
            record.game_length(),
            record.bosses_defeated
        );
        Ok(record)
    }
}
