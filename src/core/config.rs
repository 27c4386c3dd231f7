//! Table configuration fixed at game start.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Player count and the hand limit it implies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-4).
    pub player_count: usize,

    /// Maximum cards per hand; also the opening deal.
    pub hand_size: usize,
}

impl GameConfig {
    /// Configuration for a table of `player_count` players.
    ///
    /// Two players hold 7 cards, three hold 6, four hold 5.
    pub fn for_players(player_count: usize) -> Result<Self> {
        let hand_size = match player_count {
            2 => 7,
            3 => 6,
            4 => 5,
            n => return Err(Error::InvalidArgument(format!("{n} players not supported (2-4)"))),
        };
        Ok(Self {
            player_count,
            hand_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_sizes() {
        assert_eq!(GameConfig::for_players(2).unwrap().hand_size, 7);
        assert_eq!(GameConfig::for_players(3).unwrap().hand_size, 6);
        assert_eq!(GameConfig::for_players(4).unwrap().hand_size, 5);
    }

    #[test]
    fn test_unsupported_player_counts() {
        for n in [0, 1, 5] {
            assert!(matches!(GameConfig::for_players(n), Err(Error::InvalidArgument(_))));
        }
    }
}
