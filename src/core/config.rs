//! Engine configuration.
//!
//! A static `GameConfig` is supplied at engine construction. The recognized
//! options are the rules constants: tile set size, per-round draw counts,
//! the 0-0 scoring penalty, and the elimination threshold. Defaults match
//! the classic double-six game.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

/// Rules constants supplied at engine construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Highest face value in the tile set (default 6; at most 6).
    pub highest_face_value: u8,

    /// Tiles dealt per player in a 2-player round.
    pub draw_count_two_players: usize,

    /// Tiles dealt per player in a 3- or 4-player round.
    pub draw_count_multi_players: usize,

    /// Score substituted for a hand left holding only the 0-0 tile.
    pub zero_zero_penalty: u32,

    /// Cumulative score at which a player becomes the goat and the match ends.
    pub elimination_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            highest_face_value: 6,
            draw_count_two_players: 7,
            draw_count_multi_players: 5,
            zero_zero_penalty: 10,
            elimination_threshold: 101,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the default rules constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highest face value (1..=6).
    #[must_use]
    pub fn with_highest_face_value(mut self, value: u8) -> Self {
        self.highest_face_value = value;
        self
    }

    /// Set the 2-player deal size.
    #[must_use]
    pub fn with_draw_count_two_players(mut self, count: usize) -> Self {
        self.draw_count_two_players = count;
        self
    }

    /// Set the 3-4 player deal size.
    #[must_use]
    pub fn with_draw_count_multi_players(mut self, count: usize) -> Self {
        self.draw_count_multi_players = count;
        self
    }

    /// Set the 0-0 leftover penalty.
    #[must_use]
    pub fn with_zero_zero_penalty(mut self, penalty: u32) -> Self {
        self.zero_zero_penalty = penalty;
        self
    }

    /// Set the elimination threshold.
    #[must_use]
    pub fn with_elimination_threshold(mut self, threshold: u32) -> Self {
        self.elimination_threshold = threshold;
        self
    }

    /// Number of tiles in the full set for this configuration.
    #[must_use]
    pub fn stock_size(&self) -> usize {
        let n = self.highest_face_value as usize + 1;
        n * (n + 1) / 2
    }

    /// Deal size for a round with `player_count` participants.
    #[must_use]
    pub fn draw_count(&self, player_count: usize) -> usize {
        if player_count == 2 {
            self.draw_count_two_players
        } else {
            self.draw_count_multi_players
        }
    }

    /// Check the configuration against `player_count` participants.
    ///
    /// Fatal at construction: the engine refuses to build a `Game` from a
    /// configuration that cannot produce a round.
    pub fn validate(&self, player_count: usize) -> Result<()> {
        if !(2..=4).contains(&player_count) {
            return Err(EngineError::PlayerCount(player_count));
        }
        if !(1..=6).contains(&self.highest_face_value) {
            return Err(EngineError::FaceValue(self.highest_face_value));
        }
        if self.draw_count(player_count) == 0 {
            return Err(EngineError::ZeroDeal);
        }
        if self.draw_count(player_count) * player_count > self.stock_size() {
            return Err(EngineError::DealTooLarge {
                draw_count: self.draw_count(player_count),
                player_count,
                stock_size: self.stock_size(),
            });
        }
        if self.elimination_threshold == 0 {
            return Err(EngineError::ZeroThreshold);
        }
        Ok(())
    }
}
