//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Type-safe, stable player identifier. The turn order (the `Game`'s player
//! sequence) mutates across rounds as openers rotate to the back; `PlayerId`
//! does not, so the presentation layer can address a player regardless of
//! where they currently sit in the order.
//!
//! ## Player
//!
//! One match participant: display name, current hand, cross-round score,
//! per-turn availability flag, and the move source that decides for them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::Tile;
use crate::decision::MoveSource;

/// Stable player identifier.
///
/// Player indices are 0-based in registration order, not turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A match participant.
///
/// Created once per match; the hand is cleared and re-dealt every round,
/// the score persists and accumulates until the match ends.
pub struct Player {
    id: PlayerId,
    name: String,
    hand: SmallVec<[Tile; 8]>,
    score: u32,
    is_move_available: bool,
    source: Box<dyn MoveSource + Send>,
}

impl Player {
    /// Create a new player with the given move source.
    pub fn new(id: PlayerId, name: impl Into<String>, source: Box<dyn MoveSource + Send>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: SmallVec::new(),
            score: 0,
            is_move_available: true,
            source,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current hand contents.
    #[must_use]
    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    /// Cumulative cross-round score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Could this player act the last time their turn came up?
    #[must_use]
    pub fn is_move_available(&self) -> bool {
        self.is_move_available
    }

    /// Is this player driven by an interactive (suspending) source?
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.source.is_interactive()
    }

    /// The move source deciding for this player.
    pub fn source_mut(&mut self) -> &mut (dyn MoveSource + Send) {
        &mut *self.source
    }

    /// Sum of remaining hand tile weights.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.hand.iter().map(|t| t.weight()).sum()
    }

    #[must_use]
    pub fn is_hand_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Does the hand contain `tile` (face order ignored)?
    #[must_use]
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.hand.contains(&tile)
    }

    /// Remove `tile` from the hand and hand it to the caller.
    ///
    /// Matching ignores face order. Returns `None` if the tile is absent.
    pub fn take_tile(&mut self, tile: Tile) -> Option<Tile> {
        let pos = self.hand.iter().position(|t| *t == tile)?;
        Some(self.hand.remove(pos))
    }

    /// Add a tile to the hand (deal or draw).
    pub fn give_tile(&mut self, tile: Tile) {
        self.hand.push(tile);
    }

    /// The hand's highest tile by opening rank, if any.
    #[must_use]
    pub fn highest_rank_tile(&self) -> Option<Tile> {
        self.hand.iter().copied().max_by_key(|t| t.rank())
    }

    /// Has this player's score reached the elimination threshold?
    #[must_use]
    pub fn is_goat(&self, threshold: u32) -> bool {
        self.score >= threshold
    }

    /// Add a round's scoring delta.
    pub fn add_score(&mut self, delta: u32) {
        self.score += delta;
    }

    pub fn set_move_available(&mut self, available: bool) {
        self.is_move_available = available;
    }

    /// Clear the hand and availability flag at round start.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.is_move_available = true;
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hand", &self.hand)
            .field("score", &self.score)
            .field("is_move_available", &self.is_move_available)
            .field("interactive", &self.source.is_interactive())
            .finish()
    }
}
