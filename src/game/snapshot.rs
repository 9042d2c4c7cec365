//! Read-only state snapshots for the presentation layer.
//!
//! The presentation layer never touches live engine state: when the change
//! signal fires it takes a fresh snapshot and renders from that. Snapshots
//! are plain owned data, safe to move across threads and serialize.

use serde::{Deserialize, Serialize};

use crate::board::Path;
use crate::core::{PlayerId, Tile};

/// One player's visible state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Tile>,
    pub score: u32,
    /// True for automated players, false for interactive ones.
    pub is_bot: bool,
    /// False once the player had to skip with an empty stock.
    pub is_move_available: bool,
}

/// The board's visible state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub opening_tile: Option<Tile>,
    /// Open paths with their current value and depth.
    pub paths: Vec<Path>,
    /// Full placed-tile sequence, in placement order.
    pub tiles: Vec<Tile>,
}

/// A complete, consistent view of one match at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Players in current turn order (the order rotates across rounds).
    pub players: Vec<PlayerSnapshot>,
    /// Index into `players` of whoever acts next.
    pub current_player: usize,
    pub board: BoardSnapshot,
    /// Tiles left to draw from.
    pub stock_count: usize,
    /// 1-based; 0 before the first round starts.
    pub round_number: u32,
}
