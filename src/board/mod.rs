//! Board: the growing tile chain and its open paths.
//!
//! The board owns the ordered list of placed tiles (append-only within a
//! round) and the active paths. The set of path values is always exactly the
//! set of face values currently playable.
//!
//! ## Placement
//!
//! `process_new_tile` assumes the tile was already confirmed playable. When
//! the tile's two faces match open paths of two *distinct* values, the
//! caller must resolve the ambiguity first (see [`Board::connection_choices`])
//! and name the connecting face. Among the paths matching that face, the
//! shallowest one wins, first-created on equal depth, so growth stays
//! balanced across arms instead of exhausting one.

mod path;

pub use path::Path;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::Tile;
use crate::{EngineError, Result};

/// The tile chain for one round.
///
/// Created empty at round start, seeded by exactly one opening tile,
/// mutated by every subsequent legal play, discarded at round end.
#[derive(Clone, Debug, Default)]
pub struct Board {
    tiles: Vec<Tile>,
    paths: SmallVec<[Path; 4]>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles placed so far, in placement order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The opening tile, once placed.
    #[must_use]
    pub fn opening_tile(&self) -> Option<Tile> {
        self.tiles.first().copied()
    }

    /// The open paths. Empty until the opening move.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Place the opening tile, chosen by opening-move arbitration.
    ///
    /// A double opens cross-shaped: four arms all sharing its value. Any
    /// other tile opens two arms, one per face. Called exactly once per
    /// round, on an empty board.
    pub fn add_starting_tile(&mut self, tile: Tile) {
        debug_assert!(self.tiles.is_empty(), "opening move on a non-empty board");

        if tile.is_double() {
            for i in 0..4 {
                self.paths.push(Path::new(i, tile.x()));
            }
        } else {
            self.paths.push(Path::new(0, tile.x()));
            self.paths.push(Path::new(1, tile.y()));
        }
        self.tiles.push(tile);
    }

    /// The set of face values currently playable.
    #[must_use]
    pub fn open_values(&self) -> FxHashSet<u8> {
        self.paths.iter().map(|p| p.value()).collect()
    }

    /// All paths `tile` could extend (either face matches the path value).
    pub fn matching_paths(&self, tile: Tile) -> impl Iterator<Item = &Path> {
        self.paths.iter().filter(move |p| tile.has_face(p.value()))
    }

    /// A tile is playable iff at least one path matches one of its faces.
    #[must_use]
    pub fn is_playable(&self, tile: Tile) -> bool {
        self.matching_paths(tile).next().is_some()
    }

    /// Distinct tile faces that currently match some open path.
    ///
    /// One entry: the placement is unambiguous. Two entries: both faces are
    /// independently playable and an external decision must name the
    /// connecting face. Empty: the tile is not playable at all.
    #[must_use]
    pub fn connection_choices(&self, tile: Tile) -> SmallVec<[u8; 2]> {
        let mut choices = SmallVec::new();
        for path in self.matching_paths(tile) {
            let face = if tile.x() == path.value() {
                tile.x()
            } else {
                tile.y()
            };
            if !choices.contains(&face) {
                choices.push(face);
            }
        }
        choices
    }

    /// Place a confirmed-playable tile, connecting via `connecting_value`.
    ///
    /// Among the paths open on `connecting_value`, the lowest-depth one is
    /// extended (lowest index on ties): its value becomes the tile's other
    /// face and its depth grows by one. No other path is touched. Returns
    /// the index of the extended path.
    pub fn process_new_tile(&mut self, tile: Tile, connecting_value: u8) -> Result<usize> {
        if !tile.has_face(connecting_value) {
            return Err(EngineError::InvalidConnection {
                tile,
                value: connecting_value,
            });
        }

        let chosen = self
            .paths
            .iter()
            .filter(|p| p.value() == connecting_value)
            .min_by_key(|p| (p.depth(), p.index()))
            .map(|p| p.index())
            .ok_or(EngineError::UnplayableTile { tile })?;

        self.paths[chosen].extend(tile.other_face(connecting_value));
        self.tiles.push(tile);
        Ok(chosen)
    }

    #[cfg(test)]
    pub(crate) fn with_state(tiles: Vec<Tile>, paths: &[Path]) -> Self {
        Self {
            tiles,
            paths: SmallVec::from_slice(paths),
        }
    }
}
