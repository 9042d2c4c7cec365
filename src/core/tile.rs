//! Domino tile value type.
//!
//! A tile is an unordered pair of face values. Construction preserves the
//! order the faces were given in (presentation layers care about which face
//! was named first), but equality and hashing ignore it: `Tile::new(3, 4)`
//! and `Tile::new(4, 3)` are the same tile for matching purposes.
//!
//! Tiles are immutable and move between stock, hand and board by ownership
//! transfer - they are never duplicated.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A domino tile: two face values in `0..=highest_face_value`.
#[derive(Clone, Copy, Debug, Eq, Serialize, Deserialize)]
pub struct Tile {
    x: u8,
    y: u8,
}

impl Tile {
    /// Create a new tile. Face order is preserved as given.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// First face as constructed.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Second face as constructed.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Sum of the two faces. Used for scoring and the greedy policy.
    #[must_use]
    pub const fn weight(self) -> u32 {
        self.x as u32 + self.y as u32
    }

    /// A tile is a double iff both faces are equal.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.x == self.y
    }

    /// Does either face carry `value`?
    #[must_use]
    pub const fn has_face(self, value: u8) -> bool {
        self.x == value || self.y == value
    }

    /// The face that is *not* `matched`. For a double this is the same value.
    ///
    /// Callers must only pass a value that is actually one of the faces.
    #[must_use]
    pub const fn other_face(self, matched: u8) -> u8 {
        if self.x == matched {
            self.y
        } else {
            self.x
        }
    }

    /// Opening rank: `(higher face, lower face)`, compared lexicographically.
    ///
    /// 5-6 outranks 4-6 outranks 5-5.
    #[must_use]
    pub const fn rank(self) -> (u8, u8) {
        if self.x >= self.y {
            (self.x, self.y)
        } else {
            (self.y, self.x)
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// All tiles of a double-`highest_face` set: every unordered pair of faces.
pub fn full_set(highest_face: u8) -> Vec<Tile> {
    let mut tiles = Vec::new();
    for x in 0..=highest_face {
        for y in x..=highest_face {
            tiles.push(Tile::new(x, y));
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_and_double() {
        assert_eq!(Tile::new(3, 4).weight(), 7);
        assert_eq!(Tile::new(0, 0).weight(), 0);
        assert!(Tile::new(5, 5).is_double());
        assert!(!Tile::new(5, 6).is_double());
    }

    #[test]
    fn test_equality_ignores_face_order() {
        assert_eq!(Tile::new(3, 4), Tile::new(4, 3));
        assert_ne!(Tile::new(3, 4), Tile::new(3, 3));

        // Construction still preserves order.
        let t = Tile::new(4, 3);
        assert_eq!(t.x(), 4);
        assert_eq!(t.y(), 3);
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |t: Tile| {
            let mut h = DefaultHasher::new();
            t.hash(&mut h);
            h.finish()
        };

        assert_eq!(hash(Tile::new(3, 4)), hash(Tile::new(4, 3)));
    }

    #[test]
    fn test_other_face() {
        let t = Tile::new(3, 4);
        assert_eq!(t.other_face(3), 4);
        assert_eq!(t.other_face(4), 3);
        assert_eq!(Tile::new(5, 5).other_face(5), 5);
    }

    #[test]
    fn test_rank_ordering() {
        // 5-6 outranks 4-6 outranks 5-5.
        assert!(Tile::new(5, 6).rank() > Tile::new(4, 6).rank());
        assert!(Tile::new(4, 6).rank() > Tile::new(5, 5).rank());
        assert_eq!(Tile::new(5, 6).rank(), Tile::new(6, 5).rank());
    }

    #[test]
    fn test_full_set_size() {
        // Double-six set has 28 tiles, no repeats.
        let tiles = full_set(6);
        assert_eq!(tiles.len(), 28);

        let unique: std::collections::HashSet<_> = tiles.iter().copied().collect();
        assert_eq!(unique.len(), 28);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Tile::new(6, 2)), "6-2");
    }
}
