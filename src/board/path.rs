//! Open ends of the tile chain.

use serde::{Deserialize, Serialize};

/// One open, extendable end of the domino chain.
///
/// Paths are created only by the opening placement (four arms for a double,
/// two otherwise) and live until the round ends. Playing a tile onto a path
/// flips its `value` to the tile's other face and deepens it by one; it
/// never creates or removes paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    index: usize,
    value: u8,
    depth: u32,
}

impl Path {
    pub(crate) const fn new(index: usize, value: u8) -> Self {
        Self {
            index,
            value,
            depth: 1,
        }
    }

    /// Position in the board's path list; stable for the whole round.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Face value a new tile must carry to extend this path.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Number of tiles placed along this path so far.
    ///
    /// Only used as a tie-break: growth is steered onto the shallowest arm.
    #[must_use]
    pub const fn depth(self) -> u32 {
        self.depth
    }

    /// Extend with a tile whose unmatched face is `new_value`.
    pub(crate) fn extend(&mut self, new_value: u8) {
        self.value = new_value;
        self.depth += 1;
    }

    #[cfg(test)]
    pub(crate) const fn with_state(index: usize, value: u8, depth: u32) -> Self {
        Self {
            index,
            value,
            depth,
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "path {} (open {}, depth {})", self.index, self.value, self.depth)
    }
}
