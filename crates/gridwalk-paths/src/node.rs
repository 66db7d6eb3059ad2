//! Grid cells and their visualization flags.
//!
//! [`GridNode`] carries what a cell is; [`NodeFlags`] records what a search
//! is doing with it.

use std::ops::BitOr;

use gridwalk_core::Position;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Display label for the node generated at row-major index `i`.
///
/// `A`..`Z` for the first 26 nodes, then `A0`..`Z0`, `A1`.. and so on.
pub fn label(i: usize) -> String {
    let letter = LETTERS[i % LETTERS.len()] as char;
    if i < LETTERS.len() {
        letter.to_string()
    } else {
        format!("{letter}{}", i / LETTERS.len() - 1)
    }
}

/// One cell of the grid: fixed identity and terrain.
///
/// Nothing here changes once the [`Graph`](crate::Graph) is built; search
/// progress lives in the engine's [`VisualState`](crate::VisualState).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridNode {
    pub(crate) pos: Position,
    pub(crate) name: String,
    pub(crate) weight: i32,
    pub(crate) wall: bool,
    pub(crate) goal: bool,
    pub(crate) occupied: bool,
    pub(crate) real: bool,
}

impl GridNode {
    pub(crate) fn new(pos: Position, name: String, real: bool) -> Self {
        Self {
            pos,
            name,
            weight: 1,
            wall: false,
            goal: false,
            occupied: false,
            real,
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Movement cost of entering this node. Always > 0.
    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn is_wall(&self) -> bool {
        self.wall
    }

    pub fn is_goal(&self) -> bool {
        self.goal
    }

    /// Whether this is the start node.
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Cosmetic grid-membership flag. Ignored by search.
    pub fn is_real(&self) -> bool {
        self.real
    }
}

/// Per-node search visualization bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeFlags(pub u8);

impl NodeFlags {
    pub const NONE: Self = Self(0);
    /// Being expanded in the current step.
    pub const CURRENT: Self = Self(1 << 0);
    /// Queued, waiting for expansion.
    pub const FRONTIER: Self = Self(1 << 1);
    /// Discovered by the current step.
    pub const NEIGHBOUR: Self = Self(1 << 2);
    pub const REACHED: Self = Self(1 << 3);
    pub const PATH: Self = Self(1 << 4);
    /// Renderers should draw the arrow toward the predecessor.
    pub const CAME_FROM_DIRECTION: Self = Self(1 << 5);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether any bit from `other` is set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for NodeFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_wrap_with_suffix() {
        assert_eq!(label(0), "A");
        assert_eq!(label(25), "Z");
        assert_eq!(label(26), "A0");
        assert_eq!(label(27), "B0");
        assert_eq!(label(52), "A1");
    }

    #[test]
    fn flag_insert_remove() {
        let mut f = NodeFlags::NONE;
        f.insert(NodeFlags::CURRENT | NodeFlags::FRONTIER);
        assert!(f.contains(NodeFlags::CURRENT));
        assert!(f.intersects(NodeFlags::FRONTIER | NodeFlags::PATH));
        f.remove(NodeFlags::CURRENT | NodeFlags::FRONTIER);
        f.insert(NodeFlags::REACHED);
        assert_eq!(f, NodeFlags::REACHED);
        assert!(!f.is_empty());
    }
}
