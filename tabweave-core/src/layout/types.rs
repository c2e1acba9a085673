//! Core type definitions for the split layout engine
//!
//! This module contains the identifier types, the id allocator and the
//! direction enums used throughout the layout system.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identifier for a tab-group within a split layout.
///
/// A group keeps its ID for its whole lifetime, even as the tree around
/// it is split and merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

/// Unique identifier for a splitter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SplitterId(pub u64);

impl fmt::Display for SplitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "splitter-{}", self.0)
    }
}

/// Identifier of any node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// A tab-group leaf.
    Group(GroupId),
    /// A splitter.
    Splitter(SplitterId),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(id) => id.fmt(f),
            Self::Splitter(id) => id.fmt(f),
        }
    }
}

/// Sequence-number generator for node identifiers.
///
/// Clones share the same sequence, so one allocator can be handed to
/// several engines living in the same window. Separately constructed
/// allocators are fully independent.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: Arc<AtomicU64>,
}

impl IdAllocator {
    /// Creates an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator whose first issued value is `start`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Returns the next raw sequence number.
    pub fn next_raw(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Allocates a new group ID.
    pub fn group(&self) -> GroupId {
        GroupId(self.next_raw())
    }

    /// Allocates a new splitter ID.
    pub fn splitter(&self) -> SplitterId {
        SplitterId(self.next_raw())
    }
}

/// Axis along which a splitter arranges its children.
///
/// Naming follows the divider: a vertical split draws vertical dividers
/// and lays its children out left to right (a row of columns); a
/// horizontal split stacks its children top to bottom (a column of rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Split horizontally, creating top and bottom panes.
    Horizontal,
    /// Split vertically, creating left and right panes.
    Vertical,
}

impl SplitDirection {
    /// Returns the other axis.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Screen direction for spatial navigation between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards smaller x.
    Left,
    /// Towards larger x.
    Right,
    /// Towards smaller y.
    Above,
    /// Towards larger y.
    Below,
}

impl Direction {
    /// Returns all directions.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Left, Self::Right, Self::Above, Self::Below]
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Above => write!(f, "above"),
            Self::Below => write!(f, "below"),
        }
    }
}
