//! Error types for split layout operations
//!
//! This module defines the error type and result enums used throughout
//! the layout engine.

use super::types::GroupId;

/// Errors that can occur during split layout operations.
///
/// All variants are lookup failures or precondition failures. They are
/// deterministic given the tree state, and the tree is left unchanged
/// when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The specified group was not found.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// No group in the tree owns the given widget.
    #[error("no group owns the given widget")]
    WidgetNotFound,

    /// No slot in the tree holds the given content element.
    #[error("content not found in layout")]
    ContentNotFound,

    /// No slot in the tree holds the given tab handle.
    #[error("tab not found in layout")]
    TabNotFound,

    /// The content element is already present somewhere in the tree.
    #[error("content is already present in {0}")]
    DuplicateContent(GroupId),

    /// A geometry query ran before the tree was reconciled.
    #[error("layout has not been materialized; call update() first")]
    NotMaterialized,
}

/// Result of closing the split boundary next to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Two groups were merged.
    Merged {
        /// The group whose slots were moved away and which no longer exists.
        removed: GroupId,
        /// The group that now holds both slot sequences.
        survivor: GroupId,
    },
    /// The group has no sibling to merge with (it is the root).
    NotApplicable,
}

impl MergeOutcome {
    /// Returns true if a merge happened.
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }

    /// Returns the surviving group, if a merge happened.
    #[must_use]
    pub const fn survivor(&self) -> Option<GroupId> {
        match self {
            Self::Merged { survivor, .. } => Some(*survivor),
            Self::NotApplicable => None,
        }
    }
}
