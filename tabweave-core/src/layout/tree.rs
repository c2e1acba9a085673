//! Pane tree structure for split layouts
//!
//! This module provides the n-ary tree used to represent nested splits.
//! Each node is either a splitter (an ordered list of children arranged
//! along one axis) or a tab-group leaf holding an ordered list of slots.
//!
//! # Tree Structure
//!
//! ```text
//! Splitter(Vertical)
//! ├── Group(A, [slot 1, slot 2])
//! └── Splitter(Horizontal)
//!     ├── Group(B, [])
//!     └── Group(C, [slot 3])
//! ```
//!
//! Nodes are generic over the widget handle type `W` of the toolkit that
//! renders them. Handles are compared with `PartialEq`; a content element
//! appears in at most one slot of the whole tree.
//!
//! Live widgets referenced by a node start out as `None` and are filled in
//! once by the reconciliation pass. When a node leaves the tree its widgets
//! are pushed onto a retirement list so the next update can discard them.

use serde::{Deserialize, Serialize};

use super::error::MergeOutcome;
use super::types::{GroupId, IdAllocator, NodeId, SplitDirection, SplitterId};

/// Which side of an existing node a new node is inserted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The new node precedes the target.
    Before,
    /// The new node follows the target.
    After,
}

/// One open tab: a caller-supplied tab handle and content element, plus a
/// container widget created lazily during reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSlot<W> {
    pub(crate) tab: W,
    pub(crate) content: W,
    pub(crate) container: Option<W>,
}

impl<W> TabSlot<W> {
    /// Creates a slot whose container has not been materialized yet.
    #[must_use]
    pub fn new(tab: W, content: W) -> Self {
        Self {
            tab,
            content,
            container: None,
        }
    }

    /// The tab handle.
    #[must_use]
    pub fn tab(&self) -> &W {
        &self.tab
    }

    /// The content element.
    #[must_use]
    pub fn content(&self) -> &W {
        &self.content
    }

    /// The container element, once materialized.
    #[must_use]
    pub fn container(&self) -> Option<&W> {
        self.container.as_ref()
    }

    /// Retires the container and returns the caller-owned handles.
    pub(crate) fn release(self, retired: &mut Vec<W>) -> (W, W) {
        if let Some(container) = self.container {
            retired.push(container);
        }
        (self.tab, self.content)
    }
}

/// A tab-group leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct TabGroup<W> {
    pub(crate) id: GroupId,
    pub(crate) slots: Vec<TabSlot<W>>,
    /// Synthetic slot shown while `slots` is empty.
    pub(crate) empty_state: Option<TabSlot<W>>,
    pub(crate) left_space: Option<W>,
    pub(crate) right_space: Option<W>,
    pub(crate) widget: Option<W>,
}

impl<W> TabGroup<W> {
    /// Creates an empty, unmaterialized group.
    #[must_use]
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            slots: Vec::new(),
            empty_state: None,
            left_space: None,
            right_space: None,
            widget: None,
        }
    }

    /// Creates an unmaterialized group holding the given slots.
    #[must_use]
    pub fn with_slots(id: GroupId, slots: Vec<TabSlot<W>>) -> Self {
        Self {
            slots,
            ..Self::new(id)
        }
    }

    /// The group's identifier.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// The slots in tab order.
    #[must_use]
    pub fn slots(&self) -> &[TabSlot<W>] {
        &self.slots
    }

    /// Number of slots in the group.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the group has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The live tab widget, once materialized.
    #[must_use]
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// The per-group left accessory, once created.
    #[must_use]
    pub fn left_space(&self) -> Option<&W> {
        self.left_space.as_ref()
    }

    /// The per-group right accessory, once created.
    #[must_use]
    pub fn right_space(&self) -> Option<&W> {
        self.right_space.as_ref()
    }

    /// The empty-state slot, once created.
    #[must_use]
    pub fn empty_state(&self) -> Option<&TabSlot<W>> {
        self.empty_state.as_ref()
    }

    /// Retires every widget owned by the group and hands back its slots.
    pub(crate) fn dissolve(self, retired: &mut Vec<W>) -> Vec<TabSlot<W>> {
        retired.extend(self.widget);
        retired.extend(self.left_space);
        retired.extend(self.right_space);
        if let Some(empty) = self.empty_state {
            let (tab, content) = empty.release(retired);
            retired.push(tab);
            retired.push(content);
        }
        self.slots
    }
}

impl<W: PartialEq> TabGroup<W> {
    /// Index of the slot holding `content`.
    #[must_use]
    pub fn position_of_content(&self, content: &W) -> Option<usize> {
        self.slots.iter().position(|s| &s.content == content)
    }

    /// Index of the slot holding `tab`.
    #[must_use]
    pub fn position_of_tab(&self, tab: &W) -> Option<usize> {
        self.slots.iter().position(|s| &s.tab == tab)
    }
}

/// A splitter node arranging its children along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterNode<W> {
    pub(crate) id: SplitterId,
    pub(crate) direction: SplitDirection,
    pub(crate) children: Vec<PaneNode<W>>,
    pub(crate) widget: Option<W>,
}

impl<W> SplitterNode<W> {
    /// Creates a splitter with the given children.
    #[must_use]
    pub fn new(id: SplitterId, direction: SplitDirection, children: Vec<PaneNode<W>>) -> Self {
        Self {
            id,
            direction,
            children,
            widget: None,
        }
    }

    /// The splitter's identifier.
    #[must_use]
    pub const fn id(&self) -> SplitterId {
        self.id
    }

    /// The axis the children are arranged along.
    #[must_use]
    pub const fn direction(&self) -> SplitDirection {
        self.direction
    }

    /// The children in layout order.
    #[must_use]
    pub fn children(&self) -> &[PaneNode<W>] {
        &self.children
    }

    /// The live splitter widget, once materialized.
    #[must_use]
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }
}

/// A node in the pane tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneNode<W> {
    /// A splitter with one or more children.
    Splitter(SplitterNode<W>),
    /// A tab-group leaf.
    Group(TabGroup<W>),
}

impl<W> PaneNode<W> {
    /// Creates a new empty group leaf.
    #[must_use]
    pub fn new_group(id: GroupId) -> Self {
        Self::Group(TabGroup::new(id))
    }

    /// The node's identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Splitter(s) => NodeId::Splitter(s.id),
            Self::Group(g) => NodeId::Group(g.id),
        }
    }

    /// The node's live widget, once materialized.
    #[must_use]
    pub fn widget(&self) -> Option<&W> {
        match self {
            Self::Splitter(s) => s.widget.as_ref(),
            Self::Group(g) => g.widget.as_ref(),
        }
    }

    /// Returns the group if this node is a leaf.
    #[must_use]
    pub const fn as_group(&self) -> Option<&TabGroup<W>> {
        match self {
            Self::Group(g) => Some(g),
            Self::Splitter(_) => None,
        }
    }

    /// Returns the splitter if this node is not a leaf.
    #[must_use]
    pub const fn as_splitter(&self) -> Option<&SplitterNode<W>> {
        match self {
            Self::Splitter(s) => Some(s),
            Self::Group(_) => None,
        }
    }

    // ========================================================================
    // Tree Traversal Methods
    // ========================================================================

    /// Finds a group by ID.
    #[must_use]
    pub fn find_group(&self, id: GroupId) -> Option<&TabGroup<W>> {
        match self {
            Self::Group(g) => (g.id == id).then_some(g),
            Self::Splitter(s) => s.children.iter().find_map(|c| c.find_group(id)),
        }
    }

    /// Finds a group by ID and returns a mutable reference.
    pub fn find_group_mut(&mut self, id: GroupId) -> Option<&mut TabGroup<W>> {
        match self {
            Self::Group(g) => (g.id == id).then_some(g),
            Self::Splitter(s) => s.children.iter_mut().find_map(|c| c.find_group_mut(id)),
        }
    }

    /// Returns the child-index path from this node to the group.
    ///
    /// An empty path means this node is the group itself.
    #[must_use]
    pub fn path_to_group(&self, id: GroupId) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        self.collect_path(id, &mut path).then_some(path)
    }

    fn collect_path(&self, id: GroupId, path: &mut Vec<usize>) -> bool {
        match self {
            Self::Group(g) => g.id == id,
            Self::Splitter(s) => {
                for (index, child) in s.children.iter().enumerate() {
                    path.push(index);
                    if child.collect_path(id, path) {
                        return true;
                    }
                    path.pop();
                }
                false
            }
        }
    }

    /// Returns the node at the given child-index path.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&Self> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => match self {
                Self::Splitter(s) => s.children.get(index)?.node_at(rest),
                Self::Group(_) => None,
            },
        }
    }

    /// Mutable variant of [`Self::node_at`].
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => match self {
                Self::Splitter(s) => s.children.get_mut(index)?.node_at_mut(rest),
                Self::Group(_) => None,
            },
        }
    }

    /// Returns all groups in depth-first, left-to-right order.
    #[must_use]
    pub fn groups(&self) -> Vec<&TabGroup<W>> {
        let mut groups = Vec::new();
        self.collect_groups(&mut groups);
        groups
    }

    fn collect_groups<'a>(&'a self, out: &mut Vec<&'a TabGroup<W>>) {
        match self {
            Self::Group(g) => out.push(g),
            Self::Splitter(s) => {
                for child in &s.children {
                    child.collect_groups(out);
                }
            }
        }
    }

    /// Returns all group IDs in depth-first, left-to-right order.
    #[must_use]
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups().into_iter().map(|g| g.id).collect()
    }

    /// Returns the number of groups in the tree.
    #[must_use]
    pub fn group_count(&self) -> usize {
        match self {
            Self::Group(_) => 1,
            Self::Splitter(s) => s.children.iter().map(Self::group_count).sum(),
        }
    }

    /// Returns the total number of slots across all groups.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Group(g) => g.slots.len(),
            Self::Splitter(s) => s.children.iter().map(Self::slot_count).sum(),
        }
    }

    /// Returns the depth of the tree.
    ///
    /// A single group has depth 0. Each level of splitters adds 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Group(_) => 0,
            Self::Splitter(s) => 1 + s.children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// Returns the first group in the tree (leftmost/topmost, depth-first).
    #[must_use]
    pub fn first_group(&self) -> Option<&TabGroup<W>> {
        match self {
            Self::Group(g) => Some(g),
            Self::Splitter(s) => s.children.first()?.first_group(),
        }
    }

    /// Mutable variant of [`Self::first_group`].
    pub fn first_group_mut(&mut self) -> Option<&mut TabGroup<W>> {
        match self {
            Self::Group(g) => Some(g),
            Self::Splitter(s) => s.children.first_mut()?.first_group_mut(),
        }
    }

    /// Returns true if some splitter in the tree has fewer than two children.
    #[must_use]
    pub fn has_redundant_splitter(&self) -> bool {
        match self {
            Self::Group(_) => false,
            Self::Splitter(s) => {
                s.children.len() < 2 || s.children.iter().any(Self::has_redundant_splitter)
            }
        }
    }

    /// Returns the structural description of the tree.
    #[must_use]
    pub fn shape(&self) -> LayoutShape {
        match self {
            Self::Group(g) => LayoutShape::Group {
                id: g.id,
                slots: g.slots.len(),
            },
            Self::Splitter(s) => LayoutShape::Splitter {
                direction: s.direction,
                children: s.children.iter().map(Self::shape).collect(),
            },
        }
    }

    // ========================================================================
    // Tree Mutation Methods
    // ========================================================================

    /// Places `group` next to the node at `path` along `direction`.
    ///
    /// If the parent splitter already runs along `direction`, the group is
    /// inserted as a sibling. Otherwise the node at `path` is wrapped in a
    /// new splitter holding both. Hands the group back if `path` is invalid.
    pub(crate) fn insert_beside(
        &mut self,
        path: &[usize],
        group: TabGroup<W>,
        direction: SplitDirection,
        side: Side,
        ids: &IdAllocator,
    ) -> Result<(), TabGroup<W>> {
        let Some((&index, parent_path)) = path.split_last() else {
            self.wrap_in_splitter(group, direction, side, ids);
            return Ok(());
        };

        let Some(Self::Splitter(parent)) = self.node_at_mut(parent_path) else {
            return Err(group);
        };
        if index >= parent.children.len() {
            return Err(group);
        }

        if parent.direction == direction {
            let at = match side {
                Side::Before => index,
                Side::After => index + 1,
            };
            parent.children.insert(at, Self::Group(group));
        } else {
            parent.children[index].wrap_in_splitter(group, direction, side, ids);
        }
        Ok(())
    }

    /// Replaces this node with a new splitter holding it and `group`.
    fn wrap_in_splitter(
        &mut self,
        group: TabGroup<W>,
        direction: SplitDirection,
        side: Side,
        ids: &IdAllocator,
    ) {
        let splitter = SplitterNode::new(ids.splitter(), direction, Vec::new());
        let existing = std::mem::replace(self, Self::Splitter(splitter));
        let added = Self::Group(group);
        if let Self::Splitter(splitter) = self {
            splitter.children = match side {
                Side::Before => vec![added, existing],
                Side::After => vec![existing, added],
            };
        }
    }

    /// Merges the group at `path` with its neighbour in the parent splitter.
    ///
    /// The right-hand neighbour is preferred; the left one is used when the
    /// group is the last child. Two adjacent groups merge into the left one,
    /// unless the target is empty, in which case the target is removed and
    /// the neighbour kept. When the neighbour is a splitter subtree, the
    /// group is merged into that subtree's first group. Slot order follows
    /// screen order.
    ///
    /// Redundant splitters are not collapsed here.
    pub(crate) fn merge_with_sibling(
        &mut self,
        path: &[usize],
        retired: &mut Vec<W>,
    ) -> MergeOutcome {
        let Some((&index, parent_path)) = path.split_last() else {
            return MergeOutcome::NotApplicable;
        };
        let Some(Self::Splitter(parent)) = self.node_at_mut(parent_path) else {
            return MergeOutcome::NotApplicable;
        };
        let len = parent.children.len();
        if len < 2 || index >= len || !matches!(parent.children[index], Self::Group(_)) {
            return MergeOutcome::NotApplicable;
        }

        let sibling = if index + 1 < len { index + 1 } else { index - 1 };
        let sibling_is_right = sibling > index;

        let target_is_empty =
            matches!(&parent.children[index], Self::Group(g) if g.slots.is_empty());

        if matches!(parent.children[sibling], Self::Group(_)) && !target_is_empty {
            let (left, right) = if sibling_is_right {
                (index, sibling)
            } else {
                (sibling, index)
            };
            let Self::Group(absorbed) = parent.children.remove(right) else {
                return MergeOutcome::NotApplicable;
            };
            let removed = absorbed.id;
            let slots = absorbed.dissolve(retired);
            let Self::Group(survivor) = &mut parent.children[left] else {
                return MergeOutcome::NotApplicable;
            };
            survivor.slots.extend(slots);
            MergeOutcome::Merged {
                removed,
                survivor: survivor.id,
            }
        } else {
            let Self::Group(target) = parent.children.remove(index) else {
                return MergeOutcome::NotApplicable;
            };
            let removed = target.id;
            let slots = target.dissolve(retired);
            let neighbour = if sibling_is_right { sibling - 1 } else { sibling };
            let Some(survivor) = parent.children[neighbour].first_group_mut() else {
                return MergeOutcome::NotApplicable;
            };
            if sibling_is_right {
                let mut merged = slots;
                merged.append(&mut survivor.slots);
                survivor.slots = merged;
            } else {
                survivor.slots.extend(slots);
            }
            MergeOutcome::Merged {
                removed,
                survivor: survivor.id,
            }
        }
    }

    /// Collapses every splitter with exactly one child into that child,
    /// bottom-up. Returns the number of splitters removed.
    pub fn collapse_redundant(&mut self, retired: &mut Vec<W>) -> usize {
        let Self::Splitter(splitter) = self else {
            return 0;
        };

        let mut collapsed = 0;
        for child in &mut splitter.children {
            collapsed += child.collapse_redundant(retired);
        }

        if splitter.children.len() == 1 {
            retired.extend(splitter.widget.take());
            if let Some(only) = splitter.children.pop() {
                *self = only;
                collapsed += 1;
            }
        }
        collapsed
    }
}

impl<W: PartialEq> PaneNode<W> {
    /// Finds the group whose live widget is `widget`.
    #[must_use]
    pub fn group_by_widget(&self, widget: &W) -> Option<GroupId> {
        self.groups()
            .into_iter()
            .find(|g| g.widget.as_ref() == Some(widget))
            .map(|g| g.id)
    }

    /// Finds the group holding `content`.
    #[must_use]
    pub fn group_by_content(&self, content: &W) -> Option<GroupId> {
        self.groups()
            .into_iter()
            .find(|g| g.position_of_content(content).is_some())
            .map(|g| g.id)
    }

    /// Finds the group holding `tab`.
    #[must_use]
    pub fn group_by_tab(&self, tab: &W) -> Option<GroupId> {
        self.groups()
            .into_iter()
            .find(|g| g.position_of_tab(tab).is_some())
            .map(|g| g.id)
    }

    /// Finds the slot holding `content`.
    #[must_use]
    pub fn slot_by_content(&self, content: &W) -> Option<&TabSlot<W>> {
        self.groups()
            .into_iter()
            .flat_map(|g| g.slots.iter())
            .find(|s| &s.content == content)
    }

    /// Finds the slot holding `tab`.
    #[must_use]
    pub fn slot_by_tab(&self, tab: &W) -> Option<&TabSlot<W>> {
        self.groups()
            .into_iter()
            .flat_map(|g| g.slots.iter())
            .find(|s| &s.tab == tab)
    }
}

/// Structural description of a pane tree.
///
/// Two trees with equal shapes reconcile to the same widget arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutShape {
    /// A splitter and its children in order.
    Splitter {
        /// Axis of the splitter.
        direction: SplitDirection,
        /// Child shapes in layout order.
        children: Vec<LayoutShape>,
    },
    /// A tab-group and how many slots it holds.
    Group {
        /// Group identifier.
        id: GroupId,
        /// Number of slots.
        slots: usize,
    },
}

impl LayoutShape {
    /// Returns the number of groups described.
    #[must_use]
    pub fn group_count(&self) -> usize {
        match self {
            Self::Group { .. } => 1,
            Self::Splitter { children, .. } => children.iter().map(Self::group_count).sum(),
        }
    }
}
