//! The split layout engine
//!
//! [`SplitLayout`] owns the pane tree of one window together with the
//! widget toolkit that renders it. Mutations only touch the tree; widgets
//! are created, arranged and discarded by [`SplitLayout::update`].

use std::fmt;

use super::actions::LayoutAction;
use super::error::{LayoutError, MergeOutcome};
use super::navigation;
use super::reconcile::Reconciler;
use super::toolkit::{ContainerFactory, EmptyStateFactory, Factories, SpaceFactory, WidgetToolkit};
use super::tree::{LayoutShape, PaneNode, Side, TabGroup, TabSlot};
use super::types::{Direction, GroupId, IdAllocator, SplitDirection};
use crate::config::{KeybindingSettings, LayoutSettings};
use crate::trace_operation_debug;
use crate::tracing::span_names;

/// Result type for layout operations
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

/// Selects a tab-group.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneTarget<W> {
    /// By identifier.
    Group(GroupId),
    /// By the group's live tab widget.
    Widget(W),
    /// By a content element held in one of the group's slots, or by the
    /// content of its empty-state placeholder.
    Content(W),
}

/// Split layout of one window.
pub struct SplitLayout<T: WidgetToolkit> {
    toolkit: T,
    root: PaneNode<T::Widget>,
    root_container: T::Widget,
    window_id: String,
    ids: IdAllocator,
    factories: Factories<T>,
    retired: Vec<T::Widget>,
    focused: GroupId,
}

impl<T: WidgetToolkit> SplitLayout<T> {
    /// Creates a layout with a single empty group and its own id sequence.
    pub fn new(toolkit: T, root_container: T::Widget, window_id: impl Into<String>) -> Self {
        Self::with_ids(toolkit, root_container, window_id, IdAllocator::new())
    }

    /// Creates a layout drawing ids from `ids`.
    pub fn with_ids(
        toolkit: T,
        root_container: T::Widget,
        window_id: impl Into<String>,
        ids: IdAllocator,
    ) -> Self {
        let first = ids.group();
        let window_id = window_id.into();
        tracing::debug!(window_id = %window_id, group = %first, "Created split layout");
        Self {
            toolkit,
            root: PaneNode::new_group(first),
            root_container,
            window_id,
            ids,
            factories: Factories::default(),
            retired: Vec::new(),
            focused: first,
        }
    }

    /// Creates a layout for the window described by `settings`.
    pub fn from_settings(toolkit: T, root_container: T::Widget, settings: &LayoutSettings) -> Self {
        Self::new(toolkit, root_container, settings.window_id.clone())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Replaces the factory creating slot containers.
    pub fn set_container_factory(&mut self, factory: impl ContainerFactory<T> + 'static) {
        self.factories.container = Box::new(factory);
    }

    /// Sets the factory for the placeholder shown by empty groups.
    pub fn set_empty_state_factory(&mut self, factory: impl EmptyStateFactory<T> + 'static) {
        self.factories.empty_state = Some(Box::new(factory));
    }

    /// Sets the factory for per-group default accessories.
    pub fn set_space_factory(&mut self, factory: impl SpaceFactory<T> + 'static) {
        self.factories.space = Some(Box::new(factory));
    }

    /// Sets the accessory shown left of the tabs of the top-left group.
    pub fn set_top_left_space(&mut self, space: Option<T::Widget>) {
        self.factories.top_left = space;
    }

    /// Sets the accessory shown right of the tabs of the top-right group.
    pub fn set_top_right_space(&mut self, space: Option<T::Widget>) {
        self.factories.top_right = space;
    }

    /// The window identifier given to every created widget.
    pub fn window_id(&self) -> &str {
        &self.window_id
    }

    /// The toolkit rendering this layout.
    pub const fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Mutable access to the toolkit, e.g. to create tab handles.
    pub const fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    /// The container the root widget is placed in.
    pub const fn root_container(&self) -> &T::Widget {
        &self.root_container
    }

    /// The pane tree.
    pub const fn root(&self) -> &PaneNode<T::Widget> {
        &self.root
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All group ids in depth-first order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.root.group_ids()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.root.group_count()
    }

    /// Depth of the tree; 0 for a single group.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of slots across all groups.
    pub fn slot_count(&self) -> usize {
        self.root.slot_count()
    }

    /// Looks up a group.
    pub fn group(&self, id: GroupId) -> Option<&TabGroup<T::Widget>> {
        self.root.find_group(id)
    }

    /// Content elements of a group, in tab order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::GroupNotFound`] for an unknown group.
    pub fn contents(&self, id: GroupId) -> LayoutResult<Vec<T::Widget>> {
        self.existing_group(id)
            .map(|g| g.slots().iter().map(|s| s.content().clone()).collect())
    }

    /// Tab handles of a group, in tab order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::GroupNotFound`] for an unknown group.
    pub fn tabs(&self, id: GroupId) -> LayoutResult<Vec<T::Widget>> {
        self.existing_group(id)
            .map(|g| g.slots().iter().map(|s| s.tab().clone()).collect())
    }

    /// The group holding `content`.
    pub fn group_for_content(&self, content: &T::Widget) -> Option<GroupId> {
        self.root.group_by_content(content)
    }

    /// The group whose live widget is `widget`.
    pub fn group_for_widget(&self, widget: &T::Widget) -> Option<GroupId> {
        self.root.group_by_widget(widget)
    }

    /// The live widget of a group, once materialized.
    pub fn group_widget(&self, id: GroupId) -> Option<&T::Widget> {
        self.root.find_group(id).and_then(TabGroup::widget)
    }

    /// The tab handle of the slot holding `content`.
    pub fn tab_for_content(&self, content: &T::Widget) -> Option<&T::Widget> {
        self.root.slot_by_content(content).map(TabSlot::tab)
    }

    /// The content element of the slot whose tab is `tab`.
    pub fn content_for_tab(&self, tab: &T::Widget) -> Option<&T::Widget> {
        self.root.slot_by_tab(tab).map(TabSlot::content)
    }

    /// The focused group.
    pub const fn focused_group(&self) -> GroupId {
        self.focused
    }

    /// Moves focus to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::GroupNotFound`] for an unknown group.
    pub fn set_focused_group(&mut self, id: GroupId) -> LayoutResult<()> {
        self.existing_group(id)?;
        self.focused = id;
        Ok(())
    }

    /// Structural snapshot of the tree.
    pub fn shape(&self) -> LayoutShape {
        self.root.shape()
    }

    /// The structural snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn shape_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.shape())
    }

    /// Number of widgets waiting to be discarded by the next update.
    pub fn pending_discards(&self) -> usize {
        self.retired.len()
    }

    fn existing_group(&self, id: GroupId) -> LayoutResult<&TabGroup<T::Widget>> {
        self.root.find_group(id).ok_or_else(|| {
            tracing::error!(group = %id, "Group not found in layout");
            LayoutError::GroupNotFound(id)
        })
    }

    fn resolve(&self, target: &PaneTarget<T::Widget>) -> LayoutResult<GroupId> {
        let found = match target {
            PaneTarget::Group(id) => self.root.find_group(*id).map(TabGroup::id),
            PaneTarget::Widget(widget) => self.root.group_by_widget(widget),
            PaneTarget::Content(content) => self.root.group_by_content(content).or_else(|| {
                self.root
                    .groups()
                    .into_iter()
                    .find(|g| g.empty_state().is_some_and(|e| e.content() == content))
                    .map(TabGroup::id)
            }),
        };

        found.ok_or_else(|| {
            let err = match target {
                PaneTarget::Group(id) => LayoutError::GroupNotFound(*id),
                PaneTarget::Widget(_) => LayoutError::WidgetNotFound,
                PaneTarget::Content(_) => LayoutError::ContentNotFound,
            };
            tracing::error!(error = %err, ?target, "Layout target not found");
            err
        })
    }

    // ========================================================================
    // Tab Operations
    // ========================================================================

    /// Appends a slot to the end of a group.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::GroupNotFound`] for an unknown group, or
    /// [`LayoutError::DuplicateContent`] if `content` is already in the tree.
    pub fn append_tab(
        &mut self,
        group: GroupId,
        tab: T::Widget,
        content: T::Widget,
    ) -> LayoutResult<()> {
        if let Some(owner) = self.root.group_by_content(&content) {
            tracing::error!(group = %group, owner = %owner, "Content is already in the layout");
            return Err(LayoutError::DuplicateContent(owner));
        }
        let Some(target) = self.root.find_group_mut(group) else {
            tracing::error!(group = %group, "Cannot append tab to unknown group");
            return Err(LayoutError::GroupNotFound(group));
        };
        target.slots.push(TabSlot::new(tab, content));
        tracing::debug!(group = %group, slots = target.slots.len(), "Appended tab");
        Ok(())
    }

    /// Removes the slot holding `content` and returns its tab and content.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ContentNotFound`] if no slot holds `content`.
    pub fn remove_tab_content(
        &mut self,
        content: &T::Widget,
    ) -> LayoutResult<(T::Widget, T::Widget)> {
        let located = self.root.group_by_content(content).and_then(|id| {
            let group = self.root.find_group_mut(id)?;
            let index = group.position_of_content(content)?;
            Some((id, group.slots.remove(index)))
        });
        let Some((group, slot)) = located else {
            tracing::error!(?content, "Cannot remove tab: content not found");
            return Err(LayoutError::ContentNotFound);
        };

        tracing::debug!(group = %group, "Removed tab");
        Ok(slot.release(&mut self.retired))
    }

    /// Moves the slot of `tab` into `group` at `index`, clamped to the
    /// group's slot count after removal from its source.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TabNotFound`] or [`LayoutError::GroupNotFound`];
    /// the tree is unchanged in either case.
    pub fn move_tab_to_group(
        &mut self,
        tab: &T::Widget,
        group: GroupId,
        index: usize,
    ) -> LayoutResult<()> {
        let _span =
            trace_operation_debug!(span_names::LAYOUT_MOVE_TAB, group = %group, index).entered();

        let Some(source) = self.root.group_by_tab(tab) else {
            tracing::error!(?tab, "Cannot move tab: tab not found");
            return Err(LayoutError::TabNotFound);
        };
        self.existing_group(group)?;

        let slot = self
            .root
            .find_group_mut(source)
            .and_then(|g| g.position_of_tab(tab).map(|i| g.slots.remove(i)))
            .ok_or(LayoutError::TabNotFound)?;

        let Some(destination) = self.root.find_group_mut(group) else {
            return Err(LayoutError::GroupNotFound(group));
        };
        let at = index.min(destination.slots.len());
        destination.slots.insert(at, slot);

        tracing::debug!(from = %source, to = %group, index = at, "Moved tab");
        Ok(())
    }

    // ========================================================================
    // Split Operations
    // ========================================================================

    /// Places a new empty group right after (or below) the target.
    ///
    /// Returns the new group, which also receives focus.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the target cannot be resolved.
    pub fn split_after(
        &mut self,
        target: PaneTarget<T::Widget>,
        direction: SplitDirection,
    ) -> LayoutResult<GroupId> {
        let group = self.resolve(&target)?;
        self.split_group(group, direction, Side::After, Vec::new())
    }

    /// Places a new empty group right before (or above) the target.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the target cannot be resolved.
    pub fn split_before(
        &mut self,
        target: PaneTarget<T::Widget>,
        direction: SplitDirection,
    ) -> LayoutResult<GroupId> {
        let group = self.resolve(&target)?;
        self.split_group(group, direction, Side::Before, Vec::new())
    }

    /// Splits the group holding `content` after that content's slot.
    ///
    /// Slots up to and including `content` stay; later slots move into the
    /// new group, placed after the original along `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ContentNotFound`] if no slot holds `content`.
    pub fn split_at_content(
        &mut self,
        content: &T::Widget,
        direction: SplitDirection,
    ) -> LayoutResult<GroupId> {
        let Some(group) = self.root.group_by_content(content) else {
            tracing::error!(?content, "Cannot split: content not found");
            return Err(LayoutError::ContentNotFound);
        };
        let moved = self
            .root
            .find_group_mut(group)
            .and_then(|g| g.position_of_content(content).map(|i| g.slots.split_off(i + 1)))
            .unwrap_or_default();
        self.split_group(group, direction, Side::After, moved)
    }

    fn split_group(
        &mut self,
        group: GroupId,
        direction: SplitDirection,
        side: Side,
        moved: Vec<TabSlot<T::Widget>>,
    ) -> LayoutResult<GroupId> {
        let _span = trace_operation_debug!(
            span_names::LAYOUT_SPLIT,
            group = %group,
            axis = %direction
        )
        .entered();

        let Some(path) = self.root.path_to_group(group) else {
            tracing::error!(group = %group, "Cannot split unknown group");
            return Err(LayoutError::GroupNotFound(group));
        };

        let new_id = self.ids.group();
        let moved_count = moved.len();
        let new_group = TabGroup::with_slots(new_id, moved);
        let inserted = self
            .root
            .insert_beside(&path, new_group, direction, side, &self.ids);
        if let Err(rejected) = inserted {
            tracing::error!(group = %group, "Split path no longer valid");
            if let Some(original) = self.root.find_group_mut(group) {
                original.slots.extend(rejected.slots);
            }
            return Err(LayoutError::GroupNotFound(group));
        }

        self.focused = new_id;
        tracing::debug!(
            group = %group,
            new_group = %new_id,
            moved = moved_count,
            groups = self.root.group_count(),
            "Split group"
        );
        Ok(new_id)
    }

    /// Removes the split boundary next to the target group by merging it
    /// with a neighbour, then collapses redundant splitters.
    ///
    /// Closing around the only group is not an error and returns
    /// [`MergeOutcome::NotApplicable`].
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the target cannot be resolved.
    pub fn close_split_at(&mut self, target: PaneTarget<T::Widget>) -> LayoutResult<MergeOutcome> {
        let group = self.resolve(&target)?;
        let _span = trace_operation_debug!(span_names::LAYOUT_MERGE, group = %group).entered();

        let Some(path) = self.root.path_to_group(group) else {
            return Err(LayoutError::GroupNotFound(group));
        };

        let outcome = self.root.merge_with_sibling(&path, &mut self.retired);
        match outcome {
            MergeOutcome::Merged { removed, survivor } => {
                let collapsed = self.root.collapse_redundant(&mut self.retired);
                if self.focused == removed {
                    self.focused = survivor;
                }
                tracing::debug!(
                    removed = %removed,
                    survivor = %survivor,
                    collapsed,
                    "Merged groups"
                );
            }
            MergeOutcome::NotApplicable => {
                tracing::debug!(group = %group, "Nothing to merge with");
            }
        }
        Ok(outcome)
    }

    // ========================================================================
    // Reconciliation and Navigation
    // ========================================================================

    /// Brings the live widgets in line with the tree.
    ///
    /// Widgets of nodes that left the tree since the last update are
    /// discarded. Widgets of nodes still in the tree are reused.
    pub fn update(&mut self) {
        let _span = trace_operation_debug!(
            span_names::LAYOUT_UPDATE,
            window_id = %self.window_id,
            groups = self.root.group_count()
        )
        .entered();

        let mut reconciler = Reconciler {
            toolkit: &mut self.toolkit,
            factories: &mut self.factories,
            window_id: &self.window_id,
        };
        reconciler.run(&mut self.root, &self.root_container);

        let discarded = self.retired.len();
        for widget in self.retired.drain(..) {
            self.toolkit.discard(&widget);
        }
        if discarded > 0 {
            tracing::trace!(discarded, "Discarded retired widgets");
        }
    }

    /// Finds the group next to `group` on screen in `direction`.
    ///
    /// Reads live geometry, so it must run after [`Self::update`] and after
    /// the toolkit has laid out the widgets.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::GroupNotFound`] for an unknown group, or
    /// [`LayoutError::NotMaterialized`] if no geometry is available.
    pub fn adjacent_group(
        &self,
        group: GroupId,
        direction: Direction,
    ) -> LayoutResult<Option<GroupId>> {
        let _span = trace_operation_debug!(
            span_names::LAYOUT_NAVIGATE,
            group = %group,
            direction = %direction
        )
        .entered();

        self.existing_group(group)?;
        let rects = navigation::group_rects(&self.toolkit, &self.root, &self.root_container)
            .inspect_err(|err| tracing::error!(group = %group, error = %err, "Cannot navigate"))?;
        let found = navigation::find_adjacent(&rects, group, direction);
        tracing::trace!(group = %group, direction = %direction, found = ?found, "Adjacent group");
        Ok(found)
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Runs `action` on the focused group and returns the focused group
    /// afterwards.
    ///
    /// Focus actions with no group in that direction leave focus unchanged.
    ///
    /// # Errors
    ///
    /// Propagates errors of the underlying operation.
    pub fn apply_action(&mut self, action: LayoutAction) -> LayoutResult<GroupId> {
        let focused = self.focused;
        tracing::debug!(%action, group = %focused, "Applying layout action");

        if let Some((direction, side)) = action.split() {
            self.split_group(focused, direction, side, Vec::new())?;
        } else if let Some(direction) = action.focus() {
            if let Some(next) = self.adjacent_group(focused, direction)? {
                self.focused = next;
            }
        } else {
            self.close_split_at(PaneTarget::Group(focused))?;
        }
        Ok(self.focused)
    }

    /// Resolves `accel` through `bindings` and runs the bound action.
    ///
    /// Returns `Ok(None)` if nothing is bound to `accel`.
    ///
    /// # Errors
    ///
    /// Propagates errors of the bound action.
    pub fn apply_accel(
        &mut self,
        bindings: &KeybindingSettings,
        accel: &str,
    ) -> LayoutResult<Option<GroupId>> {
        match bindings.action_for_accel(accel) {
            Some(action) => self.apply_action(action).map(Some),
            None => Ok(None),
        }
    }
}

impl<T> fmt::Debug for SplitLayout<T>
where
    T: WidgetToolkit + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitLayout")
            .field("window_id", &self.window_id)
            .field("root", &self.root)
            .field("focused", &self.focused)
            .field("retired", &self.retired)
            .field("factories", &self.factories)
            .field("toolkit", &self.toolkit)
            .finish_non_exhaustive()
    }
}
