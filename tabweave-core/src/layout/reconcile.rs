//! Reconciliation of the pane tree against live widgets
//!
//! A pass walks the tree top-down. Every node gets its live widget on the
//! first visit and keeps it afterwards. Child lists are rebuilt from the
//! tree on every pass, so re-running with an unchanged tree assigns the
//! same widgets in the same order.

use super::toolkit::{ContainerRequest, Factories, SpaceSide, WidgetToolkit};
use super::tree::{PaneNode, SplitterNode, TabGroup, TabSlot};
use super::types::SplitDirection;

/// Position classification of a node on screen.
///
/// A group at the top-left may show the global top-left accessory, one
/// at the top-right may show the global top-right accessory. A group that
/// is both spans the whole top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Touches the top-left corner.
    pub top_left: bool,
    /// Touches the top-right corner.
    pub top_right: bool,
}

impl Placement {
    /// Classification of the root: spans the whole top edge.
    pub const TOP_WIDE: Self = Self {
        top_left: true,
        top_right: true,
    };

    /// Classification of a node away from the top corners.
    pub const OTHER: Self = Self {
        top_left: false,
        top_right: false,
    };

    /// Returns true if the node spans the whole top edge.
    #[must_use]
    pub const fn is_top_wide(self) -> bool {
        self.top_left && self.top_right
    }

    /// Classification of child `index` of `count` in a splitter along
    /// `direction` whose own classification is `self`.
    #[must_use]
    pub const fn for_child(self, direction: SplitDirection, index: usize, count: usize) -> Self {
        match direction {
            // row of columns: corners go to the outer columns
            SplitDirection::Vertical => Self {
                top_left: self.top_left && index == 0,
                top_right: self.top_right && index + 1 == count,
            },
            // column of rows: only the top row stays on the top edge
            SplitDirection::Horizontal => {
                if index == 0 {
                    self
                } else {
                    Self::OTHER
                }
            }
        }
    }
}

/// One reconciliation pass.
pub(crate) struct Reconciler<'a, T: WidgetToolkit> {
    pub(crate) toolkit: &'a mut T,
    pub(crate) factories: &'a mut Factories<T>,
    pub(crate) window_id: &'a str,
}

impl<T: WidgetToolkit> Reconciler<'_, T> {
    /// Materializes and arranges the whole tree under `root_container`.
    pub(crate) fn run(&mut self, root: &mut PaneNode<T::Widget>, root_container: &T::Widget) {
        let root_widget = self.node(root, Placement::TOP_WIDE);
        self.toolkit
            .set_children(root_container, std::slice::from_ref(&root_widget));
    }

    fn node(&mut self, node: &mut PaneNode<T::Widget>, placement: Placement) -> T::Widget {
        match node {
            PaneNode::Splitter(splitter) => self.splitter(splitter, placement),
            PaneNode::Group(group) => self.group(group, placement),
        }
    }

    fn splitter(
        &mut self,
        splitter: &mut SplitterNode<T::Widget>,
        placement: Placement,
    ) -> T::Widget {
        let direction = splitter.direction;
        let widget = match &splitter.widget {
            Some(widget) => widget.clone(),
            None => {
                let widget = self.toolkit.create_splitter(direction, self.window_id);
                tracing::trace!(splitter = %splitter.id, %direction, "Created splitter widget");
                splitter.widget = Some(widget.clone());
                widget
            }
        };

        let count = splitter.children.len();
        let children: Vec<T::Widget> = splitter
            .children
            .iter_mut()
            .enumerate()
            .map(|(index, child)| self.node(child, placement.for_child(direction, index, count)))
            .collect();
        self.toolkit.set_children(&widget, &children);
        widget
    }

    fn group(&mut self, group: &mut TabGroup<T::Widget>, placement: Placement) -> T::Widget {
        let widget = match &group.widget {
            Some(widget) => widget.clone(),
            None => {
                let widget = self.toolkit.create_tab_group(self.window_id);
                tracing::trace!(group = %group.id, "Created tab group widget");
                group.widget = Some(widget.clone());
                widget
            }
        };

        let left = self.space(group, SpaceSide::Left, placement.top_left);
        let right = self.space(group, SpaceSide::Right, placement.top_right);

        let mut children = Vec::with_capacity(group.slots.len() * 2 + 2);
        children.extend(left);
        if group.slots.is_empty() {
            if let Some(empty) = self.empty_state(group, &widget) {
                children.push(empty.tab.clone());
                children.extend(empty.container.clone());
            }
        } else {
            for slot in &mut group.slots {
                let container = self.container(&widget, slot);
                children.push(slot.tab.clone());
                children.push(container);
            }
        }
        children.extend(right);

        self.toolkit.set_children(&widget, &children);
        self.toolkit.set_show_tabs(&widget, !group.slots.is_empty());
        widget
    }

    /// Resolves one accessory: the global override for qualifying groups,
    /// otherwise the group's own default from the space factory.
    fn space(
        &mut self,
        group: &mut TabGroup<T::Widget>,
        side: SpaceSide,
        qualifies: bool,
    ) -> Option<T::Widget> {
        if qualifies && let Some(global) = self.factories.global_space(side) {
            return Some(global.clone());
        }

        let factory = self.factories.space.as_mut()?;
        let id = group.id;
        let slot = match side {
            SpaceSide::Left => &mut group.left_space,
            SpaceSide::Right => &mut group.right_space,
        };
        match slot {
            Some(existing) => {
                factory.refresh_space(self.toolkit, id, side, existing);
                Some(existing.clone())
            }
            None => {
                let created = factory.create_space(self.toolkit, id, side, self.window_id);
                tracing::trace!(group = %id, %side, "Created default space");
                *slot = Some(created.clone());
                Some(created)
            }
        }
    }

    fn container(&mut self, group_widget: &T::Widget, slot: &mut TabSlot<T::Widget>) -> T::Widget {
        if let Some(container) = &slot.container {
            return container.clone();
        }
        let request = ContainerRequest {
            window_id: self.window_id,
            group: group_widget,
            tab: &slot.tab,
            content: &slot.content,
        };
        let container = self
            .factories
            .container
            .create_container(self.toolkit, &request);
        let mut children = self.toolkit.children(&container);
        if !children.contains(&slot.content) {
            tracing::debug!(tab = ?slot.tab, "Embedding content the container factory left out");
            children.push(slot.content.clone());
            self.toolkit.set_children(&container, &children);
        }
        slot.container = Some(container.clone());
        container
    }

    fn empty_state<'g>(
        &mut self,
        group: &'g mut TabGroup<T::Widget>,
        group_widget: &T::Widget,
    ) -> Option<&'g TabSlot<T::Widget>> {
        if group.empty_state.is_none() {
            let factory = self.factories.empty_state.as_mut()?;
            let empty = factory.create_empty_state(self.toolkit, group.id, self.window_id);
            tracing::trace!(group = %group.id, "Created empty-state placeholder");
            group.empty_state = Some(TabSlot::new(empty.tab, empty.content));
        }

        let slot = group.empty_state.as_mut()?;
        self.container(group_widget, slot);
        Some(&*slot)
    }
}
