//! Widget toolkit seam
//!
//! The layout engine never talks to a GUI library directly. Everything it
//! needs from one (creating splitters, tab widgets and containers, setting
//! child lists, reading geometry) goes through [`WidgetToolkit`]. The
//! pluggable factories used during reconciliation are traits over the same
//! toolkit.

use std::fmt;

use super::geometry::Rect;
use super::types::{GroupId, SplitDirection};

/// Drawable primitives consumed by the layout engine.
///
/// Widget handles are cheap to clone and compare by identity.
pub trait WidgetToolkit {
    /// Handle to a live widget.
    type Widget: Clone + PartialEq + fmt::Debug;

    /// Creates a splitter widget arranging its children along `direction`.
    fn create_splitter(&mut self, direction: SplitDirection, window_id: &str) -> Self::Widget;

    /// Creates a tab-group widget.
    fn create_tab_group(&mut self, window_id: &str) -> Self::Widget;

    /// Creates an empty container element.
    fn create_container(&mut self, window_id: &str) -> Self::Widget;

    /// Replaces the ordered child list of `parent`.
    fn set_children(&mut self, parent: &Self::Widget, children: &[Self::Widget]);

    /// Returns the ordered child list of `parent`.
    fn children(&self, parent: &Self::Widget) -> Vec<Self::Widget>;

    /// Shows or hides the tab strip of a tab-group widget.
    fn set_show_tabs(&mut self, group: &Self::Widget, show: bool);

    /// Returns the rendered bounds of a widget, if it has been laid out.
    fn bounding_box(&self, widget: &Self::Widget) -> Option<Rect>;

    /// Thickness of the dividers between a splitter's panes.
    fn divider_thickness(&self, splitter: &Self::Widget) -> f64;

    /// Current size of each pane of a splitter along its axis.
    fn pane_sizes(&self, splitter: &Self::Widget) -> Vec<f64>;

    /// Releases a widget whose node has left the tree.
    fn discard(&mut self, widget: &Self::Widget) {
        let _ = widget;
    }
}

/// Everything a container factory gets to know about the slot.
#[derive(Debug)]
pub struct ContainerRequest<'a, W> {
    /// Window identifier propagated to created widgets.
    pub window_id: &'a str,
    /// The tab-group widget the container will live in.
    pub group: &'a W,
    /// The slot's tab handle.
    pub tab: &'a W,
    /// The content element the container embeds.
    pub content: &'a W,
}

/// Creates the container element of a slot.
///
/// Implementations should embed `request.content` as a child of the returned
/// container. When the returned container does not list the content among its
/// children, the engine appends it before the slot is used.
pub trait ContainerFactory<T: WidgetToolkit> {
    /// Creates a container for one slot.
    fn create_container(
        &mut self,
        toolkit: &mut T,
        request: &ContainerRequest<'_, T::Widget>,
    ) -> T::Widget;
}

/// Container factory that wraps the content in a plain toolkit container.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContainerFactory;

impl<T: WidgetToolkit> ContainerFactory<T> for DefaultContainerFactory {
    fn create_container(
        &mut self,
        toolkit: &mut T,
        request: &ContainerRequest<'_, T::Widget>,
    ) -> T::Widget {
        let container = toolkit.create_container(request.window_id);
        toolkit.set_children(&container, std::slice::from_ref(request.content));
        container
    }
}

/// Synthetic tab and content shown by a group with no slots.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyState<W> {
    /// Tab handle of the placeholder.
    pub tab: W,
    /// Content element of the placeholder.
    pub content: W,
}

/// Builds the placeholder of an empty group.
pub trait EmptyStateFactory<T: WidgetToolkit> {
    /// Creates the placeholder tab and content for `group`.
    fn create_empty_state(
        &mut self,
        toolkit: &mut T,
        group: GroupId,
        window_id: &str,
    ) -> EmptyState<T::Widget>;
}

/// Which edge of the tab strip an accessory element sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceSide {
    /// Before the first tab.
    Left,
    /// After the last tab.
    Right,
}

impl fmt::Display for SpaceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Builds the per-group default accessory elements.
pub trait SpaceFactory<T: WidgetToolkit> {
    /// Creates the accessory for one side of `group`. Called once per
    /// group and side.
    fn create_space(
        &mut self,
        toolkit: &mut T,
        group: GroupId,
        side: SpaceSide,
        window_id: &str,
    ) -> T::Widget;

    /// Updates a previously created accessory in place. Called on every
    /// reconciliation pass that reuses it.
    fn refresh_space(
        &mut self,
        toolkit: &mut T,
        group: GroupId,
        side: SpaceSide,
        space: &T::Widget,
    ) {
        let _ = (toolkit, group, side, space);
    }
}

/// Factories and global accessories consulted during reconciliation.
pub(crate) struct Factories<T: WidgetToolkit> {
    pub(crate) container: Box<dyn ContainerFactory<T>>,
    pub(crate) empty_state: Option<Box<dyn EmptyStateFactory<T>>>,
    pub(crate) space: Option<Box<dyn SpaceFactory<T>>>,
    pub(crate) top_left: Option<T::Widget>,
    pub(crate) top_right: Option<T::Widget>,
}

impl<T: WidgetToolkit> Factories<T> {
    pub(crate) fn global_space(&self, side: SpaceSide) -> Option<&T::Widget> {
        match side {
            SpaceSide::Left => self.top_left.as_ref(),
            SpaceSide::Right => self.top_right.as_ref(),
        }
    }
}

impl<T: WidgetToolkit> Default for Factories<T> {
    fn default() -> Self {
        Self {
            container: Box::new(DefaultContainerFactory),
            empty_state: None,
            space: None,
            top_left: None,
            top_right: None,
        }
    }
}

impl<T: WidgetToolkit> fmt::Debug for Factories<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factories")
            .field("empty_state", &self.empty_state.is_some())
            .field("space", &self.space.is_some())
            .field("top_left", &self.top_left)
            .field("top_right", &self.top_right)
            .finish_non_exhaustive()
    }
}
