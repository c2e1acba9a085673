//! Split-pane layout engine
//!
//! This module arranges tab-groups in nested horizontal and vertical
//! splits, keeps a live widget hierarchy in step with that arrangement,
//! and answers "which group is to the left/right/above/below" queries from
//! rendered geometry.
//!
//! # Architecture
//!
//! - **Explicit tree**: splitters and tab-groups form a sum type with stable ids
//! - **Lazy widgets**: each node materializes its widget once, on the first update
//! - **Toolkit seam**: all widget work goes through the [`WidgetToolkit`] trait
//! - **Redundant splitter elimination**: one-child splitters collapse after every merge
//!
//! # Module Structure
//!
//! - `types` - Identifiers (`GroupId`, `SplitterId`), directions, `IdAllocator`
//! - `geometry` - `Point`, `Rect`, `Transform`
//! - `tree` - Pane tree (`PaneNode`, `SplitterNode`, `TabGroup`, `TabSlot`)
//! - `toolkit` - `WidgetToolkit` and the pluggable factories
//! - `headless` - In-memory toolkit with caller-set geometry
//! - `reconcile` - Tree-to-widget reconciliation
//! - `navigation` - Directional queries
//! - `engine` - `SplitLayout`
//! - `actions` - Keyboard-driven `LayoutAction`s
//! - `error` - `LayoutError`, `MergeOutcome`
//!
//! # Example
//!
//! ```
//! use tabweave_core::layout::{
//!     HeadlessToolkit, MergeOutcome, PaneTarget, SplitDirection, SplitLayout, WidgetToolkit,
//! };
//!
//! let mut toolkit = HeadlessToolkit::new();
//! let root = toolkit.create_container("main");
//! let mut layout = SplitLayout::new(toolkit, root, "main");
//!
//! // One empty group to start with
//! let first = layout.focused_group();
//! assert_eq!(layout.group_count(), 1);
//!
//! // Open a tab and split next to it
//! let tab = layout.toolkit_mut().create_element("tab");
//! let content = layout.toolkit_mut().create_element("shell");
//! layout.append_tab(first, tab, content).unwrap();
//! let second = layout
//!     .split_after(PaneTarget::Content(content), SplitDirection::Vertical)
//!     .unwrap();
//! assert_eq!(layout.group_ids(), vec![first, second]);
//!
//! // Materialize widgets
//! layout.update();
//! assert!(layout.group_widget(second).is_some());
//!
//! // Closing the split merges the groups back into one
//! let outcome = layout.close_split_at(PaneTarget::Group(second)).unwrap();
//! assert_eq!(outcome.survivor(), Some(first));
//! assert_eq!(layout.group_count(), 1);
//! assert!(matches!(
//!     layout.close_split_at(PaneTarget::Group(first)),
//!     Ok(MergeOutcome::NotApplicable)
//! ));
//! ```

mod actions;
mod engine;
mod error;
mod geometry;
mod headless;
mod navigation;
mod reconcile;
mod toolkit;
mod tree;
mod types;

pub use actions::{LayoutAction, UnknownAction};
pub use engine::{LayoutResult, PaneTarget, SplitLayout};
pub use error::{LayoutError, MergeOutcome};
pub use geometry::{Point, Rect, Transform};
pub use headless::{HeadlessToolkit, HeadlessWidget, WidgetKind, WidgetRecord};
pub use navigation::{find_adjacent, group_rects};
pub use reconcile::Placement;
pub use toolkit::{
    ContainerFactory, ContainerRequest, DefaultContainerFactory, EmptyState, EmptyStateFactory,
    SpaceFactory, SpaceSide, WidgetToolkit,
};
pub use tree::{LayoutShape, PaneNode, Side, SplitterNode, TabGroup, TabSlot};
pub use types::{Direction, GroupId, IdAllocator, NodeId, SplitDirection, SplitterId};
