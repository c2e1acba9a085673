//! Property-based tests for the split layout engine
//!
//! Random sequences of tab and split operations are replayed against a
//! `SplitLayout` driven by the headless toolkit. The tests check the
//! structural invariants that must hold after every mutating call.

use std::collections::HashSet;

use proptest::prelude::*;
use tabweave_core::layout::{
    HeadlessToolkit, HeadlessWidget, PaneNode, PaneTarget, SplitDirection, SplitLayout,
    WidgetToolkit,
};

// ============================================================================
// Test Strategies
// ============================================================================

/// Strategy for generating split directions
fn split_direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

/// Represents an operation that can be performed on a `SplitLayout`
#[derive(Debug, Clone)]
enum LayoutOperation {
    /// Open a new tab in a group (by index into group_ids)
    Append { group_index: usize },
    /// Close a tab (by index into all contents)
    Remove { content_index: usize },
    /// Move a tab to a group at a position
    Move {
        content_index: usize,
        group_index: usize,
        position: usize,
    },
    /// Split a whole group
    Split {
        group_index: usize,
        direction: SplitDirection,
        before: bool,
    },
    /// Split a group after one of its contents
    SplitAtContent {
        content_index: usize,
        direction: SplitDirection,
    },
    /// Merge a group with its neighbour
    Close { group_index: usize },
    /// Reconcile widgets
    Update,
}

/// Strategy for generating layout operations
fn layout_operation_strategy() -> impl Strategy<Value = LayoutOperation> {
    prop_oneof![
        3 => (0usize..16).prop_map(|group_index| LayoutOperation::Append { group_index }),
        1 => (0usize..32).prop_map(|content_index| LayoutOperation::Remove { content_index }),
        2 => (0usize..32, 0usize..16, 0usize..8).prop_map(
            |(content_index, group_index, position)| LayoutOperation::Move {
                content_index,
                group_index,
                position,
            }
        ),
        3 => (0usize..16, split_direction_strategy(), any::<bool>()).prop_map(
            |(group_index, direction, before)| LayoutOperation::Split {
                group_index,
                direction,
                before,
            }
        ),
        1 => (0usize..32, split_direction_strategy()).prop_map(|(content_index, direction)| {
            LayoutOperation::SplitAtContent {
                content_index,
                direction,
            }
        }),
        2 => (0usize..16).prop_map(|group_index| LayoutOperation::Close { group_index }),
        1 => Just(LayoutOperation::Update),
    ]
}

/// Strategy for generating operation sequences
fn layout_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<LayoutOperation>> {
    proptest::collection::vec(layout_operation_strategy(), 0..=max_ops)
}

// ============================================================================
// Helpers
// ============================================================================

fn new_layout() -> SplitLayout<HeadlessToolkit> {
    let mut toolkit = HeadlessToolkit::new();
    let root = toolkit.create_container("prop");
    SplitLayout::new(toolkit, root, "prop")
}

/// Opens a tab with fresh tab and content handles, returning the content.
fn open_tab(layout: &mut SplitLayout<HeadlessToolkit>, group_index: usize) -> HeadlessWidget {
    let groups = layout.group_ids();
    let group = groups[group_index % groups.len()];
    let tab = layout.toolkit_mut().create_element("tab");
    let content = layout.toolkit_mut().create_element("content");
    layout
        .append_tab(group, tab, content)
        .expect("append to existing group");
    content
}

/// All content elements in depth-first, tab order.
fn all_contents(layout: &SplitLayout<HeadlessToolkit>) -> Vec<HeadlessWidget> {
    layout
        .group_ids()
        .into_iter()
        .flat_map(|g| layout.contents(g).expect("listed group exists"))
        .collect()
}

fn pick<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}

/// Applies an operation, ignoring inapplicable picks.
fn apply(layout: &mut SplitLayout<HeadlessToolkit>, op: &LayoutOperation) {
    let groups = layout.group_ids();
    let contents = all_contents(layout);
    match *op {
        LayoutOperation::Append { group_index } => {
            open_tab(layout, group_index);
        }
        LayoutOperation::Remove { content_index } => {
            if let Some(content) = pick(&contents, content_index) {
                layout
                    .remove_tab_content(&content)
                    .expect("content is in the tree");
            }
        }
        LayoutOperation::Move {
            content_index,
            group_index,
            position,
        } => {
            if let Some(content) = pick(&contents, content_index) {
                let tab = *layout.tab_for_content(&content).expect("slot has a tab");
                let group = groups[group_index % groups.len()];
                layout
                    .move_tab_to_group(&tab, group, position)
                    .expect("tab and group exist");
            }
        }
        LayoutOperation::Split {
            group_index,
            direction,
            before,
        } => {
            let target = PaneTarget::Group(groups[group_index % groups.len()]);
            let result = if before {
                layout.split_before(target, direction)
            } else {
                layout.split_after(target, direction)
            };
            result.expect("group exists");
        }
        LayoutOperation::SplitAtContent {
            content_index,
            direction,
        } => {
            if let Some(content) = pick(&contents, content_index) {
                layout
                    .split_at_content(&content, direction)
                    .expect("content is in the tree");
            }
        }
        LayoutOperation::Close { group_index } => {
            let target = PaneTarget::Group(groups[group_index % groups.len()]);
            layout.close_split_at(target).expect("group exists");
        }
        LayoutOperation::Update => layout.update(),
    }
}

fn build(ops: &[LayoutOperation]) -> SplitLayout<HeadlessToolkit> {
    let mut layout = new_layout();
    for op in ops {
        apply(&mut layout, op);
    }
    layout
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After every mutating call no splitter has fewer than two children,
    /// in particular the root.
    #[test]
    fn prop_no_redundant_splitter(ops in layout_operations_strategy(40)) {
        let mut layout = new_layout();
        for op in &ops {
            apply(&mut layout, op);
            prop_assert!(
                !layout.root().has_redundant_splitter(),
                "Redundant splitter after {:?}: {:?}",
                op,
                layout.shape()
            );
            if let PaneNode::Splitter(root) = layout.root() {
                prop_assert!(root.children().len() >= 2);
            }
        }
    }

    /// Content elements are never duplicated across the tree, and every
    /// group id is listed once.
    #[test]
    fn prop_contents_and_groups_unique(ops in layout_operations_strategy(40)) {
        let layout = build(&ops);

        let contents = all_contents(&layout);
        let unique: HashSet<_> = contents.iter().copied().collect();
        prop_assert_eq!(unique.len(), contents.len());
        prop_assert_eq!(contents.len(), layout.slot_count());

        let groups = layout.group_ids();
        let unique_groups: HashSet<_> = groups.iter().copied().collect();
        prop_assert_eq!(unique_groups.len(), groups.len());
        prop_assert_eq!(layout.shape().group_count(), groups.len());
    }

    /// Moving a tab never creates or loses a slot.
    #[test]
    fn prop_move_preserves_slot_count(
        ops in layout_operations_strategy(30),
        content_index in 0usize..32,
        group_index in 0usize..16,
        position in 0usize..8,
    ) {
        let mut layout = build(&ops);
        let first = open_tab(&mut layout, 0);
        let before = layout.slot_count();

        let contents = all_contents(&layout);
        let content = pick(&contents, content_index).unwrap_or(first);
        let tab = *layout.tab_for_content(&content).expect("slot has a tab");
        let groups = layout.group_ids();
        let group = groups[group_index % groups.len()];

        layout.move_tab_to_group(&tab, group, position).expect("tab and group exist");

        prop_assert_eq!(layout.slot_count(), before);
        prop_assert_eq!(layout.group_for_content(&content), Some(group));
        let index = layout
            .contents(group)
            .expect("group exists")
            .iter()
            .position(|c| *c == content)
            .expect("moved content is in destination");
        prop_assert!(index <= position);
    }

    /// Appending then removing the same content restores the group's slots.
    #[test]
    fn prop_append_remove_identity(
        ops in layout_operations_strategy(30),
        group_index in 0usize..16,
    ) {
        let mut layout = build(&ops);
        let groups = layout.group_ids();
        let group = groups[group_index % groups.len()];
        let before = layout.contents(group).expect("group exists");

        let tab = layout.toolkit_mut().create_element("tab");
        let content = layout.toolkit_mut().create_element("content");
        layout.append_tab(group, tab, content).expect("group exists");
        let (released_tab, released_content) =
            layout.remove_tab_content(&content).expect("content was appended");

        prop_assert_eq!(released_tab, tab);
        prop_assert_eq!(released_content, content);
        prop_assert_eq!(layout.contents(group).expect("group exists"), before);
    }

    /// Splitting a group and closing the new empty group restores the
    /// tree, down to group ids and slot counts.
    #[test]
    fn prop_split_close_round_trip(
        ops in layout_operations_strategy(30),
        group_index in 0usize..16,
        direction in split_direction_strategy(),
        before in any::<bool>(),
    ) {
        let mut layout = build(&ops);
        layout.update();

        let groups = layout.group_ids();
        let group = groups[group_index % groups.len()];
        let shape = layout.shape();
        let widget = layout.group_widget(group).copied();

        let target = PaneTarget::Group(group);
        let added = if before {
            layout.split_before(target, direction)
        } else {
            layout.split_after(target, direction)
        }
        .expect("group exists");
        prop_assert_ne!(added, group);
        prop_assert_eq!(layout.group_count(), groups.len() + 1);

        let outcome = layout
            .close_split_at(PaneTarget::Group(added))
            .expect("new group exists");
        prop_assert!(outcome.is_merged());
        prop_assert_eq!(layout.shape(), shape);

        layout.update();
        prop_assert_eq!(layout.group_widget(group).copied(), widget);
    }

    /// Reconciling an unchanged tree creates no widgets.
    #[test]
    fn prop_update_is_idempotent(ops in layout_operations_strategy(30)) {
        let mut layout = build(&ops);
        layout.update();
        let created = layout.toolkit().created_count();
        let root_children = layout.toolkit().children(layout.root_container());

        layout.update();

        prop_assert_eq!(layout.toolkit().created_count(), created);
        prop_assert_eq!(layout.toolkit().children(layout.root_container()), root_children);
        prop_assert_eq!(layout.pending_discards(), 0);
    }
}
