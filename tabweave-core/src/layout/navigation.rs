//! Directional navigation between tab-groups
//!
//! Group rectangles are derived from live geometry: the root's bounding box
//! comes from the toolkit, and every splitter divides its box among its
//! children in proportion to the pane sizes it reports. A single query
//! routine ("nearest box to the right") answers all four directions after
//! the boxes are rotated or mirrored with [`Transform::facing`].

use super::error::LayoutError;
use super::geometry::{Rect, Transform};
use super::toolkit::WidgetToolkit;
use super::tree::{PaneNode, SplitterNode};
use super::types::{Direction, GroupId, SplitDirection};

/// Computes the on-screen rectangle of every group, in depth-first order.
///
/// The root box is the bounding box of the root node's widget, or of
/// `root_container` if the former is unavailable.
///
/// # Errors
///
/// Returns [`LayoutError::NotMaterialized`] if the tree has not been
/// reconciled or no root geometry is available.
pub fn group_rects<T: WidgetToolkit>(
    toolkit: &T,
    root: &PaneNode<T::Widget>,
    root_container: &T::Widget,
) -> Result<Vec<(GroupId, Rect)>, LayoutError> {
    let root_widget = root.widget().ok_or(LayoutError::NotMaterialized)?;
    let bounds = toolkit
        .bounding_box(root_widget)
        .or_else(|| toolkit.bounding_box(root_container))
        .ok_or(LayoutError::NotMaterialized)?;

    let mut out = Vec::with_capacity(root.group_count());
    collect(toolkit, root, bounds, &mut out);
    Ok(out)
}

fn collect<T: WidgetToolkit>(
    toolkit: &T,
    node: &PaneNode<T::Widget>,
    bounds: Rect,
    out: &mut Vec<(GroupId, Rect)>,
) {
    match node {
        PaneNode::Group(group) => out.push((group.id(), bounds)),
        PaneNode::Splitter(splitter) => {
            let rects = distribute(toolkit, splitter, bounds);
            for (child, rect) in splitter.children().iter().zip(rects) {
                collect(toolkit, child, rect, out);
            }
        }
    }
}

/// Splits `bounds` among the children of `splitter`.
fn distribute<T: WidgetToolkit>(
    toolkit: &T,
    splitter: &SplitterNode<T::Widget>,
    bounds: Rect,
) -> Vec<Rect> {
    let count = splitter.children().len();
    if count == 0 {
        return Vec::new();
    }

    let (mut sizes, divider) = match splitter.widget() {
        Some(widget) => (toolkit.pane_sizes(widget), toolkit.divider_thickness(widget)),
        None => (Vec::new(), 0.0),
    };
    if sizes.len() != count || sizes.iter().any(|s| !s.is_finite() || *s < 0.0) {
        tracing::warn!(
            splitter = %splitter.id(),
            expected = count,
            reported = sizes.len(),
            "Pane sizes unavailable, assuming equal panes"
        );
        sizes = vec![1.0; count];
    }

    let extent = match splitter.direction() {
        SplitDirection::Vertical => bounds.width,
        SplitDirection::Horizontal => bounds.height,
    };
    let total: f64 = sizes.iter().sum::<f64>() + divider * (count - 1) as f64;
    let scale = if total > 0.0 { extent / total } else { 0.0 };

    let mut offset = 0.0;
    sizes
        .iter()
        .map(|size| {
            let length = size * scale;
            let rect = match splitter.direction() {
                SplitDirection::Vertical => {
                    Rect::new(bounds.x + offset, bounds.y, length, bounds.height)
                }
                SplitDirection::Horizontal => {
                    Rect::new(bounds.x, bounds.y + offset, bounds.width, length)
                }
            };
            offset += (size + divider) * scale;
            rect
        })
        .collect()
}

/// Finds the group next to `from` in `direction`.
///
/// A candidate must start strictly past the center of `from` and its span
/// across the direction of travel must contain that center. Among the
/// candidates the nearest edge wins; equal edges keep the first in depth-first
/// order. Returns `None` if `from` is not in `rects` or nothing qualifies.
#[must_use]
pub fn find_adjacent(
    rects: &[(GroupId, Rect)],
    from: GroupId,
    direction: Direction,
) -> Option<GroupId> {
    let transform = Transform::facing(direction);
    let origin = rects.iter().find(|(id, _)| *id == from)?;
    let center = transform.apply_rect(&origin.1).center();

    let mut best: Option<(GroupId, f64)> = None;
    for (id, rect) in rects {
        if *id == from {
            continue;
        }
        let r = transform.apply_rect(rect);
        let qualifies = r.left() > center.x && r.top() <= center.y && center.y < r.bottom();
        if !qualifies {
            continue;
        }
        if best.is_none_or(|(_, left)| r.left() < left) {
            best = Some((*id, r.left()));
        }
    }
    best.map(|(id, _)| id)
}
