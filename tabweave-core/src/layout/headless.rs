//! In-memory widget toolkit
//!
//! `HeadlessToolkit` records every widget it creates in an arena and lets
//! the caller set geometry by hand. It drives the layout engine without a
//! display server, which is what the test suite and scripted embedders use.

use super::geometry::Rect;
use super::toolkit::WidgetToolkit;
use super::types::SplitDirection;

/// Handle to a widget in a [`HeadlessToolkit`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadlessWidget(pub u64);

/// What kind of primitive a headless widget stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// A splitter along the given axis.
    Splitter(SplitDirection),
    /// A tab-group widget.
    TabGroup,
    /// A slot container.
    Container,
    /// A caller-created element such as a tab handle or content view.
    Element,
}

/// Recorded state of one headless widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRecord {
    /// Kind of primitive.
    pub kind: WidgetKind,
    /// Window identifier given at creation, if any.
    pub window_id: Option<String>,
    /// Free-form label for caller-created elements.
    pub label: Option<String>,
    /// Ordered children.
    pub children: Vec<HeadlessWidget>,
    /// Tab strip visibility (tab groups only).
    pub show_tabs: bool,
    /// Bounds set by the caller.
    pub bounds: Option<Rect>,
    /// Pane sizes set by the caller (splitters only).
    pub pane_sizes: Vec<f64>,
    /// Whether the engine has discarded the widget.
    pub discarded: bool,
}

impl WidgetRecord {
    fn new(kind: WidgetKind, window_id: Option<&str>) -> Self {
        Self {
            kind,
            window_id: window_id.map(str::to_owned),
            label: None,
            children: Vec::new(),
            show_tabs: false,
            bounds: None,
            pane_sizes: Vec::new(),
            discarded: false,
        }
    }
}

/// Arena-backed toolkit with caller-controlled geometry.
#[derive(Debug, Clone, Default)]
pub struct HeadlessToolkit {
    widgets: Vec<WidgetRecord>,
    divider: f64,
    set_children_calls: usize,
}

impl HeadlessToolkit {
    /// Creates a toolkit with zero-width dividers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a toolkit whose splitters report the given divider thickness.
    #[must_use]
    pub fn with_divider(divider: f64) -> Self {
        Self {
            divider,
            ..Self::default()
        }
    }

    fn push(&mut self, record: WidgetRecord) -> HeadlessWidget {
        let id = HeadlessWidget(self.widgets.len() as u64);
        self.widgets.push(record);
        id
    }

    fn record_mut(&mut self, widget: HeadlessWidget) -> Option<&mut WidgetRecord> {
        usize::try_from(widget.0)
            .ok()
            .and_then(|index| self.widgets.get_mut(index))
    }

    /// Creates a caller-owned element (tab handle, content, accessory).
    pub fn create_element(&mut self, label: impl Into<String>) -> HeadlessWidget {
        let mut record = WidgetRecord::new(WidgetKind::Element, None);
        record.label = Some(label.into());
        self.push(record)
    }

    /// Returns the recorded state of a widget.
    #[must_use]
    pub fn record(&self, widget: HeadlessWidget) -> Option<&WidgetRecord> {
        usize::try_from(widget.0)
            .ok()
            .and_then(|index| self.widgets.get(index))
    }

    /// Returns the kind of a widget.
    #[must_use]
    pub fn kind(&self, widget: HeadlessWidget) -> Option<WidgetKind> {
        self.record(widget).map(|r| r.kind)
    }

    /// Returns the label of a caller-created element.
    #[must_use]
    pub fn label(&self, widget: HeadlessWidget) -> Option<&str> {
        self.record(widget).and_then(|r| r.label.as_deref())
    }

    /// Returns whether the tab strip of a group widget is shown.
    #[must_use]
    pub fn shows_tabs(&self, widget: HeadlessWidget) -> bool {
        self.record(widget).is_some_and(|r| r.show_tabs)
    }

    /// Returns whether the widget has been discarded.
    #[must_use]
    pub fn is_discarded(&self, widget: HeadlessWidget) -> bool {
        self.record(widget).is_some_and(|r| r.discarded)
    }

    /// Returns the first widget listing `child` among its children.
    #[must_use]
    pub fn parent_of(&self, child: HeadlessWidget) -> Option<HeadlessWidget> {
        self.widgets
            .iter()
            .position(|r| !r.discarded && r.children.contains(&child))
            .map(|index| HeadlessWidget(index as u64))
    }

    /// Sets the rendered bounds of a widget.
    pub fn set_bounds(&mut self, widget: HeadlessWidget, bounds: Rect) {
        if let Some(record) = self.record_mut(widget) {
            record.bounds = Some(bounds);
        }
    }

    /// Sets the pane sizes of a splitter widget.
    pub fn set_pane_sizes(&mut self, widget: HeadlessWidget, sizes: Vec<f64>) {
        if let Some(record) = self.record_mut(widget) {
            record.pane_sizes = sizes;
        }
    }

    /// Number of widgets ever created, of any kind.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.widgets.len()
    }

    /// Number of widgets of `kind` that have been created and not discarded.
    #[must_use]
    pub fn live_count(&self, kind: WidgetKind) -> usize {
        self.widgets
            .iter()
            .filter(|r| r.kind == kind && !r.discarded)
            .count()
    }

    /// Number of discarded widgets.
    #[must_use]
    pub fn discarded_count(&self) -> usize {
        self.widgets.iter().filter(|r| r.discarded).count()
    }

    /// Number of `set_children` calls received so far.
    #[must_use]
    pub const fn set_children_calls(&self) -> usize {
        self.set_children_calls
    }
}

impl WidgetToolkit for HeadlessToolkit {
    type Widget = HeadlessWidget;

    fn create_splitter(&mut self, direction: SplitDirection, window_id: &str) -> HeadlessWidget {
        self.push(WidgetRecord::new(
            WidgetKind::Splitter(direction),
            Some(window_id),
        ))
    }

    fn create_tab_group(&mut self, window_id: &str) -> HeadlessWidget {
        self.push(WidgetRecord::new(WidgetKind::TabGroup, Some(window_id)))
    }

    fn create_container(&mut self, window_id: &str) -> HeadlessWidget {
        self.push(WidgetRecord::new(WidgetKind::Container, Some(window_id)))
    }

    fn set_children(&mut self, parent: &HeadlessWidget, children: &[HeadlessWidget]) {
        self.set_children_calls += 1;
        if let Some(record) = self.record_mut(*parent) {
            record.children = children.to_vec();
        }
    }

    fn children(&self, parent: &HeadlessWidget) -> Vec<HeadlessWidget> {
        self.record(*parent)
            .map(|r| r.children.clone())
            .unwrap_or_default()
    }

    fn set_show_tabs(&mut self, group: &HeadlessWidget, show: bool) {
        if let Some(record) = self.record_mut(*group) {
            record.show_tabs = show;
        }
    }

    fn bounding_box(&self, widget: &HeadlessWidget) -> Option<Rect> {
        self.record(*widget).and_then(|r| r.bounds)
    }

    fn divider_thickness(&self, _splitter: &HeadlessWidget) -> f64 {
        self.divider
    }

    fn pane_sizes(&self, splitter: &HeadlessWidget) -> Vec<f64> {
        self.record(*splitter)
            .map(|r| r.pane_sizes.clone())
            .unwrap_or_default()
    }

    fn discard(&mut self, widget: &HeadlessWidget) {
        if let Some(record) = self.record_mut(*widget) {
            record.discarded = true;
            record.children.clear();
        }
    }
}
