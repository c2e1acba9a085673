//! `Tabweave` Core Library
//!
//! This crate provides the split/tab layout engine of the `Tabweave`
//! terminal emulator: the pane tree, its split and merge algorithms,
//! reconciliation against a widget toolkit, and directional navigation.
//!
//! # Crate Structure
//!
//! - [`layout`] - Pane tree, `SplitLayout` engine, toolkit seam, navigation
//! - [`config`] - Layout settings and keybindings (TOML)
//! - [`tracing`] - Structured logging setup and span names

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod layout;
pub mod tracing;

pub use config::{ConfigError, KeybindingSettings, LayoutSettings, LoggingSettings};
pub use layout::{
    Direction, GroupId, LayoutAction, LayoutError, MergeOutcome, PaneTarget, SplitDirection,
    SplitLayout, WidgetToolkit,
};
pub use tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
