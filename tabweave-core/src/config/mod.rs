//! Configuration management for the layout engine
//!
//! Settings are stored as TOML. Keybinding overrides map layout action
//! names to accelerators.

pub mod keybindings;
pub mod settings;

pub use keybindings::{
    KeybindingCategory, KeybindingDef, KeybindingSettings, default_keybindings,
    is_valid_accelerator,
};
pub use settings::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigError, ConfigResult, LayoutSettings, LoggingSettings,
};
