//! Custom keybinding configuration
//!
//! Provides [`KeybindingSettings`] for user-customizable layout shortcuts
//! and [`KeybindingDef`] for the default keybinding registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutAction;

/// Custom keybinding overrides stored in user settings.
///
/// Each entry maps a layout action name (e.g. `"layout.split-right"`) to an
/// accelerator string (e.g. `"<Control><Shift>d"`). Actions not present in
/// `overrides` use their built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingSettings {
    /// Action name to accelerator string mapping.
    ///
    /// Only overridden bindings are stored; defaults are implicit.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overrides: HashMap<String, String>,
}

/// A single keybinding definition with its default accelerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingDef {
    /// The action this binding triggers
    pub action: LayoutAction,
    /// Default accelerator(s), pipe-separated for multiple (e.g. `"<Alt>Left|<Control><Alt>h"`)
    pub default_accels: String,
    /// Category for grouping in a settings UI
    pub category: KeybindingCategory,
}

/// Categories for organizing keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingCategory {
    /// Creating and closing splits
    Split,
    /// Moving focus between groups
    Focus,
}

impl KeybindingCategory {
    /// Returns the display label for this category.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Split => "Splits",
            Self::Focus => "Focus",
        }
    }

    /// Returns all categories in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Split, Self::Focus]
    }
}

impl KeybindingDef {
    /// Creates a new keybinding definition.
    #[must_use]
    pub fn new(
        action: LayoutAction,
        default_accels: impl Into<String>,
        category: KeybindingCategory,
    ) -> Self {
        Self {
            action,
            default_accels: default_accels.into(),
            category,
        }
    }

    /// Human-readable label for the action.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    /// Splits the default accelerators into a list.
    #[must_use]
    pub fn default_accel_list(&self) -> Vec<&str> {
        self.default_accels.split('|').collect()
    }
}

impl KeybindingSettings {
    /// Returns the accelerator(s) for an action, falling back to the default.
    #[must_use]
    pub fn get_accel<'a>(&'a self, def: &'a KeybindingDef) -> &'a str {
        self.overrides
            .get(def.action.name())
            .map(String::as_str)
            .unwrap_or(&def.default_accels)
    }

    /// Overrides the binding of an action.
    pub fn set(&mut self, action: LayoutAction, accels: impl Into<String>) {
        self.overrides.insert(action.name().to_owned(), accels.into());
    }

    /// Returns `true` if the user has overridden any keybindings.
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Resets a single action to its default binding.
    pub fn reset(&mut self, action: LayoutAction) {
        self.overrides.remove(action.name());
    }

    /// Resets all overrides.
    pub fn reset_all(&mut self) {
        self.overrides.clear();
    }

    /// Finds the action bound to `accel`, honouring overrides.
    ///
    /// An overridden action no longer answers to its default accelerators.
    #[must_use]
    pub fn action_for_accel(&self, accel: &str) -> Option<LayoutAction> {
        let accel = accel.trim();
        default_keybindings().into_iter().find_map(|def| {
            self.get_accel(&def)
                .split('|')
                .any(|candidate| candidate.trim() == accel)
                .then_some(def.action)
        })
    }

    /// Returns override keys that do not name a known action.
    #[must_use]
    pub fn unknown_actions(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .overrides
            .keys()
            .map(String::as_str)
            .filter(|name| name.parse::<LayoutAction>().is_err())
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

/// Returns the complete list of default keybinding definitions.
///
/// The order matches [`LayoutAction::all`].
#[must_use]
pub fn default_keybindings() -> Vec<KeybindingDef> {
    use KeybindingCategory::{Focus, Split};
    vec![
        KeybindingDef::new(LayoutAction::SplitRight, "<Control><Shift>d", Split),
        KeybindingDef::new(LayoutAction::SplitDown, "<Control><Shift>e", Split),
        KeybindingDef::new(LayoutAction::SplitLeft, "<Control><Shift><Alt>d", Split),
        KeybindingDef::new(LayoutAction::SplitUp, "<Control><Shift><Alt>e", Split),
        KeybindingDef::new(LayoutAction::CloseSplit, "<Control><Shift>w", Split),
        KeybindingDef::new(LayoutAction::FocusLeft, "<Alt>Left|<Control><Alt>h", Focus),
        KeybindingDef::new(LayoutAction::FocusRight, "<Alt>Right|<Control><Alt>l", Focus),
        KeybindingDef::new(LayoutAction::FocusUp, "<Alt>Up|<Control><Alt>k", Focus),
        KeybindingDef::new(LayoutAction::FocusDown, "<Alt>Down|<Control><Alt>j", Focus),
    ]
}

/// Validates an accelerator string.
///
/// Returns `true` if the string looks like a valid accelerator
/// (contains at least one key name, optionally with modifiers).
#[must_use]
pub fn is_valid_accelerator(accel: &str) -> bool {
    let trimmed = accel.trim();
    !trimmed.is_empty() && !trimmed.ends_with('>')
}
