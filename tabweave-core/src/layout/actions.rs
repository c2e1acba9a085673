//! Keyboard-driven layout actions
//!
//! Every action operates on the focused group of a [`SplitLayout`]. The
//! action names are the keys used by the keybinding settings.
//!
//! [`SplitLayout`]: crate::layout::SplitLayout

use std::fmt;
use std::str::FromStr;

use super::tree::Side;
use super::types::{Direction, SplitDirection};

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout action: {0}")]
pub struct UnknownAction(pub String);

/// An operation on the focused group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutAction {
    /// Open an empty group to the right.
    SplitRight,
    /// Open an empty group below.
    SplitDown,
    /// Open an empty group to the left.
    SplitLeft,
    /// Open an empty group above.
    SplitUp,
    /// Merge the focused group with its neighbour.
    CloseSplit,
    /// Focus the group to the left.
    FocusLeft,
    /// Focus the group to the right.
    FocusRight,
    /// Focus the group above.
    FocusUp,
    /// Focus the group below.
    FocusDown,
}

impl LayoutAction {
    /// Returns all actions in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SplitRight,
            Self::SplitDown,
            Self::SplitLeft,
            Self::SplitUp,
            Self::CloseSplit,
            Self::FocusLeft,
            Self::FocusRight,
            Self::FocusUp,
            Self::FocusDown,
        ]
    }

    /// Stable action name, used as the keybinding key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SplitRight => "layout.split-right",
            Self::SplitDown => "layout.split-down",
            Self::SplitLeft => "layout.split-left",
            Self::SplitUp => "layout.split-up",
            Self::CloseSplit => "layout.close-split",
            Self::FocusLeft => "layout.focus-left",
            Self::FocusRight => "layout.focus-right",
            Self::FocusUp => "layout.focus-up",
            Self::FocusDown => "layout.focus-down",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SplitRight => "Split Right",
            Self::SplitDown => "Split Down",
            Self::SplitLeft => "Split Left",
            Self::SplitUp => "Split Up",
            Self::CloseSplit => "Close Split",
            Self::FocusLeft => "Focus Left",
            Self::FocusRight => "Focus Right",
            Self::FocusUp => "Focus Up",
            Self::FocusDown => "Focus Down",
        }
    }

    /// For split actions, the splitter axis and the side the new group
    /// goes on.
    #[must_use]
    pub const fn split(self) -> Option<(SplitDirection, Side)> {
        match self {
            Self::SplitRight => Some((SplitDirection::Vertical, Side::After)),
            Self::SplitLeft => Some((SplitDirection::Vertical, Side::Before)),
            Self::SplitDown => Some((SplitDirection::Horizontal, Side::After)),
            Self::SplitUp => Some((SplitDirection::Horizontal, Side::Before)),
            _ => None,
        }
    }

    /// For focus actions, the navigation direction.
    #[must_use]
    pub const fn focus(self) -> Option<Direction> {
        match self {
            Self::FocusLeft => Some(Direction::Left),
            Self::FocusRight => Some(Direction::Right),
            Self::FocusUp => Some(Direction::Above),
            Self::FocusDown => Some(Direction::Below),
            _ => None,
        }
    }
}

impl fmt::Display for LayoutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_owned()))
    }
}
