//! Property tests for keybinding configuration

use proptest::prelude::*;
use tabweave_core::config::{KeybindingSettings, default_keybindings, is_valid_accelerator};
use tabweave_core::layout::LayoutAction;

/// Strategy for generating valid accelerator strings unused by the defaults
fn accel_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "<Control>a".to_owned(),
        "<Control><Shift>b".to_owned(),
        "<Alt>F2".to_owned(),
        "<Control><Alt>Delete".to_owned(),
        "F1".to_owned(),
        "F11".to_owned(),
        "<Control>comma".to_owned(),
        "<Super>Tab".to_owned(),
    ])
}

/// Strategy for picking a layout action
fn action_strategy() -> impl Strategy<Value = LayoutAction> {
    prop::sample::select(LayoutAction::all().to_vec())
}

proptest! {
    /// Overriding a keybinding and then resetting it returns to default
    #[test]
    fn override_then_reset_returns_default(
        action in action_strategy(),
        accel in accel_strategy(),
    ) {
        let mut settings = KeybindingSettings::default();
        let def = default_keybindings()
            .into_iter()
            .find(|d| d.action == action)
            .expect("every action has a default");

        settings.set(action, accel.clone());
        prop_assert_eq!(settings.get_accel(&def), accel.as_str());
        prop_assert!(settings.has_overrides());

        settings.reset(action);
        prop_assert_eq!(settings.get_accel(&def), def.default_accels.as_str());
        prop_assert!(!settings.has_overrides());
    }

    /// An override routes its accelerator to the overridden action
    #[test]
    fn override_resolves_to_action(
        action in action_strategy(),
        accel in accel_strategy(),
    ) {
        let mut settings = KeybindingSettings::default();
        prop_assert_eq!(settings.action_for_accel(&accel), None);

        settings.set(action, accel.clone());
        prop_assert_eq!(settings.action_for_accel(&accel), Some(action));
        prop_assert!(is_valid_accelerator(&accel));
    }

    /// Every default accelerator resolves to its own action
    #[test]
    fn defaults_resolve_to_their_action(action in action_strategy()) {
        let settings = KeybindingSettings::default();
        let def = default_keybindings()
            .into_iter()
            .find(|d| d.action == action)
            .expect("every action has a default");

        for accel in def.default_accel_list() {
            prop_assert_eq!(settings.action_for_accel(accel), Some(action));
        }
    }
}
