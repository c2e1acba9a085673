//! Settings round-trips through the filesystem

use tabweave_core::config::{ConfigError, LayoutSettings, LoggingSettings};
use tabweave_core::layout::{HeadlessToolkit, LayoutAction, SplitLayout, WidgetToolkit};
use tabweave_core::tracing::{TracingConfig, TracingLevel, TracingOutput};
use tempfile::TempDir;

fn customized() -> LayoutSettings {
    let mut settings = LayoutSettings {
        window_id: "workspace-2".to_owned(),
        logging: LoggingSettings {
            level: TracingLevel::Debug,
            filter: Some("tabweave_core::layout=trace".to_owned()),
            timing: true,
            output: TracingOutput::File {
                path: "/tmp/tabweave.log".into(),
            },
        },
        ..LayoutSettings::default()
    };
    settings
        .keybindings
        .set(LayoutAction::SplitRight, "<Control>backslash");
    settings
        .keybindings
        .set(LayoutAction::FocusLeft, "<Super>Left|<Super>h");
    settings
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("nested").join("layout.toml");
    let settings = customized();

    settings.save(&path).expect("save settings");
    let loaded = LayoutSettings::load(&path).expect("load settings");

    assert_eq!(loaded, settings);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = TempDir::new().expect("create temp dir");
    let loaded = LayoutSettings::load(&dir.path().join("absent.toml")).expect("load defaults");
    assert_eq!(loaded, LayoutSettings::default());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("layout.toml");
    std::fs::write(&path, "window_id = [unterminated").expect("write file");

    let result = LayoutSettings::load(&path);
    assert!(matches!(result, Err(ConfigError::Parse(_))), "{result:?}");
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("layout.toml");
    std::fs::write(
        &path,
        "window_id = \"side\"\n\n[logging]\nlevel = \"warn\"\n",
    )
    .expect("write file");

    let loaded = LayoutSettings::load(&path).expect("load settings");
    assert_eq!(loaded.window_id, "side");
    assert_eq!(loaded.logging.level, TracingLevel::Warn);
    assert_eq!(loaded.logging.output, TracingOutput::Stderr);
    assert!(!loaded.keybindings.has_overrides());
}

#[test]
fn unknown_action_overrides_survive_loading() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("layout.toml");
    std::fs::write(
        &path,
        "[keybindings.overrides]\n\"layout.split-right\" = \"F5\"\n\"layout.teleport\" = \"F6\"\n",
    )
    .expect("write file");

    let loaded = LayoutSettings::load(&path).expect("load settings");
    assert_eq!(loaded.keybindings.unknown_actions(), vec!["layout.teleport"]);
    assert_eq!(
        loaded.keybindings.action_for_accel("F5"),
        Some(LayoutAction::SplitRight)
    );
    assert_eq!(loaded.keybindings.action_for_accel("F6"), None);
}

#[test]
fn logging_settings_become_tracing_config() {
    let settings = customized();
    let config = TracingConfig::from(&settings.logging);

    assert_eq!(config.level, TracingLevel::Debug);
    assert!(config.include_timing);
    assert_eq!(
        config.filter.as_deref(),
        Some("tabweave_core::layout=trace")
    );
    assert!(matches!(config.output, TracingOutput::File { .. }));
}

#[test]
fn settings_drive_layout_window_id() {
    let settings = customized();
    let mut toolkit = HeadlessToolkit::new();
    let root = toolkit.create_container(&settings.window_id);
    let mut layout = SplitLayout::from_settings(toolkit, root, &settings);
    layout.update();

    let group = *layout.group_widget(layout.focused_group()).expect("materialized");
    let record = layout.toolkit().record(group).expect("recorded");
    assert_eq!(record.window_id.as_deref(), Some("workspace-2"));

    // overridden accelerator splits, the replaced default no longer does
    assert_eq!(
        layout
            .apply_accel(&settings.keybindings, "<Control>backslash")
            .map(|g| g.is_some()),
        Ok(true)
    );
    assert_eq!(
        layout.apply_accel(&settings.keybindings, "<Control><Shift>d"),
        Ok(None)
    );
    assert_eq!(layout.group_count(), 2);
}
