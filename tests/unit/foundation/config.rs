use super::*;

#[test]
fn defaults_match_the_desktop_tool() {
    let cfg = StudioConfig::default();
    assert_eq!(cfg.canvas_size, 640);
    assert_eq!(cfg.display_size, 160);
    assert_eq!(cfg.pulse(), Duration::from_millis(500));
    assert_eq!(cfg.suggested_file_name("png"), "emoji.png");
    assert_eq!(cfg.save_title, "Save emoji");
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: StudioConfig =
        serde_json::from_str(r#"{ "canvas_size": 64, "color_scheme": "dark" }"#).unwrap();
    assert_eq!(cfg.canvas_size, 64);
    assert_eq!(cfg.vector_size, 32);
    assert_eq!(cfg.color_scheme, ColorScheme::Dark);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<StudioConfig>(r#"{ "canvas": 64 }"#).is_err());
}

#[test]
fn validate_rejects_zero_sizes_and_threads() {
    let cfg = StudioConfig {
        canvas_size: 0,
        ..StudioConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = StudioConfig {
        resolve_threads: Some(0),
        ..StudioConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn color_scheme_defaults_to_system() {
    assert_eq!(StudioConfig::default().color_scheme, ColorScheme::System);
    let cfg: StudioConfig = serde_json::from_str(r#"{ "color_scheme": "light" }"#).unwrap();
    assert_eq!(cfg.color_scheme, ColorScheme::Light);
    assert!(serde_json::from_str::<StudioConfig>(r#"{ "color_scheme": "sepia" }"#).is_err());
}

#[test]
fn from_path_reads_json() {
    let path = std::env::temp_dir().join(format!(
        "emoji_maker_config_test_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{ "pulse_ms": 250 }"#).unwrap();
    let cfg = StudioConfig::from_path(&path).unwrap();
    assert_eq!(cfg.pulse_ms, 250);
    std::fs::remove_file(&path).ok();

    assert!(StudioConfig::from_path(&path).is_err());
}
