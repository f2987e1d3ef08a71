use super::*;

#[test]
fn default_is_the_strict_variant() {
    let cfg = PollockConfig::default();
    assert_eq!(cfg, PollockConfig::strict());
    assert_eq!(cfg.ingest.accept, AcceptPolicy::RasterExtensions);
    assert_eq!(cfg.ingest.max_file_bytes, Some(1024 * 1024));
    assert_eq!(cfg.ingest.max_edge, 600);
    assert!(cfg.export.enabled);
    assert_eq!(cfg.export.filename, "pollock.png");
    assert_eq!(cfg.render.background, Rgba8::WHITE);
    cfg.validate().unwrap();
}

#[test]
fn lenient_variant_accepts_any_image_without_cap_or_export() {
    let cfg = PollockConfig::lenient();
    assert_eq!(cfg.ingest.accept, AcceptPolicy::AnyImage);
    assert_eq!(cfg.ingest.max_file_bytes, None);
    assert!(!cfg.export.enabled);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = PollockConfig::from_json_str(
        r##"{ "ingest": { "accept": "any_image", "max_file_bytes": null }, "render": { "background": "#000" } }"##,
    )
    .unwrap();
    assert_eq!(cfg.ingest.accept, AcceptPolicy::AnyImage);
    assert_eq!(cfg.ingest.max_file_bytes, None);
    assert_eq!(cfg.ingest.max_edge, DEFAULT_MAX_EDGE);
    assert_eq!(cfg.render.background, Rgba8::new(0, 0, 0, 255));
    assert!(cfg.export.enabled);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = PollockConfig::from_json_str(r#"{ "ingest": { "max_edges": 10 } }"#).unwrap_err();
    assert!(matches!(err, PollockError::Other(_)));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut cfg = PollockConfig::default();
    cfg.ingest.max_edge = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = PollockConfig::default();
    cfg.ingest.max_edge = MAX_SURFACE_EDGE + 1;
    assert!(cfg.validate().is_err());

    let mut cfg = PollockConfig::default();
    cfg.ingest.jpeg_quality = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = PollockConfig::default();
    cfg.ingest.max_file_bytes = Some(0);
    assert!(cfg.validate().is_err());

    let mut cfg = PollockConfig::default();
    cfg.export.filename = "out/pollock.png".into();
    assert!(cfg.validate().is_err());
}

#[test]
fn config_roundtrips_through_json() {
    let cfg = PollockConfig::lenient();
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(PollockConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn overlay_keeps_base_values_for_missing_keys() {
    let cfg = PollockConfig::lenient()
        .overlay_json_str(r#"{ "ingest": { "max_edge": 300 } }"#)
        .unwrap();
    assert_eq!(cfg.ingest.max_edge, 300);
    assert_eq!(cfg.ingest.accept, AcceptPolicy::AnyImage);
    assert_eq!(cfg.ingest.max_file_bytes, None);
    assert!(!cfg.export.enabled);
}

#[test]
fn overlay_can_clear_the_size_cap_and_validates() {
    let cfg = PollockConfig::strict()
        .overlay_json_str(r#"{ "ingest": { "max_file_bytes": null } }"#)
        .unwrap();
    assert_eq!(cfg.ingest.max_file_bytes, None);

    assert!(
        PollockConfig::strict()
            .overlay_json_str(r#"{ "ingest": { "jpeg_quality": 0 } }"#)
            .is_err()
    );
    assert!(PollockConfig::strict().overlay_json_str("not json").is_err());
}
