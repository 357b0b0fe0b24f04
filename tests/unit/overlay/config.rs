use super::*;

#[test]
fn defaults_match_documented_values() {
    let cfg = OverlayConfig::default();
    assert_eq!(cfg.animation_duration, 0.3);
    assert_eq!(cfg.cutout_corner_radius, 2.0);
    assert_eq!(cfg.max_annotation_width, 230.0);
    assert_eq!(cfg.annotation_spacing, 35.0);
    assert!(cfg.use_bubble_annotations);
    assert_eq!(cfg.overlay_color, Rgba8::new(0, 0, 0, 204));
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = OverlayConfig::from_json_str(r#"{ "animation_duration": 0.5 }"#).unwrap();
    assert_eq!(cfg.animation_duration, 0.5);
    assert_eq!(cfg.max_annotation_width, 230.0);
}

#[test]
fn rejects_unknown_and_invalid_values() {
    assert!(OverlayConfig::from_json_str(r#"{ "animationDuration": 0.5 }"#).is_err());
    assert!(OverlayConfig::from_json_str(r#"{ "animation_duration": -1 }"#).is_err());
    assert!(OverlayConfig::from_json_str(r#"{ "max_annotation_width": 0 }"#).is_err());
}
