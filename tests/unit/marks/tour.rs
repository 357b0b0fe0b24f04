use super::*;

const TOUR: &str = r#"{
    "width": 375,
    "height": 667,
    "config": { "animation_duration": 0.25 },
    "marks": [
        {
            "rect": { "x": 0, "y": 0, "width": 50, "height": 50 },
            "shape": { "kind": "circle" },
            "caption": "Tap here",
            "swipe": true,
            "direction": "right_to_left"
        },
        {
            "rect": { "x": 100, "y": 100, "width": 80, "height": 40 },
            "shape": { "kind": "rounded_rect", "corner_radius": 4 },
            "poi": { "x": 120, "y": 90, "width": 10, "height": 10 },
            "typeface": { "family": "Inter", "size": 16 }
        }
    ]
}"#;

#[test]
fn parses_marks_into_descriptors() {
    let tour = TourSpec::from_json_str(TOUR).unwrap();
    assert_eq!(tour.bounds(), Rect::new(0.0, 0.0, 375.0, 667.0));
    assert_eq!(tour.config.animation_duration, 0.25);

    let marks = tour.descriptors().unwrap();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].shape(), ShapeKind::Circle);
    assert_eq!(marks[0].caption(), Some("Tap here"));
    assert!(marks[0].show_indicator());
    assert_eq!(marks[0].indicator_direction(), IndicatorDirection::RightToLeft);

    assert_eq!(marks[1].target_rect(), Rect::new(100.0, 100.0, 180.0, 140.0));
    assert_eq!(marks[1].shape(), ShapeKind::rounded(4.0));
    assert_eq!(marks[1].anchor_rect(), Rect::new(120.0, 90.0, 130.0, 100.0));
    assert_eq!(marks[1].typeface().map(|t| t.size), Some(16.0));
    assert!(!marks[1].show_indicator());
}

#[test]
fn rejects_unknown_fields_and_missing_shape() {
    let unknown = r#"{ "width": 10, "height": 10, "marks": [], "extra": 1 }"#;
    assert!(matches!(
        TourSpec::from_json_str(unknown),
        Err(CoachMarksError::Serde(_))
    ));
    let missing = r#"{ "width": 10, "height": 10,
        "marks": [ { "rect": { "x": 0, "y": 0, "width": 1, "height": 1 } } ] }"#;
    assert!(TourSpec::from_json_str(missing).is_err());
}

#[test]
fn invalid_step_names_its_index() {
    let bad = r#"{ "width": 10, "height": 10, "marks": [
        { "rect": { "x": 0, "y": 0, "width": 1, "height": 1 }, "shape": { "kind": "rect" } },
        { "rect": { "x": 0, "y": 0, "width": -1, "height": 1 }, "shape": { "kind": "rect" } }
    ] }"#;
    match TourSpec::from_json_str(bad) {
        Err(CoachMarksError::Validation(msg)) => assert!(msg.starts_with("marks[1]"), "{msg}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn serializes_back_to_an_equivalent_tour() {
    let tour = TourSpec::from_json_str(TOUR).unwrap();
    let json = serde_json::to_string(&tour).unwrap();
    assert_eq!(TourSpec::from_json_str(&json).unwrap(), tour);
}

#[test]
fn builds_an_idle_overlay() {
    let overlay = TourSpec::from_json_str(TOUR).unwrap().build_overlay().unwrap();
    assert_eq!(overlay.len(), 2);
    assert_eq!(
        overlay.phase(),
        crate::overlay::engine::OverlayPhase::Idle
    );
}
