use super::*;

#[test]
fn builder_defaults() {
    let target = Rect::new(0.0, 0.0, 50.0, 50.0);
    let mark = CoachMarkDescriptor::builder(target, ShapeKind::Circle)
        .build()
        .unwrap();
    assert_eq!(mark.target_rect(), target);
    assert_eq!(mark.anchor_rect(), target);
    assert_eq!(mark.caption(), None);
    assert!(!mark.show_indicator());
    assert_eq!(mark.indicator_direction(), IndicatorDirection::LeftToRight);
}

#[test]
fn empty_caption_reads_as_absent() {
    let mark = CoachMarkDescriptor::builder(Rect::new(0.0, 0.0, 1.0, 1.0), ShapeKind::Rect)
        .caption("")
        .build()
        .unwrap();
    assert_eq!(mark.caption(), None);
}

#[test]
fn point_of_interest_overrides_anchor() {
    let poi = Rect::new(5.0, 5.0, 10.0, 10.0);
    let mark = CoachMarkDescriptor::builder(Rect::new(0.0, 0.0, 50.0, 50.0), ShapeKind::Circle)
        .caption("Tap here")
        .point_of_interest(poi)
        .indicator(IndicatorDirection::RightToLeft)
        .build()
        .unwrap();
    assert_eq!(mark.anchor_rect(), poi);
    assert_eq!(mark.caption(), Some("Tap here"));
    assert!(mark.show_indicator());
    assert_eq!(mark.indicator_direction(), IndicatorDirection::RightToLeft);
}

#[test]
fn malformed_inputs_fail_fast() {
    let inverted = Rect::new(10.0, 10.0, 0.0, 0.0);
    assert!(CoachMarkDescriptor::builder(inverted, ShapeKind::Circle).build().is_err());

    let ok = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(CoachMarkDescriptor::builder(ok, ShapeKind::rounded(-1.0)).build().is_err());
    assert!(
        CoachMarkDescriptor::builder(ok, ShapeKind::Rect)
            .point_of_interest(Rect::new(f64::NAN, 0.0, 1.0, 1.0))
            .build()
            .is_err()
    );
    assert!(
        CoachMarkDescriptor::builder(ok, ShapeKind::Rect)
            .typeface(Typeface::new("Inter", -2.0))
            .build()
            .is_err()
    );
}
