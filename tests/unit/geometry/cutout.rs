use super::*;
use crate::foundation::core::Rect;

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 800.0)
}

fn assert_rect_close(a: Rect, b: Rect) {
    for (x, y) in [(a.x0, b.x0), (a.y0, b.y0), (a.x1, b.x1), (a.y1, b.y1)] {
        assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
    }
}

#[test]
fn circle_cutout_bounding_box_matches_target() {
    for target in [
        Rect::new(0.0, 0.0, 50.0, 50.0),
        Rect::new(100.0, 100.0, 180.0, 140.0),
        Rect::new(12.5, 300.25, 13.5, 390.0),
    ] {
        let mask = build_cutout_path(bounds(), target, ShapeKind::Circle);
        assert_rect_close(mask.cutout_bounds(), target);
    }
}

#[test]
fn rounded_and_square_cutouts_keep_target_bounds() {
    let target = Rect::new(100.0, 100.0, 180.0, 140.0);
    for shape in [ShapeKind::rounded(4.0), ShapeKind::Rect] {
        let mask = build_cutout_path(bounds(), target, shape);
        assert_rect_close(mask.cutout_bounds(), target);
    }
}

#[test]
fn even_odd_leaves_cutout_interior_uncovered() {
    let target = Rect::new(100.0, 100.0, 200.0, 200.0);
    let mask = build_cutout_path(bounds(), target, ShapeKind::Circle);
    assert!(!mask.covers(target.center()));
    assert!(mask.covers(Point::new(10.0, 10.0)));
    // Square corner of the target lies outside the inscribed circle.
    assert!(mask.covers(Point::new(101.0, 101.0)));

    let square = build_cutout_path(bounds(), target, ShapeKind::Rect);
    assert!(!square.covers(Point::new(101.0, 101.0)));
}

#[test]
fn nonzero_fill_agrees_with_even_odd() {
    use kurbo::Shape as _;
    let target = Rect::new(100.0, 100.0, 200.0, 160.0);
    for shape in [ShapeKind::Circle, ShapeKind::Rect, ShapeKind::rounded(8.0)] {
        let mask = build_cutout_path(bounds(), target, shape);
        assert_eq!(mask.path().winding(target.center()), 0);
        assert_ne!(mask.path().winding(Point::new(5.0, 5.0)), 0);
    }
}

#[test]
fn rounded_radius_is_clamped_and_defaulted() {
    let target = Rect::new(0.0, 0.0, 10.0, 4.0);
    let big = Cutout::resolve(target, ShapeKind::rounded(50.0), 2.0);
    assert_eq!(big.radii, Vec2::new(5.0, 2.0));

    let defaulted = Cutout::resolve(
        target,
        ShapeKind::RoundedRect {
            corner_radius: None,
        },
        1.5,
    );
    assert_eq!(defaulted.radii, Vec2::new(1.5, 1.5));
}

#[test]
fn collapsed_cutout_is_a_point_at_the_centre() {
    let target = Rect::new(100.0, 100.0, 180.0, 140.0);
    let c = Cutout::collapsed(target);
    assert_eq!(c.area(), 0.0);
    assert_eq!(c.rect.center(), target.center());

    let mask = MaskPath::new(bounds(), c);
    assert!(mask.covers(target.center() + Vec2::new(1.0, 1.0)));
}

#[test]
fn contour_structure_is_shape_independent() {
    let target = Rect::new(10.0, 10.0, 60.0, 40.0);
    let n = |shape| Cutout::resolve(target, shape, 2.0).to_path().elements().len();
    assert_eq!(n(ShapeKind::Circle), n(ShapeKind::Rect));
    assert_eq!(n(ShapeKind::Circle), n(ShapeKind::rounded(3.0)));
}

#[test]
fn cutout_morph_midpoint_is_well_formed() {
    let a = Cutout::resolve(Rect::new(0.0, 0.0, 50.0, 50.0), ShapeKind::Circle, 2.0);
    let b = Cutout::resolve(Rect::new(100.0, 100.0, 180.0, 140.0), ShapeKind::Rect, 2.0);
    let mid = <Cutout as Lerp>::lerp(&a, &b, 0.5);
    assert_eq!(mid.rect, Rect::new(50.0, 50.0, 115.0, 95.0));
    assert_eq!(mid.radii, Vec2::new(12.5, 12.5));
}

#[test]
fn shape_kind_json_shape() {
    let s: ShapeKind = serde_json::from_str(r#"{"kind":"rounded_rect","corner_radius":4}"#).unwrap();
    assert_eq!(s, ShapeKind::rounded(4.0));
    let c: ShapeKind = serde_json::from_str(r#"{"kind":"circle"}"#).unwrap();
    assert_eq!(c, ShapeKind::Circle);
    assert!(serde_json::from_str::<ShapeKind>(r#"{"kind":"hexagon"}"#).is_err());
}
