use super::*;
use crate::animation::timeline::Timeline;

#[test]
fn step_respects_delay_then_interpolates() {
    let mut tl: Timeline<()> = Timeline::new();
    let mut a = Animated::new(0.0);
    a.animate(
        tl.untracked(),
        10.0,
        TweenSpec::new(1.0).delay(0.5).ease(Ease::OutQuad),
    );

    assert!(a.step(0.25).is_none());
    assert_eq!(*a.value(), 0.0);
    assert!(a.step(0.75).is_none());
    assert!((*a.value() - 7.5).abs() < 1e-9);
    assert_eq!(a.origin(), Some(&0.0));

    let done = a.step(0.75).expect("finished");
    assert!((done.overshoot - 0.25).abs() < 1e-9);
    assert_eq!(*a.value(), 10.0);
    assert!(!a.is_animating());
}

#[test]
fn animate_supersedes_and_starts_from_presented_value() {
    let mut tl: Timeline<()> = Timeline::new();
    let first = tl.untracked();
    let second = tl.untracked();
    let mut a = Animated::new(0.0);
    a.animate(first, 10.0, TweenSpec::new(1.0).ease(Ease::OutQuad));
    a.step(0.5);

    assert_eq!(
        a.animate(second, 0.0, TweenSpec::new(1.0).ease(Ease::OutQuad)),
        Some(first)
    );
    assert_eq!(a.origin(), Some(&7.5));
    assert_eq!(a.cancel(), Some(second));
}

#[test]
fn zero_duration_finishes_on_first_step() {
    let mut tl: Timeline<()> = Timeline::new();
    let mut a = Animated::new(Rect::ZERO);
    let target = Rect::new(0.0, 0.0, 4.0, 4.0);
    a.animate(tl.untracked(), target, TweenSpec::new(0.0));
    assert!(a.step(0.0).is_some());
    assert_eq!(*a.value(), target);
}

#[test]
fn snap_and_cancel_report_superseded_transition() {
    let mut tl: Timeline<()> = Timeline::new();
    let id = tl.untracked();
    let mut a = Animated::new(1.0);
    a.animate(id, 2.0, TweenSpec::new(1.0));
    assert_eq!(a.snap(3.0), Some(id));
    assert_eq!(*a.value(), 3.0);
    assert_eq!(a.cancel(), None);
}

#[test]
fn rect_lerp_is_componentwise() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(<Rect as Lerp>::lerp(&a, &b, 0.5), Rect::new(5.0, 10.0, 20.0, 25.0));
}
