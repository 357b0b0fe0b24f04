use super::*;
use crate::geometry::cutout::ShapeKind;

fn swipe_mark(direction: IndicatorDirection) -> CoachMarkDescriptor {
    CoachMarkDescriptor::builder(Rect::new(20.0, 100.0, 120.0, 140.0), ShapeKind::Rect)
        .indicator(direction)
        .build()
        .unwrap()
}

fn plain_mark() -> CoachMarkDescriptor {
    CoachMarkDescriptor::builder(Rect::new(0.0, 0.0, 10.0, 10.0), ShapeKind::Rect)
        .build()
        .unwrap()
}

/// Step the controller and route its cues back, like the engine does.
fn run(ctl: &mut IndicatorController, tl: &mut Timeline<Cue>, secs: f64) {
    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    while t < secs {
        let mut finished = Vec::new();
        ctl.step(dt, &mut finished);
        for cue in tl.resolve(finished) {
            match cue {
                Cue::IndicatorPhaseDone(id) => ctl.on_phase_done(id, tl),
                Cue::IndicatorRetired(id) => ctl.detach(id, tl),
                other => panic!("unexpected cue {other:?}"),
            }
        }
        t += dt;
    }
}

#[test]
fn no_indicator_when_not_requested() {
    let mut tl = Timeline::new();
    let mut ctl = IndicatorController::new(260.0, 40.0);
    ctl.present(&plain_mark(), &mut tl);
    assert!(ctl.live().is_none());
    assert!(ctl.frames().is_empty());
    assert_eq!(tl.pending(), 0);
}

#[test]
fn loop_reschedules_until_stopped() {
    let mut tl = Timeline::new();
    let mut ctl = IndicatorController::new(260.0, 40.0);
    ctl.present(&swipe_mark(IndicatorDirection::LeftToRight), &mut tl);

    // One iteration is 0.3 + 0.6 + 1.0 seconds.
    run(&mut ctl, &mut tl, 4.0);
    let live = ctl.live().unwrap();
    assert_eq!(live.iterations(), 3);
    assert_ne!(live.phase(), LoopPhase::Stopped);
}

#[test]
fn stop_mid_loop_lets_the_phase_finish_but_never_reschedules() {
    let mut tl = Timeline::new();
    let mut ctl = IndicatorController::new(260.0, 40.0);
    ctl.present(&swipe_mark(IndicatorDirection::LeftToRight), &mut tl);
    run(&mut ctl, &mut tl, 0.5);

    let token = ctl.live().unwrap().stop_token();
    token.request_stop();
    assert_eq!(ctl.live().unwrap().phase(), LoopPhase::SweepIn);

    run(&mut ctl, &mut tl, 5.0);
    let live = ctl.live().unwrap();
    assert_eq!(live.iterations(), 1);
    assert_eq!(live.phase(), LoopPhase::Stopped);
    assert_eq!(tl.pending(), 0);
}

#[test]
fn presenting_again_retires_then_detaches_previous() {
    let mut tl = Timeline::new();
    let mut ctl = IndicatorController::new(260.0, 40.0);
    ctl.present(&swipe_mark(IndicatorDirection::LeftToRight), &mut tl);
    let first = ctl.live().unwrap().stop_token();

    ctl.present(&plain_mark(), &mut tl);
    assert!(ctl.live().is_none());
    assert_eq!(ctl.retiring_count(), 1);
    assert!(ctl.frames()[0].retiring);
    assert!(!first.is_stop_requested());

    run(&mut ctl, &mut tl, 1.0);
    assert_eq!(ctl.retiring_count(), 0);
    assert!(first.is_stop_requested());
    assert_eq!(tl.pending(), 0);
}

#[test]
fn right_to_left_mirrors_placement_and_travel() {
    let mut tl = Timeline::new();
    let mut ltr = IndicatorController::new(260.0, 40.0);
    let mut rtl = IndicatorController::new(260.0, 40.0);
    ltr.present(&swipe_mark(IndicatorDirection::LeftToRight), &mut tl);
    rtl.present(&swipe_mark(IndicatorDirection::RightToLeft), &mut tl);

    let l = &ltr.frames()[0];
    let r = &rtl.frames()[0];
    assert_eq!(l.rect, r.rect);
    // Home: x0 + height / 2 + travel / 2.
    assert_eq!(l.rect.origin(), crate::foundation::core::Point::new(170.0, 100.0));

    let center = l.rect.center();
    assert_eq!((l.transform * center).x, center.x);
    assert_eq!((r.transform * center).x, center.x + 520.0);
    assert_eq!(l.alpha, 0.0);

    // After sweep-in and traverse the hints have swapped sides.
    run(&mut ltr, &mut tl, 1.85);
    run(&mut rtl, &mut tl, 1.85);
    let l = &ltr.frames()[0];
    let r = &rtl.frames()[0];
    assert!((l.transform * center).x > center.x + 200.0);
    assert!((r.transform * center).x < center.x + 60.0);
}

#[test]
fn shutdown_requests_stop_and_clears_cues() {
    let mut tl = Timeline::new();
    let mut ctl = IndicatorController::new(260.0, 40.0);
    ctl.present(&swipe_mark(IndicatorDirection::LeftToRight), &mut tl);
    let token = ctl.live().unwrap().stop_token();
    ctl.shutdown(&mut tl);
    assert!(token.is_stop_requested());
    assert!(ctl.frames().is_empty());
    assert_eq!(tl.pending(), 0);
}

#[test]
fn sweep_in_scales_the_start_offset_with_the_disc() {
    let mut tl = Timeline::new();
    let mut rtl = IndicatorController::new(260.0, 40.0);
    rtl.present(&swipe_mark(IndicatorDirection::RightToLeft), &mut tl);

    let r = &rtl.frames()[0];
    let center = r.rect.center();
    let edge = crate::foundation::core::Point::new(r.rect.x1, center.y);
    assert_eq!((r.transform * center).x, center.x + 520.0);
    assert_eq!((r.transform * edge).x - (r.transform * center).x, 40.0);

    // Sweep-in ends at 0.9s on the swept pose: one travel away, unscaled.
    run(&mut rtl, &mut tl, 0.88);
    let r = &rtl.frames()[0];
    let offset = (r.transform * center).x - center.x;
    assert!((offset - 260.0).abs() < 5.0, "{offset}");
    assert!((r.transform * edge).x - (r.transform * center).x < 21.0);
}
