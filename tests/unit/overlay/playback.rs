use super::*;
use crate::{
    foundation::core::Rect,
    geometry::cutout::ShapeKind,
    marks::descriptor::CoachMarkDescriptor,
    overlay::config::OverlayConfig,
};

fn overlay() -> CoachMarksOverlay {
    let marks = vec![
        CoachMarkDescriptor::builder(Rect::new(10.0, 10.0, 60.0, 60.0), ShapeKind::Circle)
            .caption("one")
            .build()
            .unwrap(),
        CoachMarkDescriptor::builder(Rect::new(10.0, 100.0, 200.0, 140.0), ShapeKind::Rect)
            .build()
            .unwrap(),
    ];
    CoachMarksOverlay::new(Rect::new(0.0, 0.0, 320.0, 480.0), marks, OverlayConfig::default())
        .unwrap()
}

#[test]
fn plays_tour_to_completion() {
    let mut o = overlay();
    let mut shown = Vec::new();
    let report = Playback::default()
        .run(&mut o, |f| {
            if let Some(i) = f.current_index {
                if shown.last() != Some(&i) {
                    shown.push(i);
                }
            }
        })
        .unwrap();

    assert!(report.completed);
    assert_eq!(report.advances, 2);
    assert_eq!(shown, vec![0, 1]);
    assert!(report.duration < 10.0);
    assert_eq!(o.phase(), OverlayPhase::Dismissed);
}

#[test]
fn stops_at_max_duration() {
    let mut o = overlay();
    let playback = Playback {
        max_duration: 1.0,
        ..Playback::default()
    };
    let report = playback.run(&mut o, |_| {}).unwrap();
    assert!(!report.completed);
    assert_eq!(report.frames, 31);
    assert_eq!(report.advances, 0);
}

#[test]
fn frame_at_zero_is_the_first_reveal_frame() {
    let mut o = overlay();
    let frame = Playback::default().frame_at(&mut o, 0.0).unwrap();
    assert_eq!(frame.phase, OverlayPhase::Revealing);
    assert_eq!(frame.alpha, 0.0);
    assert!(frame.is_blank());
}

#[test]
fn rejects_bad_settings() {
    let mut o = overlay();
    let bad = Playback {
        fps: 0.0,
        ..Playback::default()
    };
    assert!(bad.run(&mut o, |_| {}).is_err());
    assert!(Playback::default().frame_at(&mut o, -1.0).is_err());
}
