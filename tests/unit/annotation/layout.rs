use super::*;

fn tf() -> Typeface {
    Typeface::new("system-ui", 10.0)
}

#[test]
fn approx_metrics_wrap_greedily() {
    let m = ApproxTextMetrics::default();
    // 5.5 units per char at size 10, so 60 units fit 10 chars.
    let block = m.measure("one two three four", &tf(), 60.0);
    let texts: Vec<&str> = block.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["one two", "three four"]);
    assert_eq!(block.line_height, 12.5);
    assert_eq!(block.size.height, 25.0);
    assert!((block.size.width - 55.0).abs() < 1e-9);
}

#[test]
fn long_words_are_hard_broken_and_newlines_respected() {
    let m = ApproxTextMetrics::default();
    let block = m.measure("abcdefghijkl\nx", &tf(), 35.0);
    let texts: Vec<&str> = block.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["abcdef", "ghijkl", "x"]);
}

#[test]
fn bubble_sits_below_anchor_centred() {
    let m = ApproxTextMetrics::default();
    let block = m.measure("Tap here", &tf(), 210.0);
    let anchor = Rect::new(100.0, 100.0, 200.0, 140.0);
    let bounds = Rect::new(0.0, 0.0, 400.0, 800.0);
    let b = layout_bubble(block, anchor, bounds, 35.0);

    assert_eq!(b.arrow_edge, ArrowEdge::Top);
    assert_eq!(b.body.y0, 175.0);
    assert!((b.body.center().x - 150.0).abs() < 1e-9);
    assert_eq!(b.arrow_tip, Point::new(150.0, 165.0));
    assert_eq!(
        b.text_origin,
        Point::new(b.body.x0 + BUBBLE_PADDING, b.body.y0 + BUBBLE_PADDING)
    );
    assert_eq!(b.body.height(), 12.5 + 2.0 * BUBBLE_PADDING);
}

#[test]
fn bubble_flips_above_near_bottom_and_clamps_horizontally() {
    let m = ApproxTextMetrics::default();
    let block = m.measure("Near the corner", &tf(), 210.0);
    let anchor = Rect::new(370.0, 740.0, 400.0, 780.0);
    let bounds = Rect::new(0.0, 0.0, 400.0, 800.0);
    let b = layout_bubble(block, anchor, bounds, 35.0);

    assert_eq!(b.arrow_edge, ArrowEdge::Bottom);
    assert!((b.body.y1 - (740.0 - 35.0)).abs() < 1e-9);
    assert!((b.body.x1 - (400.0 - BUBBLE_MARGIN)).abs() < 1e-9);
    assert!(b.arrow_tip.x <= b.body.x1 - BUBBLE_CORNER_RADIUS - ARROW_HALF_WIDTH);
    assert!((b.arrow_tip.y - (b.body.y1 + ARROW_HEIGHT)).abs() < 1e-9);
}

#[test]
fn translated_moves_every_point() {
    let m = ApproxTextMetrics::default();
    let block = m.measure("Hi", &tf(), 210.0);
    let b = layout_bubble(
        block,
        Rect::new(10.0, 10.0, 50.0, 50.0),
        Rect::new(0.0, 0.0, 300.0, 300.0),
        35.0,
    );
    let moved = b.translated(-10.0);
    assert_eq!(moved.body.y0, b.body.y0 - 10.0);
    assert_eq!(moved.arrow_tip.y, b.arrow_tip.y - 10.0);
    assert_eq!(moved.text_origin.y, b.text_origin.y - 10.0);
    assert_eq!(moved.lines, b.lines);
    assert_eq!(moved.bounds().y0, moved.arrow_tip.y);
}
