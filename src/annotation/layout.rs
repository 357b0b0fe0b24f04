use crate::foundation::core::{BezPath, Point, Rect, Size, Typeface, Vec2};

/// Inner padding between the bubble edge and its text.
pub const BUBBLE_PADDING: f64 = 10.0;
/// Minimum distance kept between the bubble and the overlay edge.
pub const BUBBLE_MARGIN: f64 = 8.0;
/// Height of the arrow pointing at the anchor.
pub const ARROW_HEIGHT: f64 = 10.0;
/// Half the width of the arrow's base.
pub const ARROW_HALF_WIDTH: f64 = 8.0;
/// Corner radius of the bubble body.
pub const BUBBLE_CORNER_RADIUS: f64 = 6.0;

/// One wrapped line of caption text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextLine {
    /// Line content, without the breaking whitespace.
    pub text: String,
    /// Measured advance width.
    pub width: f64,
}

/// Caption text broken into lines, with its overall extent.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextBlock {
    /// Wrapped lines, top to bottom.
    pub lines: Vec<TextLine>,
    /// Distance between consecutive baselines.
    pub line_height: f64,
    /// Widest line by total height.
    pub size: Size,
}

/// Text measurement supplied by the host.
///
/// Shaping is platform work; the overlay only needs line breaks and extents
/// to size and place the bubble.
pub trait TextMetrics {
    /// Break `text` into lines no wider than `max_width` where possible.
    fn measure(&self, text: &str, typeface: &Typeface, max_width: f64) -> TextBlock;
}

/// Fixed-advance measurement: every character is `advance_em` of the font
/// size wide and lines are wrapped greedily at whitespace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxTextMetrics {
    /// Character advance as a fraction of the font size.
    pub advance_em: f64,
    /// Line height as a fraction of the font size.
    pub line_height_em: f64,
}

impl Default for ApproxTextMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.55,
            line_height_em: 1.25,
        }
    }
}

impl ApproxTextMetrics {
    fn width_of(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * self.advance_em * size
    }
}

impl TextMetrics for ApproxTextMetrics {
    fn measure(&self, text: &str, typeface: &Typeface, max_width: f64) -> TextBlock {
        let advance = self.advance_em * typeface.size;
        let max_chars = if advance > 0.0 {
            ((max_width / advance).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = Vec::<String>::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                // Words wider than a whole line are hard-broken.
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_chars) {
                    let chunk: String = chunk.iter().collect();
                    let needed = current.chars().count()
                        + usize::from(!current.is_empty())
                        + chunk.chars().count();
                    if !current.is_empty() && needed > max_chars {
                        lines.push(std::mem::take(&mut current));
                    }
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str(&chunk);
                }
            }
            lines.push(current);
        }

        let lines: Vec<TextLine> = lines
            .into_iter()
            .map(|text| TextLine {
                width: self.width_of(&text, typeface.size),
                text,
            })
            .collect();
        let line_height = self.line_height_em * typeface.size;
        let width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
        TextBlock {
            size: Size::new(width, line_height * lines.len() as f64),
            lines,
            line_height,
        }
    }
}

/// Which edge of the bubble body carries the arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowEdge {
    /// Bubble sits below the anchor.
    Top,
    /// Bubble sits above the anchor.
    Bottom,
}

/// Resolved geometry of an annotation bubble.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BubbleLayout {
    /// Rounded body rectangle.
    pub body: Rect,
    /// Edge the arrow is attached to.
    pub arrow_edge: ArrowEdge,
    /// Point of the arrow, facing the anchor.
    pub arrow_tip: Point,
    /// Wrapped caption lines.
    pub lines: Vec<TextLine>,
    /// Top-left corner of the first line box.
    pub text_origin: Point,
    /// Distance between consecutive baselines.
    pub line_height: f64,
}

impl BubbleLayout {
    /// Rounded-rectangle outline of the body.
    pub fn body_path(&self) -> BezPath {
        use kurbo::Shape as _;
        self.body
            .to_rounded_rect(BUBBLE_CORNER_RADIUS)
            .to_path(0.1)
    }

    /// Triangle joining the body edge to the arrow tip.
    pub fn arrow_path(&self) -> BezPath {
        let base_y = match self.arrow_edge {
            ArrowEdge::Top => self.body.y0,
            ArrowEdge::Bottom => self.body.y1,
        };
        let mut path = BezPath::new();
        path.move_to((self.arrow_tip.x - ARROW_HALF_WIDTH, base_y));
        path.line_to(self.arrow_tip);
        path.line_to((self.arrow_tip.x + ARROW_HALF_WIDTH, base_y));
        path.close_path();
        path
    }

    /// Whole bubble, arrow included.
    pub fn bounds(&self) -> Rect {
        self.body.union_pt(self.arrow_tip)
    }

    /// Same bubble moved vertically by `dy`.
    pub fn translated(&self, dy: f64) -> Self {
        let offset = Vec2::new(0.0, dy);
        Self {
            body: self.body + offset,
            arrow_tip: self.arrow_tip + offset,
            text_origin: self.text_origin + offset,
            ..self.clone()
        }
    }
}

/// Place a bubble holding `block` next to `anchor` inside `bounds`.
///
/// The body is centred horizontally on the anchor and clamped into the
/// bounds. It goes `spacing` below the anchor unless that overflows the
/// bottom edge and the space above is free, in which case it flips above.
pub fn layout_bubble(block: TextBlock, anchor: Rect, bounds: Rect, spacing: f64) -> BubbleLayout {
    let w = block.size.width + 2.0 * BUBBLE_PADDING;
    let h = block.size.height + 2.0 * BUBBLE_PADDING;
    let center_x = anchor.center().x;

    let min_x = bounds.x0 + BUBBLE_MARGIN;
    let max_x = bounds.x1 - BUBBLE_MARGIN - w;
    let x = (center_x - w / 2.0).min(max_x).max(min_x);

    let below = anchor.y1 + spacing;
    let above = anchor.y0 - spacing - h;
    let flip = below + h > bounds.y1 - BUBBLE_MARGIN && above >= bounds.y0 + BUBBLE_MARGIN;
    let (y, arrow_edge) = if flip {
        (above, ArrowEdge::Bottom)
    } else {
        (below, ArrowEdge::Top)
    };

    let body = Rect::new(x, y, x + w, y + h);
    let tip_min = body.x0 + BUBBLE_CORNER_RADIUS + ARROW_HALF_WIDTH;
    let tip_max = body.x1 - BUBBLE_CORNER_RADIUS - ARROW_HALF_WIDTH;
    let tip_x = if tip_min <= tip_max {
        center_x.clamp(tip_min, tip_max)
    } else {
        body.center().x
    };
    let tip_y = match arrow_edge {
        ArrowEdge::Top => body.y0 - ARROW_HEIGHT,
        ArrowEdge::Bottom => body.y1 + ARROW_HEIGHT,
    };

    BubbleLayout {
        body,
        arrow_edge,
        arrow_tip: Point::new(tip_x, tip_y),
        text_origin: Point::new(body.x0 + BUBBLE_PADDING, body.y0 + BUBBLE_PADDING),
        lines: block.lines,
        line_height: block.line_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/layout.rs"]
mod tests;
