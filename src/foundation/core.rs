use crate::foundation::error::{CoachMarksError, CoachMarksResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, used for the bubble and indicator fills.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha multiplied by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * o).round().clamp(0.0, 255.0) as u8,
            ..self
        }
    }

    /// Premultiplied channels, rounded to nearest.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// Font selection for an annotation caption.
///
/// Glyph shaping is left to the host; the core only needs a family name for
/// the renderer and a size for layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Typeface {
    /// Font family name as understood by the host.
    pub family: String,
    /// Point size.
    pub size: f64,
}

impl Default for Typeface {
    fn default() -> Self {
        Self {
            family: "system-ui".to_string(),
            size: 14.0,
        }
    }
}

impl Typeface {
    /// Construct a typeface.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Reject empty family names and non-positive sizes.
    pub fn validate(&self) -> CoachMarksResult<()> {
        if self.family.trim().is_empty() {
            return Err(CoachMarksError::validation(
                "typeface family must be non-empty",
            ));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(CoachMarksError::validation(
                "typeface size must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Reject rectangles with non-finite coordinates or inverted extents.
pub(crate) fn validate_rect(rect: Rect, field: &str) -> CoachMarksResult<()> {
    if ![rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(CoachMarksError::validation(format!(
            "{field} must have finite coordinates"
        )));
    }
    if rect.x1 < rect.x0 || rect.y1 < rect.y0 {
        return Err(CoachMarksError::validation(format!(
            "{field} must have non-negative width and height"
        )));
    }
    Ok(())
}

/// Zero-size rectangle at `center`.
pub(crate) fn point_rect(center: Point) -> Rect {
    Rect::from_points(center, center)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
