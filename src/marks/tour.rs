use std::path::Path;

use crate::{
    foundation::core::{Rect, Typeface},
    foundation::error::{CoachMarksError, CoachMarksResult},
    geometry::cutout::ShapeKind,
    marks::descriptor::{CoachMarkDescriptor, IndicatorDirection},
    overlay::{config::OverlayConfig, engine::CoachMarksOverlay},
};

/// Rectangle as written in tour files: origin plus size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RectSpec {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl RectSpec {
    /// As a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl From<Rect> for RectSpec {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x0,
            y: r.y0,
            width: r.width(),
            height: r.height(),
        }
    }
}

/// One step of a tour file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoachMarkSpec {
    /// Highlighted region.
    pub rect: RectSpec,
    /// Cutout shape.
    pub shape: ShapeKind,
    /// Bubble text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Bubble anchor, when it differs from `rect`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poi: Option<RectSpec>,
    /// Caption typeface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typeface: Option<Typeface>,
    /// Show the swipe hint.
    #[serde(default)]
    pub swipe: bool,
    /// Swipe hint direction.
    #[serde(default)]
    pub direction: IndicatorDirection,
}

impl CoachMarkSpec {
    /// Validate into a descriptor.
    pub fn to_descriptor(&self) -> CoachMarksResult<CoachMarkDescriptor> {
        let mut builder = CoachMarkDescriptor::builder(self.rect.to_rect(), self.shape);
        if let Some(caption) = &self.caption {
            builder = builder.caption(caption.clone());
        }
        if let Some(poi) = self.poi {
            builder = builder.point_of_interest(poi.to_rect());
        }
        if let Some(tf) = &self.typeface {
            builder = builder.typeface(tf.clone());
        }
        if self.swipe {
            builder = builder.indicator(self.direction);
        }
        builder.build()
    }
}

/// A whole tour: overlay size, optional config and the steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TourSpec {
    /// Overlay width.
    pub width: f64,
    /// Overlay height.
    pub height: f64,
    /// Overlay tunables.
    #[serde(default)]
    pub config: OverlayConfig,
    /// Steps in order.
    pub marks: Vec<CoachMarkSpec>,
}

impl TourSpec {
    /// Parse and validate a tour document.
    pub fn from_json_str(s: &str) -> CoachMarksResult<Self> {
        let tour: Self = serde_json::from_str(s)?;
        tour.validate()?;
        Ok(tour)
    }

    /// Read and parse a tour file.
    pub fn from_path(path: &Path) -> CoachMarksResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoachMarksError::Other(anyhow::Error::new(e).context(format!(
                "read tour file '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&text)
    }

    /// Check the size, config and every step.
    pub fn validate(&self) -> CoachMarksResult<()> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(CoachMarksError::validation(
                "tour width/height must be finite and > 0",
            ));
        }
        self.config.validate()?;
        self.descriptors().map(|_| ())
    }

    /// Overlay bounds anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Steps as validated descriptors.
    pub fn descriptors(&self) -> CoachMarksResult<Vec<CoachMarkDescriptor>> {
        self.marks
            .iter()
            .enumerate()
            .map(|(i, m)| {
                m.to_descriptor().map_err(|e| match e {
                    CoachMarksError::Validation(msg) => {
                        CoachMarksError::validation(format!("marks[{i}]: {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Overlay ready to [`start`](CoachMarksOverlay::start).
    pub fn build_overlay(&self) -> CoachMarksResult<CoachMarksOverlay> {
        CoachMarksOverlay::new(self.bounds(), self.descriptors()?, self.config.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marks/tour.rs"]
mod tests;
