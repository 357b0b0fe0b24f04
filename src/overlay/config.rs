use crate::{
    foundation::core::Rgba8,
    foundation::error::{CoachMarksError, CoachMarksResult},
    geometry::cutout::DEFAULT_CUTOUT_CORNER_RADIUS,
};

/// Tunables for a coach-mark overlay. Every field has a default, so a
/// partial JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Seconds for the overlay fade-in and each cutout transition.
    pub animation_duration: f64,
    /// Corner radius for rounded cutouts that do not carry their own.
    pub cutout_corner_radius: f64,
    /// Widest an annotation bubble may grow before wrapping.
    pub max_annotation_width: f64,
    /// Gap between the anchor and the bubble body.
    pub annotation_spacing: f64,
    /// Show caption bubbles at all.
    pub use_bubble_annotations: bool,
    /// Tint of the mask.
    pub overlay_color: Rgba8,
    /// Horizontal distance the swipe hint travels each loop.
    pub indicator_travel: f64,
    /// Diameter of the swipe hint disc.
    pub indicator_diameter: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            animation_duration: 0.3,
            cutout_corner_radius: DEFAULT_CUTOUT_CORNER_RADIUS,
            max_annotation_width: 230.0,
            annotation_spacing: 35.0,
            use_bubble_annotations: true,
            overlay_color: Rgba8::new(0, 0, 0, 204),
            indicator_travel: 260.0,
            indicator_diameter: 40.0,
        }
    }
}

impl OverlayConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(s: &str) -> CoachMarksResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject negative, zero-where-meaningless and non-finite values.
    pub fn validate(&self) -> CoachMarksResult<()> {
        for (name, value) in [
            ("animation_duration", self.animation_duration),
            ("cutout_corner_radius", self.cutout_corner_radius),
            ("annotation_spacing", self.annotation_spacing),
            ("indicator_travel", self.indicator_travel),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoachMarksError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("max_annotation_width", self.max_annotation_width),
            ("indicator_diameter", self.indicator_diameter),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoachMarksError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/config.rs"]
mod tests;
