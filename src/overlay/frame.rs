use crate::{
    annotation::controller::AnnotationFrame,
    foundation::core::{Rect, Rgba8},
    geometry::cutout::MaskPath,
    indicator::controller::IndicatorFrame,
    overlay::engine::OverlayPhase,
};

/// Everything a host needs to draw the overlay at one instant.
///
/// Indicators and annotations are listed back to front (retiring instances
/// first) and are composited under `alpha` together with the mask.
#[derive(Clone, Debug, serde::Serialize)]
pub struct OverlayFrame {
    /// Host clock in seconds.
    pub time: f64,
    /// Overlay bounds.
    pub bounds: Rect,
    /// Lifecycle phase.
    pub phase: OverlayPhase,
    /// Whether anything should be drawn.
    pub visible: bool,
    /// Overall opacity in `[0, 1]`.
    pub alpha: f64,
    /// Mask tint.
    pub color: Rgba8,
    /// Mask path; `None` until the first step.
    pub mask: Option<MaskPath>,
    /// Step being shown.
    pub current_index: Option<usize>,
    /// Swipe hints.
    pub indicators: Vec<IndicatorFrame>,
    /// Caption bubbles.
    pub annotations: Vec<AnnotationFrame>,
}

impl OverlayFrame {
    /// Whether drawing this frame would put anything on screen.
    pub fn is_blank(&self) -> bool {
        !self.visible || self.alpha <= 0.0
    }
}
