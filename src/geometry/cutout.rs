use kurbo::Shape as _;

use crate::{
    animation::tween::Lerp,
    foundation::core::{BezPath, Point, Rect, Vec2, point_rect},
};

/// Corner radius used for rounded cutouts when none is configured.
pub const DEFAULT_CUTOUT_CORNER_RADIUS: f64 = 2.0;

// Cubic control-point distance approximating a quarter ellipse.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Outline of the region punched through the overlay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ShapeKind {
    /// Ellipse inscribed in the target rectangle.
    Circle,
    /// Rectangle with rounded corners; `None` uses the configured radius.
    RoundedRect {
        /// Corner radius override.
        #[serde(default)]
        corner_radius: Option<f64>,
    },
    /// Sharp-cornered rectangle.
    Rect,
}

impl ShapeKind {
    /// Rounded rectangle with an explicit corner radius.
    pub fn rounded(corner_radius: f64) -> Self {
        Self::RoundedRect {
            corner_radius: Some(corner_radius),
        }
    }
}

/// Normalised cutout: a rectangle with per-axis corner radii.
///
/// Every [`ShapeKind`] maps onto this form, so any two cutouts interpolate
/// into a well-formed intermediate shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Cutout {
    /// Bounding rectangle of the excised region.
    pub rect: Rect,
    /// Corner radii, clamped to half the width and height.
    pub radii: Vec2,
}

impl Cutout {
    /// Resolve `shape` over `rect`, using `default_radius` for rounded
    /// rectangles without their own radius.
    pub fn resolve(rect: Rect, shape: ShapeKind, default_radius: f64) -> Self {
        let rect = rect.abs();
        let (half_w, half_h) = (rect.width() / 2.0, rect.height() / 2.0);
        let radii = match shape {
            ShapeKind::Circle => Vec2::new(half_w, half_h),
            ShapeKind::Rect => Vec2::ZERO,
            ShapeKind::RoundedRect { corner_radius } => {
                let r = corner_radius.unwrap_or(default_radius).max(0.0);
                Vec2::new(r.min(half_w), r.min(half_h))
            }
        };
        Self { rect, radii }
    }

    /// Zero-size cutout at the centre of `rect`.
    pub fn collapsed(rect: Rect) -> Self {
        Self {
            rect: point_rect(rect.center()),
            radii: Vec2::ZERO,
        }
    }

    /// Area of the bounding rectangle.
    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    /// Closed contour of the cutout.
    ///
    /// The element sequence is fixed (move, four line + cubic pairs, close)
    /// regardless of shape, so contours morph element-wise. It winds opposite
    /// to the bounds rectangle, so the mask renders the same under the
    /// even-odd and nonzero fill rules.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.append_to(&mut path);
        path
    }

    fn append_to(&self, path: &mut BezPath) {
        let Rect { x0, y0, x1, y1 } = self.rect;
        let (rx, ry) = (self.radii.x, self.radii.y);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);

        path.move_to((x1 - rx, y0));
        path.line_to((x0 + rx, y0));
        path.curve_to((x0 + rx - kx, y0), (x0, y0 + ry - ky), (x0, y0 + ry));
        path.line_to((x0, y1 - ry));
        path.curve_to((x0, y1 - ry + ky), (x0 + rx - kx, y1), (x0 + rx, y1));
        path.line_to((x1 - rx, y1));
        path.curve_to((x1 - rx + kx, y1), (x1, y1 - ry + ky), (x1, y1 - ry));
        path.line_to((x1, y0 + ry));
        path.curve_to((x1, y0 + ry - ky), (x1 - rx + kx, y0), (x1 - rx, y0));
        path.close_path();
    }
}

impl Lerp for Cutout {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let rect = <Rect as Lerp>::lerp(&a.rect, &b.rect, t);
        let radii = <Vec2 as Lerp>::lerp(&a.radii, &b.radii, t);
        // Overshooting curves may briefly invert the rect; keep radii legal.
        let rect = rect.abs();
        Self {
            rect,
            radii: Vec2::new(
                radii.x.clamp(0.0, rect.width() / 2.0),
                radii.y.clamp(0.0, rect.height() / 2.0),
            ),
        }
    }
}

/// Full-screen mask path: `bounds` with a cutout excised.
///
/// Fill with the even-odd rule: the cutout contour lies inside the bounds
/// contour, so it renders transparent.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MaskPath {
    bounds: Rect,
    cutout: Cutout,
    path: BezPath,
}

impl MaskPath {
    /// Build the mask for `cutout` over `bounds`.
    pub fn new(bounds: Rect, cutout: Cutout) -> Self {
        let mut path = bounds.to_path(0.1);
        cutout.append_to(&mut path);
        Self {
            bounds,
            cutout,
            path,
        }
    }

    /// Overlay bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Cutout this mask excises.
    pub fn cutout(&self) -> Cutout {
        self.cutout
    }

    /// Both contours, to be filled even-odd.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Cutout contour alone.
    pub fn cutout_path(&self) -> BezPath {
        self.cutout.to_path()
    }

    /// Bounding box of the excised region.
    pub fn cutout_bounds(&self) -> Rect {
        self.cutout_path().bounding_box()
    }

    /// Whether `pt` is painted by the overlay under the even-odd rule.
    pub fn covers(&self, pt: Point) -> bool {
        self.path.winding(pt) % 2 != 0
    }
}

/// Mask for `bounds` with `target` excised as `shape`, rounded rectangles
/// defaulting to [`DEFAULT_CUTOUT_CORNER_RADIUS`].
pub fn build_cutout_path(bounds: Rect, target: Rect, shape: ShapeKind) -> MaskPath {
    MaskPath::new(
        bounds,
        Cutout::resolve(target, shape, DEFAULT_CUTOUT_CORNER_RADIUS),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/cutout.rs"]
mod tests;
