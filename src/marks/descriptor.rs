use crate::{
    foundation::core::{Rect, Typeface, validate_rect},
    foundation::error::{CoachMarksError, CoachMarksResult},
    geometry::cutout::ShapeKind,
};

/// Direction of the swipe hint's travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorDirection {
    /// Sweep in on the left, travel right.
    #[default]
    LeftToRight,
    /// Sweep in on the right, travel left.
    RightToLeft,
}

/// One validated step of a coach-mark tour.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoachMarkDescriptor {
    target_rect: Rect,
    shape: ShapeKind,
    caption: Option<String>,
    point_of_interest: Option<Rect>,
    typeface: Option<Typeface>,
    show_indicator: bool,
    indicator_direction: IndicatorDirection,
}

impl CoachMarkDescriptor {
    /// Start building a step that highlights `target_rect` as `shape`.
    pub fn builder(target_rect: Rect, shape: ShapeKind) -> CoachMarkBuilder {
        CoachMarkBuilder {
            mark: Self {
                target_rect,
                shape,
                caption: None,
                point_of_interest: None,
                typeface: None,
                show_indicator: false,
                indicator_direction: IndicatorDirection::default(),
            },
        }
    }

    /// Region highlighted by the cutout, in overlay coordinates.
    pub fn target_rect(&self) -> Rect {
        self.target_rect
    }

    /// Cutout shape.
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Caption text; `None` when absent or empty.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref().filter(|c| !c.is_empty())
    }

    /// Rectangle the annotation bubble anchors to.
    pub fn anchor_rect(&self) -> Rect {
        self.point_of_interest.unwrap_or(self.target_rect)
    }

    /// Typeface override for the caption.
    pub fn typeface(&self) -> Option<&Typeface> {
        self.typeface.as_ref()
    }

    /// Whether this step shows the swipe hint.
    pub fn show_indicator(&self) -> bool {
        self.show_indicator
    }

    /// Swipe hint direction.
    pub fn indicator_direction(&self) -> IndicatorDirection {
        self.indicator_direction
    }

    fn validate(&self) -> CoachMarksResult<()> {
        validate_rect(self.target_rect, "target_rect")?;
        if let Some(poi) = self.point_of_interest {
            validate_rect(poi, "point_of_interest")?;
        }
        if let ShapeKind::RoundedRect {
            corner_radius: Some(r),
        } = self.shape
        {
            if !r.is_finite() || r < 0.0 {
                return Err(CoachMarksError::validation(
                    "rounded_rect corner_radius must be finite and >= 0",
                ));
            }
        }
        if let Some(tf) = &self.typeface {
            tf.validate()?;
        }
        Ok(())
    }
}

/// Builder for [`CoachMarkDescriptor`]; [`CoachMarkBuilder::build`]
/// validates.
#[derive(Clone, Debug)]
pub struct CoachMarkBuilder {
    mark: CoachMarkDescriptor,
}

impl CoachMarkBuilder {
    /// Caption shown in the bubble. Empty text shows no bubble.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.mark.caption = Some(caption.into());
        self
    }

    /// Anchor the bubble to `rect` instead of the target.
    pub fn point_of_interest(mut self, rect: Rect) -> Self {
        self.mark.point_of_interest = Some(rect);
        self
    }

    /// Caption typeface override.
    pub fn typeface(mut self, typeface: Typeface) -> Self {
        self.mark.typeface = Some(typeface);
        self
    }

    /// Show the swipe hint travelling in `direction`.
    pub fn indicator(mut self, direction: IndicatorDirection) -> Self {
        self.mark.show_indicator = true;
        self.mark.indicator_direction = direction;
        self
    }

    /// Validate and finish.
    pub fn build(self) -> CoachMarksResult<CoachMarkDescriptor> {
        self.mark.validate()?;
        Ok(self.mark)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marks/descriptor.rs"]
mod tests;
