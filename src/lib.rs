//! Coach-mark overlays: a translucent full-screen mask with a cutout that walks
//! the user through regions of an interface, one step at a time.
//!
//! The crate is the sequencing and animation core. It does not own a window or
//! a widget tree; instead the host
//!
//! 1. **Drives time**: [`CoachMarksOverlay::tick`] advances every animation,
//! 2. **Forwards input**: [`CoachMarksOverlay::advance`] or
//!    [`CoachMarksOverlay::handle_gesture`],
//! 3. **Draws**: [`CoachMarksOverlay::frame`] returns a plain-data
//!    [`OverlayFrame`] (mask path, swipe hints, caption bubbles).
//!
//! Lifecycle notifications reach the host through [`CoachMarksDelegate`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same ticks and inputs always give the same frames.
//! - **Single-threaded core**: the overlay is not `Send`; rasterizing finished
//!   frames in parallel is fine.
//! - **Premultiplied RGBA8** out of [`CpuRenderer`].
//!
//! For a walkthrough of the concepts, see [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod annotation;
mod foundation;
mod geometry;
mod indicator;
mod marks;
mod overlay;
mod render;

/// High-level, standalone documentation for the overlay's concepts and timing.
pub mod guide;

pub use animation::ease::Ease;
pub use animation::timeline::{AnimationId, Finished, StopToken, Timeline};
pub use animation::tween::{Animated, Lerp, TweenSpec};
pub use annotation::controller::AnnotationFrame;
pub use annotation::layout::{
    ARROW_HALF_WIDTH, ARROW_HEIGHT, ApproxTextMetrics, ArrowEdge, BUBBLE_CORNER_RADIUS,
    BUBBLE_MARGIN, BUBBLE_PADDING, BubbleLayout, TextBlock, TextLine, TextMetrics, layout_bubble,
};
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Size, Typeface, Vec2};
pub use foundation::error::{CoachMarksError, CoachMarksResult};
pub use geometry::cutout::{
    Cutout, DEFAULT_CUTOUT_CORNER_RADIUS, MaskPath, ShapeKind, build_cutout_path,
};
pub use indicator::controller::IndicatorFrame;
pub use marks::descriptor::{CoachMarkBuilder, CoachMarkDescriptor, IndicatorDirection};
pub use marks::tour::{CoachMarkSpec, RectSpec, TourSpec};
pub use overlay::config::OverlayConfig;
pub use overlay::cue::InstanceId;
pub use overlay::delegate::{CoachMarksDelegate, OverlayEvent, RecordingDelegate};
pub use overlay::engine::{CoachMarksOverlay, Gesture, OverlayPhase, SwipeDirection};
pub use overlay::frame::OverlayFrame;
pub use overlay::playback::{Playback, PlaybackReport};
pub use render::cpu::CpuRenderer;
pub use render::{FrameRGBA, RenderSettings};
