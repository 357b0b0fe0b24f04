//! # Coach-marks guide
//!
//! This module is a standalone walkthrough of how an overlay is put together
//! and how its timing works. If you are looking for CLI commands, start with
//! the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`CoachMarkDescriptor`](crate::CoachMarkDescriptor): one step. A target
//!   rectangle, a [`ShapeKind`](crate::ShapeKind), an optional caption and
//!   anchor, and whether to show the swipe hint.
//! - [`CoachMarksOverlay`](crate::CoachMarksOverlay): the sequence engine. Owns
//!   the steps, the current index, the overlay alpha and the animated cutout.
//! - [`CoachMarksDelegate`](crate::CoachMarksDelegate): lifecycle callbacks.
//! - [`OverlayFrame`](crate::OverlayFrame): what to draw right now.
//! - [`TourSpec`](crate::TourSpec): the JSON form of a whole tour.
//!
//! ---
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --start--> Revealing --fade done--> Showing(0) --advance--> Showing(1) ...
//!                     |                        |
//!                     +--------teardown--------+--> Dismissing --fade done--> Dismissed
//! ```
//!
//! - `start()` on an empty list does nothing; the overlay is never shown.
//! - Advancing past the last step tears down.
//! - `advance()` outside `Showing` is ignored, as is `teardown()` before
//!   `start()` or once it has already begun.
//!
//! ---
//!
//! ## Time and completions
//!
//! The overlay never reads a clock. Each [`tick`](crate::CoachMarksOverlay::tick)
//! steps every [`Animated`](crate::Animated) property by `dt`. A transition
//! that reaches its end reports a [`Finished`](crate::Finished); the
//! [`Timeline`](crate::Timeline) maps it to the cue registered when it started
//! (for example "cutout for step 2 landed"). Cues are handled after all
//! properties have been stepped, in the order the transitions finished.
//!
//! Starting a new transition on a property supersedes the old one, and the old
//! one's cue is dropped. This is why rapid taps only report
//! `did_navigate_to` for the step whose cutout actually landed.
//!
//! ```no_run
//! use coachmarks::{
//!     CoachMarkDescriptor, CoachMarksOverlay, OverlayConfig, Rect, RecordingDelegate, ShapeKind,
//! };
//!
//! let marks = vec![
//!     CoachMarkDescriptor::builder(Rect::new(0.0, 0.0, 50.0, 50.0), ShapeKind::Circle)
//!         .caption("Tap here")
//!         .build()?,
//! ];
//! let mut overlay =
//!     CoachMarksOverlay::new(Rect::new(0.0, 0.0, 375.0, 667.0), marks, OverlayConfig::default())?;
//! let log = RecordingDelegate::new();
//! overlay.set_delegate(log.clone());
//!
//! overlay.start();
//! for _ in 0..60 {
//!     overlay.tick(1.0 / 60.0);
//! }
//! overlay.advance();
//! # Ok::<(), coachmarks::CoachMarksError>(())
//! ```
//!
//! ---
//!
//! ## Cutouts
//!
//! Every shape is normalised to a [`Cutout`](crate::Cutout): a rectangle with
//! per-axis corner radii. A circle is a cutout whose radii are half its size,
//! a plain rectangle has zero radii. Because every cutout contour has the same
//! element structure, moving between any two steps is a component-wise
//! interpolation, including circle-to-rectangle morphs. The first step grows
//! out of a zero-size cutout at the target's centre.
//!
//! The [`MaskPath`](crate::MaskPath) is the bounds rectangle with the cutout
//! contour appended, filled even-odd.
//!
//! ---
//!
//! ## Swipe hints and bubbles
//!
//! At most one hint and one bubble are live. Presenting a new step retires the
//! previous instance (it fades out while the new one fades in) and detaches it
//! when its fade completes.
//!
//! The hint loops: sweep in (scaled down from 2x while fading in), traverse
//! (translate while fading out), repeat. Each iteration first checks its
//! [`StopToken`](crate::StopToken); teardown requests stop before detaching.
//!
//! Bubbles are laid out through [`TextMetrics`](crate::TextMetrics). The default
//! [`ApproxTextMetrics`](crate::ApproxTextMetrics) uses a fixed advance per
//! character; hosts with a real text stack should supply their own via
//! [`CoachMarksOverlay::with_text_metrics`](crate::CoachMarksOverlay::with_text_metrics).
//!
//! ---
//!
//! ## Rendering
//!
//! [`CpuRenderer`](crate::CpuRenderer) rasterizes an [`OverlayFrame`](crate::OverlayFrame)
//! into premultiplied RGBA8. Captions are drawn as bars, since glyph shaping
//! is the host's job. It exists for previews and tests; real hosts draw the
//! frame with their own toolkit.
