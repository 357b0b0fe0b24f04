use crate::{
    animation::{
        ease::Ease,
        timeline::{StopToken, Timeline},
        tween::{Animated, TweenSpec},
    },
    annotation::{
        controller::{AnnotationController, AnnotationRequest},
        layout::TextMetrics,
    },
    foundation::core::{Rect, Rgba8, validate_rect},
    foundation::error::{CoachMarksError, CoachMarksResult},
    geometry::cutout::{Cutout, MaskPath},
    indicator::controller::IndicatorController,
    marks::descriptor::CoachMarkDescriptor,
    overlay::{
        config::OverlayConfig,
        cue::Cue,
        delegate::{CoachMarksDelegate, OverlayEvent},
        frame::OverlayFrame,
    },
};

const DISMISS_DELAY: f64 = 0.3;
const DISMISS_DURATION: f64 = 0.6;

/// Where the overlay is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPhase {
    /// Constructed, not started.
    Idle,
    /// Fading in before the first step.
    Revealing,
    /// Showing a step and accepting advances.
    Showing,
    /// Fading out after teardown began.
    Dismissing,
    /// Torn down and detached. Terminal.
    Dismissed,
}

/// Direction of a recognised swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Swipe toward the left edge.
    Left,
    /// Swipe toward the right edge.
    Right,
    /// Swipe toward the top edge.
    Up,
    /// Swipe toward the bottom edge.
    Down,
}

/// Input recognised by the host over the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "gesture", content = "direction", rename_all = "snake_case")]
pub enum Gesture {
    /// Single tap anywhere.
    Tap,
    /// Swipe in a direction.
    Swipe(SwipeDirection),
}

/// Full-screen coach-mark overlay driving a fixed sequence of steps.
///
/// The overlay is host-clocked: nothing moves until [`CoachMarksOverlay::tick`]
/// is called. Lifecycle notifications go to the delegate set with
/// [`CoachMarksOverlay::set_delegate`].
pub struct CoachMarksOverlay {
    bounds: Rect,
    config: OverlayConfig,
    descriptors: Vec<CoachMarkDescriptor>,
    current_index: Option<usize>,
    phase: OverlayPhase,
    visible: bool,
    attached: bool,
    alpha: Animated<f64>,
    mask: Option<Animated<Cutout>>,
    timeline: Timeline<Cue>,
    indicators: IndicatorController,
    annotations: AnnotationController,
    delegate: Option<Box<dyn CoachMarksDelegate>>,
}

impl std::fmt::Debug for CoachMarksOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachMarksOverlay")
            .field("bounds", &self.bounds)
            .field("steps", &self.descriptors.len())
            .field("current_index", &self.current_index)
            .field("phase", &self.phase)
            .field("visible", &self.visible)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl CoachMarksOverlay {
    /// Overlay covering `bounds` that will walk through `descriptors`.
    ///
    /// The overlay starts attached and hidden, as if the host had just added
    /// it to its view tree. An empty list is accepted; [`Self::start`] then
    /// does nothing.
    pub fn new(
        bounds: Rect,
        descriptors: Vec<CoachMarkDescriptor>,
        config: OverlayConfig,
    ) -> CoachMarksResult<Self> {
        validate_rect(bounds, "bounds")?;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(CoachMarksError::validation("bounds must have positive area"));
        }
        config.validate()?;

        let indicators =
            IndicatorController::new(config.indicator_travel, config.indicator_diameter);
        let annotations = AnnotationController::new(
            bounds,
            config.max_annotation_width,
            config.annotation_spacing,
        );
        Ok(Self {
            bounds,
            config,
            descriptors,
            current_index: None,
            phase: OverlayPhase::Idle,
            visible: false,
            attached: true,
            alpha: Animated::new(0.0),
            mask: None,
            timeline: Timeline::new(),
            indicators,
            annotations,
            delegate: None,
        })
    }

    /// Replace the text measurement used to lay out caption bubbles.
    pub fn with_text_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.annotations.set_metrics(Box::new(metrics));
        self
    }

    /// Route lifecycle notifications to `delegate`.
    pub fn set_delegate(&mut self, delegate: impl CoachMarksDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Change the mask tint. Takes effect on the next frame.
    pub fn set_overlay_color(&mut self, color: Rgba8) {
        self.config.overlay_color = color;
    }

    /// Fade the overlay in, then show the first step.
    ///
    /// Does nothing when the list is empty or the overlay was already started.
    pub fn start(&mut self) {
        if self.descriptors.is_empty() {
            tracing::debug!("start ignored: no coach marks");
            return;
        }
        if self.phase != OverlayPhase::Idle {
            tracing::debug!(phase = ?self.phase, "start ignored: already started");
            return;
        }

        self.visible = true;
        self.phase = OverlayPhase::Revealing;
        self.timeline.cancel(self.alpha.snap(0.0));
        let cue = self.timeline.schedule(Cue::OverlayShown);
        self.timeline.cancel(self.alpha.animate(
            cue,
            1.0,
            TweenSpec::new(self.config.animation_duration),
        ));
        tracing::debug!(steps = self.descriptors.len(), "overlay revealing");
    }

    /// Show step `index`, or tear down when `index` is past the end.
    ///
    /// Only acts while [`OverlayPhase::Showing`].
    #[tracing::instrument(skip(self))]
    pub fn go_to(&mut self, index: usize) {
        if self.phase != OverlayPhase::Showing {
            tracing::debug!(phase = ?self.phase, "go_to ignored");
            return;
        }
        if index >= self.descriptors.len() {
            self.teardown();
            return;
        }

        self.current_index = Some(index);
        self.notify(OverlayEvent::WillNavigateTo { index });

        let mark = &self.descriptors[index];
        let target = mark.target_rect();
        let mask = self
            .mask
            .get_or_insert_with(|| Animated::new(Cutout::collapsed(target)));
        if index == 0 {
            self.timeline.cancel(mask.snap(Cutout::collapsed(target)));
        }

        let to = Cutout::resolve(target, mark.shape(), self.config.cutout_corner_radius);
        let cue = self.timeline.schedule(Cue::MaskSettled { index });
        let spec = TweenSpec::new(self.config.animation_duration).ease(Ease::EaseOut);
        let superseded = self.timeline.cancel(mask.animate(cue, to, spec));
        if let Some(Cue::MaskSettled { index: stale }) = superseded {
            tracing::debug!(stale, "mask transition superseded");
        }

        if self.config.use_bubble_annotations {
            self.annotations.present(
                AnnotationRequest {
                    caption: mark.caption(),
                    anchor: mark.anchor_rect(),
                    typeface: mark.typeface(),
                },
                &mut self.timeline,
            );
        }
        self.indicators.present(mark, &mut self.timeline);
        tracing::debug!(?target, shape = ?mark.shape(), "step shown");
    }

    /// Leave the current step for the next one, tearing down after the last.
    ///
    /// Ignored unless a step is showing.
    pub fn advance(&mut self) {
        let (OverlayPhase::Showing, Some(index)) = (self.phase, self.current_index) else {
            tracing::debug!(phase = ?self.phase, "advance ignored");
            return;
        };
        self.notify(OverlayEvent::DidTapAdvance { index });
        self.go_to(index + 1);
    }

    /// Apply a recognised gesture. Taps and horizontal swipes advance.
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Tap | Gesture::Swipe(SwipeDirection::Left | SwipeDirection::Right) => {
                self.advance()
            }
            Gesture::Swipe(direction) => {
                tracing::trace!(?direction, "vertical swipe ignored");
            }
        }
    }

    /// Fade everything out, then detach.
    ///
    /// Ignored before [`Self::start`] and once teardown has begun.
    #[tracing::instrument(skip(self))]
    pub fn teardown(&mut self) {
        if matches!(
            self.phase,
            OverlayPhase::Idle | OverlayPhase::Dismissing | OverlayPhase::Dismissed
        ) {
            tracing::debug!(phase = ?self.phase, "teardown ignored");
            return;
        }

        self.notify(OverlayEvent::WillCleanup);
        self.phase = OverlayPhase::Dismissing;

        let spec = TweenSpec::new(DISMISS_DURATION).delay(DISMISS_DELAY);
        let cue = self.timeline.schedule(Cue::Dismissed);
        if let Some(superseded) = self.timeline.cancel(self.alpha.animate(cue, 0.0, spec)) {
            tracing::debug!(?superseded, "overlay fade superseded");
        }
        self.indicators.fade_all(spec, &mut self.timeline);
        self.annotations.fade_all(spec, &mut self.timeline);
    }

    fn finish_teardown(&mut self) {
        self.indicators.shutdown(&mut self.timeline);
        self.annotations.shutdown(&mut self.timeline);
        if let Some(mask) = self.mask.as_mut() {
            self.timeline.cancel(mask.cancel());
        }
        self.visible = false;
        self.attached = false;
        self.phase = OverlayPhase::Dismissed;
        tracing::debug!("overlay detached");
        self.notify(OverlayEvent::DidCleanup);
    }

    /// Advance the host clock by `dt` seconds and deliver any completions.
    ///
    /// Negative or non-finite steps are ignored.
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "ignoring invalid tick");
            return;
        }
        self.timeline.advance(dt);

        let mut finished = Vec::new();
        finished.extend(self.alpha.step(dt));
        if let Some(mask) = self.mask.as_mut() {
            finished.extend(mask.step(dt));
        }
        self.indicators.step(dt, &mut finished);
        self.annotations.step(dt, &mut finished);

        for cue in self.timeline.resolve(finished) {
            self.dispatch(cue);
        }
    }

    fn dispatch(&mut self, cue: Cue) {
        tracing::trace!(?cue, "cue");
        match cue {
            Cue::OverlayShown => {
                if self.phase == OverlayPhase::Revealing {
                    self.phase = OverlayPhase::Showing;
                    self.go_to(0);
                }
            }
            Cue::MaskSettled { index } => {
                if self.phase != OverlayPhase::Dismissed {
                    self.notify(OverlayEvent::DidNavigateTo { index });
                }
            }
            Cue::IndicatorPhaseDone(id) => self.indicators.on_phase_done(id, &mut self.timeline),
            Cue::IndicatorRetired(id) => self.indicators.detach(id, &mut self.timeline),
            Cue::AnnotationPhaseDone(id) => self.annotations.on_phase_done(id, &mut self.timeline),
            Cue::AnnotationRetired(id) => self.annotations.detach(id, &mut self.timeline),
            Cue::Dismissed => self.finish_teardown(),
        }
    }

    fn notify(&mut self, event: OverlayEvent) {
        tracing::trace!(?event, "delegate");
        if let Some(delegate) = self.delegate.as_deref_mut() {
            event.dispatch(delegate);
        }
    }

    /// Index of the step being shown; `None` before the first step.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Whether steps are being shown and advances are accepted.
    pub fn is_active(&self) -> bool {
        self.phase == OverlayPhase::Showing
    }

    /// Whether the overlay is drawn at all.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the overlay is still part of the host's view tree.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a step is showing and its cutout transition has landed.
    pub fn is_settled(&self) -> bool {
        self.is_active() && self.mask.as_ref().is_some_and(|m| !m.is_animating())
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Overlay bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Active configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Seconds of host clock observed.
    pub fn now(&self) -> f64 {
        self.timeline.now()
    }

    /// Current mask; `None` until the first step is shown.
    pub fn mask(&self) -> Option<MaskPath> {
        self.mask
            .as_ref()
            .map(|m| MaskPath::new(self.bounds, *m.value()))
    }

    /// Cutout the in-flight mask transition started from.
    pub fn mask_transition_origin(&self) -> Option<Cutout> {
        self.mask.as_ref().and_then(|m| m.origin().copied())
    }

    /// Stop flag of the live swipe hint, if one is attached.
    pub fn indicator_stop_token(&self) -> Option<StopToken> {
        self.indicators.live().map(|i| i.stop_token())
    }

    /// Stop flag of the live caption bubble, if one is attached.
    pub fn annotation_stop_token(&self) -> Option<StopToken> {
        self.annotations.live().map(|a| a.stop_token())
    }

    /// Completions still waiting on in-flight transitions.
    pub fn pending_animations(&self) -> usize {
        self.timeline.pending()
    }

    /// Plain-data snapshot of everything the host needs to draw.
    pub fn frame(&self) -> OverlayFrame {
        OverlayFrame {
            time: self.timeline.now(),
            bounds: self.bounds,
            phase: self.phase,
            visible: self.visible,
            alpha: self.alpha.value().clamp(0.0, 1.0),
            color: self.config.overlay_color,
            mask: self.mask(),
            current_index: self.current_index,
            indicators: self.indicators.frames(),
            annotations: self.annotations.frames(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/engine.rs"]
mod tests;
