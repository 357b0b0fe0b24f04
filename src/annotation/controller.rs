use crate::{
    animation::{
        ease::Ease,
        timeline::{AnimationId, Finished, StopToken, Timeline},
        tween::{Animated, TweenSpec},
    },
    annotation::layout::{
        ApproxTextMetrics, BUBBLE_PADDING, BubbleLayout, TextMetrics, layout_bubble,
    },
    foundation::core::{Rect, Typeface},
    overlay::cue::{Cue, InstanceId},
};

const APPEAR_DELAY: f64 = 0.3;
const APPEAR_DURATION: f64 = 0.8;
const RETIRE_DURATION: f64 = 0.3;
const LIFT_DELAY: f64 = 0.3;
const LIFT_DURATION: f64 = 0.25;
const LIFT_HEIGHT: f64 = 10.0;
const SETTLE_DURATION: f64 = 0.55;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BouncePhase {
    Lift,
    Settle,
    Rested,
    Stopped,
}

/// What to show in the bubble for one step.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AnnotationRequest<'a> {
    pub(crate) caption: Option<&'a str>,
    pub(crate) anchor: Rect,
    pub(crate) typeface: Option<&'a Typeface>,
}

/// Presentation state of one caption bubble, for the host renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnnotationFrame {
    /// Instance identity; stable while the bubble is attached.
    pub instance: InstanceId,
    /// Caption text.
    pub caption: String,
    /// Caption typeface.
    pub typeface: Typeface,
    /// Bubble geometry with the entrance bounce applied.
    pub layout: BubbleLayout,
    /// Effective opacity in `[0, 1]`.
    pub alpha: f64,
    /// Whether this instance is fading out after being replaced.
    pub retiring: bool,
}

#[derive(Debug)]
pub(crate) struct Annotation {
    id: InstanceId,
    caption: String,
    typeface: Typeface,
    layout: BubbleLayout,
    opacity: Animated<f64>,
    bounce: Animated<f64>,
    phase: BouncePhase,
    stop: StopToken,
}

impl Annotation {
    fn appear(&mut self, timeline: &mut Timeline<Cue>) {
        let fade = timeline.untracked();
        self.opacity.animate(
            fade,
            1.0,
            TweenSpec::new(APPEAR_DURATION).delay(APPEAR_DELAY),
        );

        let lift = timeline.schedule(Cue::AnnotationPhaseDone(self.id));
        self.bounce.animate(
            lift,
            -LIFT_HEIGHT,
            TweenSpec::new(LIFT_DURATION)
                .delay(LIFT_DELAY)
                .ease(Ease::OutQuad),
        );
        self.phase = BouncePhase::Lift;
    }

    fn on_phase_done(&mut self, timeline: &mut Timeline<Cue>) {
        if self.stop.is_stop_requested() {
            self.phase = BouncePhase::Stopped;
            return;
        }
        match self.phase {
            BouncePhase::Lift => {
                let settle = timeline.schedule(Cue::AnnotationPhaseDone(self.id));
                timeline.cancel(self.bounce.animate(
                    settle,
                    0.0,
                    TweenSpec::new(SETTLE_DURATION).ease(Ease::OutBack),
                ));
                self.phase = BouncePhase::Settle;
            }
            BouncePhase::Settle => self.phase = BouncePhase::Rested,
            BouncePhase::Rested | BouncePhase::Stopped => {}
        }
    }

    fn fade_out(&mut self, id: AnimationId, spec: TweenSpec, timeline: &mut Timeline<Cue>) {
        timeline.cancel(self.opacity.animate(id, 0.0, spec));
    }

    fn release(&mut self, timeline: &mut Timeline<Cue>) {
        self.stop.request_stop();
        timeline.cancel(self.opacity.cancel());
        timeline.cancel(self.bounce.cancel());
        self.phase = BouncePhase::Stopped;
    }

    fn step(&mut self, dt: f64, out: &mut Vec<Finished>) {
        out.extend(self.opacity.step(dt));
        out.extend(self.bounce.step(dt));
    }

    fn frame(&self, retiring: bool) -> AnnotationFrame {
        AnnotationFrame {
            instance: self.id,
            caption: self.caption.clone(),
            typeface: self.typeface.clone(),
            layout: self.layout.translated(*self.bounce.value()),
            alpha: self.opacity.value().clamp(0.0, 1.0),
            retiring,
        }
    }

    pub(crate) fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    #[cfg(test)]
    pub(crate) fn caption(&self) -> &str {
        &self.caption
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> BouncePhase {
        self.phase
    }
}

/// Owner of the single live caption bubble and any bubbles still fading out.
pub(crate) struct AnnotationController {
    bounds: Rect,
    max_width: f64,
    spacing: f64,
    metrics: Box<dyn TextMetrics>,
    next_instance: u64,
    live: Option<Annotation>,
    retiring: Vec<Annotation>,
}

impl std::fmt::Debug for AnnotationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationController")
            .field("bounds", &self.bounds)
            .field("live", &self.live)
            .field("retiring", &self.retiring.len())
            .finish_non_exhaustive()
    }
}

impl AnnotationController {
    pub(crate) fn new(bounds: Rect, max_width: f64, spacing: f64) -> Self {
        Self {
            bounds,
            max_width,
            spacing,
            metrics: Box::new(ApproxTextMetrics::default()),
            next_instance: 0,
            live: None,
            retiring: Vec::new(),
        }
    }

    pub(crate) fn set_metrics(&mut self, metrics: Box<dyn TextMetrics>) {
        self.metrics = metrics;
    }

    /// Retire the live bubble and attach a new one when there is a caption.
    pub(crate) fn present(&mut self, request: AnnotationRequest<'_>, timeline: &mut Timeline<Cue>) {
        self.retire(timeline);
        let Some(caption) = request.caption.filter(|c| !c.is_empty()) else {
            return;
        };

        let typeface = request.typeface.cloned().unwrap_or_default();
        let wrap = (self.max_width - 2.0 * BUBBLE_PADDING).max(1.0);
        let block = self.metrics.measure(caption, &typeface, wrap);
        let layout = layout_bubble(block, request.anchor, self.bounds, self.spacing);

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        let mut annotation = Annotation {
            id,
            caption: caption.to_string(),
            typeface,
            layout,
            opacity: Animated::new(0.0),
            bounce: Animated::new(0.0),
            phase: BouncePhase::Rested,
            stop: StopToken::new(),
        };
        annotation.appear(timeline);
        tracing::debug!(instance = id.0, caption, "annotation attached");
        self.live = Some(annotation);
    }

    fn retire(&mut self, timeline: &mut Timeline<Cue>) {
        let Some(mut annotation) = self.live.take() else {
            return;
        };
        let cue = timeline.schedule(Cue::AnnotationRetired(annotation.id));
        annotation.fade_out(cue, TweenSpec::new(RETIRE_DURATION), timeline);
        tracing::debug!(instance = annotation.id.0, "annotation retiring");
        self.retiring.push(annotation);
    }

    pub(crate) fn on_phase_done(&mut self, id: InstanceId, timeline: &mut Timeline<Cue>) {
        if let Some(annotation) = self.find_mut(id) {
            annotation.on_phase_done(timeline);
        }
    }

    /// Detach a retired bubble once its fade finished.
    pub(crate) fn detach(&mut self, id: InstanceId, timeline: &mut Timeline<Cue>) {
        if let Some(pos) = self.retiring.iter().position(|a| a.id == id) {
            let mut annotation = self.retiring.remove(pos);
            annotation.release(timeline);
            tracing::debug!(instance = id.0, "annotation detached");
        }
    }

    /// Fade every attached bubble to transparent without a completion.
    pub(crate) fn fade_all(&mut self, spec: TweenSpec, timeline: &mut Timeline<Cue>) {
        for annotation in self.live.iter_mut().chain(self.retiring.iter_mut()) {
            let id = timeline.untracked();
            annotation.fade_out(id, spec, timeline);
        }
    }

    /// Stop and detach everything.
    pub(crate) fn shutdown(&mut self, timeline: &mut Timeline<Cue>) {
        for mut annotation in self.live.take().into_iter().chain(self.retiring.drain(..)) {
            annotation.release(timeline);
        }
    }

    pub(crate) fn step(&mut self, dt: f64, out: &mut Vec<Finished>) {
        for annotation in self.live.iter_mut().chain(self.retiring.iter_mut()) {
            annotation.step(dt, out);
        }
    }

    pub(crate) fn frames(&self) -> Vec<AnnotationFrame> {
        self.retiring
            .iter()
            .map(|a| a.frame(true))
            .chain(self.live.iter().map(|a| a.frame(false)))
            .collect()
    }

    pub(crate) fn live(&self) -> Option<&Annotation> {
        self.live.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn retiring_count(&self) -> usize {
        self.retiring.len()
    }

    fn find_mut(&mut self, id: InstanceId) -> Option<&mut Annotation> {
        self.live
            .iter_mut()
            .chain(self.retiring.iter_mut())
            .find(|a| a.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/controller.rs"]
mod tests;
