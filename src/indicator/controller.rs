use crate::{
    animation::{
        timeline::{AnimationId, Finished, StopToken, Timeline},
        tween::{Animated, Lerp, TweenSpec},
    },
    foundation::core::{Affine, Rect, Vec2},
    marks::descriptor::{CoachMarkDescriptor, IndicatorDirection},
    overlay::cue::{Cue, InstanceId},
};

const SWEEP_DELAY: f64 = 0.3;
const SWEEP_DURATION: f64 = 0.6;
const SWEEP_SCALE: f64 = 2.0;
const TRAVERSE_DURATION: f64 = 1.0;
const RETIRE_DELAY: f64 = 0.3;
const RETIRE_DURATION: f64 = 0.6;

/// Horizontal offset and scale of the swipe hint, applied about its centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct IndicatorPose {
    offset_x: f64,
    scale: f64,
}

impl IndicatorPose {
    const REST: Self = Self {
        offset_x: 0.0,
        scale: 1.0,
    };
}

impl Lerp for IndicatorPose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            offset_x: <f64 as Lerp>::lerp(&a.offset_x, &b.offset_x, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopPhase {
    SweepIn,
    Traverse,
    Stopped,
}

/// Presentation state of one swipe hint, for the host renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IndicatorFrame {
    /// Instance identity; stable while the hint is attached.
    pub instance: InstanceId,
    /// Untransformed disc bounds.
    pub rect: Rect,
    /// Transform to apply to `rect`.
    pub transform: Affine,
    /// Effective opacity in `[0, 1]`.
    pub alpha: f64,
    /// Travel direction.
    pub direction: IndicatorDirection,
    /// Whether this instance is fading out after being replaced.
    pub retiring: bool,
}

#[derive(Debug)]
pub(crate) struct Indicator {
    id: InstanceId,
    home: Rect,
    direction: IndicatorDirection,
    pose: Animated<IndicatorPose>,
    loop_alpha: Animated<f64>,
    opacity: Animated<f64>,
    phase: LoopPhase,
    iterations: u64,
    stop: StopToken,
}

impl Indicator {
    fn new(id: InstanceId, home: Rect, direction: IndicatorDirection) -> Self {
        Self {
            id,
            home,
            direction,
            pose: Animated::new(IndicatorPose::REST),
            loop_alpha: Animated::new(0.0),
            opacity: Animated::new(1.0),
            phase: LoopPhase::Stopped,
            iterations: 0,
            stop: StopToken::new(),
        }
    }

    /// Start, swept-in and traversed poses.
    ///
    /// The start pose scales the swept-in offset too, so a right-to-left hint
    /// begins twice its travel away.
    fn poses(&self, travel: f64) -> [IndicatorPose; 3] {
        let near = IndicatorPose::REST;
        let far = IndicatorPose {
            offset_x: travel,
            scale: 1.0,
        };
        let (from, to) = match self.direction {
            IndicatorDirection::LeftToRight => (near, far),
            IndicatorDirection::RightToLeft => (far, near),
        };
        let start = IndicatorPose {
            offset_x: from.offset_x * SWEEP_SCALE,
            scale: SWEEP_SCALE,
        };
        [start, from, to]
    }

    fn begin_iteration(&mut self, travel: f64, timeline: &mut Timeline<Cue>) {
        if self.stop.is_stop_requested() {
            tracing::trace!(instance = self.id.0, "indicator loop stopped");
            self.phase = LoopPhase::Stopped;
            return;
        }

        let [start, swept, _] = self.poses(travel);
        timeline.cancel(self.pose.snap(start));
        timeline.cancel(self.loop_alpha.snap(0.0));

        let spec = TweenSpec::new(SWEEP_DURATION).delay(SWEEP_DELAY);
        let cue = timeline.schedule(Cue::IndicatorPhaseDone(self.id));
        self.pose.animate(cue, swept, spec);
        let fade = timeline.untracked();
        self.loop_alpha.animate(fade, 1.0, spec);

        self.phase = LoopPhase::SweepIn;
        self.iterations += 1;
        tracing::trace!(
            instance = self.id.0,
            iteration = self.iterations,
            "indicator loop iteration"
        );
    }

    fn on_phase_done(&mut self, travel: f64, timeline: &mut Timeline<Cue>) {
        match self.phase {
            LoopPhase::SweepIn => {
                let [_, _, traversed] = self.poses(travel);
                let spec = TweenSpec::new(TRAVERSE_DURATION);
                let cue = timeline.schedule(Cue::IndicatorPhaseDone(self.id));
                timeline.cancel(self.pose.animate(cue, traversed, spec));
                let fade = timeline.untracked();
                timeline.cancel(self.loop_alpha.animate(fade, 0.0, spec));
                self.phase = LoopPhase::Traverse;
            }
            LoopPhase::Traverse => self.begin_iteration(travel, timeline),
            LoopPhase::Stopped => {}
        }
    }

    fn fade_out(&mut self, id: AnimationId, spec: TweenSpec, timeline: &mut Timeline<Cue>) {
        timeline.cancel(self.opacity.animate(id, 0.0, spec));
    }

    /// Request stop, then drop every in-flight transition and its cue.
    fn release(&mut self, timeline: &mut Timeline<Cue>) {
        self.stop.request_stop();
        timeline.cancel(self.pose.cancel());
        timeline.cancel(self.loop_alpha.cancel());
        timeline.cancel(self.opacity.cancel());
        self.phase = LoopPhase::Stopped;
    }

    fn step(&mut self, dt: f64, out: &mut Vec<Finished>) {
        out.extend(self.pose.step(dt));
        out.extend(self.loop_alpha.step(dt));
        out.extend(self.opacity.step(dt));
    }

    fn frame(&self, retiring: bool) -> IndicatorFrame {
        let pose = self.pose.value();
        let center = self.home.center().to_vec2();
        let transform = Affine::translate(center + Vec2::new(pose.offset_x, 0.0))
            * Affine::scale(pose.scale)
            * Affine::translate(-center);
        IndicatorFrame {
            instance: self.id,
            rect: self.home,
            transform,
            alpha: (self.loop_alpha.value() * self.opacity.value()).clamp(0.0, 1.0),
            direction: self.direction,
            retiring,
        }
    }

    pub(crate) fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    #[cfg(test)]
    pub(crate) fn iterations(&self) -> u64 {
        self.iterations
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> LoopPhase {
        self.phase
    }
}

/// Owner of the single live swipe hint and any hints still fading out.
#[derive(Debug)]
pub(crate) struct IndicatorController {
    travel: f64,
    diameter: f64,
    next_instance: u64,
    live: Option<Indicator>,
    retiring: Vec<Indicator>,
}

impl IndicatorController {
    pub(crate) fn new(travel: f64, diameter: f64) -> Self {
        Self {
            travel,
            diameter,
            next_instance: 0,
            live: None,
            retiring: Vec::new(),
        }
    }

    /// Home square for a hint over `target`.
    fn placement(&self, target: Rect) -> Rect {
        let x = target.x0 + target.height() / 2.0 + self.travel / 2.0;
        Rect::from_origin_size((x, target.y0), (self.diameter, self.diameter))
    }

    /// Retire the live hint and attach a new one if `mark` asks for it.
    pub(crate) fn present(&mut self, mark: &CoachMarkDescriptor, timeline: &mut Timeline<Cue>) {
        self.retire(timeline);
        if !mark.show_indicator() {
            return;
        }

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        let mut indicator = Indicator::new(
            id,
            self.placement(mark.target_rect()),
            mark.indicator_direction(),
        );
        indicator.begin_iteration(self.travel, timeline);
        tracing::debug!(instance = id.0, direction = ?mark.indicator_direction(), "indicator attached");
        self.live = Some(indicator);
    }

    fn retire(&mut self, timeline: &mut Timeline<Cue>) {
        let Some(mut indicator) = self.live.take() else {
            return;
        };
        let cue = timeline.schedule(Cue::IndicatorRetired(indicator.id));
        indicator.fade_out(
            cue,
            TweenSpec::new(RETIRE_DURATION).delay(RETIRE_DELAY),
            timeline,
        );
        tracing::debug!(instance = indicator.id.0, "indicator retiring");
        self.retiring.push(indicator);
    }

    pub(crate) fn on_phase_done(&mut self, id: InstanceId, timeline: &mut Timeline<Cue>) {
        let travel = self.travel;
        if let Some(indicator) = self.find_mut(id) {
            indicator.on_phase_done(travel, timeline);
        }
    }

    /// Detach a retired hint once its fade finished.
    pub(crate) fn detach(&mut self, id: InstanceId, timeline: &mut Timeline<Cue>) {
        if let Some(pos) = self.retiring.iter().position(|i| i.id == id) {
            let mut indicator = self.retiring.remove(pos);
            indicator.release(timeline);
            tracing::debug!(instance = id.0, "indicator detached");
        }
    }

    /// Fade every attached hint to transparent without a completion.
    pub(crate) fn fade_all(&mut self, spec: TweenSpec, timeline: &mut Timeline<Cue>) {
        for indicator in self.live.iter_mut().chain(self.retiring.iter_mut()) {
            let id = timeline.untracked();
            indicator.fade_out(id, spec, timeline);
        }
    }

    /// Stop and detach everything.
    pub(crate) fn shutdown(&mut self, timeline: &mut Timeline<Cue>) {
        for mut indicator in self.live.take().into_iter().chain(self.retiring.drain(..)) {
            indicator.release(timeline);
        }
    }

    pub(crate) fn step(&mut self, dt: f64, out: &mut Vec<Finished>) {
        for indicator in self.live.iter_mut().chain(self.retiring.iter_mut()) {
            indicator.step(dt, out);
        }
    }

    pub(crate) fn frames(&self) -> Vec<IndicatorFrame> {
        self.retiring
            .iter()
            .map(|i| i.frame(true))
            .chain(self.live.iter().map(|i| i.frame(false)))
            .collect()
    }

    pub(crate) fn live(&self) -> Option<&Indicator> {
        self.live.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn retiring_count(&self) -> usize {
        self.retiring.len()
    }

    fn find_mut(&mut self, id: InstanceId) -> Option<&mut Indicator> {
        self.live
            .iter_mut()
            .chain(self.retiring.iter_mut())
            .find(|i| i.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/indicator/controller.rs"]
mod tests;
