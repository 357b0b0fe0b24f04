use crate::{
    animation::{
        ease::Ease,
        timeline::{AnimationId, Finished},
    },
    foundation::core::{Point, Rect, Vec2},
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (`t = 0`) and `b` (`t = 1`). `t` may leave
    /// `[0, 1]` for overshooting curves.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::lerp(*a, *b, t)
    }
}

impl Lerp for Rect {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rect::new(
            <f64 as Lerp>::lerp(&a.x0, &b.x0, t),
            <f64 as Lerp>::lerp(&a.y0, &b.y0, t),
            <f64 as Lerp>::lerp(&a.x1, &b.x1, t),
            <f64 as Lerp>::lerp(&a.y1, &b.y1, t),
        )
    }
}

/// Timing of a single transition, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TweenSpec {
    /// Wait before the value starts moving.
    pub delay: f64,
    /// Time from start to end once the delay has elapsed.
    pub duration: f64,
    /// Curve applied to progress.
    pub ease: Ease,
}

impl TweenSpec {
    /// Transition of `duration` seconds, no delay, ease-in-out.
    pub fn new(duration: f64) -> Self {
        Self {
            delay: 0.0,
            duration: duration.max(0.0),
            ease: Ease::EaseInOut,
        }
    }

    /// Replace the delay.
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Replace the curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Delay plus duration.
    pub fn total(&self) -> f64 {
        self.delay + self.duration
    }
}

#[derive(Clone, Debug)]
struct Transition<T> {
    id: AnimationId,
    from: T,
    to: T,
    spec: TweenSpec,
    elapsed: f64,
}

/// A property that can be set instantly or transitioned over time.
///
/// At most one transition is in flight; starting another supersedes it and
/// hands back the superseded [`AnimationId`] so its completion can be dropped.
#[derive(Clone, Debug)]
pub struct Animated<T> {
    value: T,
    transition: Option<Transition<T>>,
}

impl<T> Animated<T>
where
    T: Lerp + Clone,
{
    /// Property resting at `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            transition: None,
        }
    }

    /// Current (presented) value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Starting value of the in-flight transition.
    pub fn origin(&self) -> Option<&T> {
        self.transition.as_ref().map(|tr| &tr.from)
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Jump to `value` immediately, superseding any transition.
    pub fn snap(&mut self, value: T) -> Option<AnimationId> {
        self.value = value;
        self.transition.take().map(|tr| tr.id)
    }

    /// Transition from the current value to `to`.
    pub fn animate(&mut self, id: AnimationId, to: T, spec: TweenSpec) -> Option<AnimationId> {
        let superseded = self.transition.take().map(|tr| tr.id);
        self.transition = Some(Transition {
            id,
            from: self.value.clone(),
            to,
            spec,
            elapsed: 0.0,
        });
        superseded
    }

    /// Freeze at the current value, dropping any transition.
    pub fn cancel(&mut self) -> Option<AnimationId> {
        self.transition.take().map(|tr| tr.id)
    }

    /// Advance the in-flight transition by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Option<Finished> {
        let tr = self.transition.as_mut()?;
        tr.elapsed += dt;

        let total = tr.spec.total();
        if tr.elapsed >= total {
            let overshoot = tr.elapsed - total;
            let id = tr.id;
            if let Some(tr) = self.transition.take() {
                self.value = tr.to;
            }
            return Some(Finished { id, overshoot });
        }

        let local = tr.elapsed - tr.spec.delay;
        if local > 0.0 {
            let t = tr.spec.ease.apply(local / tr.spec.duration);
            self.value = T::lerp(&tr.from, &tr.to, t);
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
