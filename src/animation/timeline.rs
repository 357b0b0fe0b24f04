use std::{cell::Cell, collections::BTreeMap, rc::Rc};

/// Identifier handed to each transition when it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct AnimationId(pub u64);

/// Report from [`Animated::step`](crate::Animated::step) that a transition
/// reached its end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Finished {
    /// Transition that finished.
    pub id: AnimationId,
    /// How far past its end the clock ran during the step, in seconds.
    pub overshoot: f64,
}

/// Registry mapping in-flight transitions to the cue they fire on completion.
///
/// Transitions started with [`Timeline::untracked`] complete silently.
/// Superseded or cancelled transitions must be passed to [`Timeline::cancel`]
/// so their cue is dropped instead of leaking.
#[derive(Debug)]
pub struct Timeline<E> {
    now: f64,
    next_id: u64,
    pending: BTreeMap<AnimationId, E>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    /// Empty registry at time zero.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Seconds of host clock observed so far.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward.
    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
    }

    fn alloc(&mut self) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate an id whose completion fires `cue`.
    pub fn schedule(&mut self, cue: E) -> AnimationId {
        let id = self.alloc();
        self.pending.insert(id, cue);
        id
    }

    /// Allocate an id with no completion.
    pub fn untracked(&mut self) -> AnimationId {
        self.alloc()
    }

    /// Drop the cue registered for `id`, if any.
    pub fn cancel(&mut self, id: Option<AnimationId>) -> Option<E> {
        id.and_then(|id| self.pending.remove(&id))
    }

    /// Whether `id` still has a cue waiting.
    pub fn is_pending(&self, id: AnimationId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of cues waiting on in-flight transitions.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Turn this step's finished transitions into cues, earliest finisher
    /// first and start order breaking ties.
    pub fn resolve(&mut self, mut finished: Vec<Finished>) -> Vec<E> {
        finished.sort_by(|a, b| {
            b.overshoot
                .total_cmp(&a.overshoot)
                .then_with(|| a.id.cmp(&b.id))
        });
        finished
            .into_iter()
            .filter_map(|f| self.pending.remove(&f.id))
            .collect()
    }
}

/// Cooperative stop flag shared between a looping animation and its owner.
///
/// Clones observe the same flag. Once requested, a stop cannot be withdrawn.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    /// Fresh token with no stop requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to end at its next iteration boundary.
    pub fn request_stop(&self) {
        self.0.set(true);
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
