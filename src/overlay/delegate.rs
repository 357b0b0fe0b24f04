use std::{cell::RefCell, rc::Rc};

/// Receiver of overlay lifecycle notifications. All methods default to
/// no-ops.
pub trait CoachMarksDelegate {
    /// Step `index` is about to be shown; its cutout transition has not started.
    fn will_navigate_to(&mut self, _index: usize) {}

    /// The cutout transition for step `index` finished.
    fn did_navigate_to(&mut self, _index: usize) {}

    /// Teardown began.
    fn will_cleanup(&mut self) {}

    /// Teardown finished; the overlay is detached.
    fn did_cleanup(&mut self) {}

    /// The user asked to advance while step `index` was shown.
    fn did_tap_advance(&mut self, _index: usize) {}
}

/// Delegate notification as a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OverlayEvent {
    /// See [`CoachMarksDelegate::will_navigate_to`].
    WillNavigateTo {
        /// Step index.
        index: usize,
    },
    /// See [`CoachMarksDelegate::did_navigate_to`].
    DidNavigateTo {
        /// Step index.
        index: usize,
    },
    /// See [`CoachMarksDelegate::will_cleanup`].
    WillCleanup,
    /// See [`CoachMarksDelegate::did_cleanup`].
    DidCleanup,
    /// See [`CoachMarksDelegate::did_tap_advance`].
    DidTapAdvance {
        /// Step index before advancing.
        index: usize,
    },
}

impl OverlayEvent {
    /// Invoke the matching delegate method.
    pub fn dispatch(self, delegate: &mut dyn CoachMarksDelegate) {
        match self {
            Self::WillNavigateTo { index } => delegate.will_navigate_to(index),
            Self::DidNavigateTo { index } => delegate.did_navigate_to(index),
            Self::WillCleanup => delegate.will_cleanup(),
            Self::DidCleanup => delegate.did_cleanup(),
            Self::DidTapAdvance { index } => delegate.did_tap_advance(index),
        }
    }
}

/// Delegate that appends every notification to a shared log.
///
/// Clones share the log, so keep one clone and hand another to the overlay.
#[derive(Clone, Debug, Default)]
pub struct RecordingDelegate {
    events: Rc<RefCell<Vec<OverlayEvent>>>,
}

impl RecordingDelegate {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far.
    pub fn events(&self) -> Vec<OverlayEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded events equal to `event`.
    pub fn count(&self, event: OverlayEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    fn push(&mut self, event: OverlayEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl CoachMarksDelegate for RecordingDelegate {
    fn will_navigate_to(&mut self, index: usize) {
        self.push(OverlayEvent::WillNavigateTo { index });
    }

    fn did_navigate_to(&mut self, index: usize) {
        self.push(OverlayEvent::DidNavigateTo { index });
    }

    fn will_cleanup(&mut self) {
        self.push(OverlayEvent::WillCleanup);
    }

    fn did_cleanup(&mut self) {
        self.push(OverlayEvent::DidCleanup);
    }

    fn did_tap_advance(&mut self, index: usize) {
        self.push(OverlayEvent::DidTapAdvance { index });
    }
}
