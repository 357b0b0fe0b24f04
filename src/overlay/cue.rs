/// Identity of one indicator or annotation instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct InstanceId(pub u64);

/// Named completion events routed back to the engine when a tracked
/// transition finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Overlay fade-in finished; show the first step.
    OverlayShown,
    /// Cutout transition for step `index` landed.
    MaskSettled { index: usize },
    /// One phase of an indicator's swipe loop finished.
    IndicatorPhaseDone(InstanceId),
    /// Retired indicator finished fading.
    IndicatorRetired(InstanceId),
    /// One phase of an annotation's entrance bounce finished.
    AnnotationPhaseDone(InstanceId),
    /// Retired annotation finished fading.
    AnnotationRetired(InstanceId),
    /// Teardown fade finished.
    Dismissed,
}
