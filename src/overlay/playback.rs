use crate::{
    foundation::error::{CoachMarksError, CoachMarksResult},
    overlay::{
        engine::{CoachMarksOverlay, OverlayPhase},
        frame::OverlayFrame,
    },
};

/// Fixed-step driver that plays a tour without a user, advancing each step
/// once its cutout has been settled for `dwell` seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Playback {
    /// Ticks per second.
    pub fps: f64,
    /// Seconds a settled step stays on screen before advancing.
    pub dwell: f64,
    /// Hard stop for the simulation, in seconds.
    pub max_duration: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            fps: 30.0,
            dwell: 1.5,
            max_duration: 120.0,
        }
    }
}

/// Outcome of [`Playback::run`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackReport {
    /// Frames handed to the callback.
    pub frames: u64,
    /// Simulated seconds.
    pub duration: f64,
    /// Advances issued.
    pub advances: u64,
    /// Whether the overlay reached [`OverlayPhase::Dismissed`].
    pub completed: bool,
}

impl Playback {
    /// Reject non-positive rates and negative times.
    pub fn validate(&self) -> CoachMarksResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(CoachMarksError::validation("fps must be finite and > 0"));
        }
        if !self.dwell.is_finite() || self.dwell < 0.0 {
            return Err(CoachMarksError::validation("dwell must be finite and >= 0"));
        }
        if !self.max_duration.is_finite() || self.max_duration < 0.0 {
            return Err(CoachMarksError::validation(
                "max_duration must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Start `overlay` and tick it until it is dismissed or `max_duration`
    /// elapses, calling `on_frame` with a snapshot before every tick and once
    /// at the end.
    pub fn run(
        &self,
        overlay: &mut CoachMarksOverlay,
        mut on_frame: impl FnMut(&OverlayFrame),
    ) -> CoachMarksResult<PlaybackReport> {
        self.validate()?;
        let dt = 1.0 / self.fps;
        let steps = (self.max_duration * self.fps).round() as u64;

        overlay.start();
        let mut report = PlaybackReport {
            frames: 0,
            duration: 0.0,
            advances: 0,
            completed: false,
        };
        let mut settled_at: Option<(usize, f64)> = None;

        for _ in 0..steps {
            if overlay.phase() == OverlayPhase::Dismissed {
                break;
            }
            on_frame(&overlay.frame());
            report.frames += 1;

            overlay.tick(dt);
            let now = overlay.now();

            match (overlay.is_settled(), overlay.current_index()) {
                (true, Some(index)) => match settled_at {
                    Some((settled, since)) if settled == index => {
                        if now - since >= self.dwell - 1e-9 {
                            overlay.advance();
                            report.advances += 1;
                            settled_at = None;
                        }
                    }
                    _ => settled_at = Some((index, now)),
                },
                _ => settled_at = None,
            }
        }

        on_frame(&overlay.frame());
        report.frames += 1;
        report.duration = overlay.now();
        report.completed = overlay.phase() == OverlayPhase::Dismissed;
        tracing::debug!(?report, "playback finished");
        Ok(report)
    }

    /// Every frame of [`Playback::run`], collected.
    pub fn frames(&self, overlay: &mut CoachMarksOverlay) -> CoachMarksResult<Vec<OverlayFrame>> {
        let mut frames = Vec::new();
        self.run(overlay, |f| frames.push(f.clone()))?;
        Ok(frames)
    }

    /// Snapshot at `time` seconds into playback.
    pub fn frame_at(
        &self,
        overlay: &mut CoachMarksOverlay,
        time: f64,
    ) -> CoachMarksResult<OverlayFrame> {
        if !time.is_finite() || time < 0.0 {
            return Err(CoachMarksError::validation("time must be finite and >= 0"));
        }
        let limited = Self {
            max_duration: time.min(self.max_duration),
            ..*self
        };
        let mut last = None;
        limited.run(overlay, |f| last = Some(f.clone()))?;
        last.ok_or_else(|| CoachMarksError::validation("playback produced no frames"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/playback.rs"]
mod tests;
