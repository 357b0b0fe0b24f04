/// Result alias used across the crate.
pub type CoachMarksResult<T> = Result<T, CoachMarksError>;

/// Error type for descriptor, configuration, tour-file and rendering failures.
///
/// Sequencing itself never fails: an empty list, running off the end of the
/// sequence and redundant teardown are all normal control flow.
#[derive(thiserror::Error, Debug)]
pub enum CoachMarksError {
    /// A descriptor, bounds rectangle or config value violated a precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tour or config document could not be decoded.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The reference rasterizer could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoachMarksError {
    /// Build a [`CoachMarksError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CoachMarksError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for CoachMarksError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
