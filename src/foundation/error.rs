/// Result alias used across the crate.
pub type StoryreelResult<T> = Result<T, StoryreelError>;

/// Error taxonomy for loading, evaluating, rendering and encoding a storyboard video.
#[derive(thiserror::Error, Debug)]
pub enum StoryreelError {
    /// Input props or settings are malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame could not be evaluated into a display list.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// The raster backend failed.
    #[error("render error: {0}")]
    Render(String),

    /// The output sink failed (ffmpeg spawn, pipe write, exit status).
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryreelError {
    /// Build a [`StoryreelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryreelError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`StoryreelError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StoryreelError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StoryreelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StoryreelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
