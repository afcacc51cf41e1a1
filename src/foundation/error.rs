/// Convenience result type used across bloom.
pub type BloomResult<T> = Result<T, BloomError>;

/// Top-level error taxonomy.
///
/// The animation core itself cannot fail once constructed; every variant here is a
/// startup misconfiguration or a failure of the presentation surface around it.
#[derive(thiserror::Error, Debug)]
pub enum BloomError {
    /// Invalid configuration detected before playback starts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a scene into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while handing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BloomError {
    /// Build a [`BloomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BloomError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BloomError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
