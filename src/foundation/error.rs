/// Convenience result type used across kineo.
pub type KineoResult<T> = Result<T, KineoError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degenerate animation data (empty keyframes, out-of-range time, unknown layer kinds) never
/// produces an error; only the fallible boundaries around the engine do.
#[derive(thiserror::Error, Debug)]
pub enum KineoError {
    /// Invalid settings, template, or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while executing a frame plan on a backend.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while tiling or encoding exported frames.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KineoError {
    /// Build a [`KineoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KineoError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`KineoError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`KineoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
