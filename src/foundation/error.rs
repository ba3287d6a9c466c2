/// Convenience result type used across morphdeck.
pub type MorphResult<T> = Result<T, MorphError>;

/// Top-level error taxonomy for fallible engine APIs.
///
/// Playback itself is non-fatal: unsupported geometry, contour length mismatches and stale
/// element references are handled in place and logged. Only loading, validation and explicit
/// lookups surface errors.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Invalid user-provided document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry that could not be parsed or evaluated.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Invalid animation descriptors or playback requests.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`MorphError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MorphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
