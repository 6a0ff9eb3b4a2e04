/// Convenience result type used across moldura.
pub type MolduraResult<T> = Result<T, MolduraError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// No variant is fatal to the process: every condition is recoverable by the
/// user retrying after fixing the input or letting a pending load finish.
#[derive(thiserror::Error, Debug)]
pub enum MolduraError {
    /// Invalid user-provided configuration or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A payload whose declared media type is not an image family.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Export requested before any base image finished decoding.
    #[error("no base image: {0}")]
    NoBaseImage(String),

    /// Export requested while the selected overlay is not decode-ready.
    #[error("overlay not ready: {0}")]
    OverlayNotReady(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MolduraError {
    /// Build a [`MolduraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MolduraError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`MolduraError::NoBaseImage`] value.
    pub fn no_base_image(msg: impl Into<String>) -> Self {
        Self::NoBaseImage(msg.into())
    }

    /// Build a [`MolduraError::OverlayNotReady`] value.
    pub fn overlay_not_ready(msg: impl Into<String>) -> Self {
        Self::OverlayNotReady(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
