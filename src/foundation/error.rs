/// Convenience result type used across the renderer.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error taxonomy surfaced by renderers, surfaces and bitmaps.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// A device metric override was not a finite, strictly positive value.
    #[error("invalid metric: {0}")]
    InvalidMetric(String),

    /// The boundable context stack was queried or popped while empty.
    ///
    /// This points at a push/pop mismatch in the traversal driving the renderer.
    #[error("empty boundable context: {0}")]
    EmptyContext(String),

    /// Failure reported by the drawing surface (bad image, unsupported unit, disposed handle).
    #[error("backend failure: {0}")]
    Backend(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    /// Build a [`RenderError::InvalidMetric`] value.
    pub fn invalid_metric(msg: impl Into<String>) -> Self {
        Self::InvalidMetric(msg.into())
    }

    /// Build a [`RenderError::EmptyContext`] value.
    pub fn empty_context(msg: impl Into<String>) -> Self {
        Self::EmptyContext(msg.into())
    }

    /// Build a [`RenderError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
