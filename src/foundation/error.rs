/// Convenience result type used across Transformime.
pub type TransformimeResult<T> = Result<T, TransformimeError>;

/// Top-level error taxonomy used by registry and transformer APIs.
#[derive(thiserror::Error, Debug)]
pub enum TransformimeError {
    /// Invalid registry setup: a mimetype claimed twice, an empty claim set,
    /// or a malformed precedence order.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A payload that is structurally invalid for its declared mimetype.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid user-provided documents (bundles, output objects, config files).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransformimeError {
    /// Build a [`TransformimeError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`TransformimeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TransformimeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
