/// Convenience result type used across the crate.
pub type EmojiResult<T> = Result<T, EmojiError>;

/// Top-level error taxonomy used by the library APIs.
#[derive(thiserror::Error, Debug)]
pub enum EmojiError {
    /// Invalid user-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while enumerating, reading or decoding asset variants.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while rasterizing or compositing layers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while producing or persisting an export.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmojiError {
    /// Build an [`EmojiError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`EmojiError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build an [`EmojiError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`EmojiError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build an [`EmojiError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
