/// Crate-wide result alias.
pub type SatmarkResult<T> = Result<T, SatmarkError>;

/// Errors surfaced by atlas generation, playback, and marker management.
#[derive(thiserror::Error, Debug)]
pub enum SatmarkError {
    /// The animation configuration is invalid or internally inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// A runtime argument violated a precondition (e.g. negative elapsed time).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Rasterization or image output failed.
    #[error("render error: {0}")]
    Render(String),

    /// A JSON configuration could not be read or parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SatmarkError {
    /// Build a [`SatmarkError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SatmarkError::InvalidArgument`].
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`SatmarkError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SatmarkError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
