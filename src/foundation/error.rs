/// Convenience result type used across stagechart.
pub type ChartResult<T> = Result<T, ChartError>;

/// Top-level error taxonomy used by the chart APIs.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// The input document could not be read as a list of note events.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Layout or tempo configuration that cannot be rendered.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A render surface could not be created or addressed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChartError {
    /// Build a [`ChartError::MalformedInput`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Build a [`ChartError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ChartError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ChartError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
