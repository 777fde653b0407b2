use thiserror::Error;

/// Errors raised by the force layout engine.
///
/// The engine never retries: an error means no coordinates were produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl LayoutError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
