//! Error type for the intersection core.

use thiserror::Error;

/// Errors raised by the scheduler and its building blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The call was rejected and had no effect.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A dequeue was attempted on an empty lane. The scheduler only dequeues
    /// from lanes it has checked, so this marks a broken invariant.
    #[error("dequeue from an empty lane")]
    EmptyQueue,
}

impl SimError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidArgument(message.into())
    }
}

/// Shorthand result type for the simulation module.
pub type SimResult<T> = Result<T, SimError>;
