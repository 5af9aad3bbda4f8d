/// Convenience result type used across devreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the scene pipeline.
///
/// Every error is fatal to the current run: a visual script cannot heal itself, so the
/// pipeline stops at the first failing step and reports it.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Axis frame or camera with non-positive length or a degenerate domain.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// A step targets an object that an earlier step already removed.
    #[error("stale reference: step '{step}' targets removed object '{object}'")]
    StaleReference {
        /// Label of the offending step.
        step: String,
        /// Object that was removed before the step ran.
        object: String,
    },

    /// Aggregation over a dataset with `n <= 1` observations.
    #[error("degenerate dataset: {0}")]
    DegenerateDataset(String),

    /// A step uses an object before any step produced it.
    #[error("step order violation: step '{step}' uses '{object}' before it is produced")]
    StepOrderViolation {
        /// Label of the offending step.
        step: String,
        /// Object referenced ahead of its producer.
        object: String,
    },

    /// Invalid script, settings or state-machine usage.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidFrame`] value.
    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame(msg.into())
    }

    /// Build a [`ReelError::StaleReference`] value.
    pub fn stale_reference(step: impl Into<String>, object: impl Into<String>) -> Self {
        Self::StaleReference {
            step: step.into(),
            object: object.into(),
        }
    }

    /// Build a [`ReelError::DegenerateDataset`] value.
    pub fn degenerate_dataset(msg: impl Into<String>) -> Self {
        Self::DegenerateDataset(msg.into())
    }

    /// Build a [`ReelError::StepOrderViolation`] value.
    pub fn step_order(step: impl Into<String>, object: impl Into<String>) -> Self {
        Self::StepOrderViolation {
            step: step.into(),
            object: object.into(),
        }
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
