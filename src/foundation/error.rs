/// Convenience result type used across mountplan.
pub type MountPlanResult<T> = Result<T, MountPlanError>;

/// Top-level error taxonomy used by reduction and snapshot APIs.
#[derive(thiserror::Error, Debug)]
pub enum MountPlanError {
    /// Malformed input layout tree (duplicate pinned ids, duplicate transition ids, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A reduction invariant does not hold.
    #[error("consistency violation: {0}")]
    Consistency(String),

    /// An API was invoked outside of the configuration it is permitted in.
    #[error("usage error: {0}")]
    Usage(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MountPlanError {
    /// Build a [`MountPlanError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MountPlanError::Consistency`] value.
    pub fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }

    /// Build a [`MountPlanError::Usage`] value.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a [`MountPlanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MountPlanError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
