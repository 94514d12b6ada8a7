//! Error types shared by the simulation pipeline.

use thiserror::Error;

/// Failures of the generate → analyze → summarize pipeline.
///
/// Both variants are local precondition violations; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HessError {
    /// A generation parameter is outside its accepted domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name (e.g. `"hours"`).
        name: &'static str,
        /// Human-readable constraint description.
        reason: String,
    },
    /// Summary statistics were requested for a series with no rows.
    #[error("cannot summarize an empty series")]
    EmptySeries,
}

impl HessError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
