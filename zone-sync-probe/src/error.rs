//! Unified error type definition

use thiserror::Error;

/// Errors raised while orchestrating a zone sync check.
///
/// Data-driven conditions (a nameserver not answering, records that disagree,
/// too few nameservers) are never errors; they are reported as a
/// [`CheckOutcome`](crate::CheckOutcome). A `ProbeError` means the check
/// could not determine the zone's health at all.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Invalid input such as a malformed domain name
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Nameserver discovery failed for a reason other than "no records"
    #[error("Network error: {0}")]
    NetworkError(String),

    /// SOA answers handed to the evaluator do not line up with the nameservers
    #[error("Invalid answer set: {0}")]
    InvalidAnswerSet(String),
}

impl ProbeError {
    /// Whether the error stems from user input rather than a fault.
    ///
    /// Log at `warn` when `true`, at `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::NetworkError(_) | Self::InvalidAnswerSet(_) => false,
        }
    }
}

/// Probe Result type alias
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
