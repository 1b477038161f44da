//! Application-wide error classification.

/// Broad failure classification shared by every domain error.
///
/// Domain errors map into one of three kinds:
/// - `ValidationFailure`: the input itself is malformed or breaks an
///   accounting rule (unbalanced lines, zero amounts, bad dates).
/// - `StateConflict`: the input is well-formed but the aggregate is in a
///   state that forbids the operation (posting into a closed period,
///   approving a draft voucher, reversing twice).
/// - `ReferenceFailure`: a referenced record does not exist or is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is invalid regardless of system state.
    ValidationFailure,
    /// Operation is invalid for the current state of the record.
    StateConflict,
    /// A referenced record is missing or inactive.
    ReferenceFailure,
    /// Infrastructure failure (database, configuration).
    Infrastructure,
}

impl ErrorKind {
    /// Returns true when retrying the same call may succeed.
    ///
    /// Validation, state, and reference failures are deterministic; only
    /// infrastructure failures are worth retrying.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Infrastructure)
    }

    /// Returns the stable classification label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailure => "validation_failure",
            Self::StateConflict => "state_conflict",
            Self::ReferenceFailure => "reference_failure",
            Self::Infrastructure => "infrastructure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
