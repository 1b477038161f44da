//! Financial period error types.

use chrono::NaiveDate;
use ledgerkit_shared::ErrorKind;
use thiserror::Error;
use uuid::Uuid;

use super::period::PeriodStatus;

/// Errors that can occur during period operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    // ========== Validation Errors ==========
    /// Period end date is before its start date.
    #[error("Period end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Proposed start date.
        start: NaiveDate,
        /// Proposed end date.
        end: NaiveDate,
    },

    /// Period date range overlaps an existing period.
    #[error("Period dates overlap existing period {0}")]
    OverlappingPeriod(Uuid),

    // ========== State Errors ==========
    /// Requested status transition is not allowed.
    #[error("Cannot transition period from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Current status.
        from: PeriodStatus,
        /// Requested status.
        to: PeriodStatus,
    },

    /// Period cannot be closed while entries in its range are not posted.
    #[error("Cannot close period: {0} entries in range are not posted")]
    UnpostedEntriesInRange(u64),

    /// Period is locked and cannot change.
    #[error("Period is locked")]
    PeriodLocked,

    // ========== Reference Errors ==========
    /// Period not found.
    #[error("Period not found: {0}")]
    PeriodNotFound(Uuid),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl FiscalError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::OverlappingPeriod(_) => "OVERLAPPING_PERIOD",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::UnpostedEntriesInRange(_) => "UNPOSTED_ENTRIES_IN_RANGE",
            Self::PeriodLocked => "PERIOD_LOCKED",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the failure classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDateRange { .. } | Self::OverlappingPeriod(_) => {
                ErrorKind::ValidationFailure
            }
            Self::InvalidStatusTransition { .. }
            | Self::UnpostedEntriesInRange(_)
            | Self::PeriodLocked => ErrorKind::StateConflict,
            Self::PeriodNotFound(_) => ErrorKind::ReferenceFailure,
            Self::Database(_) => ErrorKind::Infrastructure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FiscalError::OverlappingPeriod(Uuid::nil()).error_code(),
            "OVERLAPPING_PERIOD"
        );
        assert_eq!(
            FiscalError::UnpostedEntriesInRange(3).error_code(),
            "UNPOSTED_ENTRIES_IN_RANGE"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            FiscalError::OverlappingPeriod(Uuid::nil()).kind(),
            ErrorKind::ValidationFailure
        );
        assert_eq!(
            FiscalError::InvalidStatusTransition {
                from: PeriodStatus::Locked,
                to: PeriodStatus::Open,
            }
            .kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            FiscalError::PeriodNotFound(Uuid::nil()).kind(),
            ErrorKind::ReferenceFailure
        );
    }

    #[test]
    fn test_unposted_entries_display() {
        assert_eq!(
            FiscalError::UnpostedEntriesInRange(4).to_string(),
            "Cannot close period: 4 entries in range are not posted"
        );
    }
}
