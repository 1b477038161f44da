//! Report error types.

use chrono::NaiveDate;
use ledgerkit_shared::ErrorKind;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Period not found.
    #[error("Period not found: {0}")]
    PeriodNotFound(Uuid),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ReportError {
    /// Returns the failure classification for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccountNotFound(_) | Self::PeriodNotFound(_) => ErrorKind::ReferenceFailure,
            Self::InvalidDateRange { .. } => ErrorKind::ValidationFailure,
            Self::Database(_) => ErrorKind::Infrastructure,
        }
    }
}
