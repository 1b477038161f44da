//! Journal error types for validation and state errors.

use chrono::NaiveDate;
use ledgerkit_shared::ErrorKind;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    // ========== Validation Errors ==========
    /// Entry must have at least one line.
    #[error("Entry must have at least one line")]
    EmptyLines,

    /// Entry is not balanced (debits != credits).
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amounts are both zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount is negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Line carries both a debit and a credit amount.
    #[error("Line must carry either a debit or a credit, not both")]
    InvalidLine,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(Uuid),

    /// Group accounts do not accept direct posting.
    #[error("Account {0} is a group account and does not accept posting")]
    GroupAccountPosting(Uuid),

    // ========== Cost Center Errors ==========
    /// Cost center not found.
    #[error("Cost center not found: {0}")]
    CostCenterNotFound(Uuid),

    /// Cost center is inactive.
    #[error("Cost center {0} is inactive")]
    CostCenterInactive(Uuid),

    // ========== Period Errors ==========
    /// No period covers the entry date.
    #[error("No period found for date {0}")]
    NoPeriodForDate(NaiveDate),

    /// The period covering the entry date is not open.
    #[error("Period covering {0} is not open")]
    PeriodNotOpen(NaiveDate),

    // ========== State Errors ==========
    /// Entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Only posted entries can be reversed.
    #[error("Journal entry {0} is not posted")]
    NotPosted(Uuid),

    /// Entry has already been reversed.
    #[error("Journal entry {0} has already been reversed")]
    AlreadyReversed(Uuid),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JournalError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLines => "EMPTY_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InvalidLine => "INVALID_LINE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::GroupAccountPosting(_) => "GROUP_ACCOUNT_POSTING",
            Self::CostCenterNotFound(_) => "COST_CENTER_NOT_FOUND",
            Self::CostCenterInactive(_) => "COST_CENTER_INACTIVE",
            Self::NoPeriodForDate(_) => "NO_PERIOD_FOR_DATE",
            Self::PeriodNotOpen(_) => "PERIOD_NOT_OPEN",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::NotPosted(_) => "NOT_POSTED",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the failure classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyLines
            | Self::UnbalancedEntry { .. }
            | Self::ZeroAmount
            | Self::NegativeAmount
            | Self::InvalidLine => ErrorKind::ValidationFailure,

            Self::AccountInactive(_)
            | Self::GroupAccountPosting(_)
            | Self::CostCenterInactive(_)
            | Self::PeriodNotOpen(_)
            | Self::NotPosted(_)
            | Self::AlreadyReversed(_) => ErrorKind::StateConflict,

            Self::AccountNotFound(_)
            | Self::CostCenterNotFound(_)
            | Self::NoPeriodForDate(_)
            | Self::EntryNotFound(_) => ErrorKind::ReferenceFailure,

            Self::Database(_) | Self::Internal(_) => ErrorKind::Infrastructure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            JournalError::UnbalancedEntry {
                debit: Decimal::new(100, 2),
                credit: Decimal::new(50, 2),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(JournalError::ZeroAmount.error_code(), "ZERO_AMOUNT");
        assert_eq!(
            JournalError::GroupAccountPosting(Uuid::nil()).error_code(),
            "GROUP_ACCOUNT_POSTING"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            JournalError::ZeroAmount.kind(),
            ErrorKind::ValidationFailure
        );
        assert_eq!(
            JournalError::AlreadyReversed(Uuid::nil()).kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            JournalError::AccountNotFound(Uuid::nil()).kind(),
            ErrorKind::ReferenceFailure
        );
        assert_eq!(
            JournalError::Database(String::new()).kind(),
            ErrorKind::Infrastructure
        );
    }

    #[test]
    fn test_error_display() {
        let err = JournalError::UnbalancedEntry {
            debit: Decimal::new(10000, 2),
            credit: Decimal::new(5000, 2),
        };
        assert_eq!(
            err.to_string(),
            "Entry is not balanced. Debit: 100.00, Credit: 50.00"
        );

        let date = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        assert_eq!(
            JournalError::PeriodNotOpen(date).to_string(),
            "Period covering 2026-04-15 is not open"
        );
    }
}
