//! Voucher error types for lifecycle management.

use ledgerkit_shared::ErrorKind;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::VoucherStatus;
use crate::journal::JournalError;

/// Errors that can occur during voucher operations.
#[derive(Debug, Error)]
pub enum VoucherError {
    // ========== State Errors ==========
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: VoucherStatus,
        /// The attempted target status.
        to: VoucherStatus,
    },

    /// Only draft vouchers can be modified.
    #[error("Voucher in status {0} cannot be modified")]
    NotEditable(VoucherStatus),

    /// Voucher has already been reversed.
    #[error("Voucher {0} has already been reversed")]
    AlreadyReversed(Uuid),

    /// Only posted vouchers can be reversed.
    #[error("Voucher {0} is not posted")]
    NotPosted(Uuid),

    // ========== Approval Errors ==========
    /// Approver cannot be the voucher's creator.
    #[error("Approver cannot be the creator of the voucher")]
    MakerChecker,

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Cancellation reason is required but not provided.
    #[error("Cancellation reason is required")]
    CancelReasonRequired,

    // ========== Allocation Errors ==========
    /// Allocated amount must be positive.
    #[error("Allocation amount must be positive, got {0}")]
    NonPositiveAllocation(Decimal),

    /// Allocated amount exceeds the invoice's outstanding balance.
    #[error("Allocation {amount} exceeds outstanding {outstanding} on {invoice_ref}")]
    OverAllocation {
        /// Reference to the invoice being settled.
        invoice_ref: String,
        /// The allocated amount.
        amount: Decimal,
        /// The outstanding amount before allocation.
        outstanding: Decimal,
    },

    // ========== Reference Errors ==========
    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    VoucherNotFound(Uuid),

    // ========== Journal Errors ==========
    /// A journal-level failure during validation or posting.
    #[error(transparent)]
    Journal(#[from] JournalError),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl VoucherError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotEditable(_) => "NOT_EDITABLE",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::NotPosted(_) => "NOT_POSTED",
            Self::MakerChecker => "MAKER_CHECKER",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::CancelReasonRequired => "CANCEL_REASON_REQUIRED",
            Self::NonPositiveAllocation(_) => "NON_POSITIVE_ALLOCATION",
            Self::OverAllocation { .. } => "OVER_ALLOCATION",
            Self::VoucherNotFound(_) => "VOUCHER_NOT_FOUND",
            Self::Journal(inner) => inner.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the failure classification for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTransition { .. }
            | Self::NotEditable(_)
            | Self::AlreadyReversed(_)
            | Self::NotPosted(_)
            | Self::MakerChecker => ErrorKind::StateConflict,

            Self::RejectionReasonRequired
            | Self::CancelReasonRequired
            | Self::NonPositiveAllocation(_)
            | Self::OverAllocation { .. } => ErrorKind::ValidationFailure,

            Self::VoucherNotFound(_) => ErrorKind::ReferenceFailure,

            Self::Journal(inner) => inner.kind(),
            Self::Database(_) => ErrorKind::Infrastructure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = VoucherError::InvalidTransition {
            from: VoucherStatus::Draft,
            to: VoucherStatus::Posted,
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("draft"));
        assert!(err.to_string().contains("posted"));

        assert_eq!(VoucherError::MakerChecker.error_code(), "MAKER_CHECKER");
    }

    #[test]
    fn test_journal_error_passthrough() {
        let err = VoucherError::from(JournalError::ZeroAmount);
        assert_eq!(err.error_code(), "ZERO_AMOUNT");
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[test]
    fn test_maker_checker_is_state_conflict() {
        assert_eq!(VoucherError::MakerChecker.kind(), ErrorKind::StateConflict);
    }

    #[test]
    fn test_over_allocation_display() {
        let err = VoucherError::OverAllocation {
            invoice_ref: "SV-20260410-0001".to_string(),
            amount: Decimal::new(15000, 2),
            outstanding: Decimal::new(10000, 2),
        };
        assert_eq!(
            err.to_string(),
            "Allocation 150.00 exceeds outstanding 100.00 on SV-20260410-0001"
        );
    }
}
