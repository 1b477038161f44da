//! Voucher domain types for lifecycle management.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::approval::ApprovalLevel;

/// Business classification of a voucher.
///
/// The type determines the document number prefix and how the voucher is
/// grouped in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// Outgoing payment.
    Payment,
    /// Incoming receipt.
    Receipt,
    /// Transfer between cash/bank accounts.
    Contra,
    /// General journal voucher.
    Journal,
    /// Reverse-charge-mechanism entry.
    Rcm,
    /// Sales invoice.
    Sales,
    /// Purchase invoice.
    Purchase,
    /// Credit note against a sales invoice.
    CreditNote,
    /// Debit note against a purchase invoice.
    DebitNote,
}

impl VoucherType {
    /// Returns the document number prefix for this type.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Payment => "PV",
            Self::Receipt => "RV",
            Self::Contra => "CV",
            Self::Journal => "JV",
            Self::Rcm => "RCM",
            Self::Sales => "SV",
            Self::Purchase => "PUV",
            Self::CreditNote => "CN",
            Self::DebitNote => "DN",
        }
    }
}

/// Voucher status in the approval workflow.
///
/// Valid transitions:
/// - Draft → PendingApproval (submit)
/// - PendingApproval → Approved (approve)
/// - PendingApproval → Rejected (reject)
/// - Approved → Posted (post)
/// - Draft | Rejected → Cancelled (cancel)
///
/// Posted vouchers never change status; a reversal creates a new voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    /// Voucher is being drafted and can be modified.
    Draft,
    /// Voucher has been submitted for approval.
    PendingApproval,
    /// Voucher has been approved and is ready for posting.
    Approved,
    /// Voucher was rejected by an approver.
    Rejected,
    /// Voucher has been posted to the ledger (immutable).
    Posted,
    /// Voucher was cancelled before posting (terminal).
    Cancelled,
}

impl VoucherStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "posted" => Some(Self::Posted),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the voucher's lines can be modified.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the voucher can never change status again.
    ///
    /// Posted is terminal for status purposes; reversal creates a new
    /// voucher and only flags the original.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Posted | Self::Cancelled)
    }
}

impl fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for allocating a payment or receipt voucher against an invoice.
#[derive(Debug, Clone)]
pub struct AllocationInput {
    /// Reference to the invoice being settled.
    pub invoice_ref: String,
    /// Amount allocated against the invoice.
    pub amount: Decimal,
    /// Outstanding amount on the invoice before this allocation.
    pub outstanding: Decimal,
}

/// Workflow action representing a state transition with audit data.
#[derive(Debug, Clone)]
pub enum VoucherAction {
    /// Submit a draft voucher for approval.
    Submit {
        /// The new status after submission.
        new_status: VoucherStatus,
        /// Approval level derived from the voucher total.
        approval_level: ApprovalLevel,
        /// The user who submitted the voucher.
        submitted_by: Uuid,
        /// When the voucher was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a pending voucher.
    Approve {
        /// The new status (Approved, or Posted when auto-posting).
        new_status: VoucherStatus,
        /// The user who approved the voucher.
        approved_by: Uuid,
        /// When the voucher was approved.
        approved_at: DateTime<Utc>,
        /// Whether posting should happen in the same operation.
        auto_post: bool,
    },
    /// Reject a pending voucher.
    Reject {
        /// The new status after rejection.
        new_status: VoucherStatus,
        /// The user who rejected the voucher.
        rejected_by: Uuid,
        /// When the voucher was rejected.
        rejected_at: DateTime<Utc>,
        /// The reason for rejection.
        rejection_reason: String,
    },
    /// Post an approved voucher to the ledger.
    Post {
        /// The new status after posting.
        new_status: VoucherStatus,
        /// The user who posted the voucher.
        posted_by: Uuid,
        /// When the voucher was posted.
        posted_at: DateTime<Utc>,
    },
    /// Cancel a draft or rejected voucher.
    Cancel {
        /// The new status after cancellation.
        new_status: VoucherStatus,
        /// The user who cancelled the voucher.
        cancelled_by: Uuid,
        /// When the voucher was cancelled.
        cancelled_at: DateTime<Utc>,
        /// The reason for cancellation.
        cancel_reason: String,
    },
}

impl VoucherAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> VoucherStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Post { new_status, .. }
            | Self::Cancel { new_status, .. } => *new_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_prefixes() {
        assert_eq!(VoucherType::Payment.prefix(), "PV");
        assert_eq!(VoucherType::Receipt.prefix(), "RV");
        assert_eq!(VoucherType::Contra.prefix(), "CV");
        assert_eq!(VoucherType::Journal.prefix(), "JV");
        assert_eq!(VoucherType::Rcm.prefix(), "RCM");
        assert_eq!(VoucherType::Sales.prefix(), "SV");
        assert_eq!(VoucherType::Purchase.prefix(), "PUV");
        assert_eq!(VoucherType::CreditNote.prefix(), "CN");
        assert_eq!(VoucherType::DebitNote.prefix(), "DN");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            VoucherStatus::Draft,
            VoucherStatus::PendingApproval,
            VoucherStatus::Approved,
            VoucherStatus::Rejected,
            VoucherStatus::Posted,
            VoucherStatus::Cancelled,
        ] {
            assert_eq!(VoucherStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VoucherStatus::parse("invalid"), None);
    }

    #[test]
    fn test_status_editable() {
        assert!(VoucherStatus::Draft.is_editable());
        assert!(!VoucherStatus::PendingApproval.is_editable());
        assert!(!VoucherStatus::Approved.is_editable());
        assert!(!VoucherStatus::Rejected.is_editable());
        assert!(!VoucherStatus::Posted.is_editable());
        assert!(!VoucherStatus::Cancelled.is_editable());
    }

    #[test]
    fn test_status_terminal() {
        assert!(VoucherStatus::Posted.is_terminal());
        assert!(VoucherStatus::Cancelled.is_terminal());
        assert!(!VoucherStatus::Draft.is_terminal());
        assert!(!VoucherStatus::Rejected.is_terminal());
    }
}
