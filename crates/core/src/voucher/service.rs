//! Voucher lifecycle rules.
//!
//! Stateless service producing [`VoucherAction`]s. Persistence (and the
//! journal posting performed on approval with auto-post) lives in the
//! database layer; this module only decides whether a transition is legal
//! and what fields the transition writes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::approval::{ApprovalLevel, validate_approver};
use super::error::VoucherError;
use super::types::{AllocationInput, VoucherAction, VoucherStatus};

/// Stateless voucher workflow service.
pub struct VoucherService;

impl VoucherService {
    /// Returns whether a status transition is allowed.
    #[must_use]
    pub const fn is_valid_transition(from: VoucherStatus, to: VoucherStatus) -> bool {
        matches!(
            (from, to),
            (VoucherStatus::Draft, VoucherStatus::PendingApproval)
                | (
                    VoucherStatus::PendingApproval,
                    VoucherStatus::Approved | VoucherStatus::Rejected
                )
                | (VoucherStatus::Approved, VoucherStatus::Posted)
                | (
                    VoucherStatus::Draft | VoucherStatus::Rejected,
                    VoucherStatus::Cancelled
                )
        )
    }

    fn require_transition(
        from: VoucherStatus,
        to: VoucherStatus,
    ) -> Result<(), VoucherError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(VoucherError::InvalidTransition { from, to })
        }
    }

    /// Submits a draft voucher for approval.
    ///
    /// The approval level is derived from the voucher total at submission
    /// time. Only drafts are editable, so the total cannot change while the
    /// voucher is pending.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::InvalidTransition`] when the voucher is not a
    /// draft.
    pub fn submit(
        status: VoucherStatus,
        total_amount: Decimal,
        submitted_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VoucherAction, VoucherError> {
        Self::require_transition(status, VoucherStatus::PendingApproval)?;
        Ok(VoucherAction::Submit {
            new_status: VoucherStatus::PendingApproval,
            approval_level: ApprovalLevel::for_amount(total_amount),
            submitted_by,
            submitted_at: now,
        })
    }

    /// Approves a pending voucher.
    ///
    /// With `auto_post` set the approval also posts the voucher, so the
    /// resulting status is `Posted` and the caller must create the journal
    /// entry in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::InvalidTransition`] when the voucher is not
    /// pending approval, or [`VoucherError::MakerChecker`] when the approver
    /// created the voucher.
    pub fn approve(
        status: VoucherStatus,
        approved_by: Uuid,
        created_by: Uuid,
        auto_post: bool,
        now: DateTime<Utc>,
    ) -> Result<VoucherAction, VoucherError> {
        Self::require_transition(status, VoucherStatus::Approved)?;
        validate_approver(approved_by, created_by)?;
        Ok(VoucherAction::Approve {
            new_status: if auto_post {
                VoucherStatus::Posted
            } else {
                VoucherStatus::Approved
            },
            approved_by,
            approved_at: now,
            auto_post,
        })
    }

    /// Rejects a pending voucher with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::InvalidTransition`] when the voucher is not
    /// pending approval, [`VoucherError::MakerChecker`] when the reviewer
    /// created the voucher, or [`VoucherError::RejectionReasonRequired`] when
    /// the reason is blank.
    pub fn reject(
        status: VoucherStatus,
        rejected_by: Uuid,
        created_by: Uuid,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<VoucherAction, VoucherError> {
        Self::require_transition(status, VoucherStatus::Rejected)?;
        validate_approver(rejected_by, created_by)?;
        if reason.trim().is_empty() {
            return Err(VoucherError::RejectionReasonRequired);
        }
        Ok(VoucherAction::Reject {
            new_status: VoucherStatus::Rejected,
            rejected_by,
            rejected_at: now,
            rejection_reason: reason.trim().to_string(),
        })
    }

    /// Posts an approved voucher to the journal.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::InvalidTransition`] when the voucher has not
    /// been approved.
    pub fn post(
        status: VoucherStatus,
        posted_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VoucherAction, VoucherError> {
        Self::require_transition(status, VoucherStatus::Posted)?;
        Ok(VoucherAction::Post {
            new_status: VoucherStatus::Posted,
            posted_by,
            posted_at: now,
        })
    }

    /// Cancels a draft or rejected voucher with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::InvalidTransition`] when the voucher has
    /// already entered the approval pipeline, or
    /// [`VoucherError::CancelReasonRequired`] when the reason is blank.
    pub fn cancel(
        status: VoucherStatus,
        cancelled_by: Uuid,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<VoucherAction, VoucherError> {
        Self::require_transition(status, VoucherStatus::Cancelled)?;
        if reason.trim().is_empty() {
            return Err(VoucherError::CancelReasonRequired);
        }
        Ok(VoucherAction::Cancel {
            new_status: VoucherStatus::Cancelled,
            cancelled_by,
            cancelled_at: now,
            cancel_reason: reason.trim().to_string(),
        })
    }

    /// Validates that a posted voucher can be reversed.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::NotPosted`] for any status other than
    /// `Posted`, or [`VoucherError::AlreadyReversed`] when a reversal already
    /// exists.
    pub fn validate_can_reverse(
        voucher_id: Uuid,
        status: VoucherStatus,
        is_reversed: bool,
    ) -> Result<(), VoucherError> {
        if status != VoucherStatus::Posted {
            return Err(VoucherError::NotPosted(voucher_id));
        }
        if is_reversed {
            return Err(VoucherError::AlreadyReversed(voucher_id));
        }
        Ok(())
    }

    /// Validates invoice allocations attached to a settlement voucher.
    ///
    /// Each allocation must carry a positive amount no greater than the
    /// outstanding balance of the invoice it settles.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::NonPositiveAllocation`] or
    /// [`VoucherError::OverAllocation`] for the first offending allocation.
    pub fn validate_allocations(allocations: &[AllocationInput]) -> Result<(), VoucherError> {
        for alloc in allocations {
            if alloc.amount <= Decimal::ZERO {
                return Err(VoucherError::NonPositiveAllocation(alloc.amount));
            }
            if alloc.amount > alloc.outstanding {
                return Err(VoucherError::OverAllocation {
                    invoice_ref: alloc.invoice_ref.clone(),
                    amount: alloc.amount,
                    outstanding: alloc.outstanding,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_submit_from_draft() {
        let user = Uuid::new_v4();
        let action = VoucherService::submit(VoucherStatus::Draft, dec!(75000), user, now())
            .unwrap();
        match action {
            VoucherAction::Submit {
                new_status,
                approval_level,
                submitted_by,
                ..
            } => {
                assert_eq!(new_status, VoucherStatus::PendingApproval);
                assert_eq!(approval_level, ApprovalLevel::Level2);
                assert_eq!(submitted_by, user);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_submit_rejected_for_non_draft() {
        for status in [
            VoucherStatus::PendingApproval,
            VoucherStatus::Approved,
            VoucherStatus::Rejected,
            VoucherStatus::Posted,
            VoucherStatus::Cancelled,
        ] {
            let result = VoucherService::submit(status, dec!(100), Uuid::new_v4(), now());
            assert!(matches!(
                result,
                Err(VoucherError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_approve_without_auto_post() {
        let creator = Uuid::new_v4();
        let approver = Uuid::new_v4();
        let action = VoucherService::approve(
            VoucherStatus::PendingApproval,
            approver,
            creator,
            false,
            now(),
        )
        .unwrap();
        assert_eq!(action.new_status(), VoucherStatus::Approved);
    }

    #[test]
    fn test_approve_with_auto_post_goes_straight_to_posted() {
        let creator = Uuid::new_v4();
        let approver = Uuid::new_v4();
        let action = VoucherService::approve(
            VoucherStatus::PendingApproval,
            approver,
            creator,
            true,
            now(),
        )
        .unwrap();
        assert_eq!(action.new_status(), VoucherStatus::Posted);
        assert!(matches!(
            action,
            VoucherAction::Approve { auto_post: true, .. }
        ));
    }

    #[test]
    fn test_approve_enforces_maker_checker() {
        let creator = Uuid::new_v4();
        let result = VoucherService::approve(
            VoucherStatus::PendingApproval,
            creator,
            creator,
            false,
            now(),
        );
        assert!(matches!(result, Err(VoucherError::MakerChecker)));
    }

    #[test]
    fn test_reject_requires_reason() {
        let creator = Uuid::new_v4();
        let reviewer = Uuid::new_v4();

        let result = VoucherService::reject(
            VoucherStatus::PendingApproval,
            reviewer,
            creator,
            "   ",
            now(),
        );
        assert!(matches!(result, Err(VoucherError::RejectionReasonRequired)));

        let action = VoucherService::reject(
            VoucherStatus::PendingApproval,
            reviewer,
            creator,
            "  missing supporting documents  ",
            now(),
        )
        .unwrap();
        match action {
            VoucherAction::Reject {
                rejection_reason, ..
            } => assert_eq!(rejection_reason, "missing supporting documents"),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_reject_enforces_maker_checker() {
        let creator = Uuid::new_v4();
        let result = VoucherService::reject(
            VoucherStatus::PendingApproval,
            creator,
            creator,
            "reason",
            now(),
        );
        assert!(matches!(result, Err(VoucherError::MakerChecker)));
    }

    #[test]
    fn test_post_requires_approved() {
        let user = Uuid::new_v4();
        assert!(VoucherService::post(VoucherStatus::Approved, user, now()).is_ok());
        assert!(matches!(
            VoucherService::post(VoucherStatus::Draft, user, now()),
            Err(VoucherError::InvalidTransition { .. })
        ));
        assert!(matches!(
            VoucherService::post(VoucherStatus::PendingApproval, user, now()),
            Err(VoucherError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_from_draft_and_rejected_only() {
        let user = Uuid::new_v4();
        assert!(VoucherService::cancel(VoucherStatus::Draft, user, "duplicate", now()).is_ok());
        assert!(
            VoucherService::cancel(VoucherStatus::Rejected, user, "abandoned", now()).is_ok()
        );
        for status in [
            VoucherStatus::PendingApproval,
            VoucherStatus::Approved,
            VoucherStatus::Posted,
            VoucherStatus::Cancelled,
        ] {
            assert!(matches!(
                VoucherService::cancel(status, user, "reason", now()),
                Err(VoucherError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_cancel_requires_reason() {
        let result = VoucherService::cancel(VoucherStatus::Draft, Uuid::new_v4(), "", now());
        assert!(matches!(result, Err(VoucherError::CancelReasonRequired)));
    }

    #[test]
    fn test_validate_can_reverse() {
        let id = Uuid::new_v4();
        assert!(VoucherService::validate_can_reverse(id, VoucherStatus::Posted, false).is_ok());
        assert!(matches!(
            VoucherService::validate_can_reverse(id, VoucherStatus::Posted, true),
            Err(VoucherError::AlreadyReversed(_))
        ));
        assert!(matches!(
            VoucherService::validate_can_reverse(id, VoucherStatus::Approved, false),
            Err(VoucherError::NotPosted(_))
        ));
    }

    #[test]
    fn test_validate_allocations() {
        let good = AllocationInput {
            invoice_ref: "SV-20260301-0007".to_string(),
            amount: dec!(400),
            outstanding: dec!(1000),
        };
        assert!(VoucherService::validate_allocations(std::slice::from_ref(&good)).is_ok());

        let zero = AllocationInput {
            amount: Decimal::ZERO,
            ..good.clone()
        };
        assert!(matches!(
            VoucherService::validate_allocations(&[zero]),
            Err(VoucherError::NonPositiveAllocation(_))
        ));

        let over = AllocationInput {
            amount: dec!(1500),
            ..good
        };
        assert!(matches!(
            VoucherService::validate_allocations(&[over]),
            Err(VoucherError::OverAllocation { .. })
        ));
    }
}
