//! Property-based tests for the voucher workflow.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::VoucherError;
use super::service::VoucherService;
use super::types::{VoucherAction, VoucherStatus};

const ALL_STATUSES: [VoucherStatus; 6] = [
    VoucherStatus::Draft,
    VoucherStatus::PendingApproval,
    VoucherStatus::Approved,
    VoucherStatus::Rejected,
    VoucherStatus::Posted,
    VoucherStatus::Cancelled,
];

fn any_status() -> impl Strategy<Value = VoucherStatus> {
    prop::sample::select(ALL_STATUSES.as_slice())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property: a successful action always lands on a status reachable
    /// from the starting status.**
    #[test]
    fn prop_actions_respect_transition_table(
        status in any_status(),
        amount in 1i64..10_000_000,
    ) {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let now = Utc::now();
        let total = Decimal::from(amount);

        let attempts: Vec<Result<VoucherAction, VoucherError>> = vec![
            VoucherService::submit(status, total, user, now),
            VoucherService::approve(status, other, user, false, now),
            VoucherService::reject(status, other, user, "reason", now),
            VoucherService::post(status, user, now),
            VoucherService::cancel(status, user, "reason", now),
        ];

        for action in attempts.into_iter().flatten() {
            prop_assert!(VoucherService::is_valid_transition(status, action.new_status()));
        }
    }

    /// **Property: terminal statuses admit no action at all.**
    #[test]
    fn prop_terminal_statuses_are_frozen(amount in 1i64..10_000_000) {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let now = Utc::now();
        let total = Decimal::from(amount);

        for status in [VoucherStatus::Posted, VoucherStatus::Cancelled] {
            prop_assert!(VoucherService::submit(status, total, user, now).is_err());
            prop_assert!(VoucherService::approve(status, other, user, false, now).is_err());
            prop_assert!(VoucherService::reject(status, other, user, "r", now).is_err());
            prop_assert!(VoucherService::post(status, user, now).is_err());
            prop_assert!(VoucherService::cancel(status, user, "r", now).is_err());
        }
    }

    /// **Property: the creator can never approve or reject their own
    /// voucher, regardless of amount.**
    #[test]
    fn prop_maker_checker_holds_for_all_amounts(amount in 1i64..100_000_000) {
        let creator = Uuid::new_v4();
        let now = Utc::now();
        let _ = amount;

        let approve = VoucherService::approve(
            VoucherStatus::PendingApproval,
            creator,
            creator,
            false,
            now,
        );
        prop_assert!(matches!(approve, Err(VoucherError::MakerChecker)));

        let reject = VoucherService::reject(
            VoucherStatus::PendingApproval,
            creator,
            creator,
            "reason",
            now,
        );
        prop_assert!(matches!(reject, Err(VoucherError::MakerChecker)));
    }
}
