//! Property-based tests for JournalService.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use ledgerkit_shared::types::AccountId;

use super::error::JournalError;
use super::service::{AccountInfo, JournalService};
use super::types::{EntrySource, JournalLineInput, PostEntryInput};
use crate::coa::AccountType;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_input(lines: Vec<JournalLineInput>) -> PostEntryInput {
    PostEntryInput {
        entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        narration: "Test entry".to_string(),
        source: EntrySource::Manual,
        source_ref: None,
        lines,
        created_by: Uuid::new_v4(),
    }
}

fn ok_account(id: Uuid) -> Result<AccountInfo, JournalError> {
    Ok(AccountInfo {
        id: AccountId::from_uuid(id),
        account_type: AccountType::Asset,
        is_active: true,
        is_group: false,
    })
}

fn ok_cost_center(_id: Uuid) -> Result<(), JournalError> {
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property: balanced entries are accepted**
    ///
    /// *For any* entry whose debit lines sum to its credit lines, validation
    /// SHALL succeed with balanced totals.
    #[test]
    fn prop_balanced_entry_accepted(amounts in prop::collection::vec(positive_amount(), 1..8)) {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<JournalLineInput> = amounts
            .iter()
            .map(|&a| JournalLineInput::debit(Uuid::new_v4(), a))
            .collect();
        lines.push(JournalLineInput::credit(Uuid::new_v4(), total));

        let input = make_input(lines);
        let result = JournalService::validate(&input, ok_account, ok_cost_center);

        prop_assert!(result.is_ok());
        let totals = result.unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.total_debit, total);
    }

    /// **Property: unbalanced entries are rejected**
    ///
    /// *For any* entry where total debits differ from total credits,
    /// validation SHALL fail with UnbalancedEntry.
    #[test]
    fn prop_unbalanced_entry_rejected(
        amount in positive_amount(),
        skew in positive_amount(),
    ) {
        let lines = vec![
            JournalLineInput::debit(Uuid::new_v4(), amount),
            JournalLineInput::credit(Uuid::new_v4(), amount + skew),
        ];
        let input = make_input(lines);

        let result = JournalService::validate(&input, ok_account, ok_cost_center);
        prop_assert!(
            matches!(result, Err(JournalError::UnbalancedEntry { .. })),
            "expected UnbalancedEntry, got {result:?}"
        );
    }

    /// **Property: a line with both sides set is always rejected**
    #[test]
    fn prop_both_sides_rejected(debit in positive_amount(), credit in positive_amount()) {
        let line = JournalLineInput {
            account_id: Uuid::new_v4(),
            debit,
            credit,
            narration: None,
            cost_center_id: None,
        };
        prop_assert!(matches!(
            JournalService::validate_line(&line),
            Err(JournalError::InvalidLine)
        ));
    }

    /// **Property: negative amounts are always rejected**
    #[test]
    fn prop_negative_amount_rejected(amount in positive_amount()) {
        let line = JournalLineInput::debit(Uuid::new_v4(), -amount);
        prop_assert!(matches!(
            JournalService::validate_line(&line),
            Err(JournalError::NegativeAmount)
        ));
    }

    /// **Property: group accounts are always rejected**
    ///
    /// *For any* balanced entry, posting to a group account SHALL fail
    /// regardless of amounts.
    #[test]
    fn prop_group_account_always_rejected(amount in positive_amount()) {
        let lines = vec![
            JournalLineInput::debit(Uuid::new_v4(), amount),
            JournalLineInput::credit(Uuid::new_v4(), amount),
        ];
        let input = make_input(lines);

        let grouped = |id: Uuid| -> Result<AccountInfo, JournalError> {
            Ok(AccountInfo {
                id: AccountId::from_uuid(id),
                account_type: AccountType::Asset,
                is_active: true,
                is_group: true,
            })
        };

        let result = JournalService::validate(&input, grouped, ok_cost_center);
        prop_assert!(matches!(result, Err(JournalError::GroupAccountPosting(_))));
    }
}
