//! Journal service for entry validation.
//!
//! This module provides the core business logic for validating journal
//! entries before they are persisted to the database.

use rust_decimal::Decimal;
use uuid::Uuid;

use ledgerkit_shared::types::AccountId;

use super::error::JournalError;
use super::types::{EntryStatus, EntryTotals, JournalLineInput, PostEntryInput};
use crate::coa::AccountType;

/// Information about an account needed for validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// The account's classification.
    pub account_type: AccountType,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account is a group (non-postable) node.
    pub is_group: bool,
}

/// Journal service for entry validation.
///
/// This service contains pure business logic with no database dependencies.
/// Account and cost center lookups are injected by the caller.
pub struct JournalService;

impl JournalService {
    /// Validate an entry before persisting.
    ///
    /// Steps:
    /// 1. Validates that lines are non-empty
    /// 2. Validates each line's amounts (exactly one positive side)
    /// 3. Validates accounts (exist, active, not groups)
    /// 4. Validates cost centers (exist, active)
    /// 5. Validates the entry balance (total debits == total credits)
    ///
    /// # Errors
    ///
    /// Returns `JournalError` if validation fails.
    pub fn validate<A, C>(
        input: &PostEntryInput,
        account_validator: A,
        cost_center_validator: C,
    ) -> Result<EntryTotals, JournalError>
    where
        A: Fn(Uuid) -> Result<AccountInfo, JournalError>,
        C: Fn(Uuid) -> Result<(), JournalError>,
    {
        if input.lines.is_empty() {
            return Err(JournalError::EmptyLines);
        }

        for line in &input.lines {
            Self::validate_line(line)?;

            let account = account_validator(line.account_id)?;
            if !account.is_active {
                return Err(JournalError::AccountInactive(account.id.into_inner()));
            }
            if account.is_group {
                return Err(JournalError::GroupAccountPosting(account.id.into_inner()));
            }

            if let Some(cost_center_id) = line.cost_center_id {
                cost_center_validator(cost_center_id)?;
            }
        }

        let totals = EntryTotals::from_lines(&input.lines);
        if !totals.is_balanced || totals.total_debit == Decimal::ZERO {
            return Err(JournalError::UnbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }

        Ok(totals)
    }

    /// Validates a single line's amounts.
    ///
    /// Exactly one of debit and credit must be positive; the other zero.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount`, `ZeroAmount`, or `InvalidLine`.
    pub fn validate_line(line: &JournalLineInput) -> Result<(), JournalError> {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(JournalError::NegativeAmount);
        }
        match (line.debit > Decimal::ZERO, line.credit > Decimal::ZERO) {
            (true, true) => Err(JournalError::InvalidLine),
            (false, false) => Err(JournalError::ZeroAmount),
            _ => Ok(()),
        }
    }

    /// Validate that an entry in the given status can be reversed.
    ///
    /// # Errors
    ///
    /// Returns `NotPosted` or `AlreadyReversed`.
    pub fn validate_can_reverse(
        entry_id: Uuid,
        status: EntryStatus,
        is_reversed: bool,
    ) -> Result<(), JournalError> {
        if status == EntryStatus::Reversed || is_reversed {
            return Err(JournalError::AlreadyReversed(entry_id));
        }
        if status != EntryStatus::Posted {
            return Err(JournalError::NotPosted(entry_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::journal::types::EntrySource;

    fn make_account_info(id: Uuid) -> AccountInfo {
        AccountInfo {
            id: AccountId::from_uuid(id),
            account_type: AccountType::Asset,
            is_active: true,
            is_group: false,
        }
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
        Ok(make_account_info(id))
    }

    fn ok_cost_center(_id: Uuid) -> Result<(), JournalError> {
        Ok(())
    }

    #[test]
    fn test_validate_balanced_entry() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let input = make_input(vec![
            JournalLineInput::debit(a, dec!(100)),
            JournalLineInput::credit(b, dec!(100)),
        ]);

        let totals = JournalService::validate(&input, ok_account, ok_cost_center).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.total_debit, dec!(100));
    }

    #[test]
    fn test_validate_unbalanced_entry() {
        let input = make_input(vec![
            JournalLineInput::debit(Uuid::new_v4(), dec!(100)),
            JournalLineInput::credit(Uuid::new_v4(), dec!(50)),
        ]);

        let result = JournalService::validate(&input, ok_account, ok_cost_center);
        assert!(matches!(result, Err(JournalError::UnbalancedEntry { .. })));
    }

    #[test]
    fn test_validate_empty_lines() {
        let input = make_input(vec![]);
        let result = JournalService::validate(&input, ok_account, ok_cost_center);
        assert!(matches!(result, Err(JournalError::EmptyLines)));
    }

    #[test]
    fn test_validate_zero_amount_line() {
        let mut line = JournalLineInput::debit(Uuid::new_v4(), Decimal::ZERO);
        line.credit = Decimal::ZERO;
        let input = make_input(vec![line, JournalLineInput::credit(Uuid::new_v4(), dec!(10))]);

        let result = JournalService::validate(&input, ok_account, ok_cost_center);
        assert!(matches!(result, Err(JournalError::ZeroAmount)));
    }

    #[test]
    fn test_validate_both_sides_set() {
        let line = JournalLineInput {
            account_id: Uuid::new_v4(),
            debit: dec!(10),
            credit: dec!(10),
            narration: None,
            cost_center_id: None,
        };
        let input = make_input(vec![line]);

        let result = JournalService::validate(&input, ok_account, ok_cost_center);
        assert!(matches!(result, Err(JournalError::InvalidLine)));
    }

    #[test]
    fn test_validate_negative_amount() {
        let input = make_input(vec![
            JournalLineInput::debit(Uuid::new_v4(), dec!(-100)),
            JournalLineInput::credit(Uuid::new_v4(), dec!(100)),
        ]);

        let result = JournalService::validate(&input, ok_account, ok_cost_center);
        assert!(matches!(result, Err(JournalError::NegativeAmount)));
    }

    #[test]
    fn test_validate_inactive_account() {
        let input = make_input(vec![
            JournalLineInput::debit(Uuid::new_v4(), dec!(100)),
            JournalLineInput::credit(Uuid::new_v4(), dec!(100)),
        ]);

        let inactive = |id: Uuid| -> Result<AccountInfo, JournalError> {
            Ok(AccountInfo {
                is_active: false,
                ..make_account_info(id)
            })
        };

        let result = JournalService::validate(&input, inactive, ok_cost_center);
        assert!(matches!(result, Err(JournalError::AccountInactive(_))));
    }

    #[test]
    fn test_validate_group_account() {
        let group = Uuid::new_v4();
        let input = make_input(vec![
            JournalLineInput::debit(group, dec!(100)),
            JournalLineInput::credit(Uuid::new_v4(), dec!(100)),
        ]);

        let grouped = |id: Uuid| -> Result<AccountInfo, JournalError> {
            Ok(AccountInfo {
                is_group: true,
                ..make_account_info(id)
            })
        };

        // The error carries the offending account's id back out
        let result = JournalService::validate(&input, grouped, ok_cost_center);
        assert!(matches!(result, Err(JournalError::GroupAccountPosting(id)) if id == group));
    }

    #[test]
    fn test_validate_unknown_cost_center() {
        let mut line = JournalLineInput::debit(Uuid::new_v4(), dec!(100));
        let cc = Uuid::new_v4();
        line.cost_center_id = Some(cc);
        let input = make_input(vec![line, JournalLineInput::credit(Uuid::new_v4(), dec!(100))]);

        let missing =
            |id: Uuid| -> Result<(), JournalError> { Err(JournalError::CostCenterNotFound(id)) };

        let result = JournalService::validate(&input, ok_account, missing);
        assert!(matches!(result, Err(JournalError::CostCenterNotFound(id)) if id == cc));
    }

    #[test]
    fn test_validate_zero_total_rejected() {
        // A degenerate entry with no positive side at all
        let input = make_input(vec![JournalLineInput::debit(Uuid::new_v4(), Decimal::ZERO)]);
        let result = JournalService::validate(&input, ok_account, ok_cost_center);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_can_reverse() {
        let id = Uuid::new_v4();
        assert!(JournalService::validate_can_reverse(id, EntryStatus::Posted, false).is_ok());
        assert!(matches!(
            JournalService::validate_can_reverse(id, EntryStatus::Draft, false),
            Err(JournalError::NotPosted(_))
        ));
        assert!(matches!(
            JournalService::validate_can_reverse(id, EntryStatus::Posted, true),
            Err(JournalError::AlreadyReversed(_))
        ));
        assert!(matches!(
            JournalService::validate_can_reverse(id, EntryStatus::Reversed, true),
            Err(JournalError::AlreadyReversed(_))
        ));
    }
}
