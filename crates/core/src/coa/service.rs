//! Chart of accounts structural rules.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use ledgerkit_shared::ErrorKind;

use super::types::AccountType;

/// Errors for chart of accounts maintenance.
#[derive(Debug, Error)]
pub enum CoaError {
    /// Account code is already in use.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// Account code is blank.
    #[error("Account code must not be blank")]
    BlankCode,

    /// Parent account must be a group account.
    #[error("Parent account {0} is not a group account")]
    ParentNotGroup(Uuid),

    /// Child accounts must share the parent's type.
    #[error("Account type {child} does not match parent type {parent}")]
    TypeMismatch {
        /// The child's account type.
        child: AccountType,
        /// The parent's account type.
        parent: AccountType,
    },

    /// Group accounts cannot carry an opening balance.
    #[error("Group accounts cannot have an opening balance")]
    GroupOpeningBalance,

    /// Account still has active children.
    #[error("Account {0} has active child accounts")]
    HasActiveChildren(Uuid),

    /// Account still carries a balance.
    #[error("Account {0} has a non-zero balance")]
    NonZeroBalance(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CoaError {
    /// Returns the failure classification for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankCode | Self::TypeMismatch { .. } | Self::GroupOpeningBalance => {
                ErrorKind::ValidationFailure
            }
            Self::DuplicateCode(_)
            | Self::ParentNotGroup(_)
            | Self::HasActiveChildren(_)
            | Self::NonZeroBalance(_) => ErrorKind::StateConflict,
            Self::AccountNotFound(_) | Self::ParentNotFound(_) => ErrorKind::ReferenceFailure,
            Self::Database(_) => ErrorKind::Infrastructure,
        }
    }
}

/// The parent fields a new account's placement is checked against.
#[derive(Debug, Clone, Copy)]
pub struct ParentInfo {
    /// The parent account.
    pub id: Uuid,
    /// The parent's type.
    pub account_type: AccountType,
    /// Whether the parent is a group account.
    pub is_group: bool,
}

/// Stateless chart of accounts rules.
pub struct CoaService;

impl CoaService {
    /// Validates a new account's code, placement, and opening balance.
    ///
    /// Code uniqueness is enforced by the persistence layer; this checks the
    /// structural rules that need no lookup beyond the resolved parent.
    ///
    /// # Errors
    ///
    /// Returns the first structural violation found.
    pub fn validate_new_account(
        code: &str,
        account_type: AccountType,
        is_group: bool,
        opening_balance: Decimal,
        parent: Option<ParentInfo>,
    ) -> Result<(), CoaError> {
        if code.trim().is_empty() {
            return Err(CoaError::BlankCode);
        }
        if is_group && opening_balance != Decimal::ZERO {
            return Err(CoaError::GroupOpeningBalance);
        }
        if let Some(parent) = parent {
            if !parent.is_group {
                return Err(CoaError::ParentNotGroup(parent.id));
            }
            if parent.account_type != account_type {
                return Err(CoaError::TypeMismatch {
                    child: account_type,
                    parent: parent.account_type,
                });
            }
        }
        Ok(())
    }

    /// Validates that an account may be deactivated.
    ///
    /// # Errors
    ///
    /// Returns [`CoaError::HasActiveChildren`] or [`CoaError::NonZeroBalance`].
    pub fn validate_deactivation(
        account_id: Uuid,
        active_children: u64,
        current_balance: Decimal,
    ) -> Result<(), CoaError> {
        if active_children > 0 {
            return Err(CoaError::HasActiveChildren(account_id));
        }
        if current_balance != Decimal::ZERO {
            return Err(CoaError::NonZeroBalance(account_id));
        }
        Ok(())
    }
}
