//! Running balance calculations for general ledger rows.
//!
//! Every ledger row stores the account balance after applying its signed
//! change. Folding an account's rows in posting order from the opening
//! balance must reproduce every stored balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running balance information for a general ledger row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Account version (monotonically increasing, 1 for the first row).
    pub account_version: i64,
    /// Balance before this row.
    pub previous_balance: Decimal,
    /// Balance after this row.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Creates the running balance for the first row on an account.
    #[must_use]
    pub fn first_entry(opening_balance: Decimal, balance_change: Decimal) -> Self {
        Self {
            account_version: 1,
            previous_balance: opening_balance,
            current_balance: opening_balance + balance_change,
        }
    }

    /// Creates the running balance for the row after `previous`.
    ///
    /// Invariants:
    /// - current_balance[N] = previous_balance[N] + balance_change
    /// - previous_balance[N] = current_balance[N-1]
    #[must_use]
    pub fn next_entry(previous: &Self, balance_change: Decimal) -> Self {
        Self {
            account_version: previous.account_version + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + balance_change,
        }
    }
}

/// Folds a sequence of signed changes from an opening balance.
///
/// Returns one running balance per change, in order.
#[must_use]
pub fn fold_changes(opening_balance: Decimal, changes: &[Decimal]) -> Vec<RunningBalance> {
    let mut out = Vec::with_capacity(changes.len());
    for &change in changes {
        let next = match out.last() {
            None => RunningBalance::first_entry(opening_balance, change),
            Some(prev) => RunningBalance::next_entry(prev, change),
        };
        out.push(next);
    }
    out
}
