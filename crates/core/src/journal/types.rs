//! Journal domain types for entry creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Origin of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// Entered directly through the journal engine.
    Manual,
    /// Produced by posting a voucher.
    Voucher,
    /// Produced by a depreciation run.
    Depreciation,
    /// Reversal of a previously posted entry.
    Reversal,
}

/// Status of a journal entry.
///
/// Entries created by the journal engine are posted immediately; the draft
/// status exists for entries staged by callers before posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is staged and has not touched the ledger.
    Draft,
    /// Entry is posted to the ledger (immutable).
    Posted,
    /// Entry was posted and later reversed by a linked entry.
    Reversed,
    /// Entry was cancelled before posting.
    Cancelled,
}

impl EntryStatus {
    /// Returns true if the entry has touched the ledger and is immutable.
    ///
    /// A reversed entry stays in the ledger; the reversal is a separate
    /// entry, not an edit.
    #[must_use]
    pub fn is_immutable(self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

/// Input for a single journal line.
///
/// Exactly one of `debit` and `credit` must be positive; the other must be
/// zero.
#[derive(Debug, Clone)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: Uuid,
    /// Debit amount (zero for credit lines).
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    pub credit: Decimal,
    /// Optional line narration.
    pub narration: Option<String>,
    /// Optional cost center tag.
    pub cost_center_id: Option<Uuid>,
}

impl JournalLineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            narration: None,
            cost_center_id: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            narration: None,
            cost_center_id: None,
        }
    }
}

/// Input for posting a journal entry.
#[derive(Debug, Clone)]
pub struct PostEntryInput {
    /// The accounting date of the entry.
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub narration: String,
    /// Where the entry came from.
    pub source: EntrySource,
    /// Optional reference to the source document (voucher number, asset code).
    pub source_ref: Option<String>,
    /// The journal lines (must balance).
    pub lines: Vec<JournalLineInput>,
    /// The user posting the entry.
    pub created_by: Uuid,
}

/// Entry totals for validation and display.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates new entry totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Sums the lines of an entry.
    #[must_use]
    pub fn from_lines(lines: &[JournalLineInput]) -> Self {
        let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();
        Self::new(total_debit, total_credit)
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_status_immutability() {
        assert!(!EntryStatus::Draft.is_immutable());
        assert!(!EntryStatus::Cancelled.is_immutable());
        assert!(EntryStatus::Posted.is_immutable());
        assert!(EntryStatus::Reversed.is_immutable());
    }

    #[test]
    fn test_line_constructors() {
        let account = Uuid::new_v4();
        let d = JournalLineInput::debit(account, dec!(100));
        assert_eq!(d.debit, dec!(100));
        assert_eq!(d.credit, Decimal::ZERO);

        let c = JournalLineInput::credit(account, dec!(100));
        assert_eq!(c.debit, Decimal::ZERO);
        assert_eq!(c.credit, dec!(100));
    }

    #[test]
    fn test_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }

    #[test]
    fn test_totals_from_lines() {
        let account = Uuid::new_v4();
        let lines = vec![
            JournalLineInput::debit(account, dec!(60)),
            JournalLineInput::debit(account, dec!(40)),
            JournalLineInput::credit(account, dec!(100)),
        ];
        let totals = EntryTotals::from_lines(&lines);
        assert_eq!(totals.total_debit, dec!(100));
        assert_eq!(totals.total_credit, dec!(100));
        assert!(totals.is_balanced);
    }
}
