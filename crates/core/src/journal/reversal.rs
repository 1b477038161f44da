//! Reversing entry construction.
//!
//! A reversal never edits history: it creates a new posted entry whose lines
//! are the exact debit/credit swap of the original.

use rust_decimal::Decimal;

use super::types::JournalLineInput;

/// A posted journal line to be reversed.
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// The account ID.
    pub account_id: uuid::Uuid,
    /// The debit amount (0 if credit).
    pub debit: Decimal,
    /// The credit amount (0 if debit).
    pub credit: Decimal,
    /// Optional line narration.
    pub narration: Option<String>,
    /// Optional cost center tag.
    pub cost_center_id: Option<uuid::Uuid>,
}

/// Builds reversing lines by swapping debits and credits.
///
/// For each original line:
/// - Debits become credits and credits become debits
/// - Account and cost center are preserved
/// - Narration is prefixed with "Reversal: "
#[must_use]
pub fn build_reversal_lines(original: &[PostedLine]) -> Vec<JournalLineInput> {
    debug_assert!(lines_are_balanced(original));
    original
        .iter()
        .map(|line| JournalLineInput {
            account_id: line.account_id,
            debit: line.credit,
            credit: line.debit,
            narration: Some(format!(
                "Reversal: {}",
                line.narration.clone().unwrap_or_default()
            )),
            cost_center_id: line.cost_center_id,
        })
        .collect()
}

/// Posted entries are balanced by construction; checked again before
/// building the swap.
fn lines_are_balanced(lines: &[PostedLine]) -> bool {
    let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
    let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();
    total_debit == total_credit
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn posted_debit(amount: Decimal) -> PostedLine {
        PostedLine {
            account_id: Uuid::new_v4(),
            debit: amount,
            credit: Decimal::ZERO,
            narration: Some("Office supplies".to_string()),
            cost_center_id: None,
        }
    }

    fn posted_credit(amount: Decimal) -> PostedLine {
        PostedLine {
            account_id: Uuid::new_v4(),
            debit: Decimal::ZERO,
            credit: amount,
            narration: Some("Cash payment".to_string()),
            cost_center_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn test_reversal_swaps_sides() {
        let original = vec![posted_debit(dec!(100)), posted_credit(dec!(100))];
        let reversed = build_reversal_lines(&original);

        assert_eq!(reversed.len(), 2);
        assert_eq!(reversed[0].debit, Decimal::ZERO);
        assert_eq!(reversed[0].credit, dec!(100));
        assert_eq!(reversed[1].debit, dec!(100));
        assert_eq!(reversed[1].credit, Decimal::ZERO);
    }

    #[test]
    fn test_reversal_preserves_account_and_cost_center() {
        let original = vec![posted_credit(dec!(50))];
        let reversed = build_reversal_lines(&original);

        assert_eq!(reversed[0].account_id, original[0].account_id);
        assert_eq!(reversed[0].cost_center_id, original[0].cost_center_id);
    }

    #[test]
    fn test_reversal_prefixes_narration() {
        let original = vec![posted_debit(dec!(10))];
        let reversed = build_reversal_lines(&original);
        assert_eq!(
            reversed[0].narration.as_deref(),
            Some("Reversal: Office supplies")
        );
    }

    #[test]
    fn test_balanced_check() {
        assert!(lines_are_balanced(&[
            posted_debit(dec!(100)),
            posted_credit(dec!(100)),
        ]));
        assert!(!lines_are_balanced(&[
            posted_debit(dec!(100)),
            posted_credit(dec!(50)),
        ]));
        // Empty is trivially balanced (0 = 0)
        assert!(lines_are_balanced(&[]));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// **Property: original plus reversal nets to zero on every line**
        #[test]
        fn prop_reversal_nets_to_zero(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
            let original: Vec<PostedLine> = amounts
                .iter()
                .flat_map(|&a| [posted_debit(a), posted_credit(a)])
                .collect();
            let reversed = build_reversal_lines(&original);

            for (orig, rev) in original.iter().zip(&reversed) {
                prop_assert_eq!(orig.debit - rev.credit, Decimal::ZERO);
                prop_assert_eq!(orig.credit - rev.debit, Decimal::ZERO);
            }
        }

        /// **Property: reversing a balanced set yields a balanced set**
        #[test]
        fn prop_reversal_stays_balanced(amount in amount_strategy()) {
            let original = vec![posted_debit(amount), posted_credit(amount)];
            let reversed = build_reversal_lines(&original);

            let debit: Decimal = reversed.iter().map(|l| l.debit).sum();
            let credit: Decimal = reversed.iter().map(|l| l.credit).sum();
            prop_assert_eq!(debit, credit);
        }
    }
}
