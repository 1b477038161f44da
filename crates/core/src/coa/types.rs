//! Account classification types and balance conventions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned (cash, bank, receivables, fixed assets).
    Asset,
    /// Obligations owed (payables, loans, accrued duties).
    Liability,
    /// Owner claims (capital, reserves, retained earnings).
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

/// Side on which an account's balance normally sits.
///
/// Asset/Expense accounts grow on the debit side; Liability/Equity/Revenue
/// accounts grow on the credit side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalBalance {
    /// Debit-normal (Asset, Expense).
    Debit,
    /// Credit-normal (Liability, Equity, Revenue).
    Credit,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Calculates the signed balance change a line produces on an account of
    /// this type.
    ///
    /// Debit-normal: change = debit - credit.
    /// Credit-normal: change = credit - debit.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self.normal_balance() {
            NormalBalance::Debit => debit - credit,
            NormalBalance::Credit => credit - debit,
        }
    }

    /// Returns true for balance sheet types (Asset, Liability, Equity).
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// Finer classification below [`AccountType`], used for report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubtype {
    /// Cash on hand.
    Cash,
    /// Bank and equivalent accounts.
    Bank,
    /// Trade receivables.
    Receivable,
    /// Other current assets.
    CurrentAsset,
    /// Capitalized fixed assets.
    FixedAsset,
    /// Trade payables.
    Payable,
    /// Short-term obligations.
    CurrentLiability,
    /// Long-term obligations.
    LongTermLiability,
    /// Contributed capital.
    Capital,
    /// Reserves and surplus.
    Reserve,
    /// Income from primary operations.
    DirectIncome,
    /// Other income.
    IndirectIncome,
    /// Costs tied to primary operations.
    DirectExpense,
    /// Overheads and other costs.
    IndirectExpense,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_normal_balance_mapping() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(
            AccountType::Liability.normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_debit_normal_balance_change() {
        // Debit increases, credit decreases
        assert_eq!(AccountType::Asset.balance_change(dec!(100), dec!(0)), dec!(100));
        assert_eq!(AccountType::Asset.balance_change(dec!(0), dec!(50)), dec!(-50));
        assert_eq!(AccountType::Expense.balance_change(dec!(100), dec!(30)), dec!(70));
    }

    #[test]
    fn test_credit_normal_balance_change() {
        // Credit increases, debit decreases
        assert_eq!(AccountType::Revenue.balance_change(dec!(0), dec!(100)), dec!(100));
        assert_eq!(AccountType::Liability.balance_change(dec!(50), dec!(0)), dec!(-50));
        assert_eq!(AccountType::Equity.balance_change(dec!(30), dec!(100)), dec!(70));
    }

    #[test]
    fn test_balance_sheet_classification() {
        assert!(AccountType::Asset.is_balance_sheet());
        assert!(AccountType::Liability.is_balance_sheet());
        assert!(AccountType::Equity.is_balance_sheet());
        assert!(!AccountType::Revenue.is_balance_sheet());
        assert!(!AccountType::Expense.is_balance_sheet());
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(AccountType::from_str("ASSET").unwrap(), AccountType::Asset);
        assert_eq!(
            AccountType::from_str("Revenue").unwrap(),
            AccountType::Revenue
        );
        assert!(AccountType::from_str("goodwill").is_err());
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn account_type_strategy() -> impl Strategy<Value = AccountType> {
        prop_oneof![
            Just(AccountType::Asset),
            Just(AccountType::Liability),
            Just(AccountType::Equity),
            Just(AccountType::Revenue),
            Just(AccountType::Expense),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// **Property: opposite normal balances produce opposite changes**
        ///
        /// *For any* (debit, credit) pair, a debit-normal and a credit-normal
        /// account see changes of equal magnitude and opposite sign.
        #[test]
        fn prop_debit_and_credit_normal_changes_are_opposite(
            debit in amount_strategy(),
            credit in amount_strategy(),
        ) {
            let debit_side = AccountType::Asset.balance_change(debit, credit);
            let credit_side = AccountType::Revenue.balance_change(debit, credit);
            prop_assert_eq!(debit_side, -credit_side);
        }

        /// **Property: equal debit and credit nets to zero**
        #[test]
        fn prop_equal_legs_net_to_zero(
            amount in amount_strategy(),
            account_type in account_type_strategy(),
        ) {
            prop_assert_eq!(
                account_type.balance_change(amount, amount),
                Decimal::ZERO
            );
        }
    }
}
