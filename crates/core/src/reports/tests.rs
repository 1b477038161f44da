//! Tests for report generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::error::ReportError;
use super::service::ReportService;
use super::types::AccountBalance;
use crate::coa::{AccountSubtype, AccountType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn balance(
    code: &str,
    account_type: AccountType,
    subtype: Option<AccountSubtype>,
    amount: Decimal,
) -> AccountBalance {
    let (total_debit, total_credit) = match account_type.normal_balance() {
        crate::coa::NormalBalance::Debit => (amount.max(Decimal::ZERO), Decimal::ZERO),
        crate::coa::NormalBalance::Credit => (Decimal::ZERO, amount.max(Decimal::ZERO)),
    };
    AccountBalance {
        account_id: Uuid::new_v4(),
        code: code.to_string(),
        name: format!("Account {code}"),
        account_type,
        account_subtype: subtype,
        total_debit,
        total_credit,
        balance: amount,
    }
}

#[test]
fn test_trial_balance_columns_follow_normal_side() {
    let report = ReportService::trial_balance(
        date(2026, 3, 31),
        vec![
            balance("1100", AccountType::Asset, None, dec!(10000)),
            balance("2100", AccountType::Liability, None, dec!(4000)),
            balance("3100", AccountType::Equity, None, dec!(6000)),
        ],
    );

    assert_eq!(report.rows[0].debit, dec!(10000));
    assert_eq!(report.rows[0].credit, Decimal::ZERO);
    assert_eq!(report.rows[1].credit, dec!(4000));
    assert_eq!(report.rows[2].credit, dec!(6000));
    assert_eq!(report.totals.total_debit, dec!(10000));
    assert_eq!(report.totals.total_credit, dec!(10000));
    assert!(report.totals.is_balanced);
}

#[test]
fn test_trial_balance_negative_balance_flips_column() {
    // overdrawn bank account: debit-normal asset with a negative balance
    let report = ReportService::trial_balance(
        date(2026, 3, 31),
        vec![balance("1200", AccountType::Asset, None, dec!(-2500))],
    );
    assert_eq!(report.rows[0].debit, Decimal::ZERO);
    assert_eq!(report.rows[0].credit, dec!(2500));
}

#[test]
fn test_balance_sheet_equation() {
    let report = ReportService::balance_sheet(
        date(2026, 3, 31),
        vec![
            balance("1100", AccountType::Asset, None, dec!(50000)),
            balance("1500", AccountType::Asset, None, dec!(30000)),
            balance("2100", AccountType::Liability, None, dec!(20000)),
            balance("3100", AccountType::Equity, None, dec!(60000)),
            // P&L accounts are ignored here
            balance("4100", AccountType::Revenue, None, dec!(99999)),
        ],
    );

    assert_eq!(report.total_assets, dec!(80000));
    assert_eq!(report.liabilities_and_equity, dec!(80000));
    assert!(report.is_balanced);
    assert_eq!(report.assets.accounts.len(), 2);
    let revenue_rows = report
        .assets
        .accounts
        .iter()
        .chain(&report.liabilities.accounts)
        .chain(&report.equity.accounts)
        .filter(|a| a.account_type == AccountType::Revenue)
        .count();
    assert_eq!(revenue_rows, 0);
}

#[test]
fn test_income_statement_sections() {
    let report = ReportService::income_statement(
        date(2026, 1, 1),
        date(2026, 3, 31),
        vec![
            balance("4100", AccountType::Revenue, None, dec!(100000)),
            balance(
                "5100",
                AccountType::Expense,
                Some(AccountSubtype::DirectExpense),
                dec!(40000),
            ),
            balance(
                "5200",
                AccountType::Expense,
                Some(AccountSubtype::IndirectExpense),
                dec!(25000),
            ),
            balance("5300", AccountType::Expense, None, dec!(5000)),
        ],
    )
    .unwrap();

    assert_eq!(report.revenue.total, dec!(100000));
    assert_eq!(report.direct_expenses.total, dec!(40000));
    assert_eq!(report.gross_profit, dec!(60000));
    assert_eq!(report.indirect_expenses.total, dec!(30000));
    assert_eq!(report.net_income, dec!(30000));
}

#[test]
fn test_income_statement_rejects_inverted_range() {
    let result =
        ReportService::income_statement(date(2026, 3, 31), date(2026, 1, 1), Vec::new());
    assert!(matches!(result, Err(ReportError::InvalidDateRange { .. })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property: the trial balance columns agree whenever every account's
    /// balance came from balanced postings.**
    #[test]
    fn prop_trial_balance_balances(amounts in prop::collection::vec(1i64..1_000_000, 1..20)) {
        // mirror every asset balance with an equal liability balance so the
        // underlying postings are balanced by construction
        let mut accounts = Vec::new();
        for (i, amount) in amounts.iter().enumerate() {
            accounts.push(balance(
                &format!("1{i:03}"),
                AccountType::Asset,
                None,
                Decimal::from(*amount),
            ));
            accounts.push(balance(
                &format!("2{i:03}"),
                AccountType::Liability,
                None,
                Decimal::from(*amount),
            ));
        }

        let report = ReportService::trial_balance(date(2026, 6, 30), accounts);
        prop_assert_eq!(report.totals.total_debit, report.totals.total_credit);
        prop_assert!(report.totals.is_balanced);
    }

    /// **Property: every row places its amount in exactly one column.**
    #[test]
    fn prop_trial_balance_single_column(amount in -1_000_000i64..1_000_000) {
        let report = ReportService::trial_balance(
            date(2026, 6, 30),
            vec![balance("1100", AccountType::Asset, None, Decimal::from(amount))],
        );
        let row = &report.rows[0];
        prop_assert!(row.debit == Decimal::ZERO || row.credit == Decimal::ZERO);
        prop_assert!(row.debit >= Decimal::ZERO && row.credit >= Decimal::ZERO);
    }
}
