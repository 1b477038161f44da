//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    AccountBalance, BalanceSheetReport, BalanceSheetSection, IncomeStatementReport,
    IncomeStatementSection, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::coa::{AccountSubtype, AccountType, NormalBalance};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance report from account balances.
    ///
    /// Each account's closing balance is placed in the debit or credit
    /// column according to its normal balance; negative balances flip to
    /// the opposite column. When every entry feeding the balances was
    /// balanced, the column totals agree.
    #[must_use]
    pub fn trial_balance(as_of: NaiveDate, accounts: Vec<AccountBalance>) -> TrialBalanceReport {
        let rows: Vec<TrialBalanceRow> = accounts
            .into_iter()
            .map(|account| {
                let (debit, credit) = match account.account_type.normal_balance() {
                    NormalBalance::Debit if account.balance >= Decimal::ZERO => {
                        (account.balance, Decimal::ZERO)
                    }
                    NormalBalance::Debit => (Decimal::ZERO, -account.balance),
                    NormalBalance::Credit if account.balance >= Decimal::ZERO => {
                        (Decimal::ZERO, account.balance)
                    }
                    NormalBalance::Credit => (-account.balance, Decimal::ZERO),
                };
                TrialBalanceRow {
                    account_id: account.account_id,
                    code: account.code,
                    name: account.name,
                    account_type: account.account_type,
                    debit,
                    credit,
                }
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();

        TrialBalanceReport {
            as_of,
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates a balance sheet report from account balances.
    ///
    /// Only balance sheet account types participate; revenue and expense
    /// balances are assumed already closed into equity by the caller.
    #[must_use]
    pub fn balance_sheet(as_of: NaiveDate, accounts: Vec<AccountBalance>) -> BalanceSheetReport {
        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();

        for account in accounts {
            match account.account_type {
                AccountType::Asset => Self::add_to_section(&mut assets, account),
                AccountType::Liability => Self::add_to_section(&mut liabilities, account),
                AccountType::Equity => Self::add_to_section(&mut equity, account),
                AccountType::Revenue | AccountType::Expense => {}
            }
        }

        let total_assets = assets.total;
        let liabilities_and_equity = liabilities.total + equity.total;

        BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// Generates an income statement report from account balances.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] when the period end
    /// precedes the start.
    pub fn income_statement(
        period_start: NaiveDate,
        period_end: NaiveDate,
        accounts: Vec<AccountBalance>,
    ) -> Result<IncomeStatementReport, ReportError> {
        if period_end < period_start {
            return Err(ReportError::InvalidDateRange {
                start: period_start,
                end: period_end,
            });
        }

        let mut revenue = IncomeStatementSection::default();
        let mut direct = IncomeStatementSection::default();
        let mut indirect = IncomeStatementSection::default();

        for account in accounts {
            match (account.account_type, account.account_subtype) {
                (AccountType::Revenue, _) => Self::add_to_income_section(&mut revenue, account),
                (AccountType::Expense, Some(AccountSubtype::DirectExpense)) => {
                    Self::add_to_income_section(&mut direct, account);
                }
                (AccountType::Expense, _) => {
                    Self::add_to_income_section(&mut indirect, account);
                }
                _ => {}
            }
        }

        let gross_profit = revenue.total - direct.total;
        let net_income = gross_profit - indirect.total;

        Ok(IncomeStatementReport {
            period_start,
            period_end,
            revenue,
            direct_expenses: direct,
            gross_profit,
            indirect_expenses: indirect,
            net_income,
        })
    }

    fn add_to_section(section: &mut BalanceSheetSection, account: AccountBalance) {
        section.total += account.balance;
        section.accounts.push(account);
    }

    fn add_to_income_section(section: &mut IncomeStatementSection, account: AccountBalance) {
        section.total += account.balance;
        section.accounts.push(account);
    }
}
