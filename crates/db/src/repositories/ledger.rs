//! General ledger projections and reports.
//!
//! Reads the general_ledger rows written at post time and folds them into
//! account statements, trial balances, and financial reports. Also owns the
//! recompute path that rebuilds an account's running balance chain after
//! backdated postings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ledgerkit_core::coa::AccountType;
use ledgerkit_core::journal::fold_changes;
use ledgerkit_core::reports::{
    AccountBalance, BalanceSheetReport, IncomeStatementReport, ReportError, ReportService,
    TrialBalanceReport,
};

use crate::entities::{chart_of_accounts, general_ledger};

fn db_err(err: DbErr) -> ReportError {
    ReportError::Database(err.to_string())
}

/// An account statement over a date range.
#[derive(Debug, Clone)]
pub struct LedgerStatement {
    /// The account ID.
    pub account_id: Uuid,
    /// First date of the statement range.
    pub from_date: NaiveDate,
    /// Last date of the statement range.
    pub to_date: NaiveDate,
    /// Balance immediately before the range.
    pub opening_balance: Decimal,
    /// Ledger rows in (transaction date, creation time) order.
    pub rows: Vec<general_ledger::Model>,
    /// Sum of debits in the range.
    pub total_debit: Decimal,
    /// Sum of credits in the range.
    pub total_credit: Decimal,
    /// Balance at the end of the range.
    pub closing_balance: Decimal,
}

/// Outcome of rebuilding an account's running balance chain.
#[derive(Debug, Clone)]
pub struct RecomputeOutcome {
    /// The account ID.
    pub account_id: Uuid,
    /// Number of ledger rows rewritten.
    pub rows_rewritten: u64,
    /// The account balance after the rebuild.
    pub final_balance: Decimal,
}

/// Ledger projection repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds an account statement over a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the range is
    /// inverted.
    pub async fn account_ledger(
        &self,
        account_id: Uuid,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<LedgerStatement, ReportError> {
        if to_date < from_date {
            return Err(ReportError::InvalidDateRange {
                start: from_date,
                end: to_date,
            });
        }

        let account = chart_of_accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(ReportError::AccountNotFound(account_id))?;

        let prior = general_ledger::Entity::find()
            .filter(general_ledger::Column::AccountId.eq(account_id))
            .filter(general_ledger::Column::TransactionDate.lt(from_date))
            .order_by_desc(general_ledger::Column::TransactionDate)
            .order_by_desc(general_ledger::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let opening_balance = prior.map_or(account.opening_balance, |row| row.running_balance);

        let rows = general_ledger::Entity::find()
            .filter(general_ledger::Column::AccountId.eq(account_id))
            .filter(general_ledger::Column::TransactionDate.gte(from_date))
            .filter(general_ledger::Column::TransactionDate.lte(to_date))
            .order_by_asc(general_ledger::Column::TransactionDate)
            .order_by_asc(general_ledger::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();
        let closing_balance = rows
            .last()
            .map_or(opening_balance, |row| row.running_balance);

        Ok(LedgerStatement {
            account_id,
            from_date,
            to_date,
            opening_balance,
            rows,
            total_debit,
            total_credit,
            closing_balance,
        })
    }

    /// Generates a trial balance as of a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalanceReport, ReportError> {
        let balances = self.balances_as_of(as_of).await?;
        Ok(ReportService::trial_balance(as_of, balances))
    }

    /// Generates a balance sheet as of a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport, ReportError> {
        let balances = self.balances_as_of(as_of).await?;
        Ok(ReportService::balance_sheet(as_of, balances))
    }

    /// Generates an income statement over a period.
    ///
    /// Revenue and expense figures cover activity inside the range only;
    /// opening balances do not participate.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted or the database query
    /// fails.
    pub async fn income_statement(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<IncomeStatementReport, ReportError> {
        let accounts = self.leaf_accounts().await?;
        let income_accounts: Vec<chart_of_accounts::Model> = accounts
            .into_iter()
            .filter(|a| {
                let account_type: AccountType = (&a.account_type).into();
                !account_type.is_balance_sheet()
            })
            .collect();

        let rows = general_ledger::Entity::find()
            .filter(general_ledger::Column::TransactionDate.gte(period_start))
            .filter(general_ledger::Column::TransactionDate.lte(period_end))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let balances = aggregate_balances(&income_accounts, &rows, Decimal::ZERO);
        ReportService::income_statement(period_start, period_end, balances)
    }

    /// Rebuilds an account's running balance chain in posting order.
    ///
    /// Rows are reordered by (transaction date, creation time) and refolded
    /// from the opening balance, then the account's current balance is set
    /// to the final running balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn recompute_account(
        &self,
        account_id: Uuid,
    ) -> Result<RecomputeOutcome, ReportError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let account = chart_of_accounts::Entity::find_by_id(account_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ReportError::AccountNotFound(account_id))?;

        let rows = general_ledger::Entity::find()
            .filter(general_ledger::Column::AccountId.eq(account_id))
            .order_by_asc(general_ledger::Column::TransactionDate)
            .order_by_asc(general_ledger::Column::CreatedAt)
            .all(&txn)
            .await
            .map_err(db_err)?;

        let changes: Vec<Decimal> = rows.iter().map(|r| r.balance_change).collect();
        let chain = fold_changes(account.opening_balance, &changes);

        let final_balance = chain
            .last()
            .map_or(account.opening_balance, |rb| rb.current_balance);
        let rows_rewritten = rows.len() as u64;

        for (row, rb) in rows.into_iter().zip(chain) {
            let mut active: general_ledger::ActiveModel = row.into();
            active.account_version = Set(rb.account_version);
            active.previous_balance = Set(rb.previous_balance);
            active.running_balance = Set(rb.current_balance);
            active.update(&txn).await.map_err(db_err)?;
        }

        let mut active: chart_of_accounts::ActiveModel = account.into();
        active.current_balance = Set(final_balance);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        Ok(RecomputeOutcome {
            account_id,
            rows_rewritten,
            final_balance,
        })
    }

    /// Account balances as of a date: opening balance plus all signed
    /// changes dated on or before it.
    async fn balances_as_of(&self, as_of: NaiveDate) -> Result<Vec<AccountBalance>, ReportError> {
        let accounts = self.leaf_accounts().await?;

        let rows = general_ledger::Entity::find()
            .filter(general_ledger::Column::TransactionDate.lte(as_of))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(aggregate_opening_balances(&accounts, &rows))
    }

    async fn leaf_accounts(&self) -> Result<Vec<chart_of_accounts::Model>, ReportError> {
        chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::IsGroup.eq(false))
            .filter(chart_of_accounts::Column::IsActive.eq(true))
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

fn aggregate_opening_balances(
    accounts: &[chart_of_accounts::Model],
    rows: &[general_ledger::Model],
) -> Vec<AccountBalance> {
    accounts
        .iter()
        .map(|account| build_balance(account, rows, account.opening_balance))
        .collect()
}

fn aggregate_balances(
    accounts: &[chart_of_accounts::Model],
    rows: &[general_ledger::Model],
    base: Decimal,
) -> Vec<AccountBalance> {
    accounts
        .iter()
        .map(|account| build_balance(account, rows, base))
        .collect()
}

fn build_balance(
    account: &chart_of_accounts::Model,
    rows: &[general_ledger::Model],
    base: Decimal,
) -> AccountBalance {
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut balance = base;

    for row in rows.iter().filter(|r| r.account_id == account.id) {
        total_debit += row.debit;
        total_credit += row.credit;
        balance += row.balance_change;
    }

    AccountBalance {
        account_id: account.id,
        code: account.code.clone(),
        name: account.name.clone(),
        account_type: (&account.account_type).into(),
        account_subtype: account.account_subtype.as_ref().map(Into::into),
        total_debit,
        total_credit,
        balance,
    }
}
