//! Journal repository for posting and reversing entries.
//!
//! Posting is atomic: the entry header, its lines, the general ledger rows,
//! and the account balance updates land in one transaction or not at all.
//! Account rows are locked for the duration so concurrent postings to the
//! same account serialize instead of clobbering each other's running
//! balances.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ledgerkit_core::coa::AccountType;
use ledgerkit_shared::types::{AccountId, PageRequest, PageResponse};
use ledgerkit_core::journal::{
    AccountInfo, EntrySource, EntryStatus, JournalError, JournalService, PostEntryInput,
    PostedLine, RunningBalance, build_reversal_lines,
};

use crate::entities::{
    chart_of_accounts, cost_centers, general_ledger, journal_entries, journal_lines,
    sea_orm_active_enums,
};
use crate::repositories::sequence;

/// Prefix for journal entry numbers.
const ENTRY_NUMBER_PREFIX: &str = "JV";

fn db_err(err: DbErr) -> JournalError {
    JournalError::Database(err.to_string())
}

/// A journal entry together with its lines.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The entry lines in line number order.
    pub lines: Vec<journal_lines::Model>,
}

/// Result of reversing an entry.
#[derive(Debug, Clone)]
pub struct ReversalResult {
    /// The original entry, now flagged as reversed.
    pub original: journal_entries::Model,
    /// The newly posted reversing entry.
    pub reversal: EntryWithLines,
}

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Filter by status.
    pub status: Option<EntryStatus>,
    /// Filter by source.
    pub source: Option<EntrySource>,
    /// Entries dated on or after this date.
    pub from_date: Option<NaiveDate>,
    /// Entries dated on or before this date.
    pub to_date: Option<NaiveDate>,
}

/// Journal repository for entry posting and reversal.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and posts a journal entry.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, no open period covers the entry
    /// date, or the database transaction fails.
    pub async fn post_entry(&self, input: PostEntryInput) -> Result<EntryWithLines, JournalError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let posted = post_entry_in_txn(&txn, &input, None).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(posted)
    }

    /// Reverses a posted entry by posting a debit/credit swapped copy.
    ///
    /// The original entry is never edited beyond its reversal flags; the
    /// reversing entry carries `reversal_of` pointing back at it.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not posted, was already reversed, or
    /// no open period covers the reversal date.
    pub async fn reverse_entry(
        &self,
        entry_id: Uuid,
        reversal_date: NaiveDate,
        reversed_by: Uuid,
    ) -> Result<ReversalResult, JournalError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let result = reverse_entry_in_txn(&txn, entry_id, reversal_date, reversed_by).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(result)
    }

    /// Finds an entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_entry(&self, id: Uuid) -> Result<Option<EntryWithLines>, JournalError> {
        let Some(entry) = journal_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::EntryId.eq(id))
            .order_by_asc(journal_lines::Column::LineNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(EntryWithLines { entry, lines }))
    }

    /// Lists entries ordered by entry date then creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        filter: EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<journal_entries::Model>, JournalError> {
        let mut query = journal_entries::Entity::find()
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(journal_entries::Column::CreatedAt);

        if let Some(status) = filter.status {
            let stored: sea_orm_active_enums::EntryStatus = status.into();
            query = query.filter(journal_entries::Column::Status.eq(stored));
        }
        if let Some(source) = filter.source {
            let stored: sea_orm_active_enums::EntrySource = source.into();
            query = query.filter(journal_entries::Column::Source.eq(stored));
        }
        if let Some(from) = filter.from_date {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.to_date {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let entries = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PageResponse::new(entries, page.page, page.per_page, total))
    }
}

/// Posts an entry inside an existing transaction.
///
/// Used directly by voucher posting and depreciation runs so their documents
/// and the resulting journal entry commit together.
pub(crate) async fn post_entry_in_txn(
    txn: &DatabaseTransaction,
    input: &PostEntryInput,
    reversal_of: Option<Uuid>,
) -> Result<EntryWithLines, JournalError> {
    let period = resolve_open_period(txn, input.entry_date).await?;

    // Lock accounts in a stable order so concurrent postings cannot deadlock
    let mut account_ids: Vec<Uuid> = input.lines.iter().map(|l| l.account_id).collect();
    account_ids.sort_unstable();
    account_ids.dedup();

    let accounts: HashMap<Uuid, chart_of_accounts::Model> = chart_of_accounts::Entity::find()
        .filter(chart_of_accounts::Column::Id.is_in(account_ids))
        .lock_exclusive()
        .all(txn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let cost_center_ids: Vec<Uuid> = input
        .lines
        .iter()
        .filter_map(|l| l.cost_center_id)
        .collect();
    let cost_centers_map: HashMap<Uuid, cost_centers::Model> = cost_centers::Entity::find()
        .filter(cost_centers::Column::Id.is_in(cost_center_ids))
        .all(txn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let totals = JournalService::validate(
        input,
        |id| {
            accounts
                .get(&id)
                .map(|a| AccountInfo {
                    id: AccountId::from_uuid(a.id),
                    account_type: (&a.account_type).into(),
                    is_active: a.is_active,
                    is_group: a.is_group,
                })
                .ok_or(JournalError::AccountNotFound(id))
        },
        |id| {
            let cc = cost_centers_map
                .get(&id)
                .ok_or(JournalError::CostCenterNotFound(id))?;
            if !cc.is_active {
                return Err(JournalError::CostCenterInactive(id));
            }
            Ok(())
        },
    )?;

    let entry_number = sequence::next_document_number(txn, ENTRY_NUMBER_PREFIX, input.entry_date)
        .await
        .map_err(db_err)?;

    let now = chrono::Utc::now();
    let entry_id = Uuid::new_v4();
    let entry = journal_entries::ActiveModel {
        id: Set(entry_id),
        entry_number: Set(entry_number),
        entry_date: Set(input.entry_date),
        period_id: Set(period.id),
        narration: Set(input.narration.clone()),
        source: Set(input.source.into()),
        source_ref: Set(input.source_ref.clone()),
        status: Set(sea_orm_active_enums::EntryStatus::Posted),
        total_debit: Set(totals.total_debit),
        total_credit: Set(totals.total_credit),
        is_reversed: Set(false),
        reversal_of: Set(reversal_of),
        created_by: Set(input.created_by),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let entry = entry.insert(txn).await.map_err(db_err)?;

    // Per-account running balance carried across this entry's lines
    let mut balances: HashMap<Uuid, RunningBalance> = HashMap::new();
    let mut lines = Vec::with_capacity(input.lines.len());

    for (index, line_input) in input.lines.iter().enumerate() {
        let line_number = i16::try_from(index + 1)
            .map_err(|_| JournalError::Internal("Line number overflow".to_string()))?;

        let line = journal_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            entry_id: Set(entry_id),
            line_number: Set(line_number),
            account_id: Set(line_input.account_id),
            debit: Set(line_input.debit),
            credit: Set(line_input.credit),
            narration: Set(line_input.narration.clone()),
            cost_center_id: Set(line_input.cost_center_id),
            created_at: Set(now.into()),
        };
        let line = line.insert(txn).await.map_err(db_err)?;

        let account = accounts
            .get(&line_input.account_id)
            .ok_or(JournalError::AccountNotFound(line_input.account_id))?;
        let account_type: AccountType = (&account.account_type).into();
        let balance_change = account_type.balance_change(line_input.debit, line_input.credit);

        let previous = match balances.get(&account.id) {
            Some(state) => Some(state.clone()),
            None => latest_running_balance(txn, account.id).await?,
        };
        let running = match previous {
            Some(prev) => RunningBalance::next_entry(&prev, balance_change),
            None => RunningBalance::first_entry(account.opening_balance, balance_change),
        };

        let gl_row = general_ledger::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(account.id),
            entry_id: Set(entry_id),
            line_id: Set(line.id),
            transaction_date: Set(input.entry_date),
            debit: Set(line_input.debit),
            credit: Set(line_input.credit),
            balance_change: Set(balance_change),
            account_version: Set(running.account_version),
            previous_balance: Set(running.previous_balance),
            running_balance: Set(running.current_balance),
            created_at: Set(now.into()),
        };
        gl_row.insert(txn).await.map_err(db_err)?;

        balances.insert(account.id, running);
        lines.push(line);
    }

    for (account_id, state) in balances {
        let account = accounts
            .get(&account_id)
            .ok_or(JournalError::AccountNotFound(account_id))?;
        let mut active: chart_of_accounts::ActiveModel = account.clone().into();
        active.current_balance = Set(state.current_balance);
        active.updated_at = Set(now.into());
        active.update(txn).await.map_err(db_err)?;
    }

    Ok(EntryWithLines { entry, lines })
}

/// Reverses an entry inside an existing transaction.
pub(crate) async fn reverse_entry_in_txn(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
    reversal_date: NaiveDate,
    reversed_by: Uuid,
) -> Result<ReversalResult, JournalError> {
    let original = journal_entries::Entity::find_by_id(entry_id)
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or(JournalError::EntryNotFound(entry_id))?;

    let status: EntryStatus = (&original.status).into();
    JournalService::validate_can_reverse(entry_id, status, original.is_reversed)?;

    let original_lines = journal_lines::Entity::find()
        .filter(journal_lines::Column::EntryId.eq(entry_id))
        .order_by_asc(journal_lines::Column::LineNumber)
        .all(txn)
        .await
        .map_err(db_err)?;

    let posted: Vec<PostedLine> = original_lines
        .iter()
        .map(|l| PostedLine {
            account_id: l.account_id,
            debit: l.debit,
            credit: l.credit,
            narration: l.narration.clone(),
            cost_center_id: l.cost_center_id,
        })
        .collect();

    let reversal_input = PostEntryInput {
        entry_date: reversal_date,
        narration: format!("Reversal of {}", original.entry_number),
        source: EntrySource::Reversal,
        source_ref: Some(original.entry_number.clone()),
        lines: build_reversal_lines(&posted),
        created_by: reversed_by,
    };
    let reversal = post_entry_in_txn(txn, &reversal_input, Some(entry_id)).await?;

    let mut active: journal_entries::ActiveModel = original.into();
    active.status = Set(sea_orm_active_enums::EntryStatus::Reversed);
    active.is_reversed = Set(true);
    active.updated_at = Set(chrono::Utc::now().into());
    let original = active.update(txn).await.map_err(db_err)?;

    Ok(ReversalResult { original, reversal })
}

async fn resolve_open_period(
    txn: &DatabaseTransaction,
    date: NaiveDate,
) -> Result<crate::entities::financial_periods::Model, JournalError> {
    use crate::entities::financial_periods;

    let period = financial_periods::Entity::find()
        .filter(financial_periods::Column::StartDate.lte(date))
        .filter(financial_periods::Column::EndDate.gte(date))
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or(JournalError::NoPeriodForDate(date))?;

    if period.status != sea_orm_active_enums::PeriodStatus::Open {
        return Err(JournalError::PeriodNotOpen(date));
    }

    Ok(period)
}

/// Returns the latest running balance row for an account, or `None` when no
/// ledger rows exist yet.
async fn latest_running_balance(
    txn: &DatabaseTransaction,
    account_id: Uuid,
) -> Result<Option<RunningBalance>, JournalError> {
    let latest = general_ledger::Entity::find()
        .filter(general_ledger::Column::AccountId.eq(account_id))
        .order_by_desc(general_ledger::Column::AccountVersion)
        .one(txn)
        .await
        .map_err(db_err)?;

    Ok(latest.map(|row| RunningBalance {
        account_version: row.account_version,
        previous_balance: row.previous_balance,
        current_balance: row.running_balance,
    }))
}
