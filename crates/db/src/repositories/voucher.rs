//! Voucher repository for the approval workflow.
//!
//! Vouchers move through the maker-checker pipeline as rows; the actual
//! ledger impact happens only at posting, when a journal entry is created in
//! the same transaction that flips the voucher status to posted.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ledgerkit_shared::types::{AccountId, PageRequest, PageResponse};

use ledgerkit_core::journal::{
    AccountInfo, EntrySource, EntryTotals, JournalError, JournalLineInput, JournalService,
    PostEntryInput,
};
use ledgerkit_core::voucher::{
    AllocationInput, VoucherAction, VoucherError, VoucherService, VoucherStatus, VoucherType,
};

use crate::entities::{
    chart_of_accounts, cost_centers, sea_orm_active_enums, voucher_allocations, voucher_lines,
    vouchers,
};
use crate::repositories::{journal, sequence};

fn db_err(err: DbErr) -> VoucherError {
    VoucherError::Database(err.to_string())
}

/// Input for creating or replacing the body of a voucher.
#[derive(Debug, Clone)]
pub struct VoucherBodyInput {
    /// The voucher date.
    pub voucher_date: NaiveDate,
    /// A description of the voucher.
    pub narration: String,
    /// The voucher lines (must balance).
    pub lines: Vec<JournalLineInput>,
    /// Invoice allocations for settlement vouchers.
    pub allocations: Vec<AllocationInput>,
}

/// Input for creating a voucher.
#[derive(Debug, Clone)]
pub struct CreateVoucherInput {
    /// The voucher classification.
    pub voucher_type: VoucherType,
    /// The voucher body.
    pub body: VoucherBodyInput,
    /// The user creating the voucher.
    pub created_by: Uuid,
}

/// A voucher together with its lines and allocations.
#[derive(Debug, Clone)]
pub struct VoucherWithLines {
    /// The voucher header.
    pub voucher: vouchers::Model,
    /// The voucher lines in line number order.
    pub lines: Vec<voucher_lines::Model>,
    /// The invoice allocations.
    pub allocations: Vec<voucher_allocations::Model>,
}

/// Result of reversing a posted voucher.
#[derive(Debug, Clone)]
pub struct VoucherReversal {
    /// The original voucher, now flagged as reversed.
    pub original: vouchers::Model,
    /// The reversal voucher, posted immediately.
    pub reversal: VoucherWithLines,
}

/// Filter options for listing vouchers.
#[derive(Debug, Clone, Default)]
pub struct VoucherFilter {
    /// Filter by status.
    pub status: Option<VoucherStatus>,
    /// Filter by voucher type.
    pub voucher_type: Option<VoucherType>,
    /// Vouchers dated on or after this date.
    pub from_date: Option<NaiveDate>,
    /// Vouchers dated on or before this date.
    pub to_date: Option<NaiveDate>,
}

/// Voucher repository for workflow operations.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    db: DatabaseConnection,
}

impl VoucherRepository {
    /// Creates a new voucher repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft voucher.
    ///
    /// Lines are validated up front (balance, account and cost center
    /// checks) so a voucher entering the pipeline is already postable.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or no period covers the voucher
    /// date.
    pub async fn create_voucher(
        &self,
        input: CreateVoucherInput,
    ) -> Result<VoucherWithLines, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let (totals, period_id) =
            validate_body(&txn, &input.body, input.created_by).await?;
        VoucherService::validate_allocations(&input.body.allocations)?;

        let voucher_number = sequence::next_document_number(
            &txn,
            input.voucher_type.prefix(),
            input.body.voucher_date,
        )
        .await
        .map_err(db_err)?;

        let now = chrono::Utc::now();
        let voucher_id = Uuid::new_v4();
        let voucher = vouchers::ActiveModel {
            id: Set(voucher_id),
            voucher_number: Set(voucher_number),
            voucher_type: Set(input.voucher_type.into()),
            voucher_date: Set(input.body.voucher_date),
            period_id: Set(period_id),
            narration: Set(input.body.narration.clone()),
            status: Set(sea_orm_active_enums::VoucherStatus::Draft),
            approval_level: Set(None),
            total_amount: Set(totals.total_debit),
            is_reversed: Set(false),
            reversal_of: Set(None),
            journal_entry_id: Set(None),
            created_by: Set(input.created_by),
            submitted_by: Set(None),
            submitted_at: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            rejected_by: Set(None),
            rejected_at: Set(None),
            rejection_reason: Set(None),
            posted_by: Set(None),
            posted_at: Set(None),
            cancelled_by: Set(None),
            cancelled_at: Set(None),
            cancel_reason: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let voucher = voucher.insert(&txn).await.map_err(db_err)?;

        let lines = insert_lines(&txn, voucher_id, &input.body.lines).await?;
        let allocations = insert_allocations(&txn, voucher_id, &input.body.allocations).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(VoucherWithLines {
            voucher,
            lines,
            allocations,
        })
    }

    /// Replaces the body of a draft voucher.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::NotEditable`] once the voucher has left
    /// draft.
    pub async fn update_voucher(
        &self,
        voucher_id: Uuid,
        body: VoucherBodyInput,
    ) -> Result<VoucherWithLines, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let voucher = find_voucher_locked(&txn, voucher_id).await?;
        let status: VoucherStatus = (&voucher.status).into();
        if !status.is_editable() {
            return Err(VoucherError::NotEditable(status));
        }

        let (totals, period_id) = validate_body(&txn, &body, voucher.created_by).await?;
        VoucherService::validate_allocations(&body.allocations)?;

        voucher_lines::Entity::delete_many()
            .filter(voucher_lines::Column::VoucherId.eq(voucher_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        voucher_allocations::Entity::delete_many()
            .filter(voucher_allocations::Column::VoucherId.eq(voucher_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let mut active: vouchers::ActiveModel = voucher.into();
        active.voucher_date = Set(body.voucher_date);
        active.period_id = Set(period_id);
        active.narration = Set(body.narration.clone());
        active.total_amount = Set(totals.total_debit);
        active.updated_at = Set(chrono::Utc::now().into());
        let voucher = active.update(&txn).await.map_err(db_err)?;

        let lines = insert_lines(&txn, voucher_id, &body.lines).await?;
        let allocations = insert_allocations(&txn, voucher_id, &body.allocations).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(VoucherWithLines {
            voucher,
            lines,
            allocations,
        })
    }

    /// Submits a draft voucher for approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is not a draft.
    pub async fn submit(
        &self,
        voucher_id: Uuid,
        submitted_by: Uuid,
    ) -> Result<vouchers::Model, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let voucher = find_voucher_locked(&txn, voucher_id).await?;
        let status: VoucherStatus = (&voucher.status).into();

        let action = VoucherService::submit(
            status,
            voucher.total_amount,
            submitted_by,
            chrono::Utc::now(),
        )?;

        let mut active: vouchers::ActiveModel = voucher.into();
        if let VoucherAction::Submit {
            new_status,
            approval_level,
            submitted_by,
            submitted_at,
        } = action
        {
            active.status = Set(new_status.into());
            active.approval_level = Set(Some(approval_level.into()));
            active.submitted_by = Set(Some(submitted_by));
            active.submitted_at = Set(Some(submitted_at.into()));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        let voucher = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(voucher)
    }

    /// Approves a pending voucher, optionally posting it in the same
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is not pending approval or the
    /// approver created it.
    pub async fn approve(
        &self,
        voucher_id: Uuid,
        approved_by: Uuid,
        auto_post: bool,
    ) -> Result<vouchers::Model, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let voucher = find_voucher_locked(&txn, voucher_id).await?;
        let status: VoucherStatus = (&voucher.status).into();

        let action = VoucherService::approve(
            status,
            approved_by,
            voucher.created_by,
            auto_post,
            chrono::Utc::now(),
        )?;

        let journal_entry_id = if auto_post {
            Some(post_voucher_journal(&txn, &voucher, approved_by).await?)
        } else {
            None
        };

        let mut active: vouchers::ActiveModel = voucher.into();
        if let VoucherAction::Approve {
            new_status,
            approved_by,
            approved_at,
            auto_post,
        } = action
        {
            active.status = Set(new_status.into());
            active.approved_by = Set(Some(approved_by));
            active.approved_at = Set(Some(approved_at.into()));
            if auto_post {
                active.posted_by = Set(Some(approved_by));
                active.posted_at = Set(Some(approved_at.into()));
                active.journal_entry_id = Set(journal_entry_id);
            }
        }
        active.updated_at = Set(chrono::Utc::now().into());
        let voucher = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(voucher)
    }

    /// Rejects a pending voucher with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is not pending approval, the
    /// reviewer created it, or the reason is blank.
    pub async fn reject(
        &self,
        voucher_id: Uuid,
        rejected_by: Uuid,
        reason: &str,
    ) -> Result<vouchers::Model, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let voucher = find_voucher_locked(&txn, voucher_id).await?;
        let status: VoucherStatus = (&voucher.status).into();

        let action = VoucherService::reject(
            status,
            rejected_by,
            voucher.created_by,
            reason,
            chrono::Utc::now(),
        )?;

        let mut active: vouchers::ActiveModel = voucher.into();
        if let VoucherAction::Reject {
            new_status,
            rejected_by,
            rejected_at,
            rejection_reason,
        } = action
        {
            active.status = Set(new_status.into());
            active.rejected_by = Set(Some(rejected_by));
            active.rejected_at = Set(Some(rejected_at.into()));
            active.rejection_reason = Set(Some(rejection_reason));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        let voucher = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(voucher)
    }

    /// Posts an approved voucher to the journal.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher has not been approved or the journal
    /// posting fails.
    pub async fn post(
        &self,
        voucher_id: Uuid,
        posted_by: Uuid,
    ) -> Result<vouchers::Model, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let voucher = find_voucher_locked(&txn, voucher_id).await?;
        let status: VoucherStatus = (&voucher.status).into();

        let action = VoucherService::post(status, posted_by, chrono::Utc::now())?;
        let journal_entry_id = post_voucher_journal(&txn, &voucher, posted_by).await?;

        let mut active: vouchers::ActiveModel = voucher.into();
        if let VoucherAction::Post {
            new_status,
            posted_by,
            posted_at,
        } = action
        {
            active.status = Set(new_status.into());
            active.posted_by = Set(Some(posted_by));
            active.posted_at = Set(Some(posted_at.into()));
            active.journal_entry_id = Set(Some(journal_entry_id));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        let voucher = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(voucher)
    }

    /// Cancels a draft or rejected voucher with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher has entered the approval pipeline or
    /// the reason is blank.
    pub async fn cancel(
        &self,
        voucher_id: Uuid,
        cancelled_by: Uuid,
        reason: &str,
    ) -> Result<vouchers::Model, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let voucher = find_voucher_locked(&txn, voucher_id).await?;
        let status: VoucherStatus = (&voucher.status).into();

        let action = VoucherService::cancel(status, cancelled_by, reason, chrono::Utc::now())?;

        let mut active: vouchers::ActiveModel = voucher.into();
        if let VoucherAction::Cancel {
            new_status,
            cancelled_by,
            cancelled_at,
            cancel_reason,
        } = action
        {
            active.status = Set(new_status.into());
            active.cancelled_by = Set(Some(cancelled_by));
            active.cancelled_at = Set(Some(cancelled_at.into()));
            active.cancel_reason = Set(Some(cancel_reason));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        let voucher = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(voucher)
    }

    /// Reverses a posted voucher.
    ///
    /// The underlying journal entry is reversed and a new posted voucher is
    /// created with the swapped lines, linked to the original through
    /// `reversal_of`. The original keeps its posted status and only gains
    /// the reversed flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is not posted, was already reversed,
    /// or no open period covers the reversal date.
    pub async fn reverse(
        &self,
        voucher_id: Uuid,
        reversal_date: NaiveDate,
        reversed_by: Uuid,
    ) -> Result<VoucherReversal, VoucherError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let voucher = find_voucher_locked(&txn, voucher_id).await?;
        let status: VoucherStatus = (&voucher.status).into();

        VoucherService::validate_can_reverse(voucher_id, status, voucher.is_reversed)?;
        let journal_entry_id = voucher
            .journal_entry_id
            .ok_or(VoucherError::NotPosted(voucher_id))?;

        let journal_reversal =
            journal::reverse_entry_in_txn(&txn, journal_entry_id, reversal_date, reversed_by)
                .await?;

        let reversal_period = journal_reversal.reversal.entry.period_id;
        let core_type: VoucherType = (&voucher.voucher_type).into();
        let reversal_number =
            sequence::next_document_number(&txn, core_type.prefix(), reversal_date)
                .await
                .map_err(db_err)?;

        let now = chrono::Utc::now();
        let reversal_id = Uuid::new_v4();
        let reversal = vouchers::ActiveModel {
            id: Set(reversal_id),
            voucher_number: Set(reversal_number),
            voucher_type: Set(voucher.voucher_type.clone()),
            voucher_date: Set(reversal_date),
            period_id: Set(reversal_period),
            narration: Set(format!("Reversal of {}", voucher.voucher_number)),
            status: Set(sea_orm_active_enums::VoucherStatus::Posted),
            approval_level: Set(None),
            total_amount: Set(voucher.total_amount),
            is_reversed: Set(false),
            reversal_of: Set(Some(voucher_id)),
            journal_entry_id: Set(Some(journal_reversal.reversal.entry.id)),
            created_by: Set(reversed_by),
            submitted_by: Set(None),
            submitted_at: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            rejected_by: Set(None),
            rejected_at: Set(None),
            rejection_reason: Set(None),
            posted_by: Set(Some(reversed_by)),
            posted_at: Set(Some(now.into())),
            cancelled_by: Set(None),
            cancelled_at: Set(None),
            cancel_reason: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let reversal = reversal.insert(&txn).await.map_err(db_err)?;

        let reversal_lines: Vec<JournalLineInput> = journal_reversal
            .reversal
            .lines
            .iter()
            .map(|l| JournalLineInput {
                account_id: l.account_id,
                debit: l.debit,
                credit: l.credit,
                narration: l.narration.clone(),
                cost_center_id: l.cost_center_id,
            })
            .collect();
        let lines = insert_lines(&txn, reversal_id, &reversal_lines).await?;

        let mut active: vouchers::ActiveModel = voucher.into();
        active.is_reversed = Set(true);
        active.updated_at = Set(now.into());
        let original = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(VoucherReversal {
            original,
            reversal: VoucherWithLines {
                voucher: reversal,
                lines,
                allocations: Vec::new(),
            },
        })
    }

    /// Finds a voucher with its lines and allocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_voucher(
        &self,
        id: Uuid,
    ) -> Result<Option<VoucherWithLines>, VoucherError> {
        let Some(voucher) = vouchers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let lines = voucher_lines::Entity::find()
            .filter(voucher_lines::Column::VoucherId.eq(id))
            .order_by_asc(voucher_lines::Column::LineNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let allocations = voucher_allocations::Entity::find()
            .filter(voucher_allocations::Column::VoucherId.eq(id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(VoucherWithLines {
            voucher,
            lines,
            allocations,
        }))
    }

    /// Lists vouchers ordered by date then creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_vouchers(
        &self,
        filter: VoucherFilter,
        page: PageRequest,
    ) -> Result<PageResponse<vouchers::Model>, VoucherError> {
        let mut query = vouchers::Entity::find()
            .order_by_asc(vouchers::Column::VoucherDate)
            .order_by_asc(vouchers::Column::CreatedAt);

        if let Some(status) = filter.status {
            let stored: sea_orm_active_enums::VoucherStatus = status.into();
            query = query.filter(vouchers::Column::Status.eq(stored));
        }
        if let Some(voucher_type) = filter.voucher_type {
            let stored: sea_orm_active_enums::VoucherType = voucher_type.into();
            query = query.filter(vouchers::Column::VoucherType.eq(stored));
        }
        if let Some(from) = filter.from_date {
            query = query.filter(vouchers::Column::VoucherDate.gte(from));
        }
        if let Some(to) = filter.to_date {
            query = query.filter(vouchers::Column::VoucherDate.lte(to));
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

async fn find_voucher_locked(
    txn: &DatabaseTransaction,
    voucher_id: Uuid,
) -> Result<vouchers::Model, VoucherError> {
    vouchers::Entity::find_by_id(voucher_id)
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or(VoucherError::VoucherNotFound(voucher_id))
}

/// Validates a voucher body and resolves its period.
///
/// Returns the entry totals and the period covering the voucher date.
async fn validate_body(
    txn: &DatabaseTransaction,
    body: &VoucherBodyInput,
    created_by: Uuid,
) -> Result<(EntryTotals, Uuid), VoucherError> {
    let mut account_ids: Vec<Uuid> = body.lines.iter().map(|l| l.account_id).collect();
    account_ids.sort_unstable();
    account_ids.dedup();

    let accounts: HashMap<Uuid, chart_of_accounts::Model> = chart_of_accounts::Entity::find()
        .filter(chart_of_accounts::Column::Id.is_in(account_ids))
        .all(txn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let cost_center_ids: Vec<Uuid> = body.lines.iter().filter_map(|l| l.cost_center_id).collect();
    let cost_centers_map: HashMap<Uuid, cost_centers::Model> = cost_centers::Entity::find()
        .filter(cost_centers::Column::Id.is_in(cost_center_ids))
        .all(txn)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let candidate = PostEntryInput {
        entry_date: body.voucher_date,
        narration: body.narration.clone(),
        source: EntrySource::Voucher,
        source_ref: None,
        lines: body.lines.clone(),
        created_by,
    };

    let totals = JournalService::validate(
        &candidate,
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

    let period = crate::entities::financial_periods::Entity::find()
        .filter(crate::entities::financial_periods::Column::StartDate.lte(body.voucher_date))
        .filter(crate::entities::financial_periods::Column::EndDate.gte(body.voucher_date))
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or(VoucherError::Journal(JournalError::NoPeriodForDate(
            body.voucher_date,
        )))?;

    if period.status != sea_orm_active_enums::PeriodStatus::Open {
        return Err(VoucherError::Journal(JournalError::PeriodNotOpen(
            body.voucher_date,
        )));
    }

    Ok((totals, period.id))
}

async fn insert_lines(
    txn: &DatabaseTransaction,
    voucher_id: Uuid,
    lines: &[JournalLineInput],
) -> Result<Vec<voucher_lines::Model>, VoucherError> {
    let now = chrono::Utc::now();
    let mut inserted = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let line_number = i16::try_from(index + 1)
            .map_err(|_| VoucherError::Database("Line number overflow".to_string()))?;
        let model = voucher_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            voucher_id: Set(voucher_id),
            line_number: Set(line_number),
            account_id: Set(line.account_id),
            debit: Set(line.debit),
            credit: Set(line.credit),
            narration: Set(line.narration.clone()),
            cost_center_id: Set(line.cost_center_id),
            created_at: Set(now.into()),
        };
        inserted.push(model.insert(txn).await.map_err(db_err)?);
    }

    Ok(inserted)
}

async fn insert_allocations(
    txn: &DatabaseTransaction,
    voucher_id: Uuid,
    allocations: &[AllocationInput],
) -> Result<Vec<voucher_allocations::Model>, VoucherError> {
    let now = chrono::Utc::now();
    let mut inserted = Vec::with_capacity(allocations.len());

    for alloc in allocations {
        let model = voucher_allocations::ActiveModel {
            id: Set(Uuid::new_v4()),
            voucher_id: Set(voucher_id),
            invoice_ref: Set(alloc.invoice_ref.clone()),
            amount: Set(alloc.amount),
            created_at: Set(now.into()),
        };
        inserted.push(model.insert(txn).await.map_err(db_err)?);
    }

    Ok(inserted)
}

/// Posts the journal entry for a voucher inside the caller's transaction.
async fn post_voucher_journal(
    txn: &DatabaseTransaction,
    voucher: &vouchers::Model,
    posted_by: Uuid,
) -> Result<Uuid, VoucherError> {
    let lines = voucher_lines::Entity::find()
        .filter(voucher_lines::Column::VoucherId.eq(voucher.id))
        .order_by_asc(voucher_lines::Column::LineNumber)
        .all(txn)
        .await
        .map_err(db_err)?;

    let input = PostEntryInput {
        entry_date: voucher.voucher_date,
        narration: voucher.narration.clone(),
        source: EntrySource::Voucher,
        source_ref: Some(voucher.voucher_number.clone()),
        lines: lines
            .into_iter()
            .map(|l| JournalLineInput {
                account_id: l.account_id,
                debit: l.debit,
                credit: l.credit,
                narration: l.narration,
                cost_center_id: l.cost_center_id,
            })
            .collect(),
        created_by: posted_by,
    };

    let posted = journal::post_entry_in_txn(txn, &input, None).await?;
    Ok(posted.entry.id)
}
