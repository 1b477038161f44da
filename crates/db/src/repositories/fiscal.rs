//! Financial period repository for database operations.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use ledgerkit_core::fiscal::{
    FiscalError, PeriodStatus, generate_monthly_periods, ranges_overlap, validate_date_range,
};
use ledgerkit_core::journal::EntryStatus;

use crate::entities::{financial_periods, journal_entries, sea_orm_active_enums, vouchers};

fn db_err(err: DbErr) -> FiscalError {
    FiscalError::Database(err.to_string())
}

/// Financial period repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a single period after range and overlap validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted or overlaps an existing
    /// period.
    pub async fn create_period(
        &self,
        name: String,
        period_number: i16,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<financial_periods::Model, FiscalError> {
        validate_date_range(start_date, end_date)?;
        self.check_overlap(start_date, end_date).await?;

        let now = chrono::Utc::now().into();
        let period = financial_periods::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            period_number: Set(period_number),
            start_date: Set(start_date),
            end_date: Set(end_date),
            status: Set(sea_orm_active_enums::PeriodStatus::Open),
            created_at: Set(now),
            updated_at: Set(now),
        };

        period.insert(&self.db).await.map_err(db_err)
    }

    /// Generates one open period per calendar month covering the range.
    ///
    /// All periods are inserted in a single transaction; if any month
    /// overlaps an existing period the whole batch is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted or overlaps an existing
    /// period.
    pub async fn generate_periods(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<financial_periods::Model>, FiscalError> {
        validate_date_range(start_date, end_date)?;
        self.check_overlap(start_date, end_date).await?;

        let generated = generate_monthly_periods(start_date, end_date);
        let txn = self.db.begin().await.map_err(db_err)?;

        let mut created = Vec::with_capacity(generated.len());
        for period in generated {
            let now = chrono::Utc::now().into();
            let model = financial_periods::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(period.name),
                period_number: Set(period.period_number),
                start_date: Set(period.start_date),
                end_date: Set(period.end_date),
                status: Set(sea_orm_active_enums::PeriodStatus::Open),
                created_at: Set(now),
                updated_at: Set(now),
            };
            created.push(model.insert(&txn).await.map_err(db_err)?);
        }

        txn.commit().await.map_err(db_err)?;
        Ok(created)
    }

    /// Finds a period by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<financial_periods::Model>, FiscalError> {
        financial_periods::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Finds the period containing a posting date.
    ///
    /// Period ranges never overlap, so at most one period matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_period_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<financial_periods::Model>, FiscalError> {
        financial_periods::Entity::find()
            .filter(financial_periods::Column::StartDate.lte(date))
            .filter(financial_periods::Column::EndDate.gte(date))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Lists all periods ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_periods(&self) -> Result<Vec<financial_periods::Model>, FiscalError> {
        financial_periods::Entity::find()
            .order_by_asc(financial_periods::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Transitions a period to a new status.
    ///
    /// Closing runs a hard gate: draft journal entries and unresolved
    /// vouchers dated inside the period block the close and are reported by
    /// count.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is invalid or the close gate
    /// fails.
    pub async fn update_status(
        &self,
        id: Uuid,
        to: PeriodStatus,
    ) -> Result<financial_periods::Model, FiscalError> {
        let period = financial_periods::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(FiscalError::PeriodNotFound(id))?;

        let current: PeriodStatus = (&period.status).into();
        current.validate_transition(to)?;

        if to == PeriodStatus::Closed && current != PeriodStatus::Closed {
            let blocking = self
                .count_blocking_documents(period.start_date, period.end_date)
                .await?;
            if blocking > 0 {
                return Err(FiscalError::UnpostedEntriesInRange(blocking));
            }
        }

        let mut active: financial_periods::ActiveModel = period.into();
        active.status = Set(to.into());
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await.map_err(db_err)
    }

    /// Counts documents that would still need posting: draft journal
    /// entries plus vouchers that have neither been posted nor cancelled.
    async fn count_blocking_documents(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<u64, FiscalError> {
        let draft_entries = journal_entries::Entity::find()
            .filter(journal_entries::Column::EntryDate.gte(start_date))
            .filter(journal_entries::Column::EntryDate.lte(end_date))
            .filter(
                journal_entries::Column::Status
                    .eq(sea_orm_active_enums::EntryStatus::from(EntryStatus::Draft)),
            )
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let open_vouchers = vouchers::Entity::find()
            .filter(vouchers::Column::VoucherDate.gte(start_date))
            .filter(vouchers::Column::VoucherDate.lte(end_date))
            .filter(vouchers::Column::Status.is_in([
                sea_orm_active_enums::VoucherStatus::Draft,
                sea_orm_active_enums::VoucherStatus::PendingApproval,
                sea_orm_active_enums::VoucherStatus::Approved,
                sea_orm_active_enums::VoucherStatus::Rejected,
            ]))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(draft_entries + open_vouchers)
    }

    async fn check_overlap(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(), FiscalError> {
        let periods = financial_periods::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        for existing in periods {
            if ranges_overlap(start_date, end_date, existing.start_date, existing.end_date) {
                return Err(FiscalError::OverlappingPeriod(existing.id));
            }
        }

        Ok(())
    }
}
