//! Asset and depreciation run repository.
//!
//! A run charges one month of depreciation per asset. Each asset is handled
//! in its own transaction so one bad asset cannot roll back the whole run.
//! The (asset, period date) uniqueness of depreciation entries makes a
//! repeated run a no-op for already charged assets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use ledgerkit_core::depreciation::{
    AssetProfile, CategoryDefaults, DepreciationError, DepreciationMethod, compute_monthly_charge,
    resolve_effective,
};
use ledgerkit_core::journal::{EntrySource, JournalLineInput, PostEntryInput};

use crate::entities::{
    asset_categories, assets, depreciation_entries, financial_periods, sea_orm_active_enums,
};
use crate::repositories::{journal, sequence};

/// Prefix for depreciation entry numbers.
const DEPRECIATION_PREFIX: &str = "DEP";

fn db_err(err: DbErr) -> DepreciationError {
    DepreciationError::Database(err.to_string())
}

/// Input for creating an asset category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Category code (must be unique).
    pub code: String,
    /// Category name.
    pub name: String,
    /// Default depreciation method for assets in this category.
    pub depreciation_method: DepreciationMethod,
    /// Default annual depreciation rate in percent.
    pub depreciation_rate: Decimal,
    /// Expense account debited by depreciation postings.
    pub expense_account_id: Option<Uuid>,
    /// Accumulated depreciation account credited by postings.
    pub accumulated_account_id: Option<Uuid>,
}

/// Input for creating an asset.
#[derive(Debug, Clone)]
pub struct CreateAssetInput {
    /// Asset code (must be unique).
    pub code: String,
    /// Asset name.
    pub name: String,
    /// The category the asset belongs to.
    pub category_id: Uuid,
    /// Date the asset was capitalized.
    pub capitalization_date: NaiveDate,
    /// Capitalized value.
    pub capitalized_value: Decimal,
    /// Salvage value retained at end of life.
    pub salvage_value: Decimal,
    /// Per-asset method override.
    pub method_override: Option<DepreciationMethod>,
    /// Per-asset annual rate override in percent.
    pub rate_override: Option<Decimal>,
}

/// How a single asset fared in a depreciation run.
#[derive(Debug)]
pub enum AssetRunStatus {
    /// A charge was recorded.
    Charged(depreciation_entries::Model),
    /// The asset already has an entry for this period date.
    AlreadyCharged,
    /// Book value has reached salvage; nothing to charge.
    FullyDepreciated,
    /// The asset could not be charged.
    Failed(DepreciationError),
}

/// Per-asset outcome of a depreciation run.
#[derive(Debug)]
pub struct AssetRunOutcome {
    /// The asset ID.
    pub asset_id: Uuid,
    /// What happened to the asset.
    pub status: AssetRunStatus,
}

/// Summary of a depreciation run.
#[derive(Debug)]
pub struct DepreciationRunSummary {
    /// The period date the run charged.
    pub period_date: NaiveDate,
    /// Per-asset outcomes in processing order.
    pub outcomes: Vec<AssetRunOutcome>,
}

/// Depreciation repository for assets, categories, and runs.
#[derive(Debug, Clone)]
pub struct DepreciationRepository {
    db: DatabaseConnection,
}

impl DepreciationRepository {
    /// Creates a new depreciation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an asset category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<asset_categories::Model, DepreciationError> {
        let now = chrono::Utc::now().into();
        let category = asset_categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            depreciation_method: Set(input.depreciation_method.into()),
            depreciation_rate: Set(input.depreciation_rate),
            expense_account_id: Set(input.expense_account_id),
            accumulated_account_id: Set(input.accumulated_account_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        category.insert(&self.db).await.map_err(db_err)
    }

    /// Creates an asset with book value equal to its capitalized value.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist.
    pub async fn create_asset(
        &self,
        input: CreateAssetInput,
    ) -> Result<assets::Model, DepreciationError> {
        asset_categories::Entity::find_by_id(input.category_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DepreciationError::CategoryNotFound(input.category_id))?;

        let now = chrono::Utc::now().into();
        let asset = assets::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            category_id: Set(input.category_id),
            capitalization_date: Set(input.capitalization_date),
            capitalized_value: Set(input.capitalized_value),
            salvage_value: Set(input.salvage_value),
            accumulated_depreciation: Set(Decimal::ZERO),
            current_book_value: Set(input.capitalized_value),
            method_override: Set(input.method_override.map(Into::into)),
            rate_override: Set(input.rate_override),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        asset.insert(&self.db).await.map_err(db_err)
    }

    /// Finds an asset by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_asset(&self, id: Uuid) -> Result<Option<assets::Model>, DepreciationError> {
        assets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Lists the depreciation entries recorded for an asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn asset_history(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<depreciation_entries::Model>, DepreciationError> {
        depreciation_entries::Entity::find()
            .filter(depreciation_entries::Column::AssetId.eq(asset_id))
            .order_by_asc(depreciation_entries::Column::PeriodDate)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Runs one month of depreciation.
    ///
    /// With `asset_ids` set, only those assets are processed; otherwise every
    /// active asset is. Assets already charged for `period_date` and assets
    /// at salvage are skipped. When the category carries both posting
    /// accounts and an open period covers `period_date`, a journal entry is
    /// posted with the charge; otherwise the charge is recorded unposted.
    ///
    /// # Errors
    ///
    /// Returns an error only when the asset list itself cannot be loaded;
    /// per-asset failures are reported in the summary.
    pub async fn run(
        &self,
        period_date: NaiveDate,
        asset_ids: Option<Vec<Uuid>>,
        run_by: Uuid,
    ) -> Result<DepreciationRunSummary, DepreciationError> {
        let targets = match asset_ids {
            Some(ids) => {
                let found = assets::Entity::find()
                    .filter(assets::Column::Id.is_in(ids.clone()))
                    .all(&self.db)
                    .await
                    .map_err(db_err)?;
                let mut outcomes = Vec::new();
                for id in &ids {
                    if !found.iter().any(|a| a.id == *id) {
                        outcomes.push(AssetRunOutcome {
                            asset_id: *id,
                            status: AssetRunStatus::Failed(DepreciationError::AssetNotFound(*id)),
                        });
                    }
                }
                (found, outcomes)
            }
            None => {
                let found = assets::Entity::find()
                    .filter(assets::Column::IsActive.eq(true))
                    .order_by_asc(assets::Column::Code)
                    .all(&self.db)
                    .await
                    .map_err(db_err)?;
                (found, Vec::new())
            }
        };
        let (assets_to_run, mut outcomes) = targets;

        for asset in assets_to_run {
            let asset_id = asset.id;
            let status = match self.run_single(asset, period_date, run_by).await {
                Ok(status) => status,
                Err(err) => AssetRunStatus::Failed(err),
            };
            outcomes.push(AssetRunOutcome { asset_id, status });
        }

        Ok(DepreciationRunSummary {
            period_date,
            outcomes,
        })
    }

    async fn run_single(
        &self,
        asset: assets::Model,
        period_date: NaiveDate,
        run_by: Uuid,
    ) -> Result<AssetRunStatus, DepreciationError> {
        if !asset.is_active {
            return Err(DepreciationError::AssetInactive(asset.id));
        }

        let txn = self.db.begin().await.map_err(db_err)?;

        // Re-read under lock; a concurrent run may have advanced the asset
        let asset = assets::Entity::find_by_id(asset.id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(DepreciationError::AssetNotFound(asset.id))?;

        let existing = depreciation_entries::Entity::find()
            .filter(depreciation_entries::Column::AssetId.eq(asset.id))
            .filter(depreciation_entries::Column::PeriodDate.eq(period_date))
            .one(&txn)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Ok(AssetRunStatus::AlreadyCharged);
        }

        let category = asset_categories::Entity::find_by_id(asset.category_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(DepreciationError::CategoryNotFound(asset.category_id))?;

        let profile = AssetProfile {
            capitalized_value: asset.capitalized_value,
            salvage_value: asset.salvage_value,
            accumulated_depreciation: asset.accumulated_depreciation,
            method_override: asset.method_override.as_ref().map(Into::into),
            rate_override: asset.rate_override,
        };
        let defaults = CategoryDefaults {
            method: (&category.depreciation_method).into(),
            rate: category.depreciation_rate,
        };

        let (method, rate) = resolve_effective(asset.id, &profile, defaults)?;
        let Some(charge) = compute_monthly_charge(&profile, method, rate) else {
            return Ok(AssetRunStatus::FullyDepreciated);
        };

        let entry_number = sequence::next_document_number(&txn, DEPRECIATION_PREFIX, period_date)
            .await
            .map_err(db_err)?;

        let journal_entry_id = post_charge_if_possible(
            &txn,
            &asset,
            &category,
            &entry_number,
            period_date,
            charge.amount,
            run_by,
        )
        .await?;

        let now = chrono::Utc::now();
        let entry = depreciation_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            entry_number: Set(entry_number),
            asset_id: Set(asset.id),
            period_date: Set(period_date),
            amount: Set(charge.amount),
            book_value_before: Set(asset.current_book_value),
            book_value_after: Set(charge.new_book_value),
            journal_entry_id: Set(journal_entry_id),
            posted: Set(journal_entry_id.is_some()),
            created_at: Set(now.into()),
        };
        let entry = entry.insert(&txn).await.map_err(db_err)?;

        let mut active: assets::ActiveModel = asset.into();
        active.accumulated_depreciation = Set(charge.new_accumulated);
        active.current_book_value = Set(charge.new_book_value);
        active.updated_at = Set(now.into());
        active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(AssetRunStatus::Charged(entry))
    }
}

/// Posts the depreciation journal entry when the category carries both
/// posting accounts and an open period covers the period date. Otherwise the
/// charge is recorded without a posting and a warning is logged.
async fn post_charge_if_possible(
    txn: &DatabaseTransaction,
    asset: &assets::Model,
    category: &asset_categories::Model,
    entry_number: &str,
    period_date: NaiveDate,
    amount: Decimal,
    run_by: Uuid,
) -> Result<Option<Uuid>, DepreciationError> {
    let (Some(expense_account_id), Some(accumulated_account_id)) =
        (category.expense_account_id, category.accumulated_account_id)
    else {
        tracing::warn!(
            asset_id = %asset.id,
            category_id = %category.id,
            "Depreciation charged without posting: category has no account mapping"
        );
        return Ok(None);
    };

    let open_period = financial_periods::Entity::find()
        .filter(financial_periods::Column::StartDate.lte(period_date))
        .filter(financial_periods::Column::EndDate.gte(period_date))
        .filter(
            financial_periods::Column::Status.eq(sea_orm_active_enums::PeriodStatus::Open),
        )
        .one(txn)
        .await
        .map_err(db_err)?;
    if open_period.is_none() {
        tracing::warn!(
            asset_id = %asset.id,
            %period_date,
            "Depreciation charged without posting: no open period covers the date"
        );
        return Ok(None);
    }

    let input = PostEntryInput {
        entry_date: period_date,
        narration: format!("Depreciation for {}", asset.name),
        source: EntrySource::Depreciation,
        source_ref: Some(entry_number.to_string()),
        lines: vec![
            JournalLineInput::debit(expense_account_id, amount),
            JournalLineInput::credit(accumulated_account_id, amount),
        ],
        created_by: run_by,
    };

    let posted = journal::post_entry_in_txn(txn, &input, None).await?;
    Ok(Some(posted.entry.id))
}
