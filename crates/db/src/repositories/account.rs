//! Account repository for chart of accounts database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use ledgerkit_core::coa::{AccountSubtype, AccountType, CoaError, CoaService, ParentInfo};

use crate::entities::chart_of_accounts;

fn db_err(err: DbErr) -> CoaError {
    CoaError::Database(err.to_string())
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (must be unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account description.
    pub description: Option<String>,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype for reporting classification.
    pub account_subtype: Option<AccountSubtype>,
    /// Parent account ID for hierarchical structure.
    pub parent_id: Option<Uuid>,
    /// Whether this is a group (non-postable) account.
    pub is_group: bool,
    /// Opening balance (leaf accounts only).
    pub opening_balance: Decimal,
}

/// Input for updating an account.
///
/// Code, type, and hierarchy are fixed at creation; balances belong to the
/// journal engine.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Account name.
    pub name: Option<String>,
    /// Account description.
    pub description: Option<Option<String>>,
    /// Account subtype.
    pub account_subtype: Option<Option<AccountSubtype>>,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by account type.
    pub account_type: Option<AccountType>,
    /// Filter by active status.
    pub is_active: Option<bool>,
    /// Filter by parent ID (`Some(None)` = root accounts only).
    pub parent_id: Option<Option<Uuid>>,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken, the parent is missing or not a
    /// group account, or the structural rules reject the input.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, CoaError> {
        let existing = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_some() {
            return Err(CoaError::DuplicateCode(input.code));
        }

        let parent = match input.parent_id {
            Some(parent_id) => {
                let parent = chart_of_accounts::Entity::find_by_id(parent_id)
                    .one(&self.db)
                    .await
                    .map_err(db_err)?
                    .ok_or(CoaError::ParentNotFound(parent_id))?;
                Some(ParentInfo {
                    id: parent.id,
                    account_type: (&parent.account_type).into(),
                    is_group: parent.is_group,
                })
            }
            None => None,
        };

        CoaService::validate_new_account(
            &input.code,
            input.account_type,
            input.is_group,
            input.opening_balance,
            parent,
        )?;

        let now = chrono::Utc::now().into();
        let account = chart_of_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            account_type: Set(input.account_type.into()),
            account_subtype: Set(input.account_subtype.map(Into::into)),
            parent_id: Set(input.parent_id),
            is_group: Set(input.is_group),
            opening_balance: Set(input.opening_balance),
            current_balance: Set(input.opening_balance),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        account.insert(&self.db).await.map_err(db_err)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<chart_of_accounts::Model>, CoaError> {
        chart_of_accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Finds an account by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<chart_of_accounts::Model>, CoaError> {
        chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Lists accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<chart_of_accounts::Model>, CoaError> {
        let mut query = chart_of_accounts::Entity::find()
            .order_by_asc(chart_of_accounts::Column::Code);

        if let Some(account_type) = filter.account_type {
            let stored: crate::entities::sea_orm_active_enums::AccountType = account_type.into();
            query = query.filter(chart_of_accounts::Column::AccountType.eq(stored));
        }

        if let Some(is_active) = filter.is_active {
            query = query.filter(chart_of_accounts::Column::IsActive.eq(is_active));
        }

        if let Some(parent_id) = filter.parent_id {
            query = match parent_id {
                Some(pid) => query.filter(chart_of_accounts::Column::ParentId.eq(pid)),
                None => query.filter(chart_of_accounts::Column::ParentId.is_null()),
            };
        }

        query.all(&self.db).await.map_err(db_err)
    }

    /// Updates an account's descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<chart_of_accounts::Model, CoaError> {
        let account = chart_of_accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(CoaError::AccountNotFound(id))?;

        let mut active: chart_of_accounts::ActiveModel = account.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(subtype) = input.account_subtype {
            active.account_subtype = Set(subtype.map(Into::into));
        }

        active.update(&self.db).await.map_err(db_err)
    }

    /// Deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account has active children or a non-zero
    /// balance.
    pub async fn deactivate_account(
        &self,
        id: Uuid,
    ) -> Result<chart_of_accounts::Model, CoaError> {
        let account = chart_of_accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(CoaError::AccountNotFound(id))?;

        let active_children = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::ParentId.eq(id))
            .filter(chart_of_accounts::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        CoaService::validate_deactivation(id, active_children, account.current_balance)?;

        let mut active: chart_of_accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        active.update(&self.db).await.map_err(db_err)
    }
}
