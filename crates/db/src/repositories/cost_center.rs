//! Cost center repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use thiserror::Error;
use uuid::Uuid;

use ledgerkit_shared::error::ErrorKind;

use crate::entities::cost_centers;

/// Cost center operation errors.
#[derive(Debug, Error)]
pub enum CostCenterError {
    #[error("Cost center code already exists: {0}")]
    DuplicateCode(String),

    #[error("Cost center code cannot be blank")]
    BlankCode,

    #[error("Cost center not found: {0}")]
    NotFound(Uuid),

    #[error("Parent cost center not found: {0}")]
    ParentNotFound(Uuid),

    #[error("Cost center has active children")]
    HasActiveChildren,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CostCenterError {
    /// Returns the failure classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateCode(_) | Self::BlankCode => ErrorKind::ValidationFailure,
            Self::HasActiveChildren => ErrorKind::StateConflict,
            Self::NotFound(_) | Self::ParentNotFound(_) => ErrorKind::ReferenceFailure,
            Self::Database(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Input for creating a cost center.
#[derive(Debug, Clone)]
pub struct CreateCostCenterInput {
    /// Cost center code (must be unique).
    pub code: String,
    /// Cost center name.
    pub name: String,
    /// Parent cost center for hierarchical grouping.
    pub parent_id: Option<Uuid>,
}

/// Cost center repository.
#[derive(Debug, Clone)]
pub struct CostCenterRepository {
    db: DatabaseConnection,
}

impl CostCenterRepository {
    /// Creates a new cost center repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new cost center.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is blank or taken, or the parent does
    /// not exist.
    pub async fn create_cost_center(
        &self,
        input: CreateCostCenterInput,
    ) -> Result<cost_centers::Model, CostCenterError> {
        if input.code.trim().is_empty() {
            return Err(CostCenterError::BlankCode);
        }

        let existing = cost_centers::Entity::find()
            .filter(cost_centers::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(CostCenterError::DuplicateCode(input.code));
        }

        if let Some(parent_id) = input.parent_id {
            cost_centers::Entity::find_by_id(parent_id)
                .one(&self.db)
                .await?
                .ok_or(CostCenterError::ParentNotFound(parent_id))?;
        }

        let now = chrono::Utc::now().into();
        let cost_center = cost_centers::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            parent_id: Set(input.parent_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(cost_center.insert(&self.db).await?)
    }

    /// Finds a cost center by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<cost_centers::Model>, CostCenterError> {
        Ok(cost_centers::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists cost centers ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_cost_centers(
        &self,
        active_only: bool,
    ) -> Result<Vec<cost_centers::Model>, CostCenterError> {
        let mut query =
            cost_centers::Entity::find().order_by_asc(cost_centers::Column::Code);

        if active_only {
            query = query.filter(cost_centers::Column::IsActive.eq(true));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Deactivates a cost center.
    ///
    /// # Errors
    ///
    /// Returns an error if the cost center has active children.
    pub async fn deactivate_cost_center(
        &self,
        id: Uuid,
    ) -> Result<cost_centers::Model, CostCenterError> {
        let cost_center = cost_centers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CostCenterError::NotFound(id))?;

        let active_children = cost_centers::Entity::find()
            .filter(cost_centers::Column::ParentId.eq(id))
            .filter(cost_centers::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;

        if active_children > 0 {
            return Err(CostCenterError::HasActiveChildren);
        }

        let mut active: cost_centers::ActiveModel = cost_center.into();
        active.is_active = Set(false);
        Ok(active.update(&self.db).await?)
    }
}
