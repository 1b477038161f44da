//! Depreciation error types.

use chrono::NaiveDate;
use ledgerkit_shared::ErrorKind;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::journal::JournalError;

/// Errors that can occur while computing or posting depreciation.
#[derive(Debug, Error)]
pub enum DepreciationError {
    // ========== Validation Errors ==========
    /// Neither the asset nor its category configures a rate.
    #[error("No depreciation rate configured for asset {0}")]
    NoRateConfigured(Uuid),

    /// The annual rate must be between 0 (exclusive) and 100 (inclusive).
    #[error("Invalid depreciation rate: {0}")]
    InvalidRate(Decimal),

    // ========== State Errors ==========
    /// An entry already exists for this asset and period date.
    #[error("Depreciation already recorded for asset {asset_id} on {period_date}")]
    DuplicateEntry {
        /// The asset.
        asset_id: Uuid,
        /// The depreciation period date.
        period_date: NaiveDate,
    },

    /// Asset is not active and cannot be depreciated.
    #[error("Asset {0} is not active")]
    AssetInactive(Uuid),

    // ========== Reference Errors ==========
    /// Asset not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    /// Asset category not found.
    #[error("Asset category not found: {0}")]
    CategoryNotFound(Uuid),

    // ========== Journal Errors ==========
    /// A journal-level failure while posting the charge.
    #[error(transparent)]
    Journal(#[from] JournalError),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl DepreciationError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoRateConfigured(_) => "NO_RATE_CONFIGURED",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::DuplicateEntry { .. } => "DUPLICATE_DEPRECIATION",
            Self::AssetInactive(_) => "ASSET_INACTIVE",
            Self::AssetNotFound(_) => "ASSET_NOT_FOUND",
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::Journal(inner) => inner.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the failure classification for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoRateConfigured(_) | Self::InvalidRate(_) => ErrorKind::ValidationFailure,
            Self::DuplicateEntry { .. } | Self::AssetInactive(_) => ErrorKind::StateConflict,
            Self::AssetNotFound(_) | Self::CategoryNotFound(_) => ErrorKind::ReferenceFailure,
            Self::Journal(inner) => inner.kind(),
            Self::Database(_) => ErrorKind::Infrastructure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_classification() {
        let id = Uuid::new_v4();
        assert_eq!(
            DepreciationError::NoRateConfigured(id).kind(),
            ErrorKind::ValidationFailure
        );
        assert_eq!(
            DepreciationError::DuplicateEntry {
                asset_id: id,
                period_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            }
            .kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            DepreciationError::AssetNotFound(id).kind(),
            ErrorKind::ReferenceFailure
        );
        assert_eq!(
            DepreciationError::InvalidRate(dec!(150)).error_code(),
            "INVALID_RATE"
        );
    }
}
