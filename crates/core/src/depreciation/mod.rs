//! Fixed-asset depreciation calculation.
//!
//! Pure computation only: resolving the effective method and rate for an
//! asset, the monthly charge under SLM or WDV, and the salvage clamp. The
//! batch that walks active assets and posts the charges lives in the
//! database layer.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::{DepreciationCharge, compute_monthly_charge, resolve_effective};
pub use error::DepreciationError;
pub use types::{AssetProfile, CategoryDefaults, DepreciationMethod};
