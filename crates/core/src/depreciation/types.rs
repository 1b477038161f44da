//! Depreciation domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Depreciation method applied to an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepreciationMethod {
    /// Straight-line: a constant monthly charge on the depreciable base.
    StraightLine,
    /// Written-down value: a declining monthly charge on current book value.
    WrittenDownValue,
}

impl DepreciationMethod {
    /// Returns the stored string form of this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StraightLine => "SLM",
            Self::WrittenDownValue => "WDV",
        }
    }

    /// Parses a method from its stored string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SLM" => Some(Self::StraightLine),
            "WDV" => Some(Self::WrittenDownValue),
            _ => None,
        }
    }
}

impl fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Financial snapshot of an asset at calculation time.
///
/// Invariant: `book_value() = capitalized_value - accumulated_depreciation`,
/// and the clamp in the engine keeps it at or above `salvage_value`.
#[derive(Debug, Clone)]
pub struct AssetProfile {
    /// The value at which the asset was capitalized.
    pub capitalized_value: Decimal,
    /// Residual value the asset cannot depreciate below.
    pub salvage_value: Decimal,
    /// Depreciation accumulated so far.
    pub accumulated_depreciation: Decimal,
    /// Per-asset method override; falls back to the category default.
    pub method_override: Option<DepreciationMethod>,
    /// Per-asset annual rate override (percent); falls back to the category
    /// default.
    pub rate_override: Option<Decimal>,
}

impl AssetProfile {
    /// Current book value of the asset.
    #[must_use]
    pub fn book_value(&self) -> Decimal {
        self.capitalized_value - self.accumulated_depreciation
    }

    /// Remaining amount the asset can still depreciate.
    #[must_use]
    pub fn depreciable_remaining(&self) -> Decimal {
        self.book_value() - self.salvage_value
    }
}

/// Method and rate defaults configured on the asset's category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDefaults {
    /// Default depreciation method.
    pub method: DepreciationMethod,
    /// Default annual rate (percent).
    pub rate: Decimal,
}
