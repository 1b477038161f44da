//! Monthly depreciation computation.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::DepreciationError;
use super::types::{AssetProfile, CategoryDefaults, DepreciationMethod};

/// Result of one monthly depreciation calculation for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepreciationCharge {
    /// The charge for the month, clamped so book value stays at or above
    /// salvage.
    pub amount: Decimal,
    /// Accumulated depreciation after applying the charge.
    pub new_accumulated: Decimal,
    /// Book value after applying the charge.
    pub new_book_value: Decimal,
}

/// Resolves the effective method and rate for an asset.
///
/// Per-asset overrides win; otherwise the category defaults apply.
///
/// # Errors
///
/// Returns [`DepreciationError::InvalidRate`] when the effective rate is not
/// in `(0, 100]`.
pub fn resolve_effective(
    asset_id: Uuid,
    asset: &AssetProfile,
    category: CategoryDefaults,
) -> Result<(DepreciationMethod, Decimal), DepreciationError> {
    let method = asset.method_override.unwrap_or(category.method);
    let rate = asset.rate_override.unwrap_or(category.rate);
    if rate <= Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        if rate == Decimal::ZERO && asset.rate_override.is_none() {
            return Err(DepreciationError::NoRateConfigured(asset_id));
        }
        return Err(DepreciationError::InvalidRate(rate));
    }
    Ok((method, rate))
}

/// Computes one month of depreciation for an asset.
///
/// SLM charges a constant `(capitalized - salvage) * rate / 1200` per month;
/// WDV charges `book_value * rate / 1200`. The charge is clamped so book
/// value never drops below salvage. Returns `None` when the asset is
/// already fully depreciated (nothing to charge).
#[must_use]
pub fn compute_monthly_charge(
    asset: &AssetProfile,
    method: DepreciationMethod,
    annual_rate: Decimal,
) -> Option<DepreciationCharge> {
    let remaining = asset.depreciable_remaining();
    if remaining <= Decimal::ZERO {
        return None;
    }

    let monthly_divisor = Decimal::from(1200u32);
    let raw = match method {
        DepreciationMethod::StraightLine => {
            (asset.capitalized_value - asset.salvage_value) * annual_rate / monthly_divisor
        }
        DepreciationMethod::WrittenDownValue => {
            asset.book_value() * annual_rate / monthly_divisor
        }
    };

    let amount = raw.round_dp(2).min(remaining);
    if amount <= Decimal::ZERO {
        return None;
    }

    let new_accumulated = asset.accumulated_depreciation + amount;
    Some(DepreciationCharge {
        amount,
        new_accumulated,
        new_book_value: asset.capitalized_value - new_accumulated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn asset(capitalized: Decimal, salvage: Decimal, accumulated: Decimal) -> AssetProfile {
        AssetProfile {
            capitalized_value: capitalized,
            salvage_value: salvage,
            accumulated_depreciation: accumulated,
            method_override: None,
            rate_override: None,
        }
    }

    #[test]
    fn test_slm_monthly_amount() {
        let a = asset(dec!(120000), dec!(0), dec!(0));
        let charge =
            compute_monthly_charge(&a, DepreciationMethod::StraightLine, dec!(20)).unwrap();
        assert_eq!(charge.amount, dec!(2000));
        assert_eq!(charge.new_accumulated, dec!(2000));
        assert_eq!(charge.new_book_value, dec!(118000));
    }

    #[test]
    fn test_slm_is_constant_across_months() {
        let first = asset(dec!(120000), dec!(0), dec!(0));
        let later = asset(dec!(120000), dec!(0), dec!(50000));
        let c1 = compute_monthly_charge(&first, DepreciationMethod::StraightLine, dec!(20))
            .unwrap();
        let c2 = compute_monthly_charge(&later, DepreciationMethod::StraightLine, dec!(20))
            .unwrap();
        assert_eq!(c1.amount, c2.amount);
    }

    #[test]
    fn test_wdv_declines_with_book_value() {
        let a = asset(dec!(100000), dec!(0), dec!(0));
        let c1 = compute_monthly_charge(&a, DepreciationMethod::WrittenDownValue, dec!(12))
            .unwrap();
        assert_eq!(c1.amount, dec!(1000));

        let a2 = asset(dec!(100000), dec!(0), c1.new_accumulated);
        let c2 = compute_monthly_charge(&a2, DepreciationMethod::WrittenDownValue, dec!(12))
            .unwrap();
        assert_eq!(c2.amount, dec!(990));
        assert!(c2.amount < c1.amount);
    }

    #[test]
    fn test_salvage_clamp() {
        let a = asset(dec!(120000), dec!(100000), dec!(19500));
        let charge =
            compute_monthly_charge(&a, DepreciationMethod::StraightLine, dec!(20)).unwrap();
        // remaining headroom is 500, well under the raw monthly charge
        assert_eq!(charge.amount, dec!(500));
        assert_eq!(charge.new_book_value, dec!(100000));
    }

    #[test]
    fn test_fully_depreciated_asset_produces_no_charge() {
        let a = asset(dec!(120000), dec!(0), dec!(120000));
        assert!(compute_monthly_charge(&a, DepreciationMethod::StraightLine, dec!(20)).is_none());

        let at_salvage = asset(dec!(120000), dec!(20000), dec!(100000));
        assert!(
            compute_monthly_charge(&at_salvage, DepreciationMethod::WrittenDownValue, dec!(20))
                .is_none()
        );
    }

    #[test]
    fn test_sixty_slm_runs_reach_zero() {
        let mut a = asset(dec!(120000), dec!(0), dec!(0));
        let mut runs = 0;
        while let Some(charge) =
            compute_monthly_charge(&a, DepreciationMethod::StraightLine, dec!(20))
        {
            a.accumulated_depreciation = charge.new_accumulated;
            runs += 1;
        }
        assert_eq!(runs, 60);
        assert_eq!(a.book_value(), dec!(0));
    }

    #[test]
    fn test_resolve_effective_prefers_asset_overrides() {
        let id = Uuid::new_v4();
        let defaults = CategoryDefaults {
            method: DepreciationMethod::StraightLine,
            rate: dec!(10),
        };

        let plain = asset(dec!(1000), dec!(0), dec!(0));
        assert_eq!(
            resolve_effective(id, &plain, defaults).unwrap(),
            (DepreciationMethod::StraightLine, dec!(10))
        );

        let overridden = AssetProfile {
            method_override: Some(DepreciationMethod::WrittenDownValue),
            rate_override: Some(dec!(25)),
            ..plain
        };
        assert_eq!(
            resolve_effective(id, &overridden, defaults).unwrap(),
            (DepreciationMethod::WrittenDownValue, dec!(25))
        );
    }

    #[test]
    fn test_resolve_effective_rejects_bad_rates() {
        let id = Uuid::new_v4();
        let plain = asset(dec!(1000), dec!(0), dec!(0));

        let unconfigured = CategoryDefaults {
            method: DepreciationMethod::StraightLine,
            rate: dec!(0),
        };
        assert!(matches!(
            resolve_effective(id, &plain, unconfigured),
            Err(DepreciationError::NoRateConfigured(_))
        ));

        let excessive = CategoryDefaults {
            method: DepreciationMethod::StraightLine,
            rate: dec!(101),
        };
        assert!(matches!(
            resolve_effective(id, &plain, excessive),
            Err(DepreciationError::InvalidRate(_))
        ));
    }
}
