//! Property-based tests for the depreciation engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::compute_monthly_charge;
use super::types::{AssetProfile, DepreciationMethod};

fn profile(capitalized: i64, salvage: i64, accumulated: i64) -> AssetProfile {
    AssetProfile {
        capitalized_value: Decimal::from(capitalized),
        salvage_value: Decimal::from(salvage),
        accumulated_depreciation: Decimal::from(accumulated),
        method_override: None,
        rate_override: None,
    }
}

fn any_method() -> impl Strategy<Value = DepreciationMethod> {
    prop_oneof![
        Just(DepreciationMethod::StraightLine),
        Just(DepreciationMethod::WrittenDownValue),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property: book value never drops below salvage after a charge.**
    #[test]
    fn prop_book_value_never_below_salvage(
        capitalized in 1_000i64..10_000_000,
        salvage_pct in 0i64..90,
        depreciated_pct in 0i64..100,
        rate in 1i64..100,
        method in any_method(),
    ) {
        let salvage = capitalized * salvage_pct / 100;
        let accumulated = (capitalized - salvage) * depreciated_pct / 100;
        let asset = profile(capitalized, salvage, accumulated);

        if let Some(charge) = compute_monthly_charge(&asset, method, Decimal::from(rate)) {
            prop_assert!(charge.new_book_value >= asset.salvage_value);
            prop_assert!(charge.amount > Decimal::ZERO);
        }
    }

    /// **Property: the charge always reconciles accumulated and book value
    /// against capitalized value.**
    #[test]
    fn prop_charge_reconciles(
        capitalized in 1_000i64..10_000_000,
        rate in 1i64..100,
        method in any_method(),
    ) {
        let asset = profile(capitalized, 0, 0);
        if let Some(charge) = compute_monthly_charge(&asset, method, Decimal::from(rate)) {
            prop_assert_eq!(
                charge.new_book_value,
                asset.capitalized_value - charge.new_accumulated
            );
            prop_assert_eq!(
                charge.new_accumulated,
                asset.accumulated_depreciation + charge.amount
            );
        }
    }

    /// **Property: repeated runs terminate with book value exactly at
    /// salvage, never oscillating past it.**
    #[test]
    fn prop_runs_terminate_at_salvage(
        capitalized in 1_000i64..500_000,
        salvage_pct in 0i64..50,
        rate in 5i64..100,
        method in any_method(),
    ) {
        let salvage = capitalized * salvage_pct / 100;
        let mut asset = profile(capitalized, salvage, 0);

        // WDV asymptotes, so the clamp plus rounding must still terminate
        let mut guard = 0;
        while let Some(charge) =
            compute_monthly_charge(&asset, method, Decimal::from(rate))
        {
            asset.accumulated_depreciation = charge.new_accumulated;
            guard += 1;
            prop_assert!(guard < 100_000);
        }
        prop_assert!(asset.book_value() >= asset.salvage_value);
        prop_assert!(
            compute_monthly_charge(&asset, method, Decimal::from(rate)).is_none()
        );
    }
}
