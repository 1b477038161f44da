//! Financial period types and date resolution rules.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ledgerkit_shared::types::PeriodId;

use super::error::FiscalError;

/// Status of a financial period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period accepts postings.
    Open,
    /// Period rejects postings but may be reopened.
    Closed,
    /// Period is permanently sealed.
    Locked,
}

impl PeriodStatus {
    /// Validates a status transition.
    ///
    /// Open and Closed flip freely in either direction; Closed may also be
    /// locked. Locked is terminal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` when the transition is not allowed.
    pub const fn validate_transition(self, to: Self) -> Result<(), FiscalError> {
        let valid = match (self, to) {
            // Same status is a no-op
            (Self::Open, Self::Open) | (Self::Closed, Self::Closed) | (Self::Locked, Self::Locked) => true,
            (Self::Open, Self::Closed)
            | (Self::Closed, Self::Open)
            | (Self::Closed, Self::Locked) => true,
            _ => false,
        };

        if valid {
            Ok(())
        } else {
            Err(FiscalError::InvalidStatusTransition { from: self, to })
        }
    }
}

/// A financial period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    /// Unique identifier.
    pub id: PeriodId,
    /// Period name (e.g., "April 2026").
    pub name: String,
    /// First posting date of the period.
    pub start_date: NaiveDate,
    /// Last posting date of the period.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
}

impl Period {
    /// Returns true if entries can be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Validates that a period's start date is on or before its end date.
///
/// # Errors
///
/// Returns `InvalidDateRange` when `end` precedes `start`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), FiscalError> {
    if end < start {
        return Err(FiscalError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Checks if two inclusive date ranges overlap.
///
/// Ranges [a_start, a_end] and [b_start, b_end] overlap when
/// a_start <= b_end AND a_end >= b_start.
#[must_use]
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// A period produced by [`generate_monthly_periods`], not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPeriod {
    /// Period name (e.g., "April 2026").
    pub name: String,
    /// Position within the generated range, starting at 1.
    pub period_number: i16,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
}

/// Generates one period per calendar month covering [start_date, end_date].
///
/// The final period is truncated to `end_date` when the range does not end on
/// a month boundary.
#[must_use]
pub fn generate_monthly_periods(start_date: NaiveDate, end_date: NaiveDate) -> Vec<GeneratedPeriod> {
    let mut periods = Vec::new();
    let mut current = start_date;
    let mut period_number: i16 = 1;

    while current <= end_date {
        let month_end = last_day_of_month(current.year(), current.month());
        let period_end = if month_end > end_date { end_date } else { month_end };

        periods.push(GeneratedPeriod {
            name: format!("{} {}", month_name(current.month()), current.year()),
            period_number,
            start_date: current,
            end_date: period_end,
        });

        // Move to first day of next month
        current = next_month_start(current.year(), current.month());
        period_number += 1;
    }

    periods
}

/// Returns the last day of a month.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    next_month_start(year, month)
        .pred_opt()
        .unwrap_or_else(|| NaiveDate::MIN)
}

fn next_month_start(year: i32, month: u32) -> NaiveDate {
    let (y, m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(NaiveDate::MAX)
}

/// Returns the English month name.
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let period = Period {
            id: PeriodId::new(),
            name: "April 2026".into(),
            start_date: date(2026, 4, 1),
            end_date: date(2026, 4, 30),
            status: PeriodStatus::Open,
        };

        assert!(period.contains_date(date(2026, 4, 1)));
        assert!(period.contains_date(date(2026, 4, 30)));
        assert!(!period.contains_date(date(2026, 3, 31)));
        assert!(!period.contains_date(date(2026, 5, 1)));
    }

    #[test]
    fn test_status_transitions_valid() {
        assert!(PeriodStatus::Open.validate_transition(PeriodStatus::Closed).is_ok());
        assert!(PeriodStatus::Closed.validate_transition(PeriodStatus::Open).is_ok());
        assert!(PeriodStatus::Closed.validate_transition(PeriodStatus::Locked).is_ok());
        // Same status is a no-op
        assert!(PeriodStatus::Open.validate_transition(PeriodStatus::Open).is_ok());
    }

    #[test]
    fn test_status_transitions_invalid() {
        assert!(PeriodStatus::Open.validate_transition(PeriodStatus::Locked).is_err());
        assert!(PeriodStatus::Locked.validate_transition(PeriodStatus::Open).is_err());
        assert!(PeriodStatus::Locked.validate_transition(PeriodStatus::Closed).is_err());
    }

    #[test]
    fn test_generate_monthly_periods_full_year() {
        let periods = generate_monthly_periods(date(2026, 1, 1), date(2026, 12, 31));

        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0].name, "January 2026");
        assert_eq!(periods[0].period_number, 1);
        assert_eq!(periods[0].start_date, date(2026, 1, 1));
        assert_eq!(periods[0].end_date, date(2026, 1, 31));
        assert_eq!(periods[11].name, "December 2026");
        assert_eq!(periods[11].end_date, date(2026, 12, 31));
    }

    #[test]
    fn test_generate_monthly_periods_apr_to_mar() {
        let periods = generate_monthly_periods(date(2026, 4, 1), date(2027, 3, 31));

        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0].name, "April 2026");
        assert_eq!(periods[11].name, "March 2027");
    }

    #[test]
    fn test_generate_monthly_periods_truncates_final_period() {
        let periods = generate_monthly_periods(date(2026, 1, 1), date(2026, 2, 15));

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1].end_date, date(2026, 2, 15));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2026, 1), date(2026, 1, 31));
        assert_eq!(last_day_of_month(2026, 2), date(2026, 2, 28));
        assert_eq!(last_day_of_month(2024, 2), date(2024, 2, 29)); // Leap year
        assert_eq!(last_day_of_month(2026, 4), date(2026, 4, 30));
        assert_eq!(last_day_of_month(2026, 12), date(2026, 12, 31));
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (2020i32..=2030, 1u32..=12, 1u32..=28)
            .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    fn valid_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
        date_strategy().prop_flat_map(|start| {
            (Just(start), 1i64..=365).prop_map(move |(s, days)| (s, s + chrono::Duration::days(days)))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// **Property: ranges sharing a day overlap**
        #[test]
        fn prop_overlapping_ranges_detected(
            (a_start, a_end) in valid_range(),
            offset in 0i64..=180,
        ) {
            let b_start = a_start + chrono::Duration::days(offset);
            if b_start <= a_end {
                let b_end = b_start + chrono::Duration::days(30);
                prop_assert!(ranges_overlap(a_start, a_end, b_start, b_end));
            }
        }

        /// **Property: disjoint ranges do not overlap**
        #[test]
        fn prop_disjoint_ranges_not_flagged(
            (a_start, a_end) in valid_range(),
            gap in 1i64..=365,
        ) {
            let b_start = a_end + chrono::Duration::days(gap);
            let b_end = b_start + chrono::Duration::days(30);
            prop_assert!(!ranges_overlap(a_start, a_end, b_start, b_end));
        }

        /// **Property: overlap detection is symmetric**
        #[test]
        fn prop_overlap_is_symmetric(
            (a_start, a_end) in valid_range(),
            (b_start, b_end) in valid_range(),
        ) {
            prop_assert_eq!(
                ranges_overlap(a_start, a_end, b_start, b_end),
                ranges_overlap(b_start, b_end, a_start, a_end)
            );
        }

        /// **Property: adjacent ranges do not overlap**
        #[test]
        fn prop_adjacent_ranges_do_not_overlap((a_start, a_end) in valid_range()) {
            let b_start = a_end + chrono::Duration::days(1);
            let b_end = b_start + chrono::Duration::days(30);
            prop_assert!(!ranges_overlap(a_start, a_end, b_start, b_end));
        }

        /// **Property: generated months tile the range with no gaps**
        #[test]
        fn prop_generated_periods_are_contiguous((start, end) in valid_range()) {
            let periods = generate_monthly_periods(start, end);
            prop_assert!(!periods.is_empty());
            prop_assert_eq!(periods[0].start_date, start);
            prop_assert_eq!(periods[periods.len() - 1].end_date, end);

            for pair in periods.windows(2) {
                prop_assert_eq!(
                    pair[1].start_date,
                    pair[0].end_date + chrono::Duration::days(1)
                );
            }
        }
    }
}
