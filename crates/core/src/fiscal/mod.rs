//! Financial period lifecycle and date resolution.

pub mod error;
pub mod period;

pub use error::FiscalError;
pub use period::{
    GeneratedPeriod, Period, PeriodStatus, generate_monthly_periods, last_day_of_month, month_name,
    ranges_overlap, validate_date_range,
};
