//! Financial report generation.
//!
//! Pure aggregation over account balances supplied by the ledger projector:
//! - Trial Balance
//! - Balance Sheet
//! - Income Statement

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::{
    AccountBalance, BalanceSheetReport, BalanceSheetSection, IncomeStatementReport,
    IncomeStatementSection, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
