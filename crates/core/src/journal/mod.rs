//! Double-entry journal logic.
//!
//! This module implements the core journal functionality:
//! - Line-level debit/credit validation
//! - Entry balance validation
//! - Running balance calculations
//! - Reversing entry construction
//! - Error types for journal operations

pub mod balance;
pub mod error;
pub mod reversal;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use balance::{RunningBalance, fold_changes};
pub use error::JournalError;
pub use reversal::{PostedLine, build_reversal_lines};
pub use service::{AccountInfo, JournalService};
pub use types::{EntrySource, EntryStatus, EntryTotals, JournalLineInput, PostEntryInput};
