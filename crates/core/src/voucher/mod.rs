//! Voucher workflow management.
//!
//! This module implements the voucher lifecycle state machine, amount-based
//! approval routing, and maker-checker enforcement.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (VoucherType, VoucherStatus, VoucherAction)
//! - `error` - Voucher-specific error types
//! - `service` - State transition logic
//! - `approval` - Approval level derivation and maker-checker rule

pub mod approval;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use approval::ApprovalLevel;
pub use error::VoucherError;
pub use service::VoucherService;
pub use types::{AllocationInput, VoucherAction, VoucherStatus, VoucherType};
