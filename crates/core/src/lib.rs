//! Core accounting logic for LedgerKit.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `coa` - Chart of accounts classification and balance conventions
//! - `fiscal` - Financial period lifecycle and date resolution
//! - `journal` - Double-entry journal validation and running balances
//! - `voucher` - Voucher workflow state machine and approval routing
//! - `depreciation` - Monthly depreciation calculation
//! - `reports` - Trial balance, balance sheet, and income statement aggregation
//! - `sequence` - Document number formatting

pub mod coa;
pub mod depreciation;
pub mod fiscal;
pub mod journal;
pub mod reports;
pub mod sequence;
pub mod voucher;
