//! `SeaORM` entity definitions.

pub mod asset_categories;
pub mod assets;
pub mod chart_of_accounts;
pub mod cost_centers;
pub mod depreciation_entries;
pub mod document_sequences;
pub mod financial_periods;
pub mod general_ledger;
pub mod journal_entries;
pub mod journal_lines;
pub mod sea_orm_active_enums;
pub mod voucher_allocations;
pub mod voucher_lines;
pub mod vouchers;
