//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    #[sea_orm(string_value = "asset")]
    Asset,
    #[sea_orm(string_value = "liability")]
    Liability,
    #[sea_orm(string_value = "equity")]
    Equity,
    #[sea_orm(string_value = "revenue")]
    Revenue,
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Account subtype enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_subtype")]
pub enum AccountSubtype {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "bank")]
    Bank,
    #[sea_orm(string_value = "receivable")]
    Receivable,
    #[sea_orm(string_value = "current_asset")]
    CurrentAsset,
    #[sea_orm(string_value = "fixed_asset")]
    FixedAsset,
    #[sea_orm(string_value = "payable")]
    Payable,
    #[sea_orm(string_value = "current_liability")]
    CurrentLiability,
    #[sea_orm(string_value = "long_term_liability")]
    LongTermLiability,
    #[sea_orm(string_value = "capital")]
    Capital,
    #[sea_orm(string_value = "reserve")]
    Reserve,
    #[sea_orm(string_value = "direct_income")]
    DirectIncome,
    #[sea_orm(string_value = "indirect_income")]
    IndirectIncome,
    #[sea_orm(string_value = "direct_expense")]
    DirectExpense,
    #[sea_orm(string_value = "indirect_expense")]
    IndirectExpense,
}

/// Financial period status enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "period_status")]
pub enum PeriodStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
    #[sea_orm(string_value = "LOCKED")]
    Locked,
}

/// Journal entry status enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
pub enum EntryStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "posted")]
    Posted,
    #[sea_orm(string_value = "reversed")]
    Reversed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Journal entry source enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_source")]
pub enum EntrySource {
    #[sea_orm(string_value = "manual")]
    Manual,
    #[sea_orm(string_value = "voucher")]
    Voucher,
    #[sea_orm(string_value = "depreciation")]
    Depreciation,
    #[sea_orm(string_value = "reversal")]
    Reversal,
}

/// Voucher type enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_type")]
pub enum VoucherType {
    #[sea_orm(string_value = "payment")]
    Payment,
    #[sea_orm(string_value = "receipt")]
    Receipt,
    #[sea_orm(string_value = "contra")]
    Contra,
    #[sea_orm(string_value = "journal")]
    Journal,
    #[sea_orm(string_value = "rcm")]
    Rcm,
    #[sea_orm(string_value = "sales")]
    Sales,
    #[sea_orm(string_value = "purchase")]
    Purchase,
    #[sea_orm(string_value = "credit_note")]
    CreditNote,
    #[sea_orm(string_value = "debit_note")]
    DebitNote,
}

/// Voucher status enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_status")]
pub enum VoucherStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending_approval")]
    PendingApproval,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "posted")]
    Posted,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Approval level enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_level")]
pub enum ApprovalLevel {
    #[sea_orm(string_value = "LEVEL_1")]
    Level1,
    #[sea_orm(string_value = "LEVEL_2")]
    Level2,
    #[sea_orm(string_value = "LEVEL_3")]
    Level3,
}

/// Depreciation method enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "depreciation_method")]
pub enum DepreciationMethod {
    #[sea_orm(string_value = "SLM")]
    Slm,
    #[sea_orm(string_value = "WDV")]
    Wdv,
}

// Conversions between the stored enums and the core domain enums. The core
// crate has no SeaORM dependency, so the mapping lives here.

impl From<ledgerkit_core::coa::AccountType> for AccountType {
    fn from(value: ledgerkit_core::coa::AccountType) -> Self {
        match value {
            ledgerkit_core::coa::AccountType::Asset => Self::Asset,
            ledgerkit_core::coa::AccountType::Liability => Self::Liability,
            ledgerkit_core::coa::AccountType::Equity => Self::Equity,
            ledgerkit_core::coa::AccountType::Revenue => Self::Revenue,
            ledgerkit_core::coa::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<&AccountType> for ledgerkit_core::coa::AccountType {
    fn from(value: &AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<ledgerkit_core::coa::AccountSubtype> for AccountSubtype {
    fn from(value: ledgerkit_core::coa::AccountSubtype) -> Self {
        use ledgerkit_core::coa::AccountSubtype as Core;
        match value {
            Core::Cash => Self::Cash,
            Core::Bank => Self::Bank,
            Core::Receivable => Self::Receivable,
            Core::CurrentAsset => Self::CurrentAsset,
            Core::FixedAsset => Self::FixedAsset,
            Core::Payable => Self::Payable,
            Core::CurrentLiability => Self::CurrentLiability,
            Core::LongTermLiability => Self::LongTermLiability,
            Core::Capital => Self::Capital,
            Core::Reserve => Self::Reserve,
            Core::DirectIncome => Self::DirectIncome,
            Core::IndirectIncome => Self::IndirectIncome,
            Core::DirectExpense => Self::DirectExpense,
            Core::IndirectExpense => Self::IndirectExpense,
        }
    }
}

impl From<&AccountSubtype> for ledgerkit_core::coa::AccountSubtype {
    fn from(value: &AccountSubtype) -> Self {
        match value {
            AccountSubtype::Cash => Self::Cash,
            AccountSubtype::Bank => Self::Bank,
            AccountSubtype::Receivable => Self::Receivable,
            AccountSubtype::CurrentAsset => Self::CurrentAsset,
            AccountSubtype::FixedAsset => Self::FixedAsset,
            AccountSubtype::Payable => Self::Payable,
            AccountSubtype::CurrentLiability => Self::CurrentLiability,
            AccountSubtype::LongTermLiability => Self::LongTermLiability,
            AccountSubtype::Capital => Self::Capital,
            AccountSubtype::Reserve => Self::Reserve,
            AccountSubtype::DirectIncome => Self::DirectIncome,
            AccountSubtype::IndirectIncome => Self::IndirectIncome,
            AccountSubtype::DirectExpense => Self::DirectExpense,
            AccountSubtype::IndirectExpense => Self::IndirectExpense,
        }
    }
}

impl From<ledgerkit_core::fiscal::PeriodStatus> for PeriodStatus {
    fn from(value: ledgerkit_core::fiscal::PeriodStatus) -> Self {
        match value {
            ledgerkit_core::fiscal::PeriodStatus::Open => Self::Open,
            ledgerkit_core::fiscal::PeriodStatus::Closed => Self::Closed,
            ledgerkit_core::fiscal::PeriodStatus::Locked => Self::Locked,
        }
    }
}

impl From<&PeriodStatus> for ledgerkit_core::fiscal::PeriodStatus {
    fn from(value: &PeriodStatus) -> Self {
        match value {
            PeriodStatus::Open => Self::Open,
            PeriodStatus::Closed => Self::Closed,
            PeriodStatus::Locked => Self::Locked,
        }
    }
}

impl From<ledgerkit_core::journal::EntryStatus> for EntryStatus {
    fn from(value: ledgerkit_core::journal::EntryStatus) -> Self {
        match value {
            ledgerkit_core::journal::EntryStatus::Draft => Self::Draft,
            ledgerkit_core::journal::EntryStatus::Posted => Self::Posted,
            ledgerkit_core::journal::EntryStatus::Reversed => Self::Reversed,
            ledgerkit_core::journal::EntryStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<&EntryStatus> for ledgerkit_core::journal::EntryStatus {
    fn from(value: &EntryStatus) -> Self {
        match value {
            EntryStatus::Draft => Self::Draft,
            EntryStatus::Posted => Self::Posted,
            EntryStatus::Reversed => Self::Reversed,
            EntryStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ledgerkit_core::journal::EntrySource> for EntrySource {
    fn from(value: ledgerkit_core::journal::EntrySource) -> Self {
        match value {
            ledgerkit_core::journal::EntrySource::Manual => Self::Manual,
            ledgerkit_core::journal::EntrySource::Voucher => Self::Voucher,
            ledgerkit_core::journal::EntrySource::Depreciation => Self::Depreciation,
            ledgerkit_core::journal::EntrySource::Reversal => Self::Reversal,
        }
    }
}

impl From<ledgerkit_core::voucher::VoucherType> for VoucherType {
    fn from(value: ledgerkit_core::voucher::VoucherType) -> Self {
        use ledgerkit_core::voucher::VoucherType as Core;
        match value {
            Core::Payment => Self::Payment,
            Core::Receipt => Self::Receipt,
            Core::Contra => Self::Contra,
            Core::Journal => Self::Journal,
            Core::Rcm => Self::Rcm,
            Core::Sales => Self::Sales,
            Core::Purchase => Self::Purchase,
            Core::CreditNote => Self::CreditNote,
            Core::DebitNote => Self::DebitNote,
        }
    }
}

impl From<&VoucherType> for ledgerkit_core::voucher::VoucherType {
    fn from(value: &VoucherType) -> Self {
        match value {
            VoucherType::Payment => Self::Payment,
            VoucherType::Receipt => Self::Receipt,
            VoucherType::Contra => Self::Contra,
            VoucherType::Journal => Self::Journal,
            VoucherType::Rcm => Self::Rcm,
            VoucherType::Sales => Self::Sales,
            VoucherType::Purchase => Self::Purchase,
            VoucherType::CreditNote => Self::CreditNote,
            VoucherType::DebitNote => Self::DebitNote,
        }
    }
}

impl From<ledgerkit_core::voucher::VoucherStatus> for VoucherStatus {
    fn from(value: ledgerkit_core::voucher::VoucherStatus) -> Self {
        use ledgerkit_core::voucher::VoucherStatus as Core;
        match value {
            Core::Draft => Self::Draft,
            Core::PendingApproval => Self::PendingApproval,
            Core::Approved => Self::Approved,
            Core::Rejected => Self::Rejected,
            Core::Posted => Self::Posted,
            Core::Cancelled => Self::Cancelled,
        }
    }
}

impl From<&VoucherStatus> for ledgerkit_core::voucher::VoucherStatus {
    fn from(value: &VoucherStatus) -> Self {
        match value {
            VoucherStatus::Draft => Self::Draft,
            VoucherStatus::PendingApproval => Self::PendingApproval,
            VoucherStatus::Approved => Self::Approved,
            VoucherStatus::Rejected => Self::Rejected,
            VoucherStatus::Posted => Self::Posted,
            VoucherStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ledgerkit_core::voucher::ApprovalLevel> for ApprovalLevel {
    fn from(value: ledgerkit_core::voucher::ApprovalLevel) -> Self {
        match value {
            ledgerkit_core::voucher::ApprovalLevel::Level1 => Self::Level1,
            ledgerkit_core::voucher::ApprovalLevel::Level2 => Self::Level2,
            ledgerkit_core::voucher::ApprovalLevel::Level3 => Self::Level3,
        }
    }
}

impl From<ledgerkit_core::depreciation::DepreciationMethod> for DepreciationMethod {
    fn from(value: ledgerkit_core::depreciation::DepreciationMethod) -> Self {
        match value {
            ledgerkit_core::depreciation::DepreciationMethod::StraightLine => Self::Slm,
            ledgerkit_core::depreciation::DepreciationMethod::WrittenDownValue => Self::Wdv,
        }
    }
}

impl From<&DepreciationMethod> for ledgerkit_core::depreciation::DepreciationMethod {
    fn from(value: &DepreciationMethod) -> Self {
        match value {
            DepreciationMethod::Slm => Self::StraightLine,
            DepreciationMethod::Wdv => Self::WrittenDownValue,
        }
    }
}
