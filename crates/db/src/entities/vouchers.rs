//! `SeaORM` entity for the vouchers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ApprovalLevel, VoucherStatus, VoucherType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vouchers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub voucher_number: String,
    pub voucher_type: VoucherType,
    pub voucher_date: Date,
    pub period_id: Uuid,
    pub narration: String,
    pub status: VoucherStatus,
    pub approval_level: Option<ApprovalLevel>,
    pub total_amount: Decimal,
    pub is_reversed: bool,
    pub reversal_of: Option<Uuid>,
    pub journal_entry_id: Option<Uuid>,
    pub created_by: Uuid,
    pub submitted_by: Option<Uuid>,
    pub submitted_at: Option<DateTimeWithTimeZone>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTimeWithTimeZone>,
    pub rejection_reason: Option<String>,
    pub posted_by: Option<Uuid>,
    pub posted_at: Option<DateTimeWithTimeZone>,
    pub cancelled_by: Option<Uuid>,
    pub cancelled_at: Option<DateTimeWithTimeZone>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::financial_periods::Entity",
        from = "Column::PeriodId",
        to = "super::financial_periods::Column::Id"
    )]
    FinancialPeriods,
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id"
    )]
    JournalEntries,
    #[sea_orm(has_many = "super::voucher_lines::Entity")]
    VoucherLines,
    #[sea_orm(has_many = "super::voucher_allocations::Entity")]
    VoucherAllocations,
}

impl Related<super::voucher_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherLines.def()
    }
}

impl Related<super::voucher_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
