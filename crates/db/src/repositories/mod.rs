//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod cost_center;
pub mod depreciation;
pub mod fiscal;
pub mod journal;
pub mod ledger;
pub mod sequence;
pub mod voucher;

pub use account::{AccountFilter, AccountRepository, CreateAccountInput, UpdateAccountInput};
pub use cost_center::{CostCenterError, CostCenterRepository, CreateCostCenterInput};
pub use depreciation::{
    AssetRunOutcome, AssetRunStatus, CreateAssetInput, CreateCategoryInput,
    DepreciationRepository, DepreciationRunSummary,
};
pub use fiscal::FiscalRepository;
pub use journal::{EntryFilter, EntryWithLines, JournalRepository, ReversalResult};
pub use ledger::{LedgerRepository, LedgerStatement, RecomputeOutcome};
pub use sequence::next_document_number;
pub use voucher::{
    CreateVoucherInput, VoucherBodyInput, VoucherFilter, VoucherRepository, VoucherReversal,
    VoucherWithLines,
};
