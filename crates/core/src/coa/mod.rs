//! Chart of accounts classification.
//!
//! Account types, normal balance conventions, the signed balance-change
//! rule every ledger write uses, and structural rules for the account tree.

pub mod service;
pub mod types;

pub use service::{CoaError, CoaService, ParentInfo};
pub use types::{AccountSubtype, AccountType, NormalBalance};
