//! Service layer for the wallet ledger
//!
//! Services hold the business rules and talk to storage only through the
//! repository traits. Every operation is async and fails with a
//! [`LedgerError`](crate::error::LedgerError).

pub mod account;
pub mod category;
pub mod transaction;

pub use account::AccountService;
pub use category::CategoryService;
pub use transaction::{TransactionService, TransferResult};
