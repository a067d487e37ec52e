//! Core data models for the wallet ledger
//!
//! Accounts, categories and transactions, plus the money and id types they
//! share. Every entity validates itself at construction.

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
mod text;
pub mod transaction;

pub use account::{Account, DEFAULT_CURRENCY};
pub use category::{Category, CategoryType};
pub use ids::{AccountId, CategoryId, TransactionId, TransferGroupId};
pub use money::{Money, MoneyParseError};
pub use text::{MAX_NAME_LEN, MAX_NOTE_LEN};
pub use transaction::{Transaction, TransactionKind, TransactionType};
