//! Storage layer for the wallet ledger
//!
//! One JSON file per collection, each behind its own [`JsonStore`] and its
//! own lock. Services only see the [`Repository`] traits.
//!
//! Service operations that read one store and write back based on what they
//! read also hold the shared [`LedgerLock`], so they never interleave.

pub mod file_io;
pub mod json_store;
pub mod repository;

pub use file_io::{read_json_vec, write_json_atomic};
pub use json_store::JsonStore;
pub use repository::{Entity, Repository, TransactionRepository};

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;
use crate::models::{Account, Category, Transaction};

/// Serializes read-then-write service operations across all stores
pub type LedgerLock = Arc<Mutex<()>>;

/// The three collection stores of one ledger
#[derive(Clone)]
pub struct Storage {
    paths: LedgerPaths,
    ledger_lock: LedgerLock,
    pub accounts: Arc<JsonStore<Account>>,
    pub categories: Arc<JsonStore<Category>>,
    pub transactions: Arc<JsonStore<Transaction>>,
}

impl Storage {
    /// Open the stores under the given paths, creating directories as needed
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: Arc::new(JsonStore::new(paths.accounts_file())),
            categories: Arc::new(JsonStore::new(paths.categories_file())),
            transactions: Arc::new(JsonStore::new(paths.transactions_file())),
            ledger_lock: Arc::new(Mutex::new(())),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Handle to the lock shared by every service built from this storage
    pub fn ledger_lock(&self) -> LedgerLock {
        Arc::clone(&self.ledger_lock)
    }
}
