//! Repository abstractions
//!
//! Services talk to storage only through these traits, so any backend that
//! can hold a keyed collection can stand in for the JSON files.

use std::fmt::Display;
use std::hash::Hash;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerResult;
use crate::models::{
    Account, AccountId, Category, CategoryId, Transaction, TransactionId,
};

/// An entity that can live in a repository
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Human-readable entity name used in storage errors
    const KIND: &'static str;

    fn entity_id(&self) -> Self::Id;
}

impl Entity for Account {
    type Id = AccountId;
    const KIND: &'static str = "Account";

    fn entity_id(&self) -> AccountId {
        self.id()
    }
}

impl Entity for Category {
    type Id = CategoryId;
    const KIND: &'static str = "Category";

    fn entity_id(&self) -> CategoryId {
        self.id()
    }
}

impl Entity for Transaction {
    type Id = TransactionId;
    const KIND: &'static str = "Transaction";

    fn entity_id(&self) -> TransactionId {
        self.id()
    }
}

/// Generic CRUD over a collection keyed by entity id
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a new entity; fails with a storage error if the id exists
    async fn add(&self, entity: T) -> LedgerResult<()>;

    /// Replace an existing entity; fails with a storage error if it is missing
    async fn update(&self, entity: T) -> LedgerResult<()>;

    /// Remove an entity; removing a missing id is a no-op
    async fn delete(&self, id: T::Id) -> LedgerResult<()>;

    /// All entities in store order
    async fn get_all(&self) -> LedgerResult<Vec<T>>;

    async fn get_by_id(&self, id: T::Id) -> LedgerResult<Option<T>>;
}

/// Transaction-specific queries, each ordered newest first
#[async_trait]
pub trait TransactionRepository: Repository<Transaction> {
    /// Transactions with `from <= occurred_on <= to`
    async fn get_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>>;

    async fn get_by_account(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>>;

    async fn get_by_category(&self, category_id: CategoryId) -> LedgerResult<Vec<Transaction>>;
}
