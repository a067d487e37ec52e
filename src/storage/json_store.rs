//! JSON file-backed repository
//!
//! One file holds the whole collection. Each store instance owns a mutex
//! that is held for an entire read-modify-write cycle, so writers against
//! the same file never interleave and no update is lost. The lock is not
//! reentrant: code running under it must not call back into the same store.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, CategoryId, Transaction};

use super::file_io::{read_json_vec, write_json_atomic};
use super::repository::{Entity, Repository, TransactionRepository};

/// Repository persisting a collection of `T` to a single JSON file
pub struct JsonStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> JsonStore<T> {
    /// Create a store for the given file; nothing is read until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection under the lock
    async fn read(&self) -> LedgerResult<Vec<T>> {
        let _guard = self.lock.lock().await;
        let items = read_json_vec(&self.path).await?;
        debug!(kind = T::KIND, count = items.len(), path = %self.path.display(), "loaded collection");
        Ok(items)
    }

    /// Run one read-modify-write cycle under the lock
    ///
    /// If `mutate` fails nothing is written. The guard drops on every path.
    async fn execute<R, F>(&self, operation: &'static str, mutate: F) -> LedgerResult<R>
    where
        R: Send,
        F: FnOnce(&mut Vec<T>) -> LedgerResult<R> + Send,
    {
        let _guard = self.lock.lock().await;

        let mut items: Vec<T> = read_json_vec(&self.path).await?;
        let result = mutate(&mut items)?;
        write_json_atomic(&self.path, &items).await?;

        debug!(kind = T::KIND, operation, count = items.len(), path = %self.path.display(), "wrote collection");
        Ok(result)
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for JsonStore<T> {
    async fn add(&self, entity: T) -> LedgerResult<()> {
        self.execute("add", move |items| {
            let id = entity.entity_id();
            if items.iter().any(|e| e.entity_id() == id) {
                return Err(LedgerError::storage(format!(
                    "{} with id {} already exists",
                    T::KIND,
                    id
                )));
            }
            items.push(entity);
            Ok(())
        })
        .await
    }

    async fn update(&self, entity: T) -> LedgerResult<()> {
        self.execute("update", move |items| {
            let id = entity.entity_id();
            let slot = items
                .iter_mut()
                .find(|e| e.entity_id() == id)
                .ok_or_else(|| {
                    LedgerError::storage(format!("{} {} to update does not exist", T::KIND, id))
                })?;
            *slot = entity;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: T::Id) -> LedgerResult<()> {
        self.execute("delete", move |items| {
            items.retain(|e| e.entity_id() != id);
            Ok(())
        })
        .await
    }

    async fn get_all(&self) -> LedgerResult<Vec<T>> {
        self.read().await
    }

    async fn get_by_id(&self, id: T::Id) -> LedgerResult<Option<T>> {
        let items = self.read().await?;
        Ok(items.into_iter().find(|e| e.entity_id() == id))
    }
}

fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.occurred_on().cmp(&a.occurred_on()));
    transactions
}

#[async_trait]
impl TransactionRepository for JsonStore<Transaction> {
    async fn get_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>> {
        let all = self.read().await?;
        Ok(newest_first(
            all.into_iter()
                .filter(|t| t.occurred_on() >= from && t.occurred_on() <= to)
                .collect(),
        ))
    }

    async fn get_by_account(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>> {
        let all = self.read().await?;
        Ok(newest_first(
            all.into_iter()
                .filter(|t| t.account_id() == account_id)
                .collect(),
        ))
    }

    async fn get_by_category(&self, category_id: CategoryId) -> LedgerResult<Vec<Transaction>> {
        let all = self.read().await?;
        Ok(newest_first(
            all.into_iter()
                .filter(|t| t.category_id() == Some(category_id))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Category, CategoryType, Money};
    use chrono::Duration;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_store<T: Entity>(file: &str) -> (TempDir, JsonStore<T>) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join(file));
        (temp_dir, store)
    }

    fn account(name: &str, cents: i64) -> Account {
        Account::new(name, "UAH", Money::from_cents(cents)).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store() {
        let (_temp_dir, store) = create_store::<Account>("accounts.json");
        assert!(store.get_all().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_every_field() {
        let (temp_dir, store) = create_store::<Category>("categories.json");
        let originals = vec![
            Category::new("Salary", CategoryType::Income, Some("monthly")).unwrap(),
            Category::new("Food", CategoryType::Expense, None).unwrap(),
            Category::new("Moves", CategoryType::Transfer, None).unwrap(),
        ];
        for category in &originals {
            store.add(category.clone()).await.unwrap();
        }

        let reopened: JsonStore<Category> = JsonStore::new(temp_dir.path().join("categories.json"));
        assert_eq!(reopened.get_all().await.unwrap(), originals);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_storage_error() {
        let (_temp_dir, store) = create_store::<Account>("accounts.json");
        let acc = account("Main", 0);
        store.add(acc.clone()).await.unwrap();

        let err = store.add(acc).await.unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_and_missing_update_fails() {
        let (_temp_dir, store) = create_store::<Account>("accounts.json");
        let mut acc = account("Main", 100);
        store.add(acc.clone()).await.unwrap();

        acc.rename("Renamed").unwrap();
        store.update(acc.clone()).await.unwrap();
        let stored = store.get_by_id(acc.id()).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Renamed");

        let err = store.update(account("Ghost", 0)).await.unwrap_err();
        assert!(err.is_storage());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_temp_dir, store) = create_store::<Account>("accounts.json");
        let keep = account("Keep", 0);
        let gone = account("Gone", 0);
        store.add(keep.clone()).await.unwrap();
        store.add(gone.clone()).await.unwrap();

        store.delete(gone.id()).await.unwrap();
        store.delete(gone.id()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all, vec![keep]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_lose_no_updates() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(JsonStore::<Account>::new(temp_dir.path().join("accounts.json")));

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add(account(&format!("Account {}", i), i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.get_all().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_transaction_queries_newest_first() {
        let (_temp_dir, store) = create_store::<Transaction>("transactions.json");
        let account_id = AccountId::new();
        let other_account = AccountId::new();
        let food = CategoryId::new();
        let now = Utc::now();

        let old = Transaction::expense(account_id, food, Money::from_cents(-100), now - Duration::days(10), None).unwrap();
        let recent = Transaction::expense(account_id, food, Money::from_cents(-200), now - Duration::days(1), None).unwrap();
        let elsewhere = Transaction::income(other_account, CategoryId::new(), Money::from_cents(300), now, None).unwrap();
        for txn in [&old, &recent, &elsewhere] {
            store.add(txn.clone()).await.unwrap();
        }

        let by_account = store.get_by_account(account_id).await.unwrap();
        assert_eq!(by_account, vec![recent.clone(), old.clone()]);

        let by_category = store.get_by_category(food).await.unwrap();
        assert_eq!(by_category.len(), 2);

        let period = store
            .get_by_period(now - Duration::days(2), now)
            .await
            .unwrap();
        assert_eq!(period, vec![elsewhere, recent]);
    }
}
