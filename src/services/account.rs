//! Account service
//!
//! CRUD for accounts. Balances are never set directly here; they move only
//! through the transaction service. Updates and deletes hold the shared
//! ledger lock, so they never write back a balance read before a concurrent
//! transaction changed it.

use std::sync::Arc;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountId, Money};
use crate::storage::{LedgerLock, Repository, Storage, TransactionRepository};

/// Service for account management
pub struct AccountService {
    accounts: Arc<dyn Repository<Account>>,
    transactions: Arc<dyn TransactionRepository>,
    ledger_lock: LedgerLock,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn Repository<Account>>,
        transactions: Arc<dyn TransactionRepository>,
        ledger_lock: LedgerLock,
    ) -> Self {
        Self {
            accounts,
            transactions,
            ledger_lock,
        }
    }

    /// Wire the service to the stores and ledger lock of a [`Storage`]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(
            storage.accounts.clone(),
            storage.transactions.clone(),
            storage.ledger_lock(),
        )
    }

    /// Create a new account
    pub async fn create(
        &self,
        name: &str,
        currency: &str,
        initial_balance: Money,
    ) -> LedgerResult<Account> {
        let account = Account::new(name, currency, initial_balance)?;
        self.accounts.add(account.clone()).await?;

        info!(account = %account.id(), name = account.name(), "created account");
        Ok(account)
    }

    /// Rename an account and change its currency code
    pub async fn update(&self, id: AccountId, name: &str, currency: &str) -> LedgerResult<Account> {
        let _guard = self.ledger_lock.lock().await;
        let mut account = self.get_by_id(id).await?;
        account.rename(name)?;
        account.change_currency(currency)?;
        self.accounts.update(account.clone()).await?;

        info!(account = %id, "updated account");
        Ok(account)
    }

    /// Delete an account with no transaction history
    pub async fn delete(&self, id: AccountId) -> LedgerResult<()> {
        let _guard = self.ledger_lock.lock().await;
        let account = self.get_by_id(id).await?;

        let referencing = self.transactions.get_by_account(id).await?.len();
        if referencing > 0 {
            return Err(LedgerError::Validation(format!(
                "Account '{}' has {} transaction(s); delete them first",
                account.name(),
                referencing
            )));
        }

        self.accounts.delete(id).await?;
        info!(account = %id, "deleted account");
        Ok(())
    }

    /// All accounts in store order
    pub async fn get_all(&self) -> LedgerResult<Vec<Account>> {
        self.accounts.get_all().await
    }

    pub async fn get_by_id(&self, id: AccountId) -> LedgerResult<Account> {
        self.accounts
            .get_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))
    }

    pub async fn get_balance(&self, id: AccountId) -> LedgerResult<Money> {
        Ok(self.get_by_id(id).await?.balance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, DEFAULT_CURRENCY};
    use crate::services::test_support::temp_storage;
    use crate::services::{CategoryService, TransactionService};
    use crate::storage::JsonStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::time::Duration;

    /// Accounts repository that stalls after every lookup
    struct SlowAccounts {
        inner: Arc<JsonStore<Account>>,
    }

    #[async_trait]
    impl Repository<Account> for SlowAccounts {
        async fn add(&self, entity: Account) -> LedgerResult<()> {
            self.inner.add(entity).await
        }

        async fn update(&self, entity: Account) -> LedgerResult<()> {
            self.inner.update(entity).await
        }

        async fn delete(&self, id: AccountId) -> LedgerResult<()> {
            self.inner.delete(id).await
        }

        async fn get_all(&self) -> LedgerResult<Vec<Account>> {
            self.inner.get_all().await
        }

        async fn get_by_id(&self, id: AccountId) -> LedgerResult<Option<Account>> {
            let found = self.inner.get_by_id(id).await?;
            tokio::time::sleep(Duration::from_millis(150)).await;
            Ok(found)
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_temp_dir, storage) = temp_storage();
        let service = AccountService::from_storage(&storage);

        let account = service
            .create("Main", DEFAULT_CURRENCY, Money::from_units(100))
            .await
            .unwrap();

        let fetched = service.get_by_id(account.id()).await.unwrap();
        assert_eq!(fetched, account);
        assert_eq!(
            service.get_balance(account.id()).await.unwrap(),
            Money::from_units(100)
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let (_temp_dir, storage) = temp_storage();
        let service = AccountService::from_storage(&storage);

        let err = service.create("  ", "UAH", Money::zero()).await.unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create("Main", "UAH", Money::from_cents(-1))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let (_temp_dir, storage) = temp_storage();
        let service = AccountService::from_storage(&storage);
        let account = service.create("Main", "UAH", Money::zero()).await.unwrap();

        let updated = service.update(account.id(), "Savings", "usd").await.unwrap();
        assert_eq!(updated.name(), "Savings");
        assert_eq!(updated.currency(), "USD");
        assert_eq!(service.get_by_id(account.id()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_account_is_not_found() {
        let (_temp_dir, storage) = temp_storage();
        let service = AccountService::from_storage(&storage);
        let id = AccountId::new();

        assert!(service.get_by_id(id).await.unwrap_err().is_not_found());
        assert!(service.get_balance(id).await.unwrap_err().is_not_found());
        assert!(service
            .update(id, "X", "UAH")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_unused_account() {
        let (_temp_dir, storage) = temp_storage();
        let service = AccountService::from_storage(&storage);
        let account = service.create("Main", "UAH", Money::zero()).await.unwrap();

        service.delete(account.id()).await.unwrap();
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_account_with_history_is_refused() {
        let (_temp_dir, storage) = temp_storage();
        let accounts = AccountService::from_storage(&storage);
        let categories = CategoryService::from_storage(&storage);
        let transactions = TransactionService::from_storage(&storage);

        let account = accounts
            .create("Main", "UAH", Money::from_units(10))
            .await
            .unwrap();
        let food = categories
            .create("Food", CategoryType::Expense, None)
            .await
            .unwrap();
        transactions
            .add_expense(account.id(), food.id(), Money::from_units(1), Utc::now(), None)
            .await
            .unwrap();

        let err = accounts.delete(account.id()).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("1 transaction"));
        assert!(accounts.get_by_id(account.id()).await.is_ok());
    }

    #[tokio::test]
    async fn test_rename_during_expense_keeps_debit() {
        let (_temp_dir, storage) = temp_storage();
        let slow: Arc<dyn Repository<Account>> = Arc::new(SlowAccounts {
            inner: storage.accounts.clone(),
        });
        let accounts = AccountService::new(
            slow.clone(),
            storage.transactions.clone(),
            storage.ledger_lock(),
        );
        let transactions = TransactionService::new(
            storage.transactions.clone(),
            slow,
            storage.categories.clone(),
            storage.ledger_lock(),
        );
        let food = CategoryService::from_storage(&storage)
            .create("Food", CategoryType::Expense, None)
            .await
            .unwrap();
        let main = accounts
            .create("Main", "UAH", Money::from_units(100))
            .await
            .unwrap();

        let (renamed, spent) = tokio::join!(
            accounts.update(main.id(), "Renamed", "UAH"),
            async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                transactions
                    .add_expense(main.id(), food.id(), Money::from_units(30), Utc::now(), None)
                    .await
            }
        );
        renamed.unwrap();
        spent.unwrap();

        let stored = accounts.get_by_id(main.id()).await.unwrap();
        assert_eq!(stored.name(), "Renamed");
        assert_eq!(stored.balance(), Money::from_units(70));
        assert_eq!(transactions.get_by_account(main.id()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_waits_for_in_flight_expense() {
        let (_temp_dir, storage) = temp_storage();
        let slow: Arc<dyn Repository<Account>> = Arc::new(SlowAccounts {
            inner: storage.accounts.clone(),
        });
        let accounts = AccountService::new(
            slow.clone(),
            storage.transactions.clone(),
            storage.ledger_lock(),
        );
        let transactions = TransactionService::new(
            storage.transactions.clone(),
            slow,
            storage.categories.clone(),
            storage.ledger_lock(),
        );
        let food = CategoryService::from_storage(&storage)
            .create("Food", CategoryType::Expense, None)
            .await
            .unwrap();
        let main = accounts
            .create("Main", "UAH", Money::from_units(100))
            .await
            .unwrap();

        let (spent, deleted) = tokio::join!(
            transactions.add_expense(main.id(), food.id(), Money::from_units(30), Utc::now(), None),
            async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                accounts.delete(main.id()).await
            }
        );
        spent.unwrap();
        assert!(deleted.unwrap_err().is_validation());
        assert!(accounts.get_by_id(main.id()).await.is_ok());
    }
}
