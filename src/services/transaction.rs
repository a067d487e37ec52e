//! Transaction service
//!
//! Records income, expenses and transfers, keeping account balances in step
//! with the transaction log, and answers period queries and reports.
//!
//! Every mutation here writes to more than one store. The stores are not
//! updated atomically as a group: accounts are persisted before the
//! transaction records, so an I/O failure or a dropped future in between
//! leaves a balance that no record explains. Mutations hold the ledger lock
//! shared through [`Storage`], so they never interleave with each other or
//! with account and category changes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, CategoryType, Money, Transaction, TransactionId,
    TransferGroupId,
};
use crate::reports::{self, CategorySummary, DailySummary, PeriodTotals};
use crate::storage::{LedgerLock, Repository, Storage, TransactionRepository};

/// Both legs of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// Negative leg on the source account
    pub outgoing: Transaction,
    /// Positive leg on the destination account
    pub incoming: Transaction,
}

impl TransferResult {
    pub fn group_id(&self) -> Option<TransferGroupId> {
        self.outgoing.transfer_group_id()
    }
}

/// Service for transaction management
pub struct TransactionService {
    transactions: Arc<dyn TransactionRepository>,
    accounts: Arc<dyn Repository<Account>>,
    categories: Arc<dyn Repository<Category>>,
    ledger_lock: LedgerLock,
}

impl TransactionService {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        accounts: Arc<dyn Repository<Account>>,
        categories: Arc<dyn Repository<Category>>,
        ledger_lock: LedgerLock,
    ) -> Self {
        Self {
            transactions,
            accounts,
            categories,
            ledger_lock,
        }
    }

    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(
            storage.transactions.clone(),
            storage.accounts.clone(),
            storage.categories.clone(),
            storage.ledger_lock(),
        )
    }

    /// Record money leaving an account
    ///
    /// `amount` is the positive magnitude; the stored amount is negative.
    pub async fn add_expense(
        &self,
        account_id: AccountId,
        category_id: CategoryId,
        amount: Money,
        occurred_on: DateTime<Utc>,
        note: Option<&str>,
    ) -> LedgerResult<Transaction> {
        require_positive(amount, "Expense")?;

        let _guard = self.ledger_lock.lock().await;
        let account = self.fetch_account(account_id).await?;
        let category = self.fetch_category(category_id, CategoryType::Expense).await?;

        let txn = Transaction::expense(account.id(), category.id(), -amount.abs(), occurred_on, note)?;
        self.record(account, txn).await
    }

    /// Record money entering an account
    pub async fn add_income(
        &self,
        account_id: AccountId,
        category_id: CategoryId,
        amount: Money,
        occurred_on: DateTime<Utc>,
        note: Option<&str>,
    ) -> LedgerResult<Transaction> {
        require_positive(amount, "Income")?;

        let _guard = self.ledger_lock.lock().await;
        let account = self.fetch_account(account_id).await?;
        let category = self.fetch_category(category_id, CategoryType::Income).await?;

        let txn = Transaction::income(account.id(), category.id(), amount.abs(), occurred_on, note)?;
        self.record(account, txn).await
    }

    /// Move money between two accounts
    ///
    /// Writes the source account, the destination account, then the
    /// outgoing and incoming legs. Nothing is written if either balance
    /// change is refused.
    pub async fn transfer(
        &self,
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Money,
        occurred_on: DateTime<Utc>,
        note: Option<&str>,
    ) -> LedgerResult<TransferResult> {
        require_positive(amount, "Transfer")?;
        if from_account_id == to_account_id {
            return Err(LedgerError::Validation(
                "Cannot transfer to the same account".into(),
            ));
        }

        let _guard = self.ledger_lock.lock().await;
        let mut from = self.fetch_account(from_account_id).await?;
        let mut to = self.fetch_account(to_account_id).await?;

        let group = TransferGroupId::new();
        let amount = amount.abs();
        let outgoing =
            Transaction::transfer_leg(from.id(), to.id(), group, -amount, occurred_on, note)?;
        let incoming =
            Transaction::transfer_leg(to.id(), from.id(), group, amount, occurred_on, note)?;

        from.apply(outgoing.amount())?;
        to.apply(incoming.amount())?;

        self.accounts.update(from).await?;
        self.accounts.update(to).await?;
        self.transactions.add(outgoing.clone()).await?;
        self.transactions.add(incoming.clone()).await?;

        info!(
            from = %from_account_id,
            to = %to_account_id,
            group = %group,
            amount = %amount,
            "recorded transfer"
        );
        Ok(TransferResult { outgoing, incoming })
    }

    /// Delete a transaction and undo its balance effect
    ///
    /// Deleting either leg of a transfer deletes the whole transfer.
    pub async fn delete(&self, id: TransactionId) -> LedgerResult<()> {
        let _guard = self.ledger_lock.lock().await;

        let txn = self.get_by_id(id).await?;
        let legs = match txn.transfer_group_id() {
            Some(group) => self.transfer_legs(group).await?,
            None => vec![txn],
        };

        // Reverse every leg in memory first so a refused reversal writes nothing
        let mut touched: HashMap<AccountId, Account> = HashMap::new();
        for leg in &legs {
            if !touched.contains_key(&leg.account_id()) {
                let account = self.fetch_account(leg.account_id()).await.map_err(|e| {
                    warn!(transaction = %leg.id(), account = %leg.account_id(), "transaction refers to a missing account");
                    e
                })?;
                touched.insert(account.id(), account);
            }
            if let Some(account) = touched.get_mut(&leg.account_id()) {
                account.apply(-leg.amount())?;
            }
        }

        for leg in &legs {
            if let Some(account) = touched.get(&leg.account_id()) {
                self.accounts.update(account.clone()).await?;
            }
            self.transactions.delete(leg.id()).await?;
        }

        info!(transaction = %id, removed = legs.len(), "deleted transaction");
        Ok(())
    }

    pub async fn get_by_id(&self, id: TransactionId) -> LedgerResult<Transaction> {
        self.transactions
            .get_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))
    }

    /// Transactions with `from <= occurred_on <= to`, newest first
    pub async fn get_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>> {
        self.transactions.get_by_period(from, to).await
    }

    pub async fn get_by_account(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>> {
        self.transactions.get_by_account(account_id).await
    }

    pub async fn get_by_category(&self, category_id: CategoryId) -> LedgerResult<Vec<Transaction>> {
        self.transactions.get_by_category(category_id).await
    }

    /// Income and expenses whose magnitude lies within the given bounds
    ///
    /// Bounds are inclusive; `None` leaves that side open. Transfers are
    /// never returned.
    pub async fn search_by_amount(
        &self,
        min: Option<Money>,
        max: Option<Money>,
    ) -> LedgerResult<Vec<Transaction>> {
        let mut found: Vec<Transaction> = self
            .transactions
            .get_all()
            .await?
            .into_iter()
            .filter(|t| !t.is_transfer())
            .filter(|t| {
                let magnitude = t.absolute_amount();
                min.map_or(true, |m| magnitude >= m) && max.map_or(true, |m| magnitude <= m)
            })
            .collect();
        found.sort_by(|a, b| b.occurred_on().cmp(&a.occurred_on()));
        Ok(found)
    }

    /// Everything that happened on one UTC calendar day
    pub async fn search_by_date(&self, date: NaiveDate) -> LedgerResult<Vec<Transaction>> {
        let (from, to) = day_bounds(date);
        self.transactions.get_by_period(from, to).await
    }

    pub async fn get_totals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> LedgerResult<PeriodTotals> {
        let transactions = self.transactions.get_by_period(from, to).await?;
        Ok(reports::period_totals(&transactions))
    }

    pub async fn get_daily_summary(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> LedgerResult<Vec<DailySummary>> {
        let transactions = self.transactions.get_by_period(from, to).await?;
        Ok(reports::daily_summaries(&transactions))
    }

    pub async fn get_category_summary(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> LedgerResult<Vec<CategorySummary>> {
        let transactions = self.transactions.get_by_period(from, to).await?;
        let categories = self.categories.get_all().await?;
        Ok(reports::category_summaries(&transactions, &categories))
    }

    /// Apply the balance change, then persist the account and the record
    async fn record(&self, mut account: Account, txn: Transaction) -> LedgerResult<Transaction> {
        account.apply(txn.amount())?;
        self.accounts.update(account).await?;
        self.transactions.add(txn.clone()).await?;

        info!(
            transaction = %txn.id(),
            account = %txn.account_id(),
            kind = %txn.transaction_type(),
            amount = %txn.amount(),
            "recorded transaction"
        );
        Ok(txn)
    }

    async fn transfer_legs(&self, group: TransferGroupId) -> LedgerResult<Vec<Transaction>> {
        let legs: Vec<Transaction> = self
            .transactions
            .get_all()
            .await?
            .into_iter()
            .filter(|t| t.transfer_group_id() == Some(group))
            .collect();

        if legs.is_empty() {
            return Err(LedgerError::transfer_group_not_found(group.to_string()));
        }
        if legs.len() != 2 {
            warn!(group = %group, legs = legs.len(), "transfer group does not have exactly two legs");
        }
        Ok(legs)
    }

    async fn fetch_account(&self, id: AccountId) -> LedgerResult<Account> {
        self.accounts
            .get_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))
    }

    async fn fetch_category(
        &self,
        id: CategoryId,
        expected: CategoryType,
    ) -> LedgerResult<Category> {
        let category = self
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        if category.category_type() != expected {
            return Err(LedgerError::Validation(format!(
                "Category '{}' is a {} category, expected {}",
                category.name(),
                category.category_type(),
                expected
            )));
        }
        Ok(category)
    }
}

fn require_positive(amount: Money, what: &str) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "{} amount must be greater than zero",
            what
        )))
    }
}

/// First and last instant of a UTC calendar day
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1) - Duration::nanoseconds(1))
}
