//! Category service
//!
//! Mutations hold the shared ledger lock across the uniqueness or usage
//! check and the write that depends on it.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, CategoryType};
use crate::storage::{LedgerLock, Repository, Storage, TransactionRepository};

/// Service for category management
pub struct CategoryService {
    categories: Arc<dyn Repository<Category>>,
    transactions: Arc<dyn TransactionRepository>,
    ledger_lock: LedgerLock,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn Repository<Category>>,
        transactions: Arc<dyn TransactionRepository>,
        ledger_lock: LedgerLock,
    ) -> Self {
        Self {
            categories,
            transactions,
            ledger_lock,
        }
    }

    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(
            storage.categories.clone(),
            storage.transactions.clone(),
            storage.ledger_lock(),
        )
    }

    /// Create a category; names are unique per type, ignoring case
    pub async fn create(
        &self,
        name: &str,
        category_type: CategoryType,
        description: Option<&str>,
    ) -> LedgerResult<Category> {
        let _guard = self.ledger_lock.lock().await;
        self.ensure_unique(name, category_type, None).await?;

        let category = Category::new(name, category_type, description)?;
        self.categories.add(category.clone()).await?;

        info!(category = %category.id(), name = category.name(), "created category");
        Ok(category)
    }

    pub async fn update(
        &self,
        id: CategoryId,
        name: &str,
        category_type: CategoryType,
        description: Option<&str>,
    ) -> LedgerResult<Category> {
        let _guard = self.ledger_lock.lock().await;
        let mut category = self.get_by_id(id).await?;
        self.ensure_unique(name, category_type, Some(id)).await?;

        category.update(name, category_type, description)?;
        self.categories.update(category.clone()).await?;

        info!(category = %id, "updated category");
        Ok(category)
    }

    /// Delete a category no transaction refers to
    pub async fn delete(&self, id: CategoryId) -> LedgerResult<()> {
        let _guard = self.ledger_lock.lock().await;
        let category = self.get_by_id(id).await?;

        let referencing = self.transactions.get_by_category(id).await?.len();
        if referencing > 0 {
            return Err(LedgerError::Validation(format!(
                "Category '{}' is used by {} transaction(s)",
                category.name(),
                referencing
            )));
        }

        self.categories.delete(id).await?;
        info!(category = %id, "deleted category");
        Ok(())
    }

    /// All categories, Income first, then Expense, then Transfer; by name within a type
    pub async fn get_all(&self) -> LedgerResult<Vec<Category>> {
        let mut categories = self.categories.get_all().await?;
        categories.sort_by(|a, b| {
            a.category_type()
                .cmp(&b.category_type())
                .then_with(|| by_name(a, b))
        });
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: CategoryId) -> LedgerResult<Category> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))
    }

    /// Case-insensitive substring search, sorted by name ignoring case
    ///
    /// A blank term returns every category in [`get_all`](Self::get_all) order.
    pub async fn search_by_name(&self, term: &str) -> LedgerResult<Vec<Category>> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.get_all().await;
        }

        let mut matches: Vec<Category> = self
            .categories
            .get_all()
            .await?
            .into_iter()
            .filter(|c| c.name().to_lowercase().contains(&term))
            .collect();
        matches.sort_by(by_name);
        Ok(matches)
    }

    async fn ensure_unique(
        &self,
        name: &str,
        category_type: CategoryType,
        exclude: Option<CategoryId>,
    ) -> LedgerResult<()> {
        let existing = self.categories.get_all().await?;
        let clash = existing
            .iter()
            .filter(|c| Some(c.id()) != exclude)
            .any(|c| c.collides_with(name, category_type));

        if clash {
            return Err(LedgerError::Validation(format!(
                "A {} category named '{}' already exists",
                category_type,
                name.trim()
            )));
        }
        Ok(())
    }
}

/// Case-insensitive name order, raw name as the tie-break
fn by_name(a: &Category, b: &Category) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}
