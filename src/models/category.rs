//! Category model
//!
//! Categories classify income and expense transactions. The (name, type)
//! uniqueness rule lives in the category service, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::text::{optional_note, required_name};
use crate::error::LedgerResult;

/// Kind of money movement a category describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryType {
    Income,
    Expense,
    Transfer,
}

impl CategoryType {
    /// Parse a category type from user text
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: CategoryId,
    name: String,
    #[serde(rename = "type")]
    category_type: CategoryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Category {
    /// Create a new category
    pub fn new(
        name: &str,
        category_type: CategoryType,
        description: Option<&str>,
    ) -> LedgerResult<Self> {
        Ok(Self {
            id: CategoryId::new(),
            name: required_name("Category", name)?,
            category_type,
            description: optional_note(description),
        })
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_type(&self) -> CategoryType {
        self.category_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replace name, type and description in one validated step
    pub fn update(
        &mut self,
        name: &str,
        category_type: CategoryType,
        description: Option<&str>,
    ) -> LedgerResult<()> {
        self.name = required_name("Category", name)?;
        self.category_type = category_type;
        self.description = optional_note(description);
        Ok(())
    }

    /// Case-insensitive match on the (name, type) pair
    pub fn collides_with(&self, name: &str, category_type: CategoryType) -> bool {
        self.category_type == category_type
            && self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.category_type)
    }
}
