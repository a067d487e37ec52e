//! Transaction model
//!
//! A transaction is immutable once built: it is either recorded or deleted,
//! never edited. The variant-specific fields live in [`TransactionKind`], so
//! an income can never carry a counterparty and a transfer never a category.
//!
//! On disk the variant is flattened into the record and tagged by `type`:
//!
//! ```json
//! { "id": "...", "accountId": "...", "amount": -30000,
//!   "occurredOn": "2025-01-15T10:00:00Z", "type": "Transfer",
//!   "counterpartyAccountId": "...", "transferGroupId": "..." }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId, TransferGroupId};
use super::money::Money;
use super::text::optional_note;
use crate::error::{LedgerError, LedgerResult};

/// How far in the future a transaction may be dated, to absorb clock skew
pub const FUTURE_TOLERANCE_SECS: i64 = 60;

/// Flat tag of a transaction variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// Variant-specific data of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionKind {
    #[serde(rename_all = "camelCase")]
    Income { category_id: CategoryId },

    #[serde(rename_all = "camelCase")]
    Expense { category_id: CategoryId },

    /// One leg of a transfer; the other leg shares `transfer_group_id`
    #[serde(rename_all = "camelCase")]
    Transfer {
        counterparty_account_id: AccountId,
        transfer_group_id: TransferGroupId,
    },
}

impl TransactionKind {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Income { .. } => TransactionType::Income,
            Self::Expense { .. } => TransactionType::Expense,
            Self::Transfer { .. } => TransactionType::Transfer,
        }
    }
}

/// A recorded money movement on one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    account_id: AccountId,
    /// Signed: positive for inflow, negative for outflow
    amount: Money,
    occurred_on: DateTime<Utc>,
    #[serde(flatten)]
    kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Transaction {
    /// Build an income record; `amount` must be positive
    pub fn income(
        account_id: AccountId,
        category_id: CategoryId,
        amount: Money,
        occurred_on: DateTime<Utc>,
        note: Option<&str>,
    ) -> LedgerResult<Self> {
        Self::build(
            account_id,
            amount,
            TransactionKind::Income { category_id },
            occurred_on,
            note,
        )
    }

    /// Build an expense record; `amount` must be negative
    pub fn expense(
        account_id: AccountId,
        category_id: CategoryId,
        amount: Money,
        occurred_on: DateTime<Utc>,
        note: Option<&str>,
    ) -> LedgerResult<Self> {
        Self::build(
            account_id,
            amount,
            TransactionKind::Expense { category_id },
            occurred_on,
            note,
        )
    }

    /// Build one leg of a transfer
    pub fn transfer_leg(
        account_id: AccountId,
        counterparty_account_id: AccountId,
        transfer_group_id: TransferGroupId,
        amount: Money,
        occurred_on: DateTime<Utc>,
        note: Option<&str>,
    ) -> LedgerResult<Self> {
        Self::build(
            account_id,
            amount,
            TransactionKind::Transfer {
                counterparty_account_id,
                transfer_group_id,
            },
            occurred_on,
            note,
        )
    }

    fn build(
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        occurred_on: DateTime<Utc>,
        note: Option<&str>,
    ) -> LedgerResult<Self> {
        if account_id.is_nil() {
            return Err(LedgerError::Validation("Account id is required".into()));
        }
        if amount.is_zero() {
            return Err(LedgerError::Validation(
                "Transaction amount cannot be zero".into(),
            ));
        }
        if occurred_on > Utc::now() + Duration::seconds(FUTURE_TOLERANCE_SECS) {
            return Err(LedgerError::Validation(
                "Transaction date cannot be in the future".into(),
            ));
        }

        match kind {
            TransactionKind::Income { category_id } | TransactionKind::Expense { category_id }
                if category_id.is_nil() =>
            {
                return Err(LedgerError::Validation(
                    "Category is required for income and expenses".into(),
                ));
            }
            TransactionKind::Income { .. } if amount.is_negative() => {
                return Err(LedgerError::Validation(
                    "Income amount must be positive".into(),
                ));
            }
            TransactionKind::Expense { .. } if amount.is_positive() => {
                return Err(LedgerError::Validation(
                    "Expense amount must be negative".into(),
                ));
            }
            TransactionKind::Transfer {
                counterparty_account_id,
                transfer_group_id,
            } => {
                if counterparty_account_id.is_nil() || transfer_group_id.is_nil() {
                    return Err(LedgerError::Validation(
                        "Transfer requires a counterparty account and a transfer group".into(),
                    ));
                }
                if counterparty_account_id == account_id {
                    return Err(LedgerError::Validation(
                        "Transfer counterparty must be a different account".into(),
                    ));
                }
            }
            _ => {}
        }

        Ok(Self {
            id: TransactionId::new(),
            account_id,
            amount,
            occurred_on,
            kind,
            note: optional_note(note),
        })
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn absolute_amount(&self) -> Money {
        self.amount.abs()
    }

    /// Money flowing into the account
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, TransactionKind::Transfer { .. })
    }

    /// Category of an income or expense; `None` for transfers
    pub fn category_id(&self) -> Option<CategoryId> {
        match self.kind {
            TransactionKind::Income { category_id } | TransactionKind::Expense { category_id } => {
                Some(category_id)
            }
            TransactionKind::Transfer { .. } => None,
        }
    }

    pub fn counterparty_account_id(&self) -> Option<AccountId> {
        match self.kind {
            TransactionKind::Transfer {
                counterparty_account_id,
                ..
            } => Some(counterparty_account_id),
            _ => None,
        }
    }

    pub fn transfer_group_id(&self) -> Option<TransferGroupId> {
        match self.kind {
            TransactionKind::Transfer {
                transfer_group_id, ..
            } => Some(transfer_group_id),
            _ => None,
        }
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}
