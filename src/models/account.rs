//! Account model
//!
//! An account holds money in one currency. Its balance only moves through
//! [`Account::apply`], which refuses to take the balance below zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;
use super::text::required_name;
use crate::error::{LedgerError, LedgerResult};

/// Currency used when the caller does not pick one
pub const DEFAULT_CURRENCY: &str = "UAH";

/// A financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AccountRecord")]
pub struct Account {
    id: AccountId,
    name: String,
    currency: String,
    balance: Money,
}

/// Raw on-disk shape, re-validated on load
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    id: AccountId,
    name: String,
    currency: String,
    balance: Money,
}

impl TryFrom<AccountRecord> for Account {
    type Error = LedgerError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        Self::with_id(record.id, &record.name, &record.currency, record.balance)
    }
}

impl Account {
    /// Create a new account with a fresh id
    pub fn new(name: &str, currency: &str, initial_balance: Money) -> LedgerResult<Self> {
        Self::with_id(AccountId::new(), name, currency, initial_balance)
    }

    /// Build an account with a known id, running the full validation
    pub fn with_id(
        id: AccountId,
        name: &str,
        currency: &str,
        balance: Money,
    ) -> LedgerResult<Self> {
        if id.is_nil() {
            return Err(LedgerError::Validation("Account id cannot be empty".into()));
        }
        if balance.is_negative() {
            return Err(LedgerError::Validation(
                "Initial balance cannot be negative".into(),
            ));
        }

        Ok(Self {
            id,
            name: required_name("Account", name)?,
            currency: normalize_currency(currency)?,
            balance,
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Rename the account
    pub fn rename(&mut self, name: &str) -> LedgerResult<()> {
        self.name = required_name("Account", name)?;
        Ok(())
    }

    /// Switch the currency code; the balance is not converted
    pub fn change_currency(&mut self, currency: &str) -> LedgerResult<()> {
        self.currency = normalize_currency(currency)?;
        Ok(())
    }

    /// Add a signed delta to the balance
    ///
    /// Fails with a validation error, leaving the balance untouched, when the
    /// result would be negative.
    pub fn apply(&mut self, delta: Money) -> LedgerResult<()> {
        let tentative = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::Validation("Balance overflow".into()))?;

        if tentative.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Insufficient funds in account '{}': balance {}, change {}",
                self.name, self.balance, delta
            )));
        }

        self.balance = tentative;
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.currency)
    }
}

fn normalize_currency(currency: &str) -> LedgerResult<String> {
    let normalized = currency.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(LedgerError::Validation("Currency code is required".into()));
    }

    let len = normalized.chars().count();
    if !(3..=5).contains(&len) {
        return Err(LedgerError::Validation(format!(
            "Currency code must be 3-5 characters, got '{}'",
            normalized
        )));
    }

    Ok(normalized)
}
