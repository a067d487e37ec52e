//! Transaction display formatting
//!
//! Every per-variant rendering goes through one `match` on
//! [`TransactionKind`], so adding a kind is a compile error until it is
//! handled here.

use std::collections::HashMap;

use crate::models::{Account, AccountId, Category, CategoryId, Transaction, TransactionKind};

use super::{format_date, truncate};

/// Resolves ids to display names
#[derive(Debug, Default)]
pub struct NameLookup {
    accounts: HashMap<AccountId, String>,
    categories: HashMap<CategoryId, String>,
}

impl NameLookup {
    pub fn new(accounts: &[Account], categories: &[Category]) -> Self {
        Self {
            accounts: accounts
                .iter()
                .map(|a| (a.id(), a.name().to_string()))
                .collect(),
            categories: categories
                .iter()
                .map(|c| (c.id(), c.name().to_string()))
                .collect(),
        }
    }

    pub fn account(&self, id: AccountId) -> String {
        self.accounts
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "(deleted account)".to_string())
    }

    pub fn category(&self, id: CategoryId) -> String {
        self.categories
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "(deleted category)".to_string())
    }
}

/// Short human description of what a transaction did
pub fn describe_transaction(txn: &Transaction, names: &NameLookup) -> String {
    match txn.kind() {
        TransactionKind::Income { category_id } => {
            format!("Income: {}", names.category(*category_id))
        }
        TransactionKind::Expense { category_id } => {
            format!("Expense: {}", names.category(*category_id))
        }
        TransactionKind::Transfer {
            counterparty_account_id,
            ..
        } => {
            let other = names.account(*counterparty_account_id);
            if txn.amount().is_negative() {
                format!("Transfer to {}", other)
            } else {
                format!("Transfer from {}", other)
            }
        }
    }
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, names: &NameLookup, date_format: &str) -> String {
    let transfer_indicator = if txn.is_transfer() { "⇄" } else { " " };

    format!(
        "{} {:10} {} {} {:>12}",
        transfer_indicator,
        format_date(txn.occurred_on().date_naive(), date_format),
        truncate(&names.account(txn.account_id()), 16),
        truncate(&describe_transaction(txn, names), 28),
        txn.amount()
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    names: &NameLookup,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:10} {:16} {:28} {:>12}\n",
        "Date", "Account", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, names, date_format));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, names: &NameLookup) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.occurred_on().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type()));
    output.push_str(&format!("Account:     {}\n", names.account(txn.account_id())));
    output.push_str(&format!("Amount:      {}\n", txn.amount()));

    match txn.kind() {
        TransactionKind::Income { category_id } | TransactionKind::Expense { category_id } => {
            output.push_str(&format!("Category:    {}\n", names.category(*category_id)));
        }
        TransactionKind::Transfer {
            counterparty_account_id,
            transfer_group_id,
        } => {
            output.push_str(&format!(
                "Counterpart: {}\n",
                names.account(*counterparty_account_id)
            ));
            output.push_str(&format!("Group:       {}\n", transfer_group_id));
        }
    }

    if let Some(note) = txn.note() {
        output.push_str(&format!("Note:        {}\n", note));
    }

    output
}
