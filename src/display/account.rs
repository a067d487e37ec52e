//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::Account;

/// Format a list of accounts as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    // Calculate column widths
    let name_width = accounts
        .iter()
        .map(|a| a.name().chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<8}  {:>14}  {}\n",
        "Name",
        "Currency",
        "Balance",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<8}  {:->14}  {:-<40}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for account in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:<8}  {:>14}  {}\n",
            account.name(),
            account.currency(),
            account.balance().to_string(),
            account.id(),
            name_width = name_width,
        ));
    }

    output
}

/// Format account details
pub fn format_account_details(account: &Account, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name()));
    output.push_str(&format!("  ID:           {}\n", account.id()));
    output.push_str(&format!("  Currency:     {}\n", account.currency()));
    output.push_str(&format!(
        "  Balance:      {}\n",
        account.balance().format_with_code(account.currency())
    ));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));

    output
}
