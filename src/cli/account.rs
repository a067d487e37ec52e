//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use super::{find_account, parse_amount};
use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::LedgerResult;
use crate::models::Money;
use crate::services::{AccountService, TransactionService};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Currency code (defaults to the configured currency)
        #[arg(short, long)]
        currency: Option<String>,
        /// Initial balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Show an account's balance
    Balance {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New currency code
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Delete an account that has no transactions
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub async fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> LedgerResult<()> {
    let service = AccountService::from_storage(storage);

    match cmd {
        AccountCommands::Create {
            name,
            currency,
            balance,
        } => {
            let currency = currency.unwrap_or_else(|| settings.default_currency.clone());
            let initial_balance: Money = parse_amount(&balance)?;

            let account = service.create(&name, &currency, initial_balance).await?;

            println!("Created account: {}", account.name());
            println!("  Currency: {}", account.currency());
            println!("  Balance: {}", account.balance());
            println!("  ID: {}", account.id());
        }

        AccountCommands::List => {
            let accounts = service.get_all().await?;
            println!("{}", format_account_list(&accounts));
        }

        AccountCommands::Show { account } => {
            let found = find_account(&service.get_all().await?, &account)?;
            let count = TransactionService::from_storage(storage)
                .get_by_account(found.id())
                .await?
                .len();
            print!("{}", format_account_details(&found, count));
        }

        AccountCommands::Balance { account } => {
            let found = find_account(&service.get_all().await?, &account)?;
            let balance = service.get_balance(found.id()).await?;
            println!("{}", balance.format_with_code(found.currency()));
        }

        AccountCommands::Edit {
            account,
            name,
            currency,
        } => {
            let found = find_account(&service.get_all().await?, &account)?;

            if name.is_none() && currency.is_none() {
                println!("No changes specified. Use --name or --currency.");
                return Ok(());
            }

            let updated = service
                .update(
                    found.id(),
                    name.as_deref().unwrap_or(found.name()),
                    currency.as_deref().unwrap_or(found.currency()),
                )
                .await?;
            println!("Updated account: {}", updated);
        }

        AccountCommands::Delete { account } => {
            let found = find_account(&service.get_all().await?, &account)?;
            service.delete(found.id()).await?;
            println!("Deleted account: {}", found.name());
        }
    }

    Ok(())
}
