//! Transaction CLI commands
//!
//! Income, expenses and transfers, plus listing and searching the log.

use clap::Subcommand;

use super::{
    end_of_day, find_account, find_category, parse_amount, parse_date, parse_occurred_on,
    start_of_day,
};
use crate::config::Settings;
use crate::display::transaction::{
    format_transaction_details, format_transaction_register, NameLookup,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryType, Transaction, TransactionId};
use crate::services::{AccountService, CategoryService, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record income into an account
    Income {
        /// Account name or ID
        account: String,
        /// Amount (e.g., "1500.00")
        amount: String,
        /// Income category name or ID
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD) or RFC 3339 timestamp; defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Record an expense from an account
    Expense {
        /// Account name or ID
        account: String,
        /// Amount spent, as a positive number
        amount: String,
        /// Expense category name or ID
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD) or RFC 3339 timestamp; defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Move money between two accounts
    Transfer {
        /// Source account name or ID
        from: String,
        /// Destination account name or ID
        to: String,
        /// Amount to move
        amount: String,
        /// Date (YYYY-MM-DD) or RFC 3339 timestamp; defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by account
        #[arg(short, long)]
        account: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Only transactions on this day (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        on: Option<String>,
        /// Period start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Period end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Minimum absolute amount (income and expenses only)
        #[arg(long)]
        min: Option<String>,
        /// Maximum absolute amount (income and expenses only)
        #[arg(long)]
        max: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction and reverse its effect on balances
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn parse_transaction_id(input: &str) -> LedgerResult<TransactionId> {
    input.parse().map_err(|_| {
        LedgerError::Validation(format!("Invalid transaction ID: '{}'", input))
    })
}

/// Handle a transaction command
pub async fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::from_storage(storage);
    let accounts = AccountService::from_storage(storage).get_all().await?;
    let categories = CategoryService::from_storage(storage).get_all().await?;
    let names = NameLookup::new(&accounts, &categories);

    match cmd {
        TransactionCommands::Income {
            account,
            amount,
            category,
            date,
            note,
        } => {
            let account = find_account(&accounts, &account)?;
            let category = find_category(&categories, &category, Some(CategoryType::Income))?;

            let txn = service
                .add_income(
                    account.id(),
                    category.id(),
                    parse_amount(&amount)?,
                    parse_occurred_on(date.as_deref())?,
                    note.as_deref(),
                )
                .await?;
            println!("Recorded income of {} to {}", txn.amount(), account.name());
            println!("  ID: {}", txn.id());
        }

        TransactionCommands::Expense {
            account,
            amount,
            category,
            date,
            note,
        } => {
            let account = find_account(&accounts, &account)?;
            let category = find_category(&categories, &category, Some(CategoryType::Expense))?;

            let txn = service
                .add_expense(
                    account.id(),
                    category.id(),
                    parse_amount(&amount)?,
                    parse_occurred_on(date.as_deref())?,
                    note.as_deref(),
                )
                .await?;
            println!(
                "Recorded expense of {} from {}",
                txn.absolute_amount(),
                account.name()
            );
            println!("  ID: {}", txn.id());
        }

        TransactionCommands::Transfer {
            from,
            to,
            amount,
            date,
            note,
        } => {
            let from = find_account(&accounts, &from)?;
            let to = find_account(&accounts, &to)?;

            let result = service
                .transfer(
                    from.id(),
                    to.id(),
                    parse_amount(&amount)?,
                    parse_occurred_on(date.as_deref())?,
                    note.as_deref(),
                )
                .await?;
            println!(
                "Transferred {} from {} to {}",
                result.incoming.amount(),
                from.name(),
                to.name()
            );
            println!("  Outgoing: {}", result.outgoing.id());
            println!("  Incoming: {}", result.incoming.id());
        }

        TransactionCommands::List {
            account,
            category,
            on,
            from,
            to,
            min,
            max,
            limit,
        } => {
            let mut transactions: Vec<Transaction> = if let Some(day) = on {
                service.search_by_date(parse_date(&day)?).await?
            } else if min.is_some() || max.is_some() {
                let min = min.as_deref().map(parse_amount).transpose()?;
                let max = max.as_deref().map(parse_amount).transpose()?;
                service.search_by_amount(min, max).await?
            } else if let Some(account) = &account {
                service
                    .get_by_account(find_account(&accounts, account)?.id())
                    .await?
            } else if let Some(category) = &category {
                service
                    .get_by_category(find_category(&categories, category, None)?.id())
                    .await?
            } else {
                let from = match from.as_deref() {
                    Some(s) => start_of_day(parse_date(s)?),
                    None => chrono::DateTime::<chrono::Utc>::MIN_UTC,
                };
                let to = match to.as_deref() {
                    Some(s) => end_of_day(parse_date(s)?),
                    None => chrono::DateTime::<chrono::Utc>::MAX_UTC,
                };
                service.get_by_period(from, to).await?
            };

            // Remaining filters narrow whichever query ran above
            if let Some(account) = &account {
                let id = find_account(&accounts, account)?.id();
                transactions.retain(|t| t.account_id() == id);
            }
            if let Some(category) = &category {
                let id = find_category(&categories, category, None)?.id();
                transactions.retain(|t| t.category_id() == Some(id));
            }
            if let Some(from) = from.as_deref() {
                let from = start_of_day(parse_date(from)?);
                transactions.retain(|t| t.occurred_on() >= from);
            }
            if let Some(to) = to.as_deref() {
                let to = end_of_day(parse_date(to)?);
                transactions.retain(|t| t.occurred_on() <= to);
            }
            transactions.truncate(limit);

            print!(
                "{}",
                format_transaction_register(&transactions, &names, &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.get_by_id(parse_transaction_id(&id)?).await?;
            print!("{}", format_transaction_details(&txn, &names));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.get_by_id(parse_transaction_id(&id)?).await?;
            service.delete(txn.id()).await?;
            if txn.is_transfer() {
                println!("Deleted transfer {}", txn.id());
            } else {
                println!("Deleted transaction {}", txn.id());
            }
        }
    }

    Ok(())
}
