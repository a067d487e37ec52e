use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wallet::cli::{
    handle_account_command, handle_category_command, handle_config_command,
    handle_report_command, handle_transaction_command,
};
use wallet::config::{LedgerPaths, Settings};
use wallet::storage::Storage;

#[derive(Parser)]
#[command(
    name = "wallet",
    version,
    about = "Personal finance ledger",
    long_about = "Wallet keeps track of your accounts, income, expenses and \
                  transfers in plain JSON files, and reports where the money went."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(wallet::cli::AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(wallet::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(wallet::cli::TransactionCommands),

    /// Income and expense reports
    #[command(subcommand)]
    Report(wallet::cli::ReportCommands),

    /// Show current configuration and paths
    Config {
        /// Set the default currency for new accounts
        #[arg(long)]
        currency: Option<String>,
        /// Set the date display format (strftime)
        #[arg(long)]
        date_format: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd).await?;
        }
        Some(Commands::Txn(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Config {
            currency,
            date_format,
        }) => {
            handle_config_command(&paths, &mut settings, currency, date_format)?;
        }
        None => {
            println!("Wallet - personal finance ledger");
            println!();
            println!("Run 'wallet --help' for usage information.");
        }
    }

    Ok(())
}
