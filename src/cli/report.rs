//! CLI commands for reports
//!
//! Period reports over income and expenses. Periods default to the current
//! month up to today.

use clap::Subcommand;

use super::parse_period;
use crate::config::Settings;
use crate::display::report::{format_category_summary, format_daily_summary, format_totals};
use crate::error::LedgerResult;
use crate::services::TransactionService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and net for a period
    Totals {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Income and expenses per day
    Daily {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Totals per category, largest first
    #[command(alias = "spending")]
    Categories {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        to: Option<String>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Handle a report command
pub async fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let service = TransactionService::from_storage(storage);

    match cmd {
        ReportCommands::Totals { from, to } => {
            let (from, to) = parse_period(from.as_deref(), to.as_deref())?;
            let totals = service.get_totals(from, to).await?;
            print!("{}", format_totals(&totals, from, to));
        }

        ReportCommands::Daily { from, to } => {
            let (from, to) = parse_period(from.as_deref(), to.as_deref())?;
            let days = service.get_daily_summary(from, to).await?;
            print!("{}", format_daily_summary(&days, &settings.date_format));
        }

        ReportCommands::Categories { from, to, top } => {
            let (from, to) = parse_period(from.as_deref(), to.as_deref())?;
            let mut summaries = service.get_category_summary(from, to).await?;
            if let Some(n) = top {
                summaries.truncate(n);
            }
            print!("{}", format_category_summary(&summaries));
        }
    }

    Ok(())
}
