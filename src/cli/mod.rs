//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod category;
pub mod config;
pub mod report;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::handle_config_command;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountId, Category, CategoryId, CategoryType, Money};

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount '{}'. Use a format like '25.50' or '25'. Error: {}",
            input, e
        ))
    })
}

pub(crate) fn parse_category_type(input: &str) -> LedgerResult<CategoryType> {
    CategoryType::parse(input).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid category type: '{}'. Valid types: income, expense, transfer",
            input
        ))
    })
}

pub(crate) fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

/// When a transaction happened: an RFC 3339 timestamp, a bare date (start
/// of that UTC day), or now
pub(crate) fn parse_occurred_on(input: Option<&str>) -> LedgerResult<DateTime<Utc>> {
    let Some(input) = input else {
        return Ok(Utc::now());
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input.trim()) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    Ok(start_of_day(parse_date(input)?))
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

pub(crate) fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Inclusive period from optional dates; defaults to the current month so far
pub(crate) fn parse_period(
    from: Option<&str>,
    to: Option<&str>,
) -> LedgerResult<(DateTime<Utc>, DateTime<Utc>)> {
    let today = Utc::now().date_naive();

    let from = match from {
        Some(s) => parse_date(s)?,
        None => today.with_day(1).unwrap_or(today),
    };
    let to = match to {
        Some(s) => parse_date(s)?,
        None => today,
    };

    if from > to {
        return Err(LedgerError::Validation(format!(
            "Period start {} is after its end {}",
            from, to
        )));
    }
    Ok((start_of_day(from), end_of_day(to)))
}

/// Find an account by ID or case-insensitive name
pub(crate) fn find_account(accounts: &[Account], identifier: &str) -> LedgerResult<Account> {
    let needle = identifier.trim();
    let by_id: Option<AccountId> = needle.parse().ok();

    accounts
        .iter()
        .find(|a| Some(a.id()) == by_id)
        .or_else(|| accounts.iter().find(|a| a.name().eq_ignore_ascii_case(needle)))
        .cloned()
        .ok_or_else(|| LedgerError::account_not_found(needle))
}

/// Find a category by ID or case-insensitive name, optionally limited to one type
pub(crate) fn find_category(
    categories: &[Category],
    identifier: &str,
    category_type: Option<CategoryType>,
) -> LedgerResult<Category> {
    let needle = identifier.trim();
    let by_id: Option<CategoryId> = needle.parse().ok();

    if let Some(category) = categories.iter().find(|c| Some(c.id()) == by_id) {
        return Ok(category.clone());
    }

    let mut matches = categories.iter().filter(|c| {
        c.name().eq_ignore_ascii_case(needle)
            && category_type.map_or(true, |t| c.category_type() == t)
    });
    match (matches.next(), matches.next()) {
        (Some(category), None) => Ok(category.clone()),
        (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
            "Category name '{}' is ambiguous; use its ID",
            needle
        ))),
        (None, _) => Err(LedgerError::category_not_found(needle)),
    }
}
