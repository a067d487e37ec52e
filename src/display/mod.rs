//! Display formatting for terminal output
//!
//! Pure functions from models to strings. Nothing here touches storage.

use std::fmt::Write;

use chrono::NaiveDate;

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use category::{format_category_details, format_category_list};
pub use report::{format_category_summary, format_daily_summary, format_totals};
pub use transaction::{
    describe_transaction, format_transaction_details, format_transaction_register, NameLookup,
};

/// Render a date with a strftime pattern
///
/// Returns `None` when the pattern is malformed or asks for fields a plain
/// date does not have, such as `%H` or `%z`.
pub fn try_format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// Like [`try_format_date`], falling back to `%Y-%m-%d`
pub(crate) fn format_date(date: NaiveDate, pattern: &str) -> String {
    try_format_date(date, pattern).unwrap_or_else(|| date.format("%Y-%m-%d").to_string())
}

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
