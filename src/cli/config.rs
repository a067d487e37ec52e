//! Config command: show paths and settings, optionally change settings

use chrono::NaiveDate;

use crate::config::{LedgerPaths, Settings};
use crate::display::try_format_date;
use crate::error::{LedgerError, LedgerResult};

/// Print the configuration, applying any requested changes first
pub fn handle_config_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    currency: Option<String>,
    date_format: Option<String>,
) -> LedgerResult<()> {
    let changed = currency.is_some() || date_format.is_some();

    if let Some(currency) = currency {
        let code = currency.trim().to_uppercase();
        if !(3..=5).contains(&code.chars().count()) {
            return Err(LedgerError::Validation(format!(
                "Currency code must be 3-5 characters, got '{}'",
                currency
            )));
        }
        settings.default_currency = code;
    }
    if let Some(format) = date_format {
        if format.trim().is_empty() || try_format_date(NaiveDate::MIN, &format).is_none() {
            return Err(LedgerError::Validation(format!(
                "Invalid date format: '{}'",
                format
            )));
        }
        settings.date_format = format;
    }
    if changed {
        settings.save(paths)?;
        println!("Settings saved.");
        println!();
    }

    println!("Wallet Configuration");
    println!("====================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Default currency: {}", settings.default_currency);
    println!("  Date format:      {}", settings.date_format);

    Ok(())
}
