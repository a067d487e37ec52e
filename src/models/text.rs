//! Text normalization shared by the entity constructors

use crate::error::{LedgerError, LedgerResult};

/// Maximum length of entity names, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of notes and descriptions, in characters
pub const MAX_NOTE_LEN: usize = 500;

/// Trim a required name and enforce the length limit
pub(crate) fn required_name(label: &str, name: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation(format!("{} name is required", label)));
    }

    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(LedgerError::Validation(format!(
            "{} name too long ({} chars, max {})",
            label, len, MAX_NAME_LEN
        )));
    }

    Ok(trimmed.to_string())
}

/// Trim optional free text; blank becomes `None`, overlong text is cut
pub(crate) fn optional_note(text: Option<&str>) -> Option<String> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.chars().take(MAX_NOTE_LEN).collect())
}
