//! Input validation for the orchestration workflows.

use crate::error::{Result, WorkflowError};

/// Structural check for a `YYYY-MM-DD` date: exactly 10 ASCII characters,
/// dashes at positions 4 and 7, digits everywhere else. No calendar
/// validity beyond that.
pub fn is_valid_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| {
        if i == 4 || i == 7 {
            *b == b'-'
        } else {
            b.is_ascii_digit()
        }
    })
}

/// Pull a required parameter out of its query slot; absent or empty
/// terminates the workflow before any downstream call.
pub fn require<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(WorkflowError::invalid(message)),
    }
}

/// Check both stay dates structurally.
pub fn require_dates(in_date: &str, out_date: &str) -> Result<()> {
    if !is_valid_date(in_date) || !is_valid_date(out_date) {
        return Err(WorkflowError::invalid(
            "Please check inDate/outDate format (YYYY-MM-DD)",
        ));
    }
    Ok(())
}
