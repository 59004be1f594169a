//! Field-by-field validation, sanitizing and document building for the stored records.

pub mod agent_schema;
pub mod user_schema;

use crate::dto::field::FieldValue;
use serde::Serialize;

/// Outcome of a schema check. `errors` keeps one message per violated field, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        ValidationResult { is_valid: errors.is_empty(), errors }
    }
}

pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Checks a required string field and its trimmed length in characters.
/// Returns the trimmed value when every check passed.
pub(crate) fn check_text(
    errors: &mut Vec<String>,
    label: &str,
    field: Option<&FieldValue>,
    min: usize,
    max: usize,
) -> Option<String> {
    let Some(value) = field.and_then(FieldValue::non_empty_str) else {
        errors.push(format!("{} is required and must be a string", label));
        return None;
    };
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min {
        errors.push(format!("{} must be at least {} characters long", label, min));
        None
    } else if len > max {
        errors.push(format!("{} must be less than {} characters", label, max));
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trimmed string form of an optional field, empty when absent
pub(crate) fn trimmed_text(field: Option<&FieldValue>) -> String {
    field.map(|f| f.to_text().trim().to_string()).unwrap_or_default()
}
