//! Validation error types for eco-compliance.

use serde::Serialize;
use thiserror::Error;

/// A single failed check, addressed by a field path such as
/// `responses[qst-1].conditional.permit_no`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field-level failure found while validating one submission.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("Validation failed: {}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Return `Ok(())` when nothing was collected.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field error is present.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Whether any error was recorded against `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
