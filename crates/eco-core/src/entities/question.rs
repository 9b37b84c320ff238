use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FieldKind, Polarity, QuestionKind};

/// One selectable answer with its frozen compliance polarity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionOption {
    pub label: String,
    pub polarity: Polarity,
}

/// A follow-up input collected only when the trigger option is chosen.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConditionalField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl ConditionalField {
    /// Whether this field carries a permit expiry date.
    #[must_use]
    pub fn is_expiry(&self) -> bool {
        is_expiry_field_name(&self.name)
    }
}

/// Follow-up fields and the option label that reveals them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConditionalLogic {
    pub trigger_response_label: String,
    #[serde(default)]
    pub fields: Vec<ConditionalField>,
}

/// A single inspection criterion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistQuestion {
    pub id: String,
    pub text: String,
    pub category: String,
    pub kind: QuestionKind,
    pub options: Vec<QuestionOption>,
    pub is_conditional: bool,
    pub conditional_logic: Option<ConditionalLogic>,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

impl ChecklistQuestion {
    /// Whether `answer` selects the option that reveals the conditional fields.
    ///
    /// Comparison is trimmed and case-insensitive.
    #[must_use]
    pub fn is_triggered_by(&self, answer: &str) -> bool {
        if !self.is_conditional {
            return false;
        }
        self.conditional_logic
            .as_ref()
            .is_some_and(|logic| labels_match(&logic.trigger_response_label, answer))
    }

    /// Find the option whose label matches `answer` (trimmed, case-insensitive).
    #[must_use]
    pub fn find_option(&self, answer: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|opt| labels_match(&opt.label, answer))
    }

    /// Conditional field definitions, empty when the question is unconditional.
    #[must_use]
    pub fn conditional_fields(&self) -> &[ConditionalField] {
        self.conditional_logic
            .as_ref()
            .map_or(&[], |logic| logic.fields.as_slice())
    }
}

/// Compare two labels the way answers are matched against options.
#[must_use]
pub fn labels_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Conditional field names mentioning "expiry" or "expiration" hold permit
/// expiry dates.
#[must_use]
pub fn is_expiry_field_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("expiry") || lower.contains("expiration")
}
