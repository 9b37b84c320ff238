use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The answer recorded for one question within one inspection result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistResponse {
    pub id: String,
    pub result_id: String,
    pub question_id: String,
    pub raw_answer: String,
    pub notes: Option<String>,
    pub remarks: Option<String>,
    /// Explicit "permit expired" checkbox; only kept when the trigger option
    /// was chosen.
    #[serde(default)]
    pub permit_expired: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A follow-up value captured because the triggering option was chosen.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConditionalFieldResponse {
    pub result_id: String,
    pub question_id: String,
    pub field_name: String,
    pub value: String,
}

/// Utility usage captured alongside a submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UtilityRecord {
    pub id: String,
    pub result_id: String,
    pub utility: String,
    pub provider: Option<String>,
    pub monthly_consumption: Option<f64>,
    pub unit: Option<String>,
}
