use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Quarter;

/// A scheduled inspection event. Many establishments may be visited under one
/// inspection; each visit produces an `InspectionResult`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Inspection {
    pub id: String,
    pub title: String,
    pub scheduled_on: NaiveDate,
    pub quarter: Quarter,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}
