use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A business or facility subject to inspection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Establishment {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub business_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
