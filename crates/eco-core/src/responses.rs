//! CLI response types returned as JSON by `ecoinspect` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    ChecklistResponse, ConditionalFieldResponse, InspectionResult, UtilityRecord,
};
use crate::enums::Classification;

/// Response from `ecoinspect classify`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClassifyResponse {
    pub answer: String,
    pub classification: Classification,
    /// Which classifier produced the result: `freeform` or `options`.
    pub path: String,
}

/// Response from `ecoinspect result get` and `ecoinspect result submit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResultDetailResponse {
    pub result: InspectionResult,
    pub responses: Vec<ChecklistResponse>,
    pub conditional_fields: Vec<ConditionalFieldResponse>,
    pub utilities: Vec<UtilityRecord>,
}
