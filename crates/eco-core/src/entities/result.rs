use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Recommendation, RecommendationFlags};
use crate::enums::{ComplianceVerdict, ResultStatus};

/// One establishment's checklist outcome for one inspection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InspectionResult {
    pub id: String,
    pub inspection_id: String,
    pub establishment_id: String,
    pub status: ResultStatus,
    pub verdict: ComplianceVerdict,
    pub recommendations: Vec<Recommendation>,
    pub flags: RecommendationFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}
