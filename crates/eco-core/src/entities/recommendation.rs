use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{RecommendationCategory, RecommendationSource};

/// A remediation action attached to one checklist question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Recommendation {
    pub question_id: String,
    pub category: RecommendationCategory,
    pub source: RecommendationSource,
    pub message: String,
}

/// Category checkboxes on an inspection result, derived from live recommendations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecommendationFlags {
    pub comply_lacking_permits: bool,
    pub provide_lacking_facilities: bool,
    pub others: bool,
}

impl RecommendationFlags {
    /// OR the categories of every recommendation into a set of flags.
    #[must_use]
    pub fn from_recommendations<'a, I>(recommendations: I) -> Self
    where
        I: IntoIterator<Item = &'a Recommendation>,
    {
        recommendations
            .into_iter()
            .fold(Self::default(), |mut flags, rec| {
                flags.set(rec.category);
                flags
            })
    }

    pub const fn set(&mut self, category: RecommendationCategory) {
        match category {
            RecommendationCategory::ComplyLackingPermits => self.comply_lacking_permits = true,
            RecommendationCategory::ProvideLackingFacilities => {
                self.provide_lacking_facilities = true;
            }
            RecommendationCategory::Others => self.others = true,
        }
    }

    #[must_use]
    pub const fn any(self) -> bool {
        self.comply_lacking_permits || self.provide_lacking_facilities || self.others
    }
}
