//! Compliance evaluation settings.

use chrono::NaiveDate;
use eco_core::enums::RecommendationCategory;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Extra keyword rule, consulted before the built-in permit and facility rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryRuleConfig {
    pub keywords: Vec<String>,
    pub category: RecommendationCategory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ComplianceConfig {
    /// Fixed "today" (`YYYY-MM-DD`) for expiry checks. Empty means the
    /// current local date.
    #[serde(default)]
    pub reference_date: String,

    #[serde(default)]
    pub category_rules: Vec<CategoryRuleConfig>,
}

impl ComplianceConfig {
    /// Parse the configured reference date, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the value is set but is not
    /// a `YYYY-MM-DD` date.
    pub fn reference_date(&self) -> Result<Option<NaiveDate>, ConfigError> {
        let raw = self.reference_date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: "compliance.reference_date".into(),
                reason: e.to_string(),
            })
    }
}
