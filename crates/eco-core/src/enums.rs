//! Polarity, classification, verdict and lifecycle enums for EcoInspect.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `ResultStatus` provides `allowed_next_states()` to enforce the draft lifecycle
//! at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Polarity
// ---------------------------------------------------------------------------

/// Compliance meaning declared for a checklist option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Outcome of classifying a single raw answer.
///
/// Shared by the freeform keyword classifier and the declared option-polarity
/// lookup. Only the freeform path produces `NotApplicable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    NotApplicable,
    Positive,
    Negative,
    Neutral,
}

impl Classification {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Collapse to an option polarity. `NotApplicable` has no polarity of its
    /// own and is frozen as `Neutral`.
    #[must_use]
    pub const fn to_polarity(self) -> Polarity {
        match self {
            Self::Positive => Polarity::Positive,
            Self::Negative => Polarity::Negative,
            Self::NotApplicable | Self::Neutral => Polarity::Neutral,
        }
    }
}

impl From<Polarity> for Classification {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Positive => Self::Positive,
            Polarity::Negative => Self::Negative,
            Polarity::Neutral => Self::Neutral,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComplianceVerdict
// ---------------------------------------------------------------------------

/// Binary compliance outcome persisted on an inspection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceVerdict {
    Compliant,
    NotCompliant,
}

impl ComplianceVerdict {
    #[must_use]
    pub const fn from_compliant(is_compliant: bool) -> Self {
        if is_compliant {
            Self::Compliant
        } else {
            Self::NotCompliant
        }
    }

    #[must_use]
    pub const fn is_compliant(self) -> bool {
        matches!(self, Self::Compliant)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NotCompliant => "not_compliant",
        }
    }
}

impl fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecommendationCategory
// ---------------------------------------------------------------------------

/// Remediation bucket a recommendation belongs to. Each category maps to a
/// checkbox on the inspection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    ComplyLackingPermits,
    ProvideLackingFacilities,
    Others,
}

impl RecommendationCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ComplyLackingPermits => "comply_lacking_permits",
            Self::ProvideLackingFacilities => "provide_lacking_facilities",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecommendationSource
// ---------------------------------------------------------------------------

/// What produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    NegativeResponse,
    ExpiredPermit,
}

impl RecommendationSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NegativeResponse => "negative_response",
            Self::ExpiredPermit => "expired_permit",
        }
    }
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuestionKind
// ---------------------------------------------------------------------------

/// Answer shape of a checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    FreeText,
    SingleChoice,
    MultiChoice,
}

impl QuestionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FreeText => "free_text",
            Self::SingleChoice => "single_choice",
            Self::MultiChoice => "multi_choice",
        }
    }

    /// Whether answers must come from the question's option list.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }

    /// Multi-choice answers are stored comma-separated.
    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::MultiChoice)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Input type of a conditional follow-up field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
    Number,
    Checkbox,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResultStatus
// ---------------------------------------------------------------------------

/// Lifecycle of an inspection result.
///
/// ```text
/// draft → submitted
/// ```
///
/// Responses may be amended only while the result is a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Draft,
    Submitted,
}

impl ResultStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Submitted],
            Self::Submitted => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Quarter
// ---------------------------------------------------------------------------

/// Calendar quarter an inspection is scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Quarter containing the given month (1-12). Out-of-range months clamp to Q4.
    #[must_use]
    pub const fn from_month(month: u32) -> Self {
        match month {
            0..=3 => Self::Q1,
            4..=6 => Self::Q2,
            7..=9 => Self::Q3,
            _ => Self::Q4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&RecommendationCategory::ComplyLackingPermits).unwrap();
        assert_eq!(json, "\"comply_lacking_permits\"");
        let json = serde_json::to_string(&Classification::NotApplicable).unwrap();
        assert_eq!(json, "\"not_applicable\"");
        let json = serde_json::to_string(&ComplianceVerdict::NotCompliant).unwrap();
        assert_eq!(json, "\"not_compliant\"");
    }

    #[test]
    fn as_str_matches_serde() {
        for category in [
            RecommendationCategory::ComplyLackingPermits,
            RecommendationCategory::ProvideLackingFacilities,
            RecommendationCategory::Others,
        ] {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json.as_str().unwrap(), category.as_str());
        }
        for kind in [QuestionKind::FreeText, QuestionKind::SingleChoice, QuestionKind::MultiChoice] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str().unwrap(), kind.as_str());
        }
    }

    #[test]
    fn not_applicable_freezes_as_neutral() {
        assert_eq!(Classification::NotApplicable.to_polarity(), Polarity::Neutral);
        assert_eq!(Classification::Negative.to_polarity(), Polarity::Negative);
        assert_eq!(Classification::from(Polarity::Positive), Classification::Positive);
    }

    #[test]
    fn result_status_transitions() {
        assert!(ResultStatus::Draft.can_transition_to(ResultStatus::Submitted));
        assert!(!ResultStatus::Submitted.can_transition_to(ResultStatus::Draft));
        assert!(!ResultStatus::Submitted.is_editable());
    }

    #[test]
    fn quarter_from_month() {
        assert_eq!(Quarter::from_month(1), Quarter::Q1);
        assert_eq!(Quarter::from_month(6), Quarter::Q2);
        assert_eq!(Quarter::from_month(9), Quarter::Q3);
        assert_eq!(Quarter::from_month(12), Quarter::Q4);
    }

    #[test]
    fn verdict_from_bool() {
        assert_eq!(ComplianceVerdict::from_compliant(true), ComplianceVerdict::Compliant);
        assert!(!ComplianceVerdict::from_compliant(false).is_compliant());
    }
}
