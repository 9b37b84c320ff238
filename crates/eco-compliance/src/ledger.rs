//! Per-question recommendation bookkeeping.
//!
//! Recommendations are keyed by question. Recording a new answer for a
//! question replaces whatever that answer produced before, so the ledger only
//! ever holds live entries. Messages are never deduplicated.

use eco_core::entities::{ChecklistQuestion, Recommendation, RecommendationFlags};
use eco_core::enums::{Classification, RecommendationCategory, RecommendationSource};

use crate::rules::CategoryRules;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationLedger {
    /// Question IDs in first-recorded order.
    order: Vec<String>,
    entries: Vec<Recommendation>,
}

impl RecommendationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the classification of a question's current answer.
    ///
    /// A negative answer yields one recommendation categorized from the
    /// question text; any other classification clears the question's
    /// negative-response entry.
    pub fn apply_response(
        &mut self,
        question: &ChecklistQuestion,
        classification: Classification,
        rules: &CategoryRules,
    ) {
        let replacement = (classification == Classification::Negative)
            .then(|| negative_response_recommendation(question, rules));
        self.replace(
            &question.id,
            RecommendationSource::NegativeResponse,
            replacement,
        );
    }

    /// Replace every entry for `question_id` that came from `source`.
    pub fn replace<I>(&mut self, question_id: &str, source: RecommendationSource, new_entries: I)
    where
        I: IntoIterator<Item = Recommendation>,
    {
        self.entries
            .retain(|rec| !(rec.question_id == question_id && rec.source == source));
        let mut added = false;
        for rec in new_entries {
            self.entries.push(rec);
            added = true;
        }
        if added && !self.order.iter().any(|id| id == question_id) {
            self.order.push(question_id.to_string());
        }
    }

    /// Live recommendations grouped by question in first-recorded order.
    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.order
            .iter()
            .flat_map(|id| self.entries.iter().filter(move |rec| &rec.question_id == id))
            .cloned()
            .collect()
    }

    /// Category checkboxes derived from the live recommendations.
    #[must_use]
    pub fn flags(&self) -> RecommendationFlags {
        RecommendationFlags::from_recommendations(&self.entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remediation entry for a question answered negatively.
#[must_use]
pub fn negative_response_recommendation(
    question: &ChecklistQuestion,
    rules: &CategoryRules,
) -> Recommendation {
    let category = rules.categorize(&question.text);
    let message = match category {
        RecommendationCategory::ComplyLackingPermits => {
            format!("Comply with lacking permit/license: {}", question.text)
        }
        RecommendationCategory::ProvideLackingFacilities => {
            format!("Provide lacking facility/equipment: {}", question.text)
        }
        RecommendationCategory::Others => format!("Address finding: {}", question.text),
    };
    Recommendation {
        question_id: question.id.clone(),
        category,
        source: RecommendationSource::NegativeResponse,
        message,
    }
}

/// Renewal entry for a lapsed permit. `detail` names the field and date when
/// the lapse came from an expiry field.
#[must_use]
pub fn expired_permit_recommendation(question_id: &str, detail: Option<&str>) -> Recommendation {
    let message = detail.map_or_else(
        || String::from("Permit expired, renewal required"),
        |detail| format!("Permit expired ({detail}), renewal required"),
    );
    Recommendation {
        question_id: question_id.to_string(),
        category: RecommendationCategory::ComplyLackingPermits,
        source: RecommendationSource::ExpiredPermit,
        message,
    }
}
