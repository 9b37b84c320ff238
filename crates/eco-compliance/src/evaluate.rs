//! Compliance evaluation for one inspection result.
//!
//! ```text
//! responses ──classify_by_options──▶ polarity per question
//!                                     │
//! conditional expiry fields ──────────┼──▶ verdict
//! expired checkboxes ─────────────────┘      │
//!                                            ▼
//!                              recommendations + category flags
//! ```
//!
//! Verdict rule, applied literally:
//! - no responses → compliant
//! - (all positive AND some permit expired) OR any negative → not compliant
//! - otherwise → compliant

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use eco_core::entities::{ChecklistQuestion, Recommendation, RecommendationFlags, is_expiry_field_name};
use eco_core::enums::{Classification, ComplianceVerdict, RecommendationSource};
use eco_core::submission::ResponseInput;
use serde::{Deserialize, Serialize};

use crate::classify::classify_by_options;
use crate::expiry::parse_expiry_date;
use crate::ledger::{RecommendationLedger, expired_permit_recommendation};
use crate::observer::{EvaluationObserver, NoopObserver, SkipReason};
use crate::rules::CategoryRules;

static NOOP: NoopObserver = NoopObserver;

/// Questions addressable by ID.
#[derive(Debug, Clone, Default)]
pub struct QuestionIndex {
    by_id: HashMap<String, ChecklistQuestion>,
}

impl QuestionIndex {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ChecklistQuestion> {
        self.by_id.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &ChecklistQuestion> {
        self.by_id.values()
    }
}

impl FromIterator<ChecklistQuestion> for QuestionIndex {
    fn from_iter<T: IntoIterator<Item = ChecklistQuestion>>(iter: T) -> Self {
        Self {
            by_id: iter.into_iter().map(|q| (q.id.clone(), q)).collect(),
        }
    }
}

/// A raw answer pointing at a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRef {
    pub question_id: String,
    pub raw_answer: String,
}

/// Everything the evaluator looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub responses: Vec<AnswerRef>,
    /// Question ID → (field name → entered value).
    #[serde(default)]
    pub conditional_field_values: BTreeMap<String, BTreeMap<String, String>>,
    /// Question ID → explicit "expired" checkbox.
    #[serde(default)]
    pub expired_flags: BTreeMap<String, bool>,
}

impl EvaluationRequest {
    /// Build a request from submission responses.
    ///
    /// Conditional values and expired checkboxes are carried only for
    /// responses whose answer selects the question's trigger option, matching
    /// what storage keeps.
    #[must_use]
    pub fn from_responses(responses: &[ResponseInput], questions: &QuestionIndex) -> Self {
        let mut request = Self::default();
        for response in responses {
            request.responses.push(AnswerRef {
                question_id: response.question_id.clone(),
                raw_answer: response.raw_answer.clone(),
            });
            request.carry_conditional(response, questions);
        }
        request
    }

    /// Swap in a new answer for one question, keeping its position when the
    /// question was already answered. Whatever conditional values and
    /// expired checkbox the old answer carried are dropped first.
    pub fn set_response(&mut self, response: &ResponseInput, questions: &QuestionIndex) {
        let answer = AnswerRef {
            question_id: response.question_id.clone(),
            raw_answer: response.raw_answer.clone(),
        };
        match self
            .responses
            .iter_mut()
            .find(|existing| existing.question_id == response.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.responses.push(answer),
        }
        self.conditional_field_values.remove(&response.question_id);
        self.expired_flags.remove(&response.question_id);
        self.carry_conditional(response, questions);
    }

    fn carry_conditional(&mut self, response: &ResponseInput, questions: &QuestionIndex) {
        let triggered = questions
            .get(&response.question_id)
            .is_some_and(|q| q.is_triggered_by(&response.raw_answer));
        if !triggered {
            return;
        }
        if !response.conditional_fields.is_empty() {
            self.conditional_field_values
                .insert(response.question_id.clone(), response.conditional_fields.clone());
        }
        if response.expired {
            self.expired_flags.insert(response.question_id.clone(), true);
        }
    }
}

/// Classification assigned to one contributing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedAnswer {
    pub question_id: String,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub is_compliant: bool,
    pub verdict: ComplianceVerdict,
    pub recommendations: Vec<Recommendation>,
    pub flags: RecommendationFlags,
    pub classifications: Vec<ClassifiedAnswer>,
    /// Question IDs of responses that referenced unknown questions.
    pub skipped: Vec<String>,
    pub has_expired_permit: bool,
}

/// Evaluates compliance against a fixed reference date.
pub struct Evaluator<'a> {
    today: NaiveDate,
    rules: CategoryRules,
    observer: &'a dyn EvaluationObserver,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            rules: CategoryRules::default(),
            observer: &NOOP,
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: CategoryRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn EvaluationObserver) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn evaluate(&self, request: &EvaluationRequest, questions: &QuestionIndex) -> EvaluationOutcome {
        let mut ledger = RecommendationLedger::new();
        let mut classifications = Vec::with_capacity(request.responses.len());
        let mut skipped = Vec::new();
        let mut has_any_negative = false;
        let mut every_positive = true;

        for answer in &request.responses {
            let Some(question) = questions.get(&answer.question_id) else {
                self.observer
                    .skipped(&answer.question_id, SkipReason::UnknownQuestion);
                skipped.push(answer.question_id.clone());
                continue;
            };

            let classification = classify_by_options(&answer.raw_answer, &question.options);
            self.observer
                .classified(&question.id, &answer.raw_answer, classification);

            match classification {
                Classification::Positive => {}
                Classification::Negative => {
                    has_any_negative = true;
                    every_positive = false;
                }
                Classification::Neutral | Classification::NotApplicable => every_positive = false,
            }

            ledger.apply_response(question, classification, &self.rules);
            classifications.push(ClassifiedAnswer {
                question_id: question.id.clone(),
                classification,
            });
        }

        let all_positive = !classifications.is_empty() && every_positive;
        let has_expired_permit = self.record_expiries(request, questions, &mut ledger);

        let is_compliant = if request.responses.is_empty() {
            true
        } else {
            !((all_positive && has_expired_permit) || has_any_negative)
        };

        let outcome = EvaluationOutcome {
            is_compliant,
            verdict: ComplianceVerdict::from_compliant(is_compliant),
            recommendations: ledger.recommendations(),
            flags: ledger.flags(),
            classifications,
            skipped,
            has_expired_permit,
        };
        self.observer.verdict(&outcome);
        outcome
    }

    /// Scan expiry fields and expired checkboxes, recording a renewal
    /// recommendation for each lapse. Returns whether any permit lapsed.
    fn record_expiries(
        &self,
        request: &EvaluationRequest,
        questions: &QuestionIndex,
        ledger: &mut RecommendationLedger,
    ) -> bool {
        let mut lapses: BTreeMap<&str, Vec<Recommendation>> = BTreeMap::new();

        for (question_id, fields) in &request.conditional_field_values {
            if !questions.contains(question_id) {
                self.observer
                    .skipped(question_id, SkipReason::UnknownQuestion);
                continue;
            }
            for (field_name, value) in fields {
                if !is_expiry_field_name(field_name) {
                    continue;
                }
                let parsed = parse_expiry_date(value);
                let expired = parsed.is_some_and(|date| date < self.today);
                self.observer
                    .expiry_checked(question_id, field_name, parsed, expired);
                if let (true, Some(date)) = (expired, parsed) {
                    let detail = format!("{field_name} {date}");
                    lapses
                        .entry(question_id.as_str())
                        .or_default()
                        .push(expired_permit_recommendation(question_id, Some(&detail)));
                }
            }
        }

        for (question_id, expired) in &request.expired_flags {
            if !*expired {
                continue;
            }
            if !questions.contains(question_id) {
                self.observer
                    .skipped(question_id, SkipReason::UnknownQuestion);
                continue;
            }
            lapses
                .entry(question_id.as_str())
                .or_default()
                .push(expired_permit_recommendation(question_id, None));
        }

        let any = !lapses.is_empty();
        for (question_id, recs) in lapses {
            ledger.replace(question_id, RecommendationSource::ExpiredPermit, recs);
        }
        any
    }
}

/// Evaluate with the default rule table and no observer.
#[must_use]
pub fn evaluate(
    request: &EvaluationRequest,
    questions: &QuestionIndex,
    today: NaiveDate,
) -> EvaluationOutcome {
    Evaluator::new(today).evaluate(request, questions)
}
