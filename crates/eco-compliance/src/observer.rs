//! Evaluation observers.
//!
//! The evaluator never logs on its own. Callers that want diagnostics inject
//! an observer; [`TracingObserver`] forwards every event to `tracing`.

use chrono::NaiveDate;
use eco_core::enums::Classification;

use crate::evaluate::EvaluationOutcome;

/// Why a response did not contribute to the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownQuestion,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownQuestion => "unknown_question",
        }
    }
}

/// Receives evaluation events. Every method defaults to doing nothing.
pub trait EvaluationObserver {
    fn classified(&self, _question_id: &str, _raw_answer: &str, _classification: Classification) {}

    fn skipped(&self, _question_id: &str, _reason: SkipReason) {}

    fn expiry_checked(
        &self,
        _question_id: &str,
        _field_name: &str,
        _parsed: Option<NaiveDate>,
        _expired: bool,
    ) {
    }

    fn verdict(&self, _outcome: &EvaluationOutcome) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EvaluationObserver for NoopObserver {}

/// Emits evaluation events as `tracing` debug events under the
/// `eco_compliance::evaluate` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EvaluationObserver for TracingObserver {
    fn classified(&self, question_id: &str, raw_answer: &str, classification: Classification) {
        tracing::debug!(
            target: "eco_compliance::evaluate",
            question_id,
            raw_answer,
            %classification,
            "classified response"
        );
    }

    fn skipped(&self, question_id: &str, reason: SkipReason) {
        tracing::debug!(
            target: "eco_compliance::evaluate",
            question_id,
            reason = reason.as_str(),
            "skipped response"
        );
    }

    fn expiry_checked(
        &self,
        question_id: &str,
        field_name: &str,
        parsed: Option<NaiveDate>,
        expired: bool,
    ) {
        tracing::debug!(
            target: "eco_compliance::evaluate",
            question_id,
            field_name,
            parsed = ?parsed,
            expired,
            "checked expiry field"
        );
    }

    fn verdict(&self, outcome: &EvaluationOutcome) {
        tracing::debug!(
            target: "eco_compliance::evaluate",
            verdict = %outcome.verdict,
            recommendations = outcome.recommendations.len(),
            skipped = outcome.skipped.len(),
            has_expired_permit = outcome.has_expired_permit,
            "evaluated compliance"
        );
    }
}
