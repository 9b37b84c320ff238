//! # eco-compliance
//!
//! Response classification and compliance determination for EcoInspect.
//!
//! Everything here is pure and synchronous: callers pass questions, answers and
//! a reference date, and get classifications, verdicts, recommendations and
//! tallies back. Diagnostics flow through an injected [`EvaluationObserver`]
//! rather than global logging.
//!
//! Two classification paths coexist and are deliberately not unified:
//! - [`classify_freeform`] applies keyword heuristics to historical free-text
//!   answers (used by [`report`]).
//! - [`classify_by_options`] looks up the polarity declared on a question's
//!   options (used by [`Evaluator`] during inspection entry).
//!
//! They can disagree on the same literal answer.

pub mod classify;
pub mod error;
pub mod evaluate;
pub mod expiry;
pub mod ledger;
pub mod observer;
pub mod options;
pub mod report;
pub mod rules;
pub mod validation;

pub use classify::{classify_by_options, classify_freeform};
pub use error::{FieldError, ValidationErrors};
pub use evaluate::{
    AnswerRef, ClassifiedAnswer, EvaluationOutcome, EvaluationRequest, Evaluator, QuestionIndex,
    evaluate,
};
pub use ledger::RecommendationLedger;
pub use observer::{EvaluationObserver, NoopObserver, SkipReason, TracingObserver};
pub use rules::{CategoryRule, CategoryRules};
