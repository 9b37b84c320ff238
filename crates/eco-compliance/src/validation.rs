//! Pre-persistence checks for questions and submissions.
//!
//! All failures are collected, not short-circuited, so a caller sees every
//! problem with a submission at once.

use std::collections::HashSet;

use eco_core::entities::{ChecklistQuestion, labels_match};
use eco_core::submission::{ResponseInput, Submission};

use crate::error::{FieldError, ValidationErrors};
use crate::evaluate::QuestionIndex;

/// Check one question's conditional-logic invariant.
///
/// A conditional question must carry conditional logic whose trigger label
/// names one of its options.
///
/// # Errors
///
/// Returns every field error found on the question.
pub fn validate_question(question: &ChecklistQuestion) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    check_question(question, &format!("questions[{}]", question.id), &mut errors);
    ValidationErrors { errors }.into_result()
}

/// Check every question in an index.
///
/// # Errors
///
/// Returns the field errors of all invalid questions.
pub fn validate_question_set(questions: &QuestionIndex) -> Result<(), ValidationErrors> {
    let mut sorted: Vec<&ChecklistQuestion> = questions.values().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut errors = Vec::new();
    for question in sorted {
        check_question(question, &format!("questions[{}]", question.id), &mut errors);
    }
    ValidationErrors { errors }.into_result()
}

/// Check a submission against the questions it answers.
///
/// Responses naming unknown questions pass; the evaluator skips them.
///
/// # Errors
///
/// Returns every field error found across the submission and the questions
/// it references.
pub fn validate_submission(
    questions: &QuestionIndex,
    submission: &Submission,
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if submission.inspection_id.trim().is_empty() {
        errors.push(FieldError::new("inspection_id", "must not be empty"));
    }
    if submission.establishment_id.trim().is_empty() {
        errors.push(FieldError::new("establishment_id", "must not be empty"));
    }

    let mut seen = HashSet::new();
    let mut checked_questions = HashSet::new();
    for (index, response) in submission.responses.iter().enumerate() {
        if response.question_id.trim().is_empty() {
            errors.push(FieldError::new(
                format!("responses[{index}].question_id"),
                "must not be empty",
            ));
            continue;
        }
        let path = format!("responses[{}]", response.question_id);
        if !seen.insert(response.question_id.as_str()) {
            errors.push(FieldError::new(path, "question answered more than once"));
            continue;
        }
        let Some(question) = questions.get(&response.question_id) else {
            continue;
        };
        if checked_questions.insert(question.id.as_str()) {
            check_question(question, &format!("questions[{}]", question.id), &mut errors);
        }
        check_response(question, response, &path, &mut errors);
    }

    for (index, utility) in submission.utilities.iter().enumerate() {
        if utility.utility.trim().is_empty() {
            errors.push(FieldError::new(
                format!("utilities[{index}].utility"),
                "must not be empty",
            ));
        }
        if utility.monthly_consumption.is_some_and(|v| v < 0.0 || !v.is_finite()) {
            errors.push(FieldError::new(
                format!("utilities[{index}].monthly_consumption"),
                "must be a non-negative number",
            ));
        }
    }

    ValidationErrors { errors }.into_result()
}

/// Validate a single response, as used when amending a draft.
///
/// # Errors
///
/// Returns the field errors of the response.
pub fn validate_response(
    question: &ChecklistQuestion,
    response: &ResponseInput,
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    check_response(
        question,
        response,
        &format!("responses[{}]", response.question_id),
        &mut errors,
    );
    ValidationErrors { errors }.into_result()
}

fn check_question(question: &ChecklistQuestion, path: &str, errors: &mut Vec<FieldError>) {
    if question.text.trim().is_empty() {
        errors.push(FieldError::new(format!("{path}.text"), "must not be empty"));
    }
    if question.kind.is_choice() && question.options.is_empty() {
        errors.push(FieldError::new(
            format!("{path}.options"),
            "choice questions need at least one option",
        ));
    }
    if !question.is_conditional {
        return;
    }
    match &question.conditional_logic {
        None => errors.push(FieldError::new(
            format!("{path}.conditional_logic"),
            "required when the question is conditional",
        )),
        Some(logic) => {
            if question.find_option(&logic.trigger_response_label).is_none() {
                errors.push(FieldError::new(
                    format!("{path}.conditional_logic.trigger_response_label"),
                    format!(
                        "'{}' does not match any option",
                        logic.trigger_response_label
                    ),
                ));
            }
        }
    }
}

fn check_response(
    question: &ChecklistQuestion,
    response: &ResponseInput,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let answer = response.raw_answer.trim();

    if question.kind.is_choice() && !answer.is_empty() {
        let parts: Vec<&str> = if question.kind.is_multi() {
            answer.split(',').map(str::trim).filter(|p| !p.is_empty()).collect()
        } else {
            vec![answer]
        };
        for part in parts {
            if !question.options.iter().any(|opt| labels_match(&opt.label, part)) {
                errors.push(FieldError::new(
                    format!("{path}.raw_answer"),
                    format!("'{part}' is not an option of this question"),
                ));
            }
        }
    }

    if !question.is_triggered_by(answer) {
        return;
    }
    for field in question.conditional_fields() {
        let filled = response
            .conditional_fields
            .get(&field.name)
            .is_some_and(|value| !value.trim().is_empty());
        if field.required && !filled {
            errors.push(FieldError::new(
                format!("{path}.conditional.{}", field.name),
                "required when the trigger option is selected",
            ));
        }
    }
}
