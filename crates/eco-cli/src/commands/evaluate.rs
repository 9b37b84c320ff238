use chrono::Utc;
use eco_compliance::options::load_question;
use eco_compliance::validation::{validate_question_set, validate_response};
use eco_compliance::{
    EvaluationOutcome, EvaluationRequest, Evaluator, QuestionIndex, TracingObserver,
};
use eco_core::submission::{NewQuestion, ResponseInput};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::EvaluateArgs;
use crate::commands::shared::input::read_json_file;
use crate::commands::shared::parse::parse_date;
use crate::output::output;

/// A question with the identifier responses refer to it by.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionDefinition {
    pub id: String,
    #[serde(flatten)]
    pub question: NewQuestion,
}

/// Input file for `ecoinspect evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationInput {
    pub questions: Vec<QuestionDefinition>,
    #[serde(default)]
    pub responses: Vec<ResponseInput>,
}

/// Handle `ecoinspect evaluate`. Nothing is read from or written to the
/// project database.
pub fn handle(args: &EvaluateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config_best_effort(flags)?;
    let today = match args.today.as_deref() {
        Some(raw) => parse_date(raw, "today")?,
        None => bootstrap::reference_date(&config)?,
    };
    let input: EvaluationInput = read_json_file(&args.file)?;

    let observer = TracingObserver;
    let evaluator = Evaluator::new(today)
        .with_rules(bootstrap::category_rules(&config))
        .with_observer(&observer);
    let outcome = evaluate_input(input, &evaluator)?;
    output(&outcome, flags.format)
}

fn evaluate_input(
    input: EvaluationInput,
    evaluator: &Evaluator<'_>,
) -> anyhow::Result<EvaluationOutcome> {
    let created_at = Utc::now();
    let questions: QuestionIndex = input
        .questions
        .into_iter()
        .map(|definition| load_question(&definition.id, definition.question, created_at))
        .collect();
    validate_question_set(&questions)?;

    for response in &input.responses {
        if let Some(question) = questions.get(&response.question_id) {
            validate_response(question, response)?;
        }
    }

    let request = EvaluationRequest::from_responses(&input.responses, &questions);
    Ok(evaluator.evaluate(&request, &questions))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use eco_core::enums::{ComplianceVerdict, RecommendationCategory};
    use pretty_assertions::assert_eq;

    use super::*;

    fn evaluator() -> Evaluator<'static> {
        Evaluator::new(NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date"))
    }

    fn input(json: &str) -> EvaluationInput {
        serde_json::from_str(json).expect("input should parse")
    }

    #[test]
    fn flattened_question_definitions_parse() {
        let input = input(
            r#"{
                "questions": [
                    {"id": "qst-trap", "text": "Grease trap facility present",
                     "kind": "single_choice", "options": ["Present", "Absent"]}
                ],
                "responses": [{"question_id": "qst-trap", "raw_answer": "Absent"}]
            }"#,
        );
        let outcome = evaluate_input(input, &evaluator()).expect("evaluation should succeed");

        assert_eq!(outcome.verdict, ComplianceVerdict::NotCompliant);
        assert_eq!(
            outcome.recommendations[0].category,
            RecommendationCategory::ProvideLackingFacilities
        );
    }

    #[test]
    fn no_responses_is_compliant() {
        let outcome = evaluate_input(input(r#"{"questions": []}"#), &evaluator())
            .expect("evaluation should succeed");
        assert!(outcome.is_compliant);
        assert!(outcome.recommendations.is_empty());
    }

    #[test]
    fn answer_outside_options_is_rejected() {
        let input = input(
            r#"{
                "questions": [
                    {"id": "qst-trap", "text": "Grease trap facility present",
                     "kind": "single_choice", "options": ["Present", "Absent"]}
                ],
                "responses": [{"question_id": "qst-trap", "raw_answer": "Maybe"}]
            }"#,
        );
        let err = evaluate_input(input, &evaluator()).expect_err("should fail validation");
        assert!(err.to_string().contains("raw_answer"), "got {err}");
    }
}
