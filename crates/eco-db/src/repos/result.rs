//! Inspection result repository: transactional submission, draft amendment,
//! and finalization.
//!
//! ```text
//! submit ──▶ draft ──amend*──▶ finalize ──▶ submitted
//!    └──────────(not draft)──────────────▶ submitted
//! ```
//!
//! The verdict is computed on submit and recomputed on every amendment and on
//! finalize. Submitted results are immutable.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use eco_compliance::validation::{validate_response, validate_submission};
use eco_compliance::{AnswerRef, EvaluationOutcome, EvaluationRequest, QuestionIndex};
use eco_core::entities::{
    ChecklistResponse, ConditionalFieldResponse, InspectionResult, RecommendationFlags,
    UtilityRecord,
};
use eco_core::enums::ResultStatus;
use eco_core::ids::{PREFIX_RESPONSE, PREFIX_RESULT, PREFIX_UTILITY};
use eco_core::responses::ResultDetailResponse;
use eco_core::submission::{ResponseInput, Submission};

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, parse_datetime, parse_enum, parse_json, parse_optional_datetime,
    to_json,
};
use crate::service::EcoService;

const SELECT_COLS: &str = "id, inspection_id, establishment_id, status, verdict, recommendations, \
     comply_lacking_permits, provide_lacking_facilities, others, created_at, updated_at, submitted_at";

const RESPONSE_COLS: &str =
    "id, result_id, question_id, raw_answer, notes, remarks, permit_expired, created_at, updated_at";

const RESPONSE_COLS_R: &str = "r.id, r.result_id, r.question_id, r.raw_answer, r.notes, r.remarks, \
     r.permit_expired, r.created_at, r.updated_at";

fn row_to_result(row: &libsql::Row) -> Result<InspectionResult, DatabaseError> {
    Ok(InspectionResult {
        id: row.get(0)?,
        inspection_id: row.get(1)?,
        establishment_id: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        verdict: parse_enum(&row.get::<String>(4)?)?,
        recommendations: parse_json(&row.get::<String>(5)?)?,
        flags: RecommendationFlags {
            comply_lacking_permits: get_bool(row, 6)?,
            provide_lacking_facilities: get_bool(row, 7)?,
            others: get_bool(row, 8)?,
        },
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
        submitted_at: parse_optional_datetime(get_opt_string(row, 11)?.as_deref())?,
    })
}

fn row_to_response(row: &libsql::Row) -> Result<ChecklistResponse, DatabaseError> {
    Ok(ChecklistResponse {
        id: row.get(0)?,
        result_id: row.get(1)?,
        question_id: row.get(2)?,
        raw_answer: row.get(3)?,
        notes: get_opt_string(row, 4)?,
        remarks: get_opt_string(row, 5)?,
        permit_expired: get_bool(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

fn row_to_utility(row: &libsql::Row) -> Result<UtilityRecord, DatabaseError> {
    Ok(UtilityRecord {
        id: row.get(0)?,
        result_id: row.get(1)?,
        utility: row.get(2)?,
        provider: get_opt_string(row, 3)?,
        monthly_consumption: row.get::<Option<f64>>(4)?,
        unit: get_opt_string(row, 5)?,
    })
}

fn flag(value: bool) -> i64 {
    i64::from(value)
}

fn duplicate_error(submission: &Submission) -> DatabaseError {
    DatabaseError::Duplicate(format!(
        "a result already exists for inspection {} and establishment {}",
        submission.inspection_id, submission.establishment_id
    ))
}

/// Map a constraint failure on the result row to `Duplicate`.
fn classify_insert_error(error: DatabaseError, submission: &Submission) -> DatabaseError {
    if error.is_unique_violation() {
        duplicate_error(submission)
    } else {
        error
    }
}

impl EcoService {
    /// Validate, evaluate, and store a submission in one transaction.
    ///
    /// With `draft` set the result stays editable and its verdict is
    /// provisional until [`Self::finalize_result`].
    ///
    /// # Errors
    ///
    /// - `Validation` when the submission fails field checks
    /// - `NotFound` when the inspection or establishment does not exist
    /// - `Duplicate` when the pair already has a result
    /// - any storage error, after every write has been rolled back
    pub async fn submit_result(
        &self,
        submission: &Submission,
        draft: bool,
        today: NaiveDate,
    ) -> Result<ResultDetailResponse, DatabaseError> {
        let questions = self.question_index().await?;
        validate_submission(&questions, submission)?;

        self.get_inspection(&submission.inspection_id).await?;
        self.get_establishment(&submission.establishment_id).await?;
        if self
            .find_result(&submission.inspection_id, &submission.establishment_id)
            .await?
            .is_some()
        {
            return Err(duplicate_error(submission));
        }

        let request = EvaluationRequest::from_responses(&submission.responses, &questions);
        let outcome = self.evaluator(today).evaluate(&request, &questions);

        let result_id = self.db().generate_id(PREFIX_RESULT).await?;
        let status = if draft {
            ResultStatus::Draft
        } else {
            ResultStatus::Submitted
        };

        let tx = self.db().conn().transaction().await?;
        let written = self
            .write_submission(&tx, &result_id, status, submission, &questions, &outcome)
            .await;
        match written {
            Ok(()) => tx.commit().await?,
            Err(error) => {
                tx.rollback().await?;
                tracing::warn!(%error, "submission rolled back");
                return Err(classify_insert_error(error, submission));
            }
        }

        tracing::info!(
            id = %result_id,
            %status,
            verdict = %outcome.verdict,
            recommendations = outcome.recommendations.len(),
            "stored inspection result"
        );
        self.get_result_detail(&result_id).await
    }

    async fn write_submission(
        &self,
        tx: &libsql::Transaction,
        result_id: &str,
        status: ResultStatus,
        submission: &Submission,
        questions: &QuestionIndex,
        outcome: &EvaluationOutcome,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let submitted_at = (status == ResultStatus::Submitted).then(|| now.clone());

        tx.execute(
            &format!(
                "INSERT INTO inspection_results ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
            ),
            libsql::params![
                result_id,
                submission.inspection_id.as_str(),
                submission.establishment_id.as_str(),
                status.as_str(),
                outcome.verdict.as_str(),
                to_json(&outcome.recommendations)?,
                flag(outcome.flags.comply_lacking_permits),
                flag(outcome.flags.provide_lacking_facilities),
                flag(outcome.flags.others),
                now.as_str(),
                now.as_str(),
                submitted_at
            ],
        )
        .await?;

        for response in &submission.responses {
            if !questions.contains(&response.question_id) {
                tracing::warn!(
                    question_id = %response.question_id,
                    "skipping response to unknown question"
                );
                continue;
            }
            let response_id = self.db().generate_id(PREFIX_RESPONSE).await?;
            insert_response(tx, &response_id, result_id, response, questions, &now).await?;
        }

        for utility in &submission.utilities {
            let utility_id = self.db().generate_id(PREFIX_UTILITY).await?;
            tx.execute(
                "INSERT INTO utility_records (id, result_id, utility, provider, monthly_consumption, unit)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    utility_id.as_str(),
                    result_id,
                    utility.utility.trim(),
                    utility.provider.as_deref(),
                    utility.monthly_consumption,
                    utility.unit.as_deref()
                ],
            )
            .await?;
        }
        Ok(())
    }

    /// Replace one response on a draft result.
    ///
    /// The draft is re-evaluated against `today` with the new answer in place:
    /// recommendations left by the old answer are dropped and the category
    /// flags follow what remains. The verdict stays provisional until
    /// [`Self::finalize_result`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the result is no longer a draft,
    /// `NotFound` for an unknown result or question, and `Validation` when
    /// the response fails field checks.
    pub async fn amend_response(
        &self,
        result_id: &str,
        response: &ResponseInput,
        today: NaiveDate,
    ) -> Result<ResultDetailResponse, DatabaseError> {
        let result = self.get_result(result_id).await?;
        if !result.status.is_editable() {
            return Err(DatabaseError::InvalidState(format!(
                "result {result_id} is {} and can no longer be amended",
                result.status
            )));
        }
        let question = self.get_question(&response.question_id).await?;
        validate_response(&question, response)?;

        let questions = self.question_index().await?;
        let mut request = self.stored_request(result_id).await?;
        request.set_response(response, &questions);
        let outcome = self.evaluator(today).evaluate(&request, &questions);

        let now = Utc::now().to_rfc3339();
        let tx = self.db().conn().transaction().await?;
        let written = async {
            tx.execute(
                "DELETE FROM conditional_field_responses WHERE result_id = ?1 AND question_id = ?2",
                [result_id, response.question_id.as_str()],
            )
            .await?;
            let existing = {
                let mut rows = tx
                    .query(
                        "SELECT id FROM checklist_responses WHERE result_id = ?1 AND question_id = ?2",
                        [result_id, response.question_id.as_str()],
                    )
                    .await?;
                match rows.next().await? {
                    Some(row) => Some(row.get::<String>(0)?),
                    None => None,
                }
            };
            match existing {
                Some(response_id) => {
                    let triggered = questions
                        .get(&response.question_id)
                        .is_some_and(|q| q.is_triggered_by(&response.raw_answer));
                    tx.execute(
                        "UPDATE checklist_responses
                         SET raw_answer = ?1, notes = ?2, remarks = ?3, permit_expired = ?4, updated_at = ?5
                         WHERE id = ?6",
                        libsql::params![
                            response.raw_answer.trim(),
                            response.notes.as_deref(),
                            response.remarks.as_deref(),
                            flag(triggered && response.expired),
                            now.as_str(),
                            response_id.as_str()
                        ],
                    )
                    .await?;
                    insert_conditional_fields(&tx, result_id, response, &questions).await?;
                }
                None => {
                    let response_id = self.db().generate_id(PREFIX_RESPONSE).await?;
                    insert_response(&tx, &response_id, result_id, response, &questions, &now)
                        .await?;
                }
            }
            let updated = tx
                .execute(
                    "UPDATE inspection_results
                     SET verdict = ?1, recommendations = ?2,
                         comply_lacking_permits = ?3, provide_lacking_facilities = ?4, others = ?5,
                         updated_at = ?6
                     WHERE id = ?7 AND status = ?8",
                    libsql::params![
                        outcome.verdict.as_str(),
                        to_json(&outcome.recommendations)?,
                        flag(outcome.flags.comply_lacking_permits),
                        flag(outcome.flags.provide_lacking_facilities),
                        flag(outcome.flags.others),
                        now.as_str(),
                        result_id,
                        ResultStatus::Draft.as_str()
                    ],
                )
                .await?;
            if updated == 0 {
                return Err(DatabaseError::InvalidState(format!(
                    "result {result_id} is no longer a draft"
                )));
            }
            Ok::<(), DatabaseError>(())
        }
        .await;

        match written {
            Ok(()) => tx.commit().await?,
            Err(error) => {
                tx.rollback().await?;
                return Err(error);
            }
        }
        tracing::info!(
            result_id,
            question_id = %response.question_id,
            recommendations = outcome.recommendations.len(),
            "amended response"
        );
        self.get_result_detail(result_id).await
    }

    /// Re-evaluate a draft from its current responses and mark it submitted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the result is already submitted, including
    /// when another finalize wins the race after the status check.
    pub async fn finalize_result(
        &self,
        result_id: &str,
        today: NaiveDate,
    ) -> Result<ResultDetailResponse, DatabaseError> {
        let result = self.get_result(result_id).await?;
        if !result.status.can_transition_to(ResultStatus::Submitted) {
            return Err(DatabaseError::InvalidState(format!(
                "result {result_id} cannot move from {} to {}",
                result.status,
                ResultStatus::Submitted
            )));
        }

        let questions = self.question_index().await?;
        let request = self.stored_request(result_id).await?;
        let outcome = self.evaluator(today).evaluate(&request, &questions);

        let now = Utc::now().to_rfc3339();
        let updated = self
            .db()
            .conn()
            .execute(
                "UPDATE inspection_results
                 SET status = ?1, verdict = ?2, recommendations = ?3,
                     comply_lacking_permits = ?4, provide_lacking_facilities = ?5, others = ?6,
                     updated_at = ?7, submitted_at = ?7
                 WHERE id = ?8 AND status = ?9",
                libsql::params![
                    ResultStatus::Submitted.as_str(),
                    outcome.verdict.as_str(),
                    to_json(&outcome.recommendations)?,
                    flag(outcome.flags.comply_lacking_permits),
                    flag(outcome.flags.provide_lacking_facilities),
                    flag(outcome.flags.others),
                    now.as_str(),
                    result_id,
                    ResultStatus::Draft.as_str()
                ],
            )
            .await?;
        if updated == 0 {
            return Err(DatabaseError::InvalidState(format!(
                "result {result_id} was finalized concurrently and is no longer a draft"
            )));
        }

        tracing::info!(result_id, verdict = %outcome.verdict, "finalized inspection result");
        self.get_result_detail(result_id).await
    }

    /// Rebuild the evaluation input from what is stored for a result.
    async fn stored_request(&self, result_id: &str) -> Result<EvaluationRequest, DatabaseError> {
        let responses = self.list_responses(result_id).await?;
        let fields = self.list_conditional_fields(result_id).await?;

        let mut request = EvaluationRequest::default();
        for response in responses {
            if response.permit_expired {
                request
                    .expired_flags
                    .insert(response.question_id.clone(), true);
            }
            request.responses.push(AnswerRef {
                question_id: response.question_id,
                raw_answer: response.raw_answer,
            });
        }
        for field in fields {
            request
                .conditional_field_values
                .entry(field.question_id)
                .or_insert_with(BTreeMap::new)
                .insert(field.field_name, field.value);
        }
        Ok(request)
    }

    pub async fn get_result(&self, id: &str) -> Result<InspectionResult, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM inspection_results WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "result",
            id: id.to_string(),
        })?;
        row_to_result(&row)
    }

    /// The result recorded for an establishment during an inspection, if any.
    pub async fn find_result(
        &self,
        inspection_id: &str,
        establishment_id: &str,
    ) -> Result<Option<InspectionResult>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM inspection_results
                     WHERE inspection_id = ?1 AND establishment_id = ?2"
                ),
                [inspection_id, establishment_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_result(&row)?)),
            None => Ok(None),
        }
    }

    /// Results newest first, optionally for one inspection.
    pub async fn list_results(
        &self,
        inspection_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<InspectionResult>, DatabaseError> {
        let mut rows = match inspection_id {
            Some(inspection_id) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM inspection_results WHERE inspection_id = ?1
                             ORDER BY created_at DESC LIMIT {limit}"
                        ),
                        [inspection_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM inspection_results
                             ORDER BY created_at DESC LIMIT {limit}"
                        ),
                        (),
                    )
                    .await?
            }
        };

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_result(&row)?);
        }
        Ok(results)
    }

    pub async fn list_responses(&self, result_id: &str) -> Result<Vec<ChecklistResponse>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {RESPONSE_COLS_R} FROM checklist_responses r
                     JOIN checklist_questions q ON q.id = r.question_id
                     WHERE r.result_id = ?1
                     ORDER BY q.sort_order, q.created_at"
                ),
                [result_id],
            )
            .await?;
        let mut responses = Vec::new();
        while let Some(row) = rows.next().await? {
            responses.push(row_to_response(&row)?);
        }
        Ok(responses)
    }

    pub async fn list_conditional_fields(
        &self,
        result_id: &str,
    ) -> Result<Vec<ConditionalFieldResponse>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT result_id, question_id, field_name, value
                 FROM conditional_field_responses
                 WHERE result_id = ?1
                 ORDER BY question_id, field_name",
                [result_id],
            )
            .await?;
        let mut fields = Vec::new();
        while let Some(row) = rows.next().await? {
            fields.push(ConditionalFieldResponse {
                result_id: row.get(0)?,
                question_id: row.get(1)?,
                field_name: row.get(2)?,
                value: row.get(3)?,
            });
        }
        Ok(fields)
    }

    pub async fn list_utilities(&self, result_id: &str) -> Result<Vec<UtilityRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, result_id, utility, provider, monthly_consumption, unit
                 FROM utility_records WHERE result_id = ?1 ORDER BY utility",
                [result_id],
            )
            .await?;
        let mut utilities = Vec::new();
        while let Some(row) = rows.next().await? {
            utilities.push(row_to_utility(&row)?);
        }
        Ok(utilities)
    }

    /// A result with its responses, conditional values, and utilities.
    pub async fn get_result_detail(&self, id: &str) -> Result<ResultDetailResponse, DatabaseError> {
        let result = self.get_result(id).await?;
        Ok(ResultDetailResponse {
            responses: self.list_responses(id).await?,
            conditional_fields: self.list_conditional_fields(id).await?,
            utilities: self.list_utilities(id).await?,
            result,
        })
    }
}

/// Insert a response row plus its conditional values. Conditional values and
/// the expired checkbox are only kept when the trigger option was chosen.
async fn insert_response(
    tx: &libsql::Transaction,
    response_id: &str,
    result_id: &str,
    response: &ResponseInput,
    questions: &QuestionIndex,
    now: &str,
) -> Result<(), DatabaseError> {
    let triggered = questions
        .get(&response.question_id)
        .is_some_and(|q| q.is_triggered_by(&response.raw_answer));
    tx.execute(
        &format!(
            "INSERT INTO checklist_responses ({RESPONSE_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ),
        libsql::params![
            response_id,
            result_id,
            response.question_id.as_str(),
            response.raw_answer.trim(),
            response.notes.as_deref(),
            response.remarks.as_deref(),
            flag(triggered && response.expired),
            now,
            now
        ],
    )
    .await?;
    insert_conditional_fields(tx, result_id, response, questions).await
}

async fn insert_conditional_fields(
    tx: &libsql::Transaction,
    result_id: &str,
    response: &ResponseInput,
    questions: &QuestionIndex,
) -> Result<(), DatabaseError> {
    let Some(question) = questions.get(&response.question_id) else {
        return Ok(());
    };
    if !question.is_triggered_by(&response.raw_answer) {
        return Ok(());
    }
    for (field_name, value) in &response.conditional_fields {
        if value.trim().is_empty() {
            continue;
        }
        tx.execute(
            "INSERT INTO conditional_field_responses (result_id, question_id, field_name, value)
             VALUES (?1, ?2, ?3, ?4)",
            [
                result_id,
                response.question_id.as_str(),
                field_name.as_str(),
                value.trim(),
            ],
        )
        .await?;
    }
    Ok(())
}
