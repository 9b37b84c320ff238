//! Checklist question repository.
//!
//! Option polarities are resolved once in [`EcoService::create_question`] and
//! stored with the question; reads never reclassify them.

use chrono::Utc;

use eco_compliance::QuestionIndex;
use eco_compliance::options::load_question;
use eco_compliance::validation::validate_question;
use eco_core::entities::{ChecklistQuestion, ConditionalLogic, QuestionOption};
use eco_core::ids::PREFIX_QUESTION;
use eco_core::submission::NewQuestion;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_enum, parse_json, parse_optional_json, to_json};
use crate::service::EcoService;

const SELECT_COLS: &str =
    "id, text, category, kind, options, is_conditional, conditional_logic, sort_order, created_at";

fn row_to_question(row: &libsql::Row) -> Result<ChecklistQuestion, DatabaseError> {
    let options: Vec<QuestionOption> = parse_json(&row.get::<String>(4)?)?;
    let logic: Option<ConditionalLogic> =
        parse_optional_json(get_opt_string(row, 6)?.as_deref())?;
    Ok(ChecklistQuestion {
        id: row.get(0)?,
        text: row.get(1)?,
        category: row.get(2)?,
        kind: parse_enum(&row.get::<String>(3)?)?,
        options,
        is_conditional: get_bool(row, 5)?,
        conditional_logic: logic,
        sort_order: row.get(7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl EcoService {
    /// Store a question, freezing option polarities.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the conditional-logic invariant
    /// does not hold.
    pub async fn create_question(&self, input: NewQuestion) -> Result<ChecklistQuestion, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_QUESTION).await?;
        let question = load_question(&id, input, now);
        validate_question(&question)?;

        let logic = question
            .conditional_logic
            .as_ref()
            .map(to_json)
            .transpose()?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO checklist_questions
                     (id, text, category, kind, options, is_conditional, conditional_logic, sort_order, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    question.id.as_str(),
                    question.text.as_str(),
                    question.category.as_str(),
                    question.kind.as_str(),
                    to_json(&question.options)?,
                    i64::from(question.is_conditional),
                    logic,
                    question.sort_order,
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::info!(id = %question.id, kind = %question.kind, "created question");
        Ok(question)
    }

    pub async fn get_question(&self, id: &str) -> Result<ChecklistQuestion, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM checklist_questions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "question",
            id: id.to_string(),
        })?;
        row_to_question(&row)
    }

    /// Questions in checklist order, optionally restricted to one category.
    pub async fn list_questions(
        &self,
        category: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ChecklistQuestion>, DatabaseError> {
        let mut rows = match category {
            Some(category) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM checklist_questions WHERE category = ?1
                             ORDER BY sort_order, created_at LIMIT {limit}"
                        ),
                        [category],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM checklist_questions
                             ORDER BY sort_order, created_at LIMIT {limit}"
                        ),
                        (),
                    )
                    .await?
            }
        };

        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions)
    }

    /// Every stored question, keyed by ID.
    pub async fn question_index(&self) -> Result<QuestionIndex, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM checklist_questions"), ())
            .await?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions.into_iter().collect())
    }
}
