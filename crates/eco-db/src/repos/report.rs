//! Reporting queries over stored results.

use eco_compliance::report::{
    ResponseRecord, ResponseReport, VerdictSummary, aggregate_responses, summarize_verdicts,
};
use eco_core::enums::ResultStatus;

use crate::error::DatabaseError;
use crate::service::EcoService;

impl EcoService {
    /// Answers from submitted results joined with their questions, optionally
    /// narrowed to one inspection and/or one question category.
    pub async fn response_records(
        &self,
        inspection_id: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<ResponseRecord>, DatabaseError> {
        let mut sql = String::from(
            "SELECT q.id, q.text, q.category, r.raw_answer
             FROM checklist_responses r
             JOIN checklist_questions q ON q.id = r.question_id
             JOIN inspection_results res ON res.id = r.result_id
             WHERE res.status = ?1",
        );
        let mut params: Vec<libsql::Value> = vec![ResultStatus::Submitted.as_str().into()];
        if let Some(inspection_id) = inspection_id {
            params.push(inspection_id.into());
            sql.push_str(&format!(" AND res.inspection_id = ?{}", params.len()));
        }
        if let Some(category) = category {
            params.push(category.into());
            sql.push_str(&format!(" AND q.category = ?{}", params.len()));
        }
        sql.push_str(" ORDER BY q.category, q.sort_order, q.created_at, r.created_at");

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(ResponseRecord {
                question_id: row.get(0)?,
                question_text: row.get(1)?,
                category: row.get(2)?,
                raw_answer: row.get(3)?,
            });
        }
        Ok(records)
    }

    /// Heuristic tallies over stored answers.
    pub async fn response_report(
        &self,
        inspection_id: Option<&str>,
        category: Option<&str>,
    ) -> Result<ResponseReport, DatabaseError> {
        let records = self.response_records(inspection_id, category).await?;
        Ok(aggregate_responses(&records))
    }

    /// Verdict counts across every result, optionally for one inspection.
    pub async fn verdict_summary(
        &self,
        inspection_id: Option<&str>,
    ) -> Result<VerdictSummary, DatabaseError> {
        let results = self.list_results(inspection_id, u32::MAX).await?;
        Ok(summarize_verdicts(&results))
    }
}
