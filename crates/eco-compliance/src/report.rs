//! Aggregate reporting over historical responses and results.
//!
//! Response tallies use the freeform heuristic, not option lookup: stored
//! answers are judged by their text alone.

use std::collections::BTreeMap;

use eco_core::entities::InspectionResult;
use eco_core::enums::{Classification, ResultStatus};
use serde::{Deserialize, Serialize};

use crate::classify::classify_freeform;

/// One stored answer joined with its question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub question_id: String,
    pub question_text: String,
    pub category: String,
    pub raw_answer: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub positive: u64,
    pub negative: u64,
    pub na: u64,
    pub neutral: u64,
}

impl Tally {
    pub const fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Positive => self.positive += 1,
            Classification::Negative => self.negative += 1,
            Classification::NotApplicable => self.na += 1,
            Classification::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.positive + self.negative + self.na + self.neutral
    }

    #[must_use]
    pub fn compliance_rate(&self) -> f64 {
        compliance_rate(self.positive, self.negative)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub category: String,
    #[serde(flatten)]
    pub tally: Tally,
    pub compliance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTally {
    pub question_id: String,
    pub question_text: String,
    pub category: String,
    #[serde(flatten)]
    pub tally: Tally,
    pub compliance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseReport {
    pub overall: Tally,
    pub overall_rate: f64,
    /// Sorted by category name.
    pub categories: Vec<CategoryTally>,
    /// In first-seen order.
    pub questions: Vec<QuestionTally>,
}

/// Positive share of decided answers as a percentage, rounded to two
/// decimals. Zero when nothing was decided.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compliance_rate(positive: u64, negative: u64) -> f64 {
    let decided = positive + negative;
    if decided == 0 {
        return 0.0;
    }
    let rate = positive as f64 / decided as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Tally responses overall, per category, and per question.
#[must_use]
pub fn aggregate_responses<'a, I>(records: I) -> ResponseReport
where
    I: IntoIterator<Item = &'a ResponseRecord>,
{
    let mut overall = Tally::default();
    let mut categories: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut questions: Vec<(&ResponseRecord, Tally)> = Vec::new();
    let mut question_slots: BTreeMap<&str, usize> = BTreeMap::new();

    for record in records {
        let classification = classify_freeform(&record.raw_answer);
        overall.record(classification);
        categories
            .entry(record.category.as_str())
            .or_default()
            .record(classification);

        let slot = *question_slots
            .entry(record.question_id.as_str())
            .or_insert_with(|| {
                questions.push((record, Tally::default()));
                questions.len() - 1
            });
        questions[slot].1.record(classification);
    }

    ResponseReport {
        overall,
        overall_rate: overall.compliance_rate(),
        categories: categories
            .into_iter()
            .map(|(category, tally)| CategoryTally {
                category: category.to_string(),
                tally,
                compliance_rate: tally.compliance_rate(),
            })
            .collect(),
        questions: questions
            .into_iter()
            .map(|(record, tally)| QuestionTally {
                question_id: record.question_id.clone(),
                question_text: record.question_text.clone(),
                category: record.category.clone(),
                tally,
                compliance_rate: tally.compliance_rate(),
            })
            .collect(),
    }
}

/// Dashboard counts over inspection results.
///
/// Compliant and not-compliant counts cover submitted results only; drafts
/// are counted separately since their verdict is provisional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub total: u64,
    pub submitted: u64,
    pub drafts: u64,
    pub compliant: u64,
    pub not_compliant: u64,
    pub compliance_rate: f64,
}

#[must_use]
pub fn summarize_verdicts<'a, I>(results: I) -> VerdictSummary
where
    I: IntoIterator<Item = &'a InspectionResult>,
{
    let mut summary = VerdictSummary::default();
    for result in results {
        summary.total += 1;
        match result.status {
            ResultStatus::Draft => summary.drafts += 1,
            ResultStatus::Submitted => {
                summary.submitted += 1;
                if result.verdict.is_compliant() {
                    summary.compliant += 1;
                } else {
                    summary.not_compliant += 1;
                }
            }
        }
    }
    summary.compliance_rate = compliance_rate(summary.compliant, summary.not_compliant);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use eco_core::entities::RecommendationFlags;
    use eco_core::enums::ComplianceVerdict;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn record(question_id: &str, category: &str, answer: &str) -> ResponseRecord {
        ResponseRecord {
            question_id: question_id.into(),
            question_text: format!("Question {question_id}"),
            category: category.into(),
            raw_answer: answer.into(),
        }
    }

    #[rstest]
    #[case(3, 1, 75.0)]
    #[case(0, 0, 0.0)]
    #[case(1, 2, 33.33)]
    #[case(2, 1, 66.67)]
    #[case(5, 0, 100.0)]
    fn rate_rounds_to_two_decimals(
        #[case] positive: u64,
        #[case] negative: u64,
        #[case] expected: f64,
    ) {
        assert!((compliance_rate(positive, negative) - expected).abs() < 1e-9);
    }

    #[test]
    fn na_and_neutral_do_not_affect_rate() {
        let records = vec![
            record("qst-1", "Air", "Yes"),
            record("qst-1", "Air", "compliant"),
            record("qst-2", "Air", "present"),
            record("qst-2", "Air", "no"),
            record("qst-3", "Water", "N/A"),
            record("qst-3", "Water", ""),
            record("qst-3", "Water", "see remarks"),
        ];
        let report = aggregate_responses(&records);
        assert_eq!(
            report.overall,
            Tally {
                positive: 3,
                negative: 1,
                na: 2,
                neutral: 1,
            }
        );
        assert!((report.overall_rate - 75.0).abs() < 1e-9);
        assert_eq!(report.overall.total(), 7);
    }

    #[test]
    fn groups_by_category_and_question() {
        let records = vec![
            record("qst-2", "Water", "no"),
            record("qst-1", "Air", "yes"),
            record("qst-2", "Water", "yes"),
        ];
        let report = aggregate_responses(&records);

        let categories: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, vec!["Air", "Water"]);
        assert!((report.categories[1].compliance_rate - 50.0).abs() < 1e-9);

        let questions: Vec<&str> = report.questions.iter().map(|q| q.question_id.as_str()).collect();
        assert_eq!(questions, vec!["qst-2", "qst-1"]);
        assert_eq!(report.questions[0].tally.negative, 1);
        assert_eq!(report.questions[0].tally.positive, 1);
    }

    #[test]
    fn empty_report() {
        let report = aggregate_responses(&Vec::<ResponseRecord>::new());
        assert_eq!(report.overall, Tally::default());
        assert!(report.categories.is_empty());
        assert!(report.overall_rate.abs() < f64::EPSILON);
    }

    fn result(status: ResultStatus, verdict: ComplianceVerdict) -> InspectionResult {
        let now = Utc::now();
        InspectionResult {
            id: "res-1".into(),
            inspection_id: "ins-1".into(),
            establishment_id: "est-1".into(),
            status,
            verdict,
            recommendations: vec![],
            flags: RecommendationFlags::default(),
            created_at: now,
            updated_at: now,
            submitted_at: None,
        }
    }

    #[test]
    fn verdict_summary_excludes_drafts_from_rate() {
        let results = vec![
            result(ResultStatus::Submitted, ComplianceVerdict::Compliant),
            result(ResultStatus::Submitted, ComplianceVerdict::Compliant),
            result(ResultStatus::Submitted, ComplianceVerdict::Compliant),
            result(ResultStatus::Submitted, ComplianceVerdict::NotCompliant),
            result(ResultStatus::Draft, ComplianceVerdict::NotCompliant),
        ];
        let summary = summarize_verdicts(&results);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.submitted, 4);
        assert_eq!(summary.drafts, 1);
        assert_eq!(summary.compliant, 3);
        assert_eq!(summary.not_compliant, 1);
        assert!((summary.compliance_rate - 75.0).abs() < 1e-9);
    }
}
