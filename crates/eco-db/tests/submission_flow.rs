//! Submission lifecycle against a real libSQL database.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use eco_core::entities::{ConditionalField, ConditionalLogic};
use eco_core::enums::{
    ComplianceVerdict, FieldKind, QuestionKind, RecommendationCategory, ResultStatus,
};
use eco_core::submission::{NewQuestion, OptionInput, ResponseInput, Submission, UtilityInput};
use eco_db::error::DatabaseError;
use eco_db::service::EcoService;
use pretty_assertions::assert_eq;

struct Fixture {
    svc: EcoService,
    inspection_id: String,
    establishment_id: String,
    permit_q: String,
    trap_q: String,
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

async fn fixture_with(svc: EcoService) -> Fixture {
    let inspection = svc
        .create_inspection("Q4 market district", NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
        .await
        .unwrap();
    let establishment = svc
        .create_establishment("Harbor Fish Market", Some("Pier 4"), Some("wet market"))
        .await
        .unwrap();
    let permit = svc
        .create_question(NewQuestion {
            text: "Wastewater discharge permit displayed".into(),
            category: "Water".into(),
            kind: QuestionKind::SingleChoice,
            options: vec![OptionInput::Label("Yes".into()), OptionInput::Label("No".into())],
            is_conditional: true,
            conditional_logic: Some(ConditionalLogic {
                trigger_response_label: "Yes".into(),
                fields: vec![ConditionalField {
                    name: "permit_expiry".into(),
                    label: "Permit expiry".into(),
                    kind: FieldKind::Date,
                    required: true,
                }],
            }),
            sort_order: 0,
        })
        .await
        .unwrap();
    let trap = svc
        .create_question(NewQuestion {
            text: "Grease trap facility present".into(),
            category: "Water".into(),
            kind: QuestionKind::SingleChoice,
            options: vec![
                OptionInput::Label("Present".into()),
                OptionInput::Label("Absent".into()),
            ],
            is_conditional: false,
            conditional_logic: None,
            sort_order: 1,
        })
        .await
        .unwrap();
    Fixture {
        svc,
        inspection_id: inspection.id,
        establishment_id: establishment.id,
        permit_q: permit.id,
        trap_q: trap.id,
    }
}

async fn fixture() -> Fixture {
    fixture_with(EcoService::new_local(":memory:").await.unwrap()).await
}

fn response(question_id: &str, answer: &str) -> ResponseInput {
    ResponseInput {
        question_id: question_id.into(),
        raw_answer: answer.into(),
        ..Default::default()
    }
}

fn permit_response(question_id: &str, expiry: &str) -> ResponseInput {
    ResponseInput {
        question_id: question_id.into(),
        raw_answer: "Yes".into(),
        conditional_fields: BTreeMap::from([("permit_expiry".to_string(), expiry.to_string())]),
        ..Default::default()
    }
}

impl Fixture {
    fn submission(&self, responses: Vec<ResponseInput>) -> Submission {
        Submission {
            inspection_id: self.inspection_id.clone(),
            establishment_id: self.establishment_id.clone(),
            responses,
            utilities: vec![],
        }
    }
}

#[tokio::test]
async fn submitted_result_stores_verdict_and_rows() {
    let f = fixture().await;
    let mut submission = f.submission(vec![
        permit_response(&f.permit_q, "2027-03-31"),
        response(&f.trap_q, "Absent"),
    ]);
    submission.utilities.push(UtilityInput {
        utility: "water".into(),
        provider: Some("City Water District".into()),
        monthly_consumption: Some(42.5),
        unit: Some("m3".into()),
    });

    let detail = f.svc.submit_result(&submission, false, today()).await.unwrap();

    assert_eq!(detail.result.status, ResultStatus::Submitted);
    assert!(detail.result.submitted_at.is_some());
    assert_eq!(detail.result.verdict, ComplianceVerdict::NotCompliant);
    assert_eq!(detail.result.recommendations.len(), 1);
    assert_eq!(
        detail.result.recommendations[0].category,
        RecommendationCategory::ProvideLackingFacilities
    );
    assert!(detail.result.flags.provide_lacking_facilities);
    assert_eq!(detail.responses.len(), 2);
    assert_eq!(detail.responses[0].question_id, f.permit_q);
    assert_eq!(detail.conditional_fields.len(), 1);
    assert_eq!(detail.utilities.len(), 1);
    assert_eq!(detail.utilities[0].monthly_consumption, Some(42.5));
}

#[tokio::test]
async fn duplicate_result_is_rejected() {
    let f = fixture().await;
    let submission = f.submission(vec![response(&f.trap_q, "Present")]);
    f.svc.submit_result(&submission, false, today()).await.unwrap();

    let err = f
        .svc
        .submit_result(&submission, false, today())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Duplicate(_)), "got {err}");
    assert_eq!(f.svc.list_results(None, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn validation_failure_writes_nothing() {
    let f = fixture().await;
    let submission = f.submission(vec![response(&f.permit_q, "Yes")]);
    let err = f
        .svc
        .submit_result(&submission, false, today())
        .await
        .unwrap_err();
    let DatabaseError::Validation(errors) = err else {
        panic!("expected validation error, got {err}");
    };
    assert!(errors.has_field(&format!("responses[{}].conditional.permit_expiry", f.permit_q)));
    assert!(f.svc.list_results(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn storage_failure_rolls_back_every_write() {
    let f = fixture().await;
    f.svc
        .db()
        .conn()
        .execute(
            "CREATE TRIGGER reject_gas BEFORE INSERT ON utility_records
             WHEN NEW.utility = 'gas'
             BEGIN SELECT RAISE(ABORT, 'gas meters are not tracked'); END",
            (),
        )
        .await
        .unwrap();

    let mut submission = f.submission(vec![response(&f.trap_q, "Present")]);
    submission.utilities.push(UtilityInput {
        utility: "gas".into(),
        ..Default::default()
    });
    assert!(f.svc.submit_result(&submission, false, today()).await.is_err());

    let mut rows = f
        .svc
        .db()
        .conn()
        .query(
            "SELECT (SELECT COUNT(*) FROM inspection_results) + (SELECT COUNT(*) FROM checklist_responses)",
            (),
        )
        .await
        .unwrap();
    let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn unknown_questions_are_skipped() {
    let f = fixture().await;
    let submission = f.submission(vec![
        response(&f.trap_q, "Present"),
        response("qst-deadbeef", "No"),
    ]);
    let detail = f.svc.submit_result(&submission, false, today()).await.unwrap();
    assert_eq!(detail.result.verdict, ComplianceVerdict::Compliant);
    assert_eq!(detail.responses.len(), 1);
}

#[tokio::test]
async fn draft_amend_then_finalize_recomputes_verdict() {
    let f = fixture().await;
    let submission = f.submission(vec![
        permit_response(&f.permit_q, "2027-03-31"),
        response(&f.trap_q, "Absent"),
    ]);
    let draft = f.svc.submit_result(&submission, true, today()).await.unwrap();
    assert_eq!(draft.result.status, ResultStatus::Draft);
    assert_eq!(draft.result.verdict, ComplianceVerdict::NotCompliant);
    assert!(draft.result.submitted_at.is_none());

    assert_eq!(
        draft.result.recommendations[0].message,
        "Provide lacking facility/equipment: Grease trap facility present"
    );
    assert!(draft.result.flags.provide_lacking_facilities);

    let amended = f
        .svc
        .amend_response(&draft.result.id, &response(&f.trap_q, "Present"), today())
        .await
        .unwrap();
    assert_eq!(amended.result.status, ResultStatus::Draft);
    assert_eq!(amended.responses[1].raw_answer, "Present");
    assert!(amended.result.recommendations.is_empty());
    assert!(!amended.result.flags.any());
    assert_eq!(amended.result.verdict, ComplianceVerdict::Compliant);

    let finalized = f.svc.finalize_result(&draft.result.id, today()).await.unwrap();
    assert_eq!(finalized.result.status, ResultStatus::Submitted);
    assert_eq!(finalized.result.verdict, ComplianceVerdict::Compliant);
    assert!(finalized.result.recommendations.is_empty());
    assert!(!finalized.result.flags.any());
}

#[tokio::test]
async fn finalize_sees_lapsed_permit_from_amendment() {
    let f = fixture().await;
    let submission = f.submission(vec![
        permit_response(&f.permit_q, "2027-03-31"),
        response(&f.trap_q, "Present"),
    ]);
    let draft = f.svc.submit_result(&submission, true, today()).await.unwrap();
    assert_eq!(draft.result.verdict, ComplianceVerdict::Compliant);

    let amended = f
        .svc
        .amend_response(&draft.result.id, &permit_response(&f.permit_q, "09/30/2026"), today())
        .await
        .unwrap();
    assert_eq!(amended.result.status, ResultStatus::Draft);
    assert!(amended.result.flags.comply_lacking_permits);
    assert_eq!(amended.result.recommendations.len(), 1);

    let finalized = f.svc.finalize_result(&draft.result.id, today()).await.unwrap();

    assert_eq!(finalized.result.verdict, ComplianceVerdict::NotCompliant);
    assert!(finalized.result.flags.comply_lacking_permits);
    assert_eq!(finalized.conditional_fields[0].value, "09/30/2026");
}

#[tokio::test]
async fn submitted_results_refuse_amendment_and_refinalize() {
    let f = fixture().await;
    let submission = f.submission(vec![response(&f.trap_q, "Present")]);
    let detail = f.svc.submit_result(&submission, false, today()).await.unwrap();

    let err = f
        .svc
        .amend_response(&detail.result.id, &response(&f.trap_q, "Absent"), today())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidState(_)));

    let err = f
        .svc
        .finalize_result(&detail.result.id, today())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidState(_)));
}

#[tokio::test]
async fn amending_to_negative_answer_adds_recommendation() {
    let f = fixture().await;
    let submission = f.submission(vec![
        permit_response(&f.permit_q, "2027-03-31"),
        response(&f.trap_q, "Present"),
    ]);
    let draft = f.svc.submit_result(&submission, true, today()).await.unwrap();
    assert!(draft.result.recommendations.is_empty());

    let amended = f
        .svc
        .amend_response(&draft.result.id, &response(&f.permit_q, "No"), today())
        .await
        .unwrap();

    assert!(amended.conditional_fields.is_empty());
    assert_eq!(amended.result.recommendations.len(), 1);
    assert_eq!(
        amended.result.recommendations[0].category,
        RecommendationCategory::ComplyLackingPermits
    );
    assert!(amended.result.flags.comply_lacking_permits);
    assert!(!amended.result.flags.provide_lacking_facilities);

    let reloaded = f.svc.get_result(&draft.result.id).await.unwrap();
    assert_eq!(reloaded.recommendations, amended.result.recommendations);
}

#[tokio::test]
async fn finalize_that_loses_the_status_race_is_rejected() {
    let f = fixture().await;
    let submission = f.submission(vec![response(&f.trap_q, "Present")]);
    let draft = f.svc.submit_result(&submission, true, today()).await.unwrap();

    // Another writer got there first: the status check passes but the
    // guarded UPDATE touches no row.
    f.svc
        .db()
        .conn()
        .execute(
            "CREATE TRIGGER finalize_elsewhere BEFORE UPDATE OF status ON inspection_results
             WHEN NEW.status = 'submitted'
             BEGIN SELECT RAISE(IGNORE); END",
            (),
        )
        .await
        .unwrap();

    let err = f
        .svc
        .finalize_result(&draft.result.id, today())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidState(_)), "got {err:?}");

    let stored = f.svc.get_result(&draft.result.id).await.unwrap();
    assert_eq!(stored.status, ResultStatus::Draft);
    assert!(stored.submitted_at.is_none());
}

#[tokio::test]
async fn reports_cover_submitted_results_only() {
    let f = fixture().await;
    let submitted = f.submission(vec![
        permit_response(&f.permit_q, "2027-03-31"),
        response(&f.trap_q, "Absent"),
    ]);
    f.svc.submit_result(&submitted, false, today()).await.unwrap();

    let other = f
        .svc
        .create_establishment("Dockside Diner", None, None)
        .await
        .unwrap();
    let mut draft = f.submission(vec![response(&f.trap_q, "Present")]);
    draft.establishment_id = other.id;
    f.svc.submit_result(&draft, true, today()).await.unwrap();

    let report = f.svc.response_report(Some(&f.inspection_id), None).await.unwrap();
    assert_eq!(report.overall.positive, 1);
    assert_eq!(report.overall.negative, 1);
    assert!((report.overall_rate - 50.0).abs() < 1e-9);

    let summary = f.svc.verdict_summary(Some(&f.inspection_id)).await.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.drafts, 1);
    assert_eq!(summary.not_compliant, 1);
    assert!(summary.compliance_rate.abs() < f64::EPSILON);
}

#[tokio::test]
async fn on_disk_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ecoinspect.db");
    let path = path.to_string_lossy();

    let result_id = {
        let f = fixture_with(EcoService::new_local(&path).await.unwrap()).await;
        let submission = f.submission(vec![response(&f.trap_q, "Present")]);
        f.svc
            .submit_result(&submission, false, today())
            .await
            .unwrap()
            .result
            .id
    };

    let reopened = EcoService::new_local(&path).await.unwrap();
    let detail = reopened.get_result_detail(&result_id).await.unwrap();
    assert_eq!(detail.result.verdict, ComplianceVerdict::Compliant);
    assert_eq!(detail.responses.len(), 1);
}
