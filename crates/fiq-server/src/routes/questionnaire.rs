use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use fiq_core::analytics::{SubmissionSummary, analyze_submission};
use fiq_core::entities::QuestionnaireSubmission;
use fiq_core::responses::{AnalyticsSummary, SubmissionResponse};
use fiq_store::RecordKind;

use super::saved_message;
use crate::records::QuestionnaireRecord;
use crate::state::AppState;

/// `POST /api/questionnaire/save`
///
/// Incomplete or invalid response sets leave their score `null` and show up
/// in `issues`; they never fail the request.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<QuestionnaireSubmission>,
) -> Json<SubmissionResponse> {
    let analytics = analyze_submission(&submission);
    let summary = SubmissionSummary::new(&submission, &analytics);
    tracing::info!(
        participant = %summary.participant,
        variant = %summary.variant,
        sus_score = ?summary.sus_score,
        trust_level = ?summary.trust_level,
        overall_preference = ?summary.overall_preference,
        completion_time_minutes = ?summary.completion_time_minutes,
        issues = analytics.issues.len(),
        "questionnaire received"
    );

    let timestamp = Utc::now();
    let record =
        QuestionnaireRecord::new(&submission, &analytics, state.config.study.metadata(), timestamp);
    let label = format!("{}_{}", submission.variant, submission.participant_label());
    let outcome = state
        .archive
        .store(RecordKind::Questionnaire, &label, &record)
        .await;

    let message = saved_message(
        &format!("Questionnaire data for variant {}", submission.variant),
        &outcome.receipt,
    );
    Json(SubmissionResponse {
        success: true,
        questionnaire_type: submission.variant,
        analytics: AnalyticsSummary {
            sus_score: analytics.sus_score,
            trust_average: analytics.trust_analysis.as_ref().map(|t| t.average_score),
            completion_time: analytics.completion_stats.total_duration,
        },
        issues: analytics.issues.clone(),
        storage: outcome.receipt,
        backup: outcome.backup,
        timestamp,
        message,
    })
}
