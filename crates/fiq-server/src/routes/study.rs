use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use fiq_core::analytics::{analyze_study, analyze_study_save, study_outcomes, summarize_study};
use fiq_core::entities::{StudyCompletion, StudySave};
use fiq_core::responses::{StudyCompleteResponse, StudySaveResponse};
use fiq_store::RecordKind;

use super::saved_message;
use crate::error::ApiError;
use crate::records::{StudyRecord, StudySaveRecord};
use crate::state::AppState;

/// `POST /api/study/complete`
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Json(study): Json<StudyCompletion>,
) -> Json<StudyCompleteResponse> {
    let outcomes = study_outcomes(&study);
    let analytics = analyze_study(&study, &outcomes);
    let summary = summarize_study(&study, &outcomes);
    tracing::info!(
        participant = %summary.participant,
        duration_min = summary.duration_min,
        randomization = %summary.randomization,
        sus_scores = ?summary.sus_scores,
        trust_scores = ?summary.trust_scores,
        overall_preference = ?summary.overall_preference,
        demographics = %summary.demographics,
        "study completed"
    );

    let timestamp = Utc::now();
    let record = StudyRecord {
        kind: "study_completion",
        timestamp,
        study: &study,
        study_summary: &summary,
        analytics: &analytics,
        archive_metadata: state.config.study.metadata(),
    };
    let outcome = state
        .archive
        .store(RecordKind::StudyCompletion, &study.participant_id, &record)
        .await;

    let message = saved_message(
        &format!("Study data for participant {}", study.participant_id),
        &outcome.receipt,
    );
    Json(StudyCompleteResponse {
        success: true,
        participant_id: study.participant_id.clone(),
        study_summary: summary,
        analytics,
        storage: outcome.receipt,
        backup: outcome.backup,
        timestamp,
        message,
    })
}

/// `POST /api/study/save`
///
/// Takes the whole study in one request and scores both variants' raw
/// answers. A missing or blank `participantId` is the only rejection;
/// unscorable answer sets come back as `null` scores with `issues`.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(study): Json<StudySave>,
) -> Result<Json<StudySaveResponse>, ApiError> {
    let participant_id = study
        .participant()
        .ok_or_else(|| ApiError::BadRequest("Participant ID is required".to_string()))?
        .to_string();

    let analytics = analyze_study_save(&study);
    tracing::info!(
        participant = %participant_id,
        demographics = analytics.completion_metrics.demographics_completed,
        variant_a = analytics.completion_metrics.variant_a_completed,
        variant_b = analytics.completion_metrics.variant_b_completed,
        comparison = analytics.completion_metrics.comparison_completed,
        duration_min = ?analytics.completion_metrics.total_duration_minutes,
        sus_scores = ?analytics.sus_scores,
        issues = analytics.issues.len(),
        "study saved"
    );

    let timestamp = Utc::now();
    let record = StudySaveRecord {
        kind: "study_save",
        timestamp,
        study: &study,
        analytics: &analytics,
        study_metadata: state.config.study.metadata(),
    };
    let outcome = state
        .archive
        .store(RecordKind::StudySave, &participant_id, &record)
        .await;

    let message = saved_message(
        &format!("Study data for participant {participant_id}"),
        &outcome.receipt,
    );
    Ok(Json(StudySaveResponse {
        success: true,
        participant_id,
        analytics_preview: analytics,
        storage: outcome.receipt,
        backup: outcome.backup,
        timestamp,
        message,
    }))
}
