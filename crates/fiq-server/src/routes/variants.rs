//! Variant A form and Variant B dialog records.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use fiq_core::analytics::{dialog_metrics, form_metrics};
use fiq_core::entities::{DialogSubmission, FormSubmission};
use fiq_core::enums::Variant;
use fiq_core::responses::{DialogSavedResponse, FormSavedResponse, RecordSavedResponse};
use fiq_store::{ArchiveOutcome, RecordKind};

use super::saved_message;
use crate::records::{DialogRecord, FormRecord};
use crate::state::AppState;

/// `POST /api/form/save`
pub async fn save_form(
    State(state): State<Arc<AppState>>,
    Json(form): Json<FormSubmission>,
) -> Json<FormSavedResponse> {
    let metrics = form_metrics(&form);
    let label = form.participant_id.as_deref().unwrap_or("unknown");
    tracing::info!(
        participant = label,
        total_fields = metrics.total_fields,
        filled_fields = metrics.filled_fields,
        completion_rate = metrics.completion_rate,
        "form received"
    );

    let timestamp = Utc::now();
    let record = FormRecord {
        kind: "form_submission",
        variant: Variant::A,
        timestamp,
        submission: &form,
        metrics,
        study_metadata: state.config.study.metadata(),
    };
    let outcome = state.archive.store(RecordKind::Form, label, &record).await;
    Json(saved(Variant::A, metrics, outcome, timestamp, "Form data"))
}

/// `POST /api/dialog/save`
pub async fn save_dialog(
    State(state): State<Arc<AppState>>,
    Json(dialog): Json<DialogSubmission>,
) -> Json<DialogSavedResponse> {
    let metrics = dialog_metrics(&dialog);
    let label = dialog
        .participant_id
        .as_deref()
        .or(dialog.session_id.as_deref())
        .unwrap_or("unknown");
    tracing::info!(
        participant = label,
        total_questions = metrics.total_questions,
        answered_questions = metrics.answered_questions,
        chat_interactions = metrics.chat_interactions,
        "dialog received"
    );

    let timestamp = Utc::now();
    let record = DialogRecord {
        kind: "dialog_submission",
        variant: Variant::B,
        timestamp,
        submission: &dialog,
        metrics,
        study_metadata: state.config.study.metadata(),
    };
    let outcome = state.archive.store(RecordKind::Dialog, label, &record).await;
    Json(saved(Variant::B, metrics, outcome, timestamp, "Dialog data"))
}

fn saved<M>(
    variant: Variant,
    metrics: M,
    outcome: ArchiveOutcome,
    timestamp: chrono::DateTime<Utc>,
    subject: &str,
) -> RecordSavedResponse<M> {
    RecordSavedResponse {
        success: true,
        variant,
        metrics,
        message: saved_message(subject, &outcome.receipt),
        storage: outcome.receipt,
        backup: outcome.backup,
        timestamp,
    }
}
