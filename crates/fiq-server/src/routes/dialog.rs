//! Variant B dialog: session start and per-message turns.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use fiq_backend::fallback::{dialog_fallback, welcome_message};
use fiq_core::dialog::{DialogSession, SCENARIO_CONTEXT, standard_dialog_questions};
use fiq_core::ids::{PREFIX_DIALOG, prefixed_id};
use fiq_core::responses::{DialogMessageResponse, DialogStartResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DialogStartRequest {
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DialogMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

/// `POST /api/dialog/start`
pub async fn start(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DialogStartRequest>,
) -> Result<Json<DialogStartResponse>, ApiError> {
    let session_id = prefixed_id(PREFIX_DIALOG)?;
    let context = scenario(request.context);
    let session = DialogSession::new(session_id.clone(), standard_dialog_questions(), context)?;
    let questions = session.questions().to_vec();

    state.dialogs.insert(session).await;
    tracing::info!(session_id = %session_id, questions = questions.len(), "dialog started");

    Ok(Json(DialogStartResponse {
        session_id,
        welcome_message: welcome_message(questions.len()),
        questions,
    }))
}

/// `POST /api/dialog/message`
///
/// An unknown, expired or missing session id starts a fresh dialog under
/// that id.
pub async fn message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DialogMessageRequest>,
) -> Result<Json<DialogMessageResponse>, ApiError> {
    let text = request.message.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }
    let session_id = match request.session_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => prefixed_id(PREFIX_DIALOG)?,
    };

    let dialog = state
        .dialogs
        .get_or_start(&session_id)
        .await
        .map_err(|error| ApiError::Internal(error.to_string()))?;

    // Apply the message, then release the lock while the assistant works.
    let (turn, progress, context) = {
        let mut session = dialog.lock().await;
        let turn = session.submit(text);
        let context = turn.assistant_context(&session);
        (turn, session.progress(), context)
    };
    tracing::debug!(session_id = %session_id, intent = %turn.intent, "dialog message classified");

    let assistant = state.assistant.complete(text, &context, true);
    let (reply, llm_used) = match tokio::time::timeout(state.assistant_timeout(), assistant).await
    {
        Ok(Ok(reply)) => (reply, true),
        Ok(Err(error)) => {
            tracing::warn!(%error, "assistant failed; using canned dialog reply");
            (dialog_fallback(&turn, progress), false)
        }
        Err(_) => {
            tracing::warn!("assistant timed out; using canned dialog reply");
            (dialog_fallback(&turn, progress), false)
        }
    };

    let mut session = dialog.lock().await;
    session.record_reply(reply.clone());
    let progress = session.progress();
    let complete = session.is_complete();

    Ok(Json(DialogMessageResponse {
        response: reply,
        session_id,
        intent: turn.intent,
        current_question: progress.current,
        total_questions: progress.total,
        progress,
        dialog_complete: complete,
        answers_collected: session.answers().clone(),
        can_ask_followup: !complete,
        llm_used,
    }))
}

fn scenario(context: Option<String>) -> String {
    context
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| SCENARIO_CONTEXT.to_string())
}
