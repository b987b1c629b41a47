use std::fmt::Write as _;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use fiq_backend::fallback::chat_fallback;
use fiq_core::ResponseSet;
use fiq_core::dialog::SCENARIO_CONTEXT;
use fiq_core::responses::ChatResponse;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub form_values: ResponseSet,
}

/// `POST /api/chat`: Variant A help next to the form.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }
    let context = form_context(request.context.as_deref(), &request.form_values);

    let assistant = state.assistant.complete(message, &context, false);
    let reply = match tokio::time::timeout(state.assistant_timeout(), assistant).await {
        Ok(Ok(reply)) => Some(reply),
        Ok(Err(error)) => {
            tracing::warn!(%error, "assistant failed; using keyword help");
            None
        }
        Err(_) => {
            tracing::warn!("assistant timed out; using keyword help");
            None
        }
    };

    Ok(Json(match reply {
        Some(response) => ChatResponse {
            response,
            context_understanding: "LLM mit Formular-Kontext".into(),
            llm_used: true,
        },
        None => ChatResponse {
            response: chat_fallback(message),
            context_understanding: "Fallback-System".into(),
            llm_used: false,
        },
    }))
}

/// Scenario plus the fields the participant has filled so far.
fn form_context(extra: Option<&str>, values: &ResponseSet) -> String {
    let mut context = format!("SZENARIO: {SCENARIO_CONTEXT}\n");
    if let Some(extra) = extra.map(str::trim).filter(|e| !e.is_empty()) {
        let _ = writeln!(context, "KONTEXT: {extra}");
    }
    context.push_str("BEREITS AUSGEFÜLLTE FELDER:\n");
    let mut filled = values.iter().filter(|(_, v)| v.is_answered()).peekable();
    if filled.peek().is_none() {
        context.push_str("Noch keine Felder ausgefüllt\n");
    }
    for (key, value) in filled {
        let _ = writeln!(context, "- {key}: {}", value.to_display_string());
    }
    context
}
