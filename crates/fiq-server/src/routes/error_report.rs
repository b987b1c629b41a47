use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::{REFERER, USER_AGENT};
use chrono::Utc;
use fiq_core::ids::{PREFIX_ERROR_REPORT, prefixed_id};
use fiq_core::responses::ErrorReportResponse;
use fiq_store::{ARCHIVE_TARGET, RecordKind};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

/// Path on the remote backend that collects client error reports.
pub const BACKEND_ERROR_PATH: &str = "/api/error/report";

/// `POST /api/error/report`
///
/// Forwarded to the remote backend; when that fails the report is archived
/// locally and the client still gets a success.
pub async fn report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut report): Json<Value>,
) -> Result<Json<ErrorReportResponse>, ApiError> {
    let Some(fields) = report.as_object_mut() else {
        return Err(ApiError::BadRequest("error report must be a JSON object".into()));
    };
    let error_id = match fields.get("errorId").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => prefixed_id(PREFIX_ERROR_REPORT)?,
    };
    fields.insert("errorId".into(), json!(error_id));
    fields.insert(
        "server_info".into(),
        json!({
            "timestamp": Utc::now(),
            "version": env!("CARGO_PKG_VERSION"),
            "user_agent": header(&headers, USER_AGENT.as_str()),
            "referer": header(&headers, REFERER.as_str()),
        }),
    );
    tracing::info!(
        error_id = %error_id,
        participant = ?report.get("participantId"),
        message = ?report.pointer("/error/message"),
        "client error report received"
    );

    match state
        .backend
        .post_json::<_, Value>(BACKEND_ERROR_PATH, &report)
        .await
    {
        Ok(_) => Ok(Json(ErrorReportResponse {
            success: true,
            message: "Error report saved to backend".into(),
            error_id: Some(error_id),
            saved_to: "backend".into(),
        })),
        Err(error) => {
            tracing::warn!(target: ARCHIVE_TARGET, %error, "backend unavailable for error report");
            let outcome = state
                .archive
                .store(RecordKind::ErrorReport, &error_id, &report)
                .await;
            let saved_to = if outcome.is_durable() {
                "object_store"
            } else {
                "local_logs"
            };
            Ok(Json(ErrorReportResponse {
                success: true,
                message: "Error report logged locally (backend unavailable)".into(),
                error_id: Some(error_id),
                saved_to: saved_to.into(),
            }))
        }
    }
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
