//! Route handlers.

mod chat;
mod dialog;
mod error_report;
mod health;
mod instructions;
mod questionnaire;
mod study;
mod variants;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// The full study API.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/health", get(health::health))
        .route("/api/questionnaire/save", post(questionnaire::save))
        .route("/api/study/complete", post(study::complete))
        .route("/api/study/save", post(study::save))
        .route("/api/form/save", post(variants::save_form))
        .route("/api/dialog/save", post(variants::save_dialog))
        .route("/api/dialog/start", post(dialog::start))
        .route("/api/dialog/message", post(dialog::message))
        .route("/api/generate-instructions", post(instructions::generate))
        .route("/api/chat", post(chat::chat))
        .route("/api/error/report", post(error_report::report))
        .with_state(state)
}

/// Closing sentence of every save response.
fn saved_message(subject: &str, receipt: &fiq_core::responses::StorageReceipt) -> String {
    if receipt.method.is_durable() {
        format!("{subject} saved successfully")
    } else {
        format!("{subject} logged; primary storage unavailable, backup attached")
    }
}
