//! Variant A form definition.

use axum::Json;
use fiq_core::catalogue::form_instructions;
use fiq_core::responses::InstructionsResponse;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct InstructionsRequest {
    #[serde(default)]
    pub context: Option<String>,
}

/// `POST /api/generate-instructions`
///
/// The form is fixed; the scenario context is only echoed back.
pub async fn generate(Json(request): Json<InstructionsRequest>) -> Json<InstructionsResponse> {
    let form = form_instructions();
    tracing::debug!(fields = form.fields.len(), "form instructions served");
    Json(InstructionsResponse {
        fields: form.fields,
        context_used: request.context,
        instructions: form.instructions,
    })
}
