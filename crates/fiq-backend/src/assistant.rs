//! The help assistant behind the chat and dialog endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::BackendClient;
use crate::error::BackendError;

/// Produces reply text for a participant message.
///
/// `dialog_mode` is set for the Variant B dialog and cleared for Variant A
/// chat help.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// # Errors
    ///
    /// Returns [`BackendError`] when no reply could be produced; callers fall
    /// back to canned text.
    async fn complete(
        &self,
        prompt: &str,
        context: &str,
        dialog_mode: bool,
    ) -> Result<String, BackendError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    context: &'a str,
    dialog_mode: bool,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

/// [`Assistant`] served by the remote backend's `POST /chat`.
#[derive(Debug, Clone)]
pub struct RemoteAssistant {
    client: Arc<BackendClient>,
}

impl RemoteAssistant {
    pub const CHAT_PATH: &'static str = "/chat";

    #[must_use]
    pub const fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Assistant for RemoteAssistant {
    async fn complete(
        &self,
        prompt: &str,
        context: &str,
        dialog_mode: bool,
    ) -> Result<String, BackendError> {
        let request = ChatRequest {
            message: prompt,
            context,
            dialog_mode,
        };
        let reply: ChatReply = self.client.post_json(Self::CHAT_PATH, &request).await?;
        let text = reply.response.trim();
        if text.is_empty() {
            return Err(BackendError::Parse("empty assistant reply".into()));
        }
        Ok(text.to_string())
    }
}
