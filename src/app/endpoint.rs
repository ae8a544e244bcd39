use crate::adapters::{GeminiClient, ResendClient};
use crate::config::HandlerConfig;
use crate::core::handler::ConfirmationHandler;
use crate::core::{ContentGenerator, EmailSender};
use crate::utils::error::{ConfirmError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub type ProviderHandler = ConfirmationHandler<GeminiClient, ResendClient>;

/// Body returned to the caller of the confirmation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ConfirmationResponse {
    pub fn sent(id: String) -> Self {
        Self {
            success: true,
            message: "Confirmation email sent".to_string(),
            id: Some(id),
        }
    }

    pub fn failed(error: &ConfirmError) -> Self {
        Self {
            success: false,
            message: error.user_friendly_message(),
            id: None,
        }
    }
}

/// Validates the provider settings and builds the Gemini/Resend backed handler.
pub fn handler_from_config(config: HandlerConfig) -> Result<ProviderHandler> {
    config.settings.validate()?;

    let timeout = Duration::from_secs(config.settings.timeout_seconds);
    let generator = GeminiClient::new(config.settings.generator_endpoint.clone(), timeout)?;
    let sender = ResendClient::new(config.settings.email_endpoint.clone(), timeout)?;
    Ok(ConfirmationHandler::new(config, generator, sender))
}

/// Maps an error to the status code and body returned to the caller.
pub fn failure(error: &ConfirmError) -> (u16, ConfirmationResponse) {
    tracing::error!(
        "❌ Confirmation request failed: {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    (error.status_code(), ConfirmationResponse::failed(error))
}

/// 接受名單物件本身，或是 `body` 欄位為 JSON 字串的 HTTP 代理事件
pub fn extract_payload(event: &Value) -> Result<Value> {
    match event.get("body") {
        None => Ok(event.clone()),
        Some(Value::String(raw)) => serde_json::from_str(raw)
            .map_err(|e| ConfirmError::validation(format!("request body is not valid JSON: {}", e))),
        Some(Value::Object(_)) => Ok(event["body"].clone()),
        Some(_) => Err(ConfirmError::validation("request body is empty")),
    }
}

/// Runs the handler for one inbound event and maps the outcome to a status code and body.
pub async fn respond<G, E>(
    handler: &ConfirmationHandler<G, E>,
    event: &Value,
) -> (u16, ConfirmationResponse)
where
    G: ContentGenerator,
    E: EmailSender,
{
    let outcome = match extract_payload(event) {
        Ok(payload) => handler.handle(&payload).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(receipt) => (200, ConfirmationResponse::sent(receipt.id)),
        Err(e) => failure(&e),
    }
}
