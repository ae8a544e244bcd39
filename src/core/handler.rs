use crate::config::HandlerConfig;
use crate::core::content::{build_prompt, render_html_body, select_content};
use crate::domain::model::{DeliveryReceipt, EmailMessage, LeadSubmission};
use crate::domain::ports::{ConfirmationService, ContentGenerator, EmailSender};
use crate::utils::error::{ConfirmError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Sends one personalized confirmation email per invocation.
///
/// Stateless apart from its injected configuration and provider clients; every
/// call to [`ConfirmationHandler::handle`] makes at most one generation request
/// and at most one delivery request.
pub struct ConfirmationHandler<G: ContentGenerator, E: EmailSender> {
    config: HandlerConfig,
    generator: G,
    sender: E,
}

impl<G: ContentGenerator, E: EmailSender> ConfirmationHandler<G, E> {
    pub fn new(config: HandlerConfig, generator: G, sender: E) -> Self {
        Self {
            config,
            generator,
            sender,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Entry point for an inbound request body.
    pub async fn handle(&self, payload: &Value) -> Result<DeliveryReceipt> {
        let lead = LeadSubmission::from_value(payload).inspect_err(|e| {
            tracing::warn!("❌ Rejected lead submission: {}", e);
        })?;
        self.confirm_lead(&lead).await
    }

    pub async fn confirm_lead(&self, lead: &LeadSubmission) -> Result<DeliveryReceipt> {
        // 在任何網路呼叫之前確認兩把密鑰都存在
        let credentials = self.config.credentials().inspect_err(|e| {
            tracing::error!("❌ {}", e);
        })?;

        tracing::info!("Sending confirmation email");
        tracing::debug!("Recipient: {}", lead.email());

        let primary = match self.generate(credentials.generator_api_key, lead).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("⚠️ {} - using fallback content", e);
                None
            }
        };
        let content = select_content(primary, lead.name(), lead.industry());

        let message = EmailMessage {
            from: self.config.settings.sender.clone(),
            to: lead.email().to_string(),
            subject: self.config.settings.subject.clone(),
            html: render_html_body(&content),
        };

        tracing::debug!("Email body is {} bytes", message.html.len());

        let receipt = self
            .sender
            .send(credentials.email_api_key, &message)
            .await
            .map_err(|e| match e {
                ConfirmError::DeliveryError { .. } => e,
                other => ConfirmError::delivery(other.to_string()),
            })
            .inspect_err(|e| tracing::error!("❌ {}", e))?;

        tracing::info!("✅ Confirmation email sent (id: {})", receipt.id);
        Ok(receipt)
    }

    /// 呼叫生成服務一次；任何失敗都轉成 `GenerationDegraded`
    async fn generate(&self, api_key: &str, lead: &LeadSubmission) -> Result<String> {
        let prompt = build_prompt(lead);

        match self.generator.generate(api_key, &prompt).await {
            Ok(Some(text)) if !text.trim().is_empty() => Ok(text),
            Ok(_) => Err(ConfirmError::GenerationDegraded {
                message: "provider returned no usable candidate".to_string(),
            }),
            Err(e) => Err(ConfirmError::GenerationDegraded {
                message: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl<G: ContentGenerator, E: EmailSender> ConfirmationService for ConfirmationHandler<G, E> {
    async fn confirm(&self, lead: &LeadSubmission) -> Result<DeliveryReceipt> {
        self.confirm_lead(lead).await
    }
}
