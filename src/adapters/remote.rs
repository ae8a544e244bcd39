use crate::app::endpoint::ConfirmationResponse;
use crate::core::{ConfirmationService, DeliveryReceipt, LeadSubmission};
use crate::utils::error::{ConfirmError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// Calls a deployed confirmation handler over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteConfirmationService {
    client: Client,
    url: String,
}

impl RemoteConfirmationService {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ConfirmationService for RemoteConfirmationService {
    async fn confirm(&self, lead: &LeadSubmission) -> Result<DeliveryReceipt> {
        tracing::debug!("Calling confirmation handler at: {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .json(lead)
            .send()
            .await
            .map_err(|e| ConfirmError::delivery(format!("handler request failed: {}", e)))?;

        let status = response.status();
        let body: Option<ConfirmationResponse> = response.json().await.ok();

        match (status.as_u16(), body) {
            (200, Some(ConfirmationResponse {
                success: true,
                id: Some(id),
                ..
            })) => Ok(DeliveryReceipt {
                id,
                recipient: lead.email().to_string(),
                sent_at: Utc::now(),
            }),
            (code, body) => {
                let message = body
                    .map(|b| b.message)
                    .unwrap_or_else(|| format!("handler responded with {}", status));
                // 依處理器的狀態碼還原錯誤種類
                Err(match code {
                    400 => ConfirmError::validation(message),
                    500 => ConfirmError::config(message),
                    _ => ConfirmError::delivery(message),
                })
            }
        }
    }
}
