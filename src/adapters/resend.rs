use crate::core::{DeliveryReceipt, EmailMessage, EmailSender};
use crate::utils::error::{ConfirmError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for Resend's `POST /emails` endpoint.
#[derive(Debug, Clone)]
pub struct ResendClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ProviderError {
    message: Option<String>,
}

impl ResendClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, api_key: &str, message: &EmailMessage) -> Result<DeliveryReceipt> {
        let request = SendRequest {
            from: &message.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
        };

        tracing::debug!("Making delivery request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ConfirmError::delivery(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Delivery response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ConfirmError::delivery(format!("could not read response: {}", e)))?;

        if !status.is_success() {
            // 盡量帶出供應商的錯誤訊息
            let detail = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(ConfirmError::delivery(format!("{}: {}", status, detail)));
        }

        let id = serde_json::from_str::<SendResponse>(&body)
            .ok()
            .and_then(|r| r.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfirmError::delivery("provider response carried no message id"))?;

        Ok(DeliveryReceipt {
            id,
            recipient: message.to.clone(),
            sent_at: Utc::now(),
        })
    }
}
