use crate::core::ContentGenerator;
use crate::utils::error::{ConfirmError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for Gemini's `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// 只取第一個候選結果
    fn first_candidate_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
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
impl ContentGenerator for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Option<String>> {
        let request = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        tracing::debug!("Making generation request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        tracing::debug!("Generation response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ConfirmError::GenerationDegraded {
                message: format!("provider responded with {}", response.status()),
            });
        }

        // 回應格式不符時不當成錯誤，交由呼叫端改用預設內容
        let body: serde_json::Value = response.json().await?;
        let parsed: GenerateResponse = serde_json::from_value(body).unwrap_or_else(|e| {
            tracing::debug!("Unexpected generation response shape: {}", e);
            GenerateResponse::default()
        });

        Ok(parsed.first_candidate_text())
    }
}
