use crate::domain::model::{DeliveryReceipt, EmailMessage, LeadRecord, LeadSubmission};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Generative-text provider. `Ok(None)` means the provider answered but gave no usable candidate.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, api_key: &str, message: &EmailMessage) -> Result<DeliveryReceipt>;
}

/// 發送確認信的服務，可以是同一程序內的處理器或遠端部署的函式
#[async_trait]
pub trait ConfirmationService: Send + Sync {
    async fn confirm(&self, lead: &LeadSubmission) -> Result<DeliveryReceipt>;
}

#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn save(&self, record: &LeadRecord) -> Result<()>;
    async fn list(&self) -> Result<Vec<LeadRecord>>;
}
