use crate::core::{ConfirmationService, LeadRecord, LeadStore, LeadSubmission};
use crate::domain::model::ConfirmationStatus;
use crate::utils::error::Result;
use chrono::Utc;

/// Form-side client: validates locally, asks for the confirmation email once,
/// then records the lead whatever the email outcome was.
pub struct LeadCaptureClient<S: ConfirmationService, L: LeadStore> {
    service: S,
    store: L,
}

impl<S: ConfirmationService, L: LeadStore> LeadCaptureClient<S, L> {
    pub fn new(service: S, store: L) -> Self {
        Self { service, store }
    }

    pub fn store(&self) -> &L {
        &self.store
    }

    pub async fn submit(&self, name: &str, email: &str, industry: &str) -> Result<LeadRecord> {
        let lead = LeadSubmission::new(name, email, industry)?;

        // 每次送出只呼叫一次，失敗也不重試
        let confirmation = match self.service.confirm(&lead).await {
            Ok(receipt) => {
                tracing::info!("📧 Confirmation email queued (id: {})", receipt.id);
                ConfirmationStatus::Sent { id: receipt.id }
            }
            Err(e) => {
                tracing::error!("❌ Confirmation email failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                ConfirmationStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let record = LeadRecord {
            lead,
            submitted_at: Utc::now(),
            confirmation,
        };
        self.store.save(&record).await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLeadStore;
    use crate::core::DeliveryReceipt;
    use crate::utils::error::ConfirmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ConfirmationService for CountingService {
        async fn confirm(&self, lead: &LeadSubmission) -> Result<DeliveryReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ConfirmError::delivery("502 Bad Gateway"));
            }
            Ok(DeliveryReceipt {
                id: "msg_42".to_string(),
                recipient: lead.email().to_string(),
                sent_at: Utc::now(),
            })
        }
    }

    fn client(fail: bool) -> LeadCaptureClient<CountingService, InMemoryLeadStore> {
        LeadCaptureClient::new(
            CountingService {
                fail,
                calls: AtomicUsize::new(0),
            },
            InMemoryLeadStore::new(),
        )
    }

    #[tokio::test]
    async fn test_successful_submission_is_recorded() {
        let client = client(false);

        let record = client.submit("Ada", "ada@example.com", "Fintech").await.unwrap();

        assert_eq!(
            record.confirmation,
            ConfirmationStatus::Sent {
                id: "msg_42".to_string()
            }
        );
        assert_eq!(client.service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_email_does_not_block_submission() {
        let client = client(true);

        let record = client.submit("Ada", "ada@example.com", "Fintech").await.unwrap();

        assert!(matches!(record.confirmation, ConfirmationStatus::Failed { .. }));
        assert_eq!(client.service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_service() {
        let client = client(false);

        let err = client.submit("Ada", "", "Fintech").await.unwrap_err();

        assert!(matches!(err, ConfirmError::ValidationError { .. }));
        assert_eq!(client.service.calls.load(Ordering::SeqCst), 0);
        assert!(client.store.list().await.unwrap().is_empty());
    }
}
