use crate::core::{LeadRecord, LeadStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const LEADS_FILE: &str = "leads.jsonl";

#[derive(Debug, Default)]
pub struct InMemoryLeadStore {
    records: Mutex<Vec<LeadRecord>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn save(&self, record: &LeadRecord) -> Result<()> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<LeadRecord>> {
        Ok(self.records.lock().await.clone())
    }
}

/// 每筆紀錄一行 JSON，附加寫入 `<base_path>/leads.jsonl`
#[derive(Debug, Clone)]
pub struct LocalLeadStore {
    base_path: PathBuf,
}

impl LocalLeadStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn file_path(&self) -> PathBuf {
        self.base_path.join(LEADS_FILE)
    }
}

#[async_trait]
impl LeadStore for LocalLeadStore {
    async fn save(&self, record: &LeadRecord) -> Result<()> {
        let full_path = self.file_path();

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full_path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Lead record appended to {}", full_path.display());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<LeadRecord>> {
        let full_path = self.file_path();
        if !full_path.exists() {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&full_path).await?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LeadSubmission;
    use crate::domain::model::ConfirmationStatus;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(id: &str) -> LeadRecord {
        LeadRecord {
            lead: LeadSubmission::new("Ada", "ada@example.com", "Fintech").unwrap(),
            submitted_at: Utc::now(),
            confirmation: ConfirmationStatus::Sent { id: id.to_string() },
        }
    }

    #[test]
    fn test_in_memory_store_keeps_order() {
        tokio_test::block_on(async {
            let store = InMemoryLeadStore::new();
            store.save(&record("a")).await.unwrap();
            store.save(&record("b")).await.unwrap();

            let records = store.list().await.unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(
                records[1].confirmation,
                ConfirmationStatus::Sent { id: "b".to_string() }
            );
        });
    }

    #[tokio::test]
    async fn test_local_store_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalLeadStore::new(temp_dir.path().join("nested"));

        assert!(store.list().await.unwrap().is_empty());

        let first = record("msg_1");
        store.save(&first).await.unwrap();
        store.save(&record("msg_2")).await.unwrap();

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], first);

        let raw = std::fs::read_to_string(store.file_path()).unwrap();
        assert_eq!(raw.lines().count(), 2);
    }
}
