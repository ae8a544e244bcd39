use crate::utils::error::{ConfirmError, Result};
use crate::utils::validation::is_well_formed_email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "industry"];

/// 一筆表單送出的名單資料。只能透過驗證過的建構函式產生。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LeadFields")]
pub struct LeadSubmission {
    name: String,
    email: String,
    industry: String,
}

#[derive(Deserialize)]
struct LeadFields {
    name: String,
    email: String,
    industry: String,
}

impl TryFrom<LeadFields> for LeadSubmission {
    type Error = ConfirmError;

    fn try_from(fields: LeadFields) -> Result<Self> {
        Self::new(fields.name, fields.email, fields.industry)
    }
}

impl LeadSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        industry: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let email = email.into();
        let industry = industry.into();

        let blank: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .zip([&name, &email, &industry])
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if !blank.is_empty() {
            return Err(ConfirmError::validation(format!(
                "missing or non-text fields: {}",
                blank.join(", ")
            )));
        }

        let email = email.trim().to_string();
        if !is_well_formed_email(&email) {
            return Err(ConfirmError::validation(format!(
                "email '{}' is not a well-formed address",
                email
            )));
        }

        Ok(Self {
            name: name.trim().to_string(),
            email,
            industry: industry.trim().to_string(),
        })
    }

    /// 從請求內容解析；欄位缺少、不是字串或是空白時都視為驗證錯誤
    pub fn from_value(payload: &Value) -> Result<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| ConfirmError::validation("request body must be a JSON object"))?;

        let mut invalid = Vec::new();
        let mut values = Vec::with_capacity(REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            match object.get(field).and_then(Value::as_str) {
                Some(text) if !text.trim().is_empty() => values.push(text),
                _ => invalid.push(field),
            }
        }

        if !invalid.is_empty() {
            return Err(ConfirmError::validation(format!(
                "missing or non-text fields: {}",
                invalid.join(", ")
            )));
        }

        Self::new(values[0], values[1], values[2])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfirmationStatus {
    Sent { id: String },
    Failed { reason: String },
}

/// 客戶端本地保存的送出紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub lead: LeadSubmission,
    pub submitted_at: DateTime<Utc>,
    pub confirmation: ConfirmationStatus,
}
