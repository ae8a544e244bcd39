use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfirmError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    /// 生成內容失敗；由處理器內部以預設範本取代，不會回傳給呼叫端
    #[error("Content generation degraded: {message}")]
    GenerationDegraded { message: String },

    #[error("Email delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Generation,
    Delivery,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConfirmError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::DeliveryError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } | Self::TomlError(_) => {
                ErrorCategory::Configuration
            }
            Self::GenerationDegraded { .. } => ErrorCategory::Generation,
            Self::DeliveryError { .. } => ErrorCategory::Delivery,
            Self::ApiError(_) => ErrorCategory::Network,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Generation => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Delivery | ErrorCategory::Network => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check that name, email and industry are all filled in",
            ErrorCategory::Configuration => {
                "Set GEMINI_API_KEY and RESEND_API_KEY and check the provider settings"
            }
            ErrorCategory::Generation => "No action needed, the fallback template was used",
            ErrorCategory::Delivery => {
                "Check the email provider status and the recipient address, then submit again"
            }
            ErrorCategory::Network => "Check network connectivity to the provider endpoints",
            ErrorCategory::System => "Check file permissions and the local output path",
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => format!("Invalid submission: {}", message),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } | Self::TomlError(_) => {
                "The confirmation service is not configured correctly".to_string()
            }
            Self::GenerationDegraded { .. } => "Personalized content was unavailable".to_string(),
            Self::DeliveryError { .. } | Self::ApiError(_) => {
                "We could not send your confirmation email".to_string()
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// HTTP status returned by the inbound endpoint for this error.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 400,
            ErrorCategory::Delivery | ErrorCategory::Network => 502,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfirmError>;
