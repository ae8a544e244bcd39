use crate::utils::error::{ConfirmError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GENERATOR_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.resend.com/emails";
pub const DEFAULT_SENDER: &str = "onboarding@resend.dev";
pub const DEFAULT_SUBJECT: &str = "Thanks for signing up!";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 不含密鑰的供應商設定；密鑰只從環境變數讀取
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub generator_endpoint: String,
    pub email_endpoint: String,
    pub sender: String,
    pub subject: String,
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            generator_endpoint: DEFAULT_GENERATOR_ENDPOINT.to_string(),
            email_endpoint: DEFAULT_EMAIL_ENDPOINT.to_string(),
            sender: DEFAULT_SENDER.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    generator: Option<GeneratorSection>,
    email: Option<EmailSection>,
    http: Option<HttpSection>,
}

#[derive(Debug, Default, Deserialize)]
struct GeneratorSection {
    endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EmailSection {
    endpoint: Option<String>,
    sender: Option<String>,
    subject: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HttpSection {
    timeout_seconds: Option<u64>,
}

impl ProviderSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);
        let file: SettingsFile = toml::from_str(&processed_content)?;

        let mut settings = Self::default();
        if let Some(endpoint) = file.generator.and_then(|g| g.endpoint) {
            settings.generator_endpoint = endpoint;
        }
        if let Some(email) = file.email {
            if let Some(endpoint) = email.endpoint {
                settings.email_endpoint = endpoint;
            }
            if let Some(sender) = email.sender {
                settings.sender = sender;
            }
            if let Some(subject) = email.subject {
                settings.subject = subject;
            }
        }
        if let Some(timeout) = file.http.and_then(|h| h.timeout_seconds) {
            settings.timeout_seconds = timeout;
        }

        Ok(settings)
    }

    /// Applies `GEMINI_ENDPOINT`, `RESEND_ENDPOINT`, `CONFIRMATION_SENDER`,
    /// `CONFIRMATION_SUBJECT` and `REQUEST_TIMEOUT_SECONDS` on top of the current values.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = non_blank("GEMINI_ENDPOINT") {
            self.generator_endpoint = endpoint;
        }
        if let Some(endpoint) = non_blank("RESEND_ENDPOINT") {
            self.email_endpoint = endpoint;
        }
        if let Some(sender) = non_blank("CONFIRMATION_SENDER") {
            self.sender = sender;
        }
        if let Some(subject) = non_blank("CONFIRMATION_SUBJECT") {
            self.subject = subject;
        }
        if let Some(timeout) = non_blank("REQUEST_TIMEOUT_SECONDS") {
            self.timeout_seconds =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| ConfirmError::InvalidConfigValueError {
                        field: "REQUEST_TIMEOUT_SECONDS".to_string(),
                        value: timeout.clone(),
                        reason: "Value must be a whole number of seconds".to_string(),
                    })?;
        }

        Ok(self)
    }
}

impl Validate for ProviderSettings {
    fn validate(&self) -> Result<()> {
        validate_url("generator_endpoint", &self.generator_endpoint)?;
        validate_url("email_endpoint", &self.email_endpoint)?;
        validate_email("sender", &self.sender)?;
        validate_non_empty_string("subject", &self.subject)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 120)?;

        tracing::debug!("✅ Provider settings validation passed");
        Ok(())
    }
}

/// 替換環境變數 (例如 ${SENDER_DOMAIN})；找不到的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = ProviderSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ProviderSettings::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let settings = ProviderSettings::from_toml_str(
            r#"
[email]
sender = "hello@example.com"

[http]
timeout_seconds = 5
"#,
        )
        .unwrap();

        assert_eq!(settings.sender, "hello@example.com");
        assert_eq!(settings.timeout_seconds, 5);
        assert_eq!(settings.email_endpoint, DEFAULT_EMAIL_ENDPOINT);
        assert_eq!(settings.generator_endpoint, DEFAULT_GENERATOR_ENDPOINT);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[generator]
endpoint = "http://localhost:9000/generate"

[email]
endpoint = "http://localhost:9000/emails"
subject = "Welcome aboard"
"#,
            )
            .unwrap();

        let settings = ProviderSettings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.generator_endpoint, "http://localhost:9000/generate");
        assert_eq!(settings.email_endpoint, "http://localhost:9000/emails");
        assert_eq!(settings.subject, "Welcome aboard");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = ProviderSettings::from_toml_str("[email\nsender = 1").unwrap_err();
        assert!(matches!(err, ConfirmError::TomlError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("RESEND_ENDPOINT", "http://127.0.0.1:1/emails"),
            ("CONFIRMATION_SUBJECT", "  "),
            ("REQUEST_TIMEOUT_SECONDS", "3"),
        ]);

        let settings = ProviderSettings::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.email_endpoint, "http://127.0.0.1:1/emails");
        assert_eq!(settings.subject, DEFAULT_SUBJECT);
        assert_eq!(settings.timeout_seconds, 3);
    }

    #[test]
    fn test_bad_timeout_override_is_rejected() {
        let err = ProviderSettings::default()
            .with_overrides(|key| (key == "REQUEST_TIMEOUT_SECONDS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfirmError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let settings = ProviderSettings {
            sender: "not-an-address".to_string(),
            ..ProviderSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = ProviderSettings {
            timeout_seconds: 0,
            ..ProviderSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
