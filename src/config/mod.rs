#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::ProviderSettings;

use crate::utils::error::{ConfirmError, Result};
use std::fmt;

pub const GENERATOR_KEY_VAR: &str = "GEMINI_API_KEY";
pub const EMAIL_KEY_VAR: &str = "RESEND_API_KEY";

/// Everything the confirmation handler needs, populated once by the hosting boundary.
///
/// Missing secrets are not an error here; the handler rejects the request at
/// invocation time so that no provider is ever called with an empty credential.
#[derive(Clone)]
pub struct HandlerConfig {
    pub settings: ProviderSettings,
    pub generator_api_key: Option<String>,
    pub email_api_key: Option<String>,
}

/// 兩把密鑰都存在時才會產生
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub generator_api_key: &'a str,
    pub email_api_key: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("generator_api_key", &"***")
            .field("email_api_key", &"***")
            .finish()
    }
}

impl HandlerConfig {
    pub fn new(
        settings: ProviderSettings,
        generator_api_key: Option<String>,
        email_api_key: Option<String>,
    ) -> Self {
        Self {
            settings,
            generator_api_key,
            email_api_key,
        }
    }

    pub fn from_env(settings: ProviderSettings) -> Result<Self> {
        Self::from_lookup(settings, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(settings: ProviderSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = settings.with_overrides(&lookup)?;
        Ok(Self {
            settings,
            generator_api_key: lookup(GENERATOR_KEY_VAR),
            email_api_key: lookup(EMAIL_KEY_VAR),
        })
    }

    pub fn credentials(&self) -> Result<Credentials<'_>> {
        let generator = non_blank(&self.generator_api_key);
        let email = non_blank(&self.email_api_key);

        match (generator, email) {
            (Some(generator_api_key), Some(email_api_key)) => Ok(Credentials {
                generator_api_key,
                email_api_key,
            }),
            (generator, email) => {
                let missing: Vec<&str> = [
                    (generator.is_none(), GENERATOR_KEY_VAR),
                    (email.is_none(), EMAIL_KEY_VAR),
                ]
                .into_iter()
                .filter_map(|(absent, var)| absent.then_some(var))
                .collect();

                Err(ConfirmError::config(format!(
                    "missing required secret(s): {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| non_blank(value).map(|_| "***");

        f.debug_struct("HandlerConfig")
            .field("settings", &self.settings)
            .field("generator_api_key", &redact(&self.generator_api_key))
            .field("email_api_key", &redact(&self.email_api_key))
            .finish()
    }
}
