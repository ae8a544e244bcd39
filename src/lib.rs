pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{GeminiClient, InMemoryLeadStore, LocalLeadStore, RemoteConfirmationService, ResendClient};
pub use app::{ConfirmationResponse, LeadCaptureClient};
pub use config::{HandlerConfig, ProviderSettings};
pub use crate::core::handler::ConfirmationHandler;
pub use utils::error::{ConfirmError, Result};
