use clap::Parser;
use lead_confirm::app::handler_from_config;
use lead_confirm::core::{ConfirmationService, LeadStore};
use lead_confirm::domain::model::ConfirmationStatus;
use lead_confirm::utils::error::ErrorSeverity;
use lead_confirm::utils::{logger, validation::Validate};
use lead_confirm::{
    CliConfig, HandlerConfig, LeadCaptureClient, LocalLeadStore, ProviderSettings,
    RemoteConfirmationService,
};
use std::time::Duration;

fn load_settings(config: &CliConfig) -> lead_confirm::Result<ProviderSettings> {
    match &config.config {
        Some(path) => ProviderSettings::from_file(path).inspect_err(|e| {
            tracing::error!("❌ Failed to load settings from {}: {}", path, e);
        }),
        None => Ok(ProviderSettings::default()),
    }
}

async fn submit<S: ConfirmationService, L: LeadStore>(
    client: LeadCaptureClient<S, L>,
    config: &CliConfig,
) -> lead_confirm::Result<ConfirmationStatus> {
    let record = client
        .submit(&config.name, &config.email, &config.industry)
        .await?;
    Ok(record.confirmation)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lead-confirm CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let handler_config = HandlerConfig::from_env(load_settings(&config)?)?;
    handler_config.settings.validate()?;
    tracing::debug!("Handler config: {:?}", handler_config);

    let timeout = Duration::from_secs(handler_config.settings.timeout_seconds);
    let store = LocalLeadStore::new(config.output_path.clone());

    let outcome = match &config.handler_url {
        Some(url) => {
            tracing::info!("🌐 Using remote confirmation handler: {}", url);
            let service = RemoteConfirmationService::new(url.clone(), timeout)?;
            submit(LeadCaptureClient::new(service, store.clone()), &config).await
        }
        None => {
            let handler = handler_from_config(handler_config)?;
            submit(LeadCaptureClient::new(handler, store.clone()), &config).await
        }
    };

    match outcome {
        Ok(ConfirmationStatus::Sent { id }) => {
            println!("✅ Lead saved and confirmation email sent (id: {})", id);
            println!("📁 Lead records: {}", store.file_path().display());
        }
        Ok(ConfirmationStatus::Failed { reason }) => {
            // 名單已保存，只是信件沒寄出
            println!("⚠️ Lead saved, but the confirmation email was not sent: {}", reason);
            println!("📁 Lead records: {}", store.file_path().display());
        }
        Err(e) => {
            tracing::error!(
                "❌ Submission failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
