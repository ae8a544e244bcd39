use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lead-confirm")]
#[command(about = "Capture a lead and send a personalized confirmation email")]
pub struct CliConfig {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub industry: String,

    #[arg(long, help = "TOML file with provider settings")]
    pub config: Option<String>,

    #[arg(long, help = "Call a deployed confirmation handler instead of running it in-process")]
    pub handler_url: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::validate_non_empty_string;

        if let Some(url) = &self.handler_url {
            validate_url("handler_url", url)?;
        }
        if let Some(path) = &self.config {
            validate_non_empty_string("config", path)?;
        }
        validate_non_empty_string("output_path", &self.output_path)?;

        Ok(())
    }
}
