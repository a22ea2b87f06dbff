use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "swapi-fanout")]
#[command(about = "Fetch people and all of their film titles concurrently")]
pub struct CliConfig {
    /// People IDs to aggregate (unique integers greater than 0)
    #[arg(required = true, allow_negative_numbers = true)]
    pub ids: Vec<String>,

    /// Base URL of the API; people are fetched from {base_url}/people/{id}
    #[arg(long, env = "SWAPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Extra request header, KEY=VALUE (repeatable)
    #[arg(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl CliConfig {
    /// 載入設定檔（若有）並套用命令列覆蓋
    pub fn resolve_settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let config = TomlConfig::from_file(path).map_err(|e| match e {
                    AppError::Io(io) => AppError::Config {
                        message: format!("cannot read config file '{}': {}", path, io),
                    },
                    other => other,
                })?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };

        let settings = Settings::from_toml(file).apply_overrides(
            self.base_url.clone(),
            self.headers.clone(),
            self.output.clone(),
            self.pretty,
        );
        settings.validate()?;
        Ok(settings)
    }
}
