use anyhow::Context;
use clap::Parser;
use swapi_fanout::core::ConfigProvider;
use swapi_fanout::utils::error::ErrorSeverity;
use swapi_fanout::utils::logger;
use swapi_fanout::{AppError, BatchEngine, CliConfig, HttpFetcher, Sink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting swapi-fanout");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.resolve_settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    let fetcher = HttpFetcher::from_config(&settings).context("failed to build HTTP client")?;
    let sink = Sink::from_output_path(settings.output_path());
    let engine = BatchEngine::new(fetcher, sink, settings.base_url()).with_pretty(settings.pretty());

    match engine.run(config.ids.as_slice()).await {
        Ok(result) => {
            if let Some(path) = settings.output_path() {
                tracing::info!("📁 Report saved to: {}", path);
            }
            if result.has_failures() {
                tracing::warn!(
                    "⚠️ {} of {} people could not be aggregated",
                    result.failed(),
                    result.len()
                );
                std::process::exit(2);
            }
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(error: AppError) -> ! {
    let exit_code = match error.severity() {
        // 拒絕訊息已經寫進報告輸出
        ErrorSeverity::Rejected => 1,
        ErrorSeverity::Critical => {
            tracing::error!("❌ {}", error);
            eprintln!("❌ {}", error.user_friendly_message());
            3
        }
    };
    std::process::exit(exit_code);
}
