pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpFetcher, sink::Sink};
pub use config::{Settings, DEFAULT_BASE_URL};
pub use crate::core::{engine::BatchEngine, orchestrator::BatchOrchestrator};
pub use utils::error::{AppError, Result};
