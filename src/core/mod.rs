pub mod aggregator;
pub mod engine;
pub mod orchestrator;
pub mod report;

pub use crate::domain::model::{Aggregate, BatchEntry, BatchResult, Identifier};
pub use crate::domain::ports::{ConfigProvider, ReportSink, ResourceFetcher};
pub use crate::utils::error::Result;
