use crate::domain::model::{Address, DependentRecord, PrimaryRecord};
use crate::utils::error::{FetchError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// 取得並解碼單一遠端資源
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_primary(&self, address: &Address) -> std::result::Result<PrimaryRecord, FetchError>;
    async fn fetch_dependent(
        &self,
        address: &Address,
    ) -> std::result::Result<DependentRecord, FetchError>;
}

pub trait ReportSink: Send + Sync {
    fn write_report(&self, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn headers(&self) -> &HashMap<String, String>;
    fn output_path(&self) -> Option<&str>;
    fn pretty(&self) -> bool;
}
