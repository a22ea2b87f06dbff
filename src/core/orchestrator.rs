use crate::core::aggregator::FanoutAggregator;
use crate::domain::model::{BatchEntry, BatchFailure, BatchResult, Identifier};
use crate::domain::ports::ResourceFetcher;
use futures::future::join_all;

/// 為每個識別碼同時執行一次聚合，失敗只影響自己的欄位
pub struct BatchOrchestrator<F: ResourceFetcher> {
    fetcher: F,
    base_url: String,
}

impl<F: ResourceFetcher> BatchOrchestrator<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// `ids` 必須已經通過驗證
    pub async fn run(&self, ids: &[Identifier]) -> BatchResult {
        tracing::info!("🚀 Aggregating {} people concurrently", ids.len());

        let aggregator = FanoutAggregator::new(&self.fetcher, &self.base_url);

        // 每個任務各自 settle，結果包成 BatchEntry 而不是往外傳播錯誤
        let entries = join_all(ids.iter().map(|&id| {
            let aggregator = &aggregator;
            async move {
                match aggregator.aggregate(id).await {
                    Ok(aggregate) => {
                        tracing::debug!(
                            "✅ Person {} aggregated with {} titles",
                            id,
                            aggregate.titles.len()
                        );
                        BatchEntry::Aggregate { id, aggregate }
                    }
                    Err(error) => {
                        tracing::error!("Error fetching titles for ID {}: {}", id, error);
                        BatchEntry::Failed(BatchFailure { id, error })
                    }
                }
            }
        }))
        .await;

        let result = BatchResult::new(entries);
        tracing::info!(
            "📊 Batch finished: {} succeeded, {} failed",
            result.succeeded(),
            result.failed()
        );
        result
    }
}
