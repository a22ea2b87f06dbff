use crate::core::orchestrator::BatchOrchestrator;
use crate::core::report;
use crate::domain::model::BatchResult;
use crate::domain::ports::{ReportSink, ResourceFetcher};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::parse_identifiers;

pub struct BatchEngine<F: ResourceFetcher, S: ReportSink> {
    orchestrator: BatchOrchestrator<F>,
    sink: S,
    pretty: bool,
}

impl<F: ResourceFetcher, S: ReportSink> BatchEngine<F, S> {
    pub fn new(fetcher: F, sink: S, base_url: impl Into<String>) -> Self {
        Self {
            orchestrator: BatchOrchestrator::new(fetcher, base_url),
            sink,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// 驗證 → 聚合 → 輸出報告；驗證失敗時只輸出一筆 rejected，不發出任何請求
    pub async fn run<R: AsRef<str>>(&self, raw_ids: &[R]) -> Result<BatchResult> {
        let ids = match parse_identifiers(raw_ids) {
            Ok(ids) => ids,
            Err(error @ AppError::Validation { .. }) => {
                let rendered = report::render_rejection(&error, self.pretty)?;
                self.sink.write_report(&rendered).await?;
                return Err(error);
            }
            Err(error) => return Err(error),
        };
        tracing::debug!("Validated {} identifiers", ids.len());

        let result = self.orchestrator.run(&ids).await;

        let rendered = report::render(&result, self.pretty)?;
        self.sink.write_report(&rendered).await?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Address, DependentRecord, PrimaryRecord};
    use crate::utils::error::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemorySink {
        written: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl ReportSink for MemorySink {
        async fn write_report(&self, data: &[u8]) -> Result<()> {
            if let Ok(mut written) = self.written.lock() {
                written.push(data.to_vec());
            }
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CountingFetcher {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ResourceFetcher for CountingFetcher {
        async fn fetch_primary(&self, _address: &Address) -> std::result::Result<PrimaryRecord, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PrimaryRecord {
                name: "Luke Skywalker".to_string(),
                films: vec![Address::new("f1"), Address::new("f2")],
            })
        }

        async fn fetch_dependent(
            &self,
            address: &Address,
        ) -> std::result::Result<DependentRecord, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let title = if address.as_str() == "f1" { "A" } else { "B" };
            Ok(DependentRecord {
                title: title.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected_without_network() {
        let fetcher = CountingFetcher::default();
        let sink = MemorySink::default();
        let engine = BatchEngine::new(fetcher.clone(), sink.clone(), "http://api");

        let err = engine.run(&["1", "1"]).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        let report: serde_json::Value = serde_json::from_slice(&written[0]).unwrap();
        assert_eq!(report["status"], "rejected");
        assert!(report["message"].as_str().unwrap().contains("1, 1"));
    }

    #[tokio::test]
    async fn test_report_written_to_sink() {
        let sink = MemorySink::default();
        let engine = BatchEngine::new(CountingFetcher::default(), sink.clone(), "http://api");

        let result = engine.run(&["1"]).await.unwrap();
        assert_eq!(result.succeeded(), 1);

        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        let report: serde_json::Value = serde_json::from_slice(&written[0]).unwrap();
        assert_eq!(
            report,
            serde_json::json!([
                {"status": "ok", "id": 1, "name": "Luke Skywalker", "titles": ["A", "B"]}
            ])
        );
    }
}
