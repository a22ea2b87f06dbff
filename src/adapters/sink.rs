use crate::domain::ports::ReportSink;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// 報告寫到標準輸出
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    async fn write_report(&self, data: &[u8]) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(data).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    async fn write_report(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&self.path, data).await?;
        tracing::debug!("Report written to {}", self.path.display());
        Ok(())
    }
}

/// 依設定選擇輸出目的地
#[derive(Debug, Clone)]
pub enum Sink {
    Stdout(StdoutSink),
    File(FileSink),
}

impl Sink {
    pub fn from_output_path(path: Option<&str>) -> Self {
        match path {
            Some(path) => Sink::File(FileSink::new(path)),
            None => Sink::Stdout(StdoutSink),
        }
    }
}

impl ReportSink for Sink {
    async fn write_report(&self, data: &[u8]) -> Result<()> {
        match self {
            Sink::Stdout(sink) => sink.write_report(data).await,
            Sink::File(sink) => sink.write_report(data).await,
        }
    }
}
