use crate::core::sink::drain;
use crate::core::source::IndexSource;
use crate::core::transform::RecordTransform;
use crate::domain::model::{RunReport, TransactionFactory};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::format::{seconds, with_thousand_separator};
use crate::utils::monitor::SystemMonitor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Source -> transform -> sink, driven on the calling task.
pub struct GenerationPipeline<C: ConfigProvider> {
    config: C,
    monitor: Option<Arc<SystemMonitor>>,
}

impl<C: ConfigProvider> GenerationPipeline<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            monitor: None,
        }
    }

    pub fn with_monitor(mut self, monitor: Arc<SystemMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub async fn run<S: Storage>(&self, storage: &S, path: &Path) -> Result<RunReport> {
        self.run_with(storage, path, |result| result).await
    }

    /// Runs the whole flow and hands its outcome to `on_finish`, once.
    pub async fn run_with<S, F, R>(&self, storage: &S, path: &Path, on_finish: F) -> R
    where
        S: Storage,
        F: FnOnce(Result<RunReport>) -> R,
    {
        let started = Instant::now();
        let result = self.stream(storage, path, started).await;
        on_finish(result)
    }

    async fn stream<S: Storage>(&self, storage: &S, path: &Path, started: Instant) -> Result<RunReport> {
        let limit = self.config.limit();
        let mut sink = storage.open_sink(path).await?;

        let (sender, receiver) = mpsc::channel(self.config.channel_capacity());
        let mut transform = RecordTransform::new(
            limit,
            self.config.log_window(),
            TransactionFactory::from_seed(self.config.seed()),
        );
        if let Some(monitor) = &self.monitor {
            transform = transform.with_monitor(Arc::clone(monitor));
        }

        tracing::debug!(
            "Streaming {} records to {} (channel capacity {})",
            limit,
            path.display(),
            self.config.channel_capacity()
        );

        // 任一階段失敗即中止整個流程
        let (records, bytes_written) = tokio::try_join!(
            transform.run(IndexSource::new(limit), sender),
            drain(&mut sink, receiver)
        )?;

        Ok(RunReport {
            records,
            bytes_written,
            elapsed: started.elapsed(),
            output_path: path.to_path_buf(),
        })
    }
}

/// Default completion handler: logs the outcome and passes it through.
pub fn log_completion(result: Result<RunReport>) -> Result<RunReport> {
    match &result {
        Ok(report) => tracing::info!(
            "Generated {} records for huge JSON in {} seconds.",
            with_thousand_separator(report.records),
            seconds(report.elapsed)
        ),
        Err(e) => tracing::error!("Error generating JSON file: {}", e),
    }
    result
}
