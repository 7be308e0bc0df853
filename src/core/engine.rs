use crate::config::GeneratorConfig;
use crate::core::pipeline::{log_completion, GenerationPipeline};
use crate::domain::model::RunReport;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use crate::utils::validation::Validate;
use std::path::PathBuf;
use std::sync::Arc;

/// Outer boundary of a run: prepares the destination, runs the pipeline and
/// reports every failure instead of panicking.
pub struct GeneratorEngine<S: Storage> {
    storage: S,
    config: GeneratorConfig,
    monitor: Arc<SystemMonitor>,
}

impl<S: Storage> GeneratorEngine<S> {
    pub fn new(storage: S, config: GeneratorConfig) -> Self {
        Self::new_with_monitoring(storage, config, false)
    }

    pub fn new_with_monitoring(storage: S, config: GeneratorConfig, monitor_enabled: bool) -> Self {
        Self {
            storage,
            config,
            monitor: Arc::new(SystemMonitor::new(monitor_enabled)),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let output_path = match self.prepare().await {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("{}", e);
                tracing::error!("Error generating JSON.");
                return Err(e);
            }
        };

        tracing::info!(
            "Generating {} records into {}",
            self.config.limit(),
            output_path.display()
        );
        self.monitor.log_stats("Start");

        let mut pipeline = GenerationPipeline::new(self.config.clone());
        if self.monitor.is_enabled() {
            pipeline = pipeline.with_monitor(Arc::clone(&self.monitor));
        }

        let result = pipeline
            .run_with(&self.storage, &output_path, log_completion)
            .await;

        self.monitor.log_final_stats();
        result
    }

    async fn prepare(&self) -> Result<PathBuf> {
        self.config.validate()?;

        let output_path = self.storage.resolve(self.config.output_path())?;
        if self.storage.remove_existing(&output_path).await? {
            tracing::info!("Deleted previous {}", output_path.display());
        }
        Ok(output_path)
    }
}
