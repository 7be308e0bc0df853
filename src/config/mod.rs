#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Number of records written by the command line tool.
pub const DEFAULT_LIMIT: u64 = 10_000_000;

/// Records between two progress lines.
pub const DEFAULT_LOG_WINDOW: u64 = 1_000_000;

/// Chunks allowed in flight between the transform and the sink.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub output_path: String,
    pub limit: u64,
    pub log_window: u64,
    pub channel_capacity: usize,
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(output_path: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
            limit: DEFAULT_LIMIT,
            log_window: DEFAULT_LOG_WINDOW,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            seed: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_log_window(mut self, log_window: u64) -> Self {
        self.log_window = log_window;
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("limit", self.limit, 1)?;
        validate_positive_number("log_window", self.log_window, 1)?;
        validate_positive_number("channel_capacity", self.channel_capacity, 1)?;
        Ok(())
    }
}

impl ConfigProvider for GeneratorConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn limit(&self) -> u64 {
        self.limit
    }

    fn log_window(&self) -> u64 {
        self.log_window
    }

    fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}
