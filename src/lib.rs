pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileSink, LocalStorage};
pub use config::GeneratorConfig;
pub use crate::core::{engine::GeneratorEngine, pipeline::GenerationPipeline};
pub use domain::model::{RunReport, Transaction, TransactionType};
pub use utils::error::{GenerateError, Result};
