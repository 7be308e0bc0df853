pub mod engine;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod transform;

pub use crate::domain::model::{RunReport, Transaction, TransactionFactory, TransactionType};
pub use crate::domain::ports::{ChunkSink, ConfigProvider, Storage};
pub use crate::utils::error::Result;
