use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Ordered, append-only destination for serialized chunks.
#[async_trait]
pub trait ChunkSink: Send {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()>;

    /// Flushes buffered bytes and closes the destination.
    async fn finish(&mut self) -> Result<()>;

    fn bytes_written(&self) -> u64;
}

pub trait Storage: Send + Sync {
    type Sink: ChunkSink;

    fn resolve(&self, path: &str) -> Result<PathBuf>;

    /// Deletes `path` if present. Returns whether a file was removed.
    fn remove_existing(&self, path: &Path) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn open_sink(&self, path: &Path) -> impl std::future::Future<Output = Result<Self::Sink>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn limit(&self) -> u64;
    fn log_window(&self) -> u64;
    fn channel_capacity(&self) -> usize;
    fn seed(&self) -> Option<u64>;
}
