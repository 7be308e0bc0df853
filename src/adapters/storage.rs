use crate::domain::ports::{ChunkSink, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Local file system backend.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    type Sink = FileSink;

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        Ok(std::path::absolute(path)?)
    }

    async fn remove_existing(&self, path: &Path) -> Result<bool> {
        if !fs::try_exists(path).await? {
            return Ok(false);
        }
        fs::remove_file(path).await?;
        tracing::debug!("Removed existing file {}", path.display());
        Ok(true)
    }

    async fn open_sink(&self, path: &Path) -> Result<FileSink> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = File::create(path).await?;
        Ok(FileSink::new(file))
    }
}

/// Buffered file writer. A full buffer makes `write_chunk` wait for the disk.
pub struct FileSink {
    writer: BufWriter<File>,
    bytes_written: u64,
}

impl FileSink {
    pub fn new(file: File) -> Self {
        Self {
            writer: BufWriter::new(file),
            bytes_written: 0,
        }
    }
}

#[async_trait]
impl ChunkSink for FileSink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer.write_all(chunk).await?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.writer.flush().await?;
        self.writer.shutdown().await?;
        Ok(())
    }

    fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}
