use crate::core::transform::Chunk;
use crate::domain::ports::ChunkSink;
use crate::utils::error::Result;
use tokio::sync::mpsc;

/// Writes chunks in arrival order until every sender is gone, then finishes
/// the sink. Returns the number of bytes written.
pub async fn drain<K: ChunkSink>(sink: &mut K, mut receiver: mpsc::Receiver<Chunk>) -> Result<u64> {
    let mut chunks = 0u64;
    while let Some(chunk) = receiver.recv().await {
        sink.write_chunk(&chunk).await?;
        chunks += 1;
    }

    sink.finish().await?;
    tracing::debug!(
        "Sink finished after {} chunks ({} bytes)",
        chunks,
        sink.bytes_written()
    );
    Ok(sink.bytes_written())
}
