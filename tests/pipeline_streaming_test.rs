use huge_json::core::pipeline::log_completion;
use huge_json::core::source::IndexSource;
use huge_json::core::transform::{RecordTransform, TransformState};
use huge_json::core::TransactionFactory;
use huge_json::{GenerateError, GenerationPipeline, GeneratorConfig, LocalStorage};
use tempfile::TempDir;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_unwritable_destination_reaches_completion_handler() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"file, not a directory").unwrap();
    let path = blocker.join("huge.json");

    let config = GeneratorConfig::new(path.to_str().unwrap()).with_limit(10);
    let mut outcomes = Vec::new();

    GenerationPipeline::new(config)
        .run_with(&LocalStorage::new(), &path, |result| outcomes.push(result))
        .await;

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], Err(GenerateError::IoError(_))));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_default_handler_returns_error_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();
    let path = blocker.join("huge.json");

    let config = GeneratorConfig::new(path.to_str().unwrap()).with_limit(10);
    let result = GenerationPipeline::new(config)
        .run_with(&LocalStorage::new(), &path, log_completion)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_large_run_streams_through_small_channel() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("large.json");

    let config = GeneratorConfig::new(path.to_str().unwrap())
        .with_limit(100_000)
        .with_log_window(25_000)
        .with_channel_capacity(1);
    let report = GenerationPipeline::new(config)
        .run(&LocalStorage::new(), &path)
        .await
        .unwrap();

    assert_eq!(report.records, 100_000);
    let file = std::fs::File::open(&path).unwrap();
    let parsed: Vec<serde_json::Value> =
        serde_json::from_reader(std::io::BufReader::new(file)).unwrap();
    assert_eq!(parsed.len(), 100_000);
}

#[tokio::test]
async fn test_progress_lines_for_two_and_a_half_windows() {
    let (sender, mut receiver) = mpsc::channel(8);
    let mut transform = RecordTransform::new(250, 100, TransactionFactory::with_seed(4));

    let consumer = async move {
        let mut chunks = 0;
        while receiver.recv().await.is_some() {
            chunks += 1;
        }
        chunks
    };
    let (emitted, chunks) = tokio::join!(transform.run(IndexSource::new(250), sender), consumer);

    assert_eq!(emitted.unwrap(), 250);
    assert_eq!(chunks, 251);
    assert_eq!(transform.state(), TransformState::Finished);
    assert_eq!(transform.progress_lines(), 2);
}
