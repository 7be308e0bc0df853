use crate::domain::model::TransactionFactory;
use crate::utils::error::{GenerateError, Result};
use crate::utils::format::{seconds, with_thousand_separator};
use crate::utils::monitor::SystemMonitor;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

pub type Chunk = Vec<u8>;

/// Counts records per progress window and measures how long each window took.
#[derive(Debug)]
pub struct ProgressTracker {
    window: u64,
    count: u64,
    window_start: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub index: u64,
    pub window: u64,
    pub elapsed: Duration,
}

impl ProgressTracker {
    pub fn new(window: u64) -> Self {
        Self {
            window,
            count: 0,
            window_start: Instant::now(),
        }
    }

    pub fn observe(&mut self, index: u64) -> Option<ProgressReport> {
        self.count += 1;
        if self.window == 0 || index % self.window != 0 {
            return None;
        }

        let report = ProgressReport {
            index,
            window: self.count,
            elapsed: self.window_start.elapsed(),
        };
        self.count = 0;
        self.window_start = Instant::now();
        Some(report)
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created {} records for huge JSON. ({} in {} seconds.)",
            with_thousand_separator(self.index),
            with_thousand_separator(self.window),
            seconds(self.elapsed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformState {
    NotStarted,
    Emitting,
    Finished,
}

/// Turns record ordinals into the chunks of one JSON array.
pub struct RecordTransform {
    limit: u64,
    expected: u64,
    state: TransformState,
    factory: TransactionFactory,
    progress: ProgressTracker,
    progress_lines: u64,
    monitor: Option<Arc<SystemMonitor>>,
}

impl RecordTransform {
    pub fn new(limit: u64, log_window: u64, factory: TransactionFactory) -> Self {
        Self {
            limit,
            expected: 1,
            state: TransformState::NotStarted,
            factory,
            progress: ProgressTracker::new(log_window),
            progress_lines: 0,
            monitor: None,
        }
    }

    pub fn with_monitor(mut self, monitor: Arc<SystemMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn state(&self) -> TransformState {
        self.state
    }

    pub fn progress_lines(&self) -> u64 {
        self.progress_lines
    }

    /// Chunks for `index`: the opening bracket (first index only) and the
    /// record with its separator or the closing bracket.
    pub fn encode(&mut self, index: u64) -> Result<impl Iterator<Item = Chunk>> {
        if self.state == TransformState::Finished || index != self.expected {
            return Err(GenerateError::processing(format!(
                "unexpected index {} (expected {} of {})",
                index, self.expected, self.limit
            )));
        }

        let opening = if index == 1 {
            self.state = TransformState::Emitting;
            Some(format!("[{}", LINE_ENDING).into_bytes())
        } else {
            None
        };

        if let Some(report) = self.progress.observe(index) {
            tracing::info!("{}", report);
            self.progress_lines += 1;
            if let Some(monitor) = &self.monitor {
                monitor.log_stats("Generating");
            }
        }

        let mut record = serde_json::to_vec_pretty(&self.factory.create())?;
        if index == self.limit {
            record.extend_from_slice(LINE_ENDING.as_bytes());
            record.push(b']');
            self.state = TransformState::Finished;
        } else {
            record.push(b',');
            record.extend_from_slice(LINE_ENDING.as_bytes());
        }
        self.expected += 1;

        Ok(opening.into_iter().chain(std::iter::once(record)))
    }

    /// Feeds every index through `encode` into `sender`. Awaiting `send` is
    /// where production pauses while the sink is behind.
    pub async fn run<I>(&mut self, source: I, sender: mpsc::Sender<Chunk>) -> Result<u64>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut emitted = 0;
        for index in source {
            for chunk in self.encode(index)? {
                sender.send(chunk).await.map_err(|_| {
                    GenerateError::processing(format!(
                        "sink closed after {} of {} records",
                        emitted, self.limit
                    ))
                })?;
            }
            emitted += 1;
        }

        if self.state != TransformState::Finished {
            return Err(GenerateError::processing(format!(
                "source ended after {} of {} records",
                emitted, self.limit
            )));
        }

        tracing::debug!("Transform emitted {} records", emitted);
        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(transform: &mut RecordTransform, limit: u64) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for index in 1..=limit {
            chunks.extend(transform.encode(index).unwrap());
        }
        chunks
    }

    #[test]
    fn test_first_index_emits_opening_bracket_alone() {
        let mut transform = RecordTransform::new(3, 1_000_000, TransactionFactory::with_seed(1));
        let chunks: Vec<Chunk> = transform.encode(1).unwrap().collect();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("[{}", LINE_ENDING).into_bytes());
        assert!(chunks[1].starts_with(b"{"));
        assert!(chunks[1].ends_with(format!(",{}", LINE_ENDING).as_bytes()));
        assert_eq!(transform.state(), TransformState::Emitting);
    }

    #[test]
    fn test_three_records_form_a_json_array() {
        let mut transform = RecordTransform::new(3, 1_000_000, TransactionFactory::with_seed(3));
        let chunks = collect(&mut transform, 3);

        assert_eq!(chunks.len(), 4);
        assert_eq!(transform.state(), TransformState::Finished);
        assert!(chunks[3].ends_with(format!("{}]", LINE_ENDING).as_bytes()));

        let text = String::from_utf8(chunks.concat()).unwrap();
        assert_eq!(text.matches("},").count(), 2);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_single_record_is_opened_and_closed() {
        let mut transform = RecordTransform::new(1, 1_000_000, TransactionFactory::with_seed(9));
        let chunks = collect(&mut transform, 1);

        let parsed: serde_json::Value = serde_json::from_slice(&chunks.concat()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_gaps_repeats_and_overrun() {
        let mut transform = RecordTransform::new(2, 1_000_000, TransactionFactory::with_seed(1));
        assert!(transform.encode(2).is_err());
        assert!(transform.encode(1).is_ok());
        assert!(transform.encode(1).is_err());
        assert!(transform.encode(2).is_ok());
        assert!(transform.encode(3).is_err());
    }

    #[test]
    fn test_progress_lines_at_every_full_window() {
        let mut transform = RecordTransform::new(25, 10, TransactionFactory::with_seed(5));
        collect(&mut transform, 25);
        assert_eq!(transform.progress_lines(), 2);
    }

    #[test]
    fn test_tracker_reports_two_windows_for_two_and_a_half_million() {
        let mut tracker = ProgressTracker::new(1_000_000);
        let reports: Vec<ProgressReport> =
            (1..=2_500_000).filter_map(|i| tracker.observe(i)).collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].index, 1_000_000);
        assert_eq!(reports[1].index, 2_000_000);
        assert!(reports.iter().all(|r| r.window == 1_000_000));
    }

    #[test]
    fn test_progress_report_message() {
        let report = ProgressReport {
            index: 2_000_000,
            window: 1_000_000,
            elapsed: Duration::from_millis(1_250),
        };
        assert_eq!(
            report.to_string(),
            "Created 2.000.000 records for huge JSON. (1.000.000 in 1.250 seconds.)"
        );
    }

    #[tokio::test]
    async fn test_run_fails_when_receiver_is_gone() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);

        let mut transform = RecordTransform::new(5, 1_000_000, TransactionFactory::with_seed(1));
        let err = transform.run(1..=5, sender).await.unwrap_err();
        assert!(matches!(err, GenerateError::ProcessingError { .. }));
    }

    #[tokio::test]
    async fn test_run_fails_on_short_source() {
        let (sender, mut receiver) = mpsc::channel(16);
        let mut transform = RecordTransform::new(5, 1_000_000, TransactionFactory::with_seed(1));

        let result = transform.run(1..=3, sender).await;
        assert!(result.is_err());
        assert!(receiver.recv().await.is_some());
    }
}
