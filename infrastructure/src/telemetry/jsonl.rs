//! JSONL file writer for debate audit records.
//!
//! Each finished debate is serialized as a single JSON line and appended to
//! the file via a buffered writer. Turn-level metrics are embedded in the
//! debate record and also emitted as debug log events as they arrive.

use duel_application::{DebateMetrics, TelemetrySink, TurnMetrics};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Telemetry sink that appends one JSON object per debate.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record so
/// a crash mid-session loses at most the in-flight debate.
pub struct JsonlTelemetrySink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTelemetrySink {
    /// Open the sink in append mode, creating the file (and parent
    /// directories) if they don't exist. Returns `None` if the file cannot
    /// be opened; callers fall back to a no-op sink.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create telemetry directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open telemetry file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the telemetry file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            warn!(
                "Failed to write telemetry record to {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl TelemetrySink for JsonlTelemetrySink {
    fn on_debate_start(&self, expression: &str, pace_mode: &str, max_rounds: u32) {
        info!(
            "Telemetry session: {} (pace: {}, max_rounds: {})",
            expression, pace_mode, max_rounds
        );
    }

    fn on_turn(&self, metrics: &TurnMetrics) {
        debug!(
            "Turn logged: {} - model_latency={:.2}s, padding={:.2}s, tokens={}",
            metrics.speaker, metrics.model_latency_secs, metrics.padding_secs,
            metrics.tokens_estimate
        );
    }

    fn on_debate_end(&self, metrics: &DebateMetrics) {
        match serde_json::to_string(metrics) {
            Ok(line) => self.write_line(&line),
            Err(e) => warn!("Failed to serialize debate record: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_domain::{DebateResult, PaceMode};

    fn sample_metrics() -> DebateMetrics {
        let mut result = DebateResult::in_progress("2 + 3 * 4".into(), PaceMode::Fast);
        result.complete("14".to_string());
        DebateMetrics::from_result(&result, 12, chrono::Utc::now())
    }

    #[test]
    fn appends_one_line_per_debate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetry.jsonl");

        let sink = JsonlTelemetrySink::new(&path).unwrap();
        sink.on_debate_end(&sample_metrics());
        sink.on_debate_end(&sample_metrics());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record["expression"], "2 + 3 * 4");
        assert_eq!(record["status"], "completed");
        assert_eq!(record["final_answer"], "14");
    }

    #[test]
    fn reopening_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetry.jsonl");

        JsonlTelemetrySink::new(&path)
            .unwrap()
            .on_debate_end(&sample_metrics());
        JsonlTelemetrySink::new(&path)
            .unwrap()
            .on_debate_end(&sample_metrics());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("telemetry.jsonl");

        let sink = JsonlTelemetrySink::new(&path);
        assert!(sink.is_some());
        assert!(path.parent().unwrap().exists());
    }
}
