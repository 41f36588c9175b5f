//! Append-only telemetry log

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{info, warn};

use crate::io::{append_jsonl, append_line, ensure_initialized};
use crate::TelemetryRecord;

/// Appends one line per exchange to a delimited log.
///
/// The log is created with a header on first use. Writes never propagate
/// errors: a failed append is reported with `warn!` and returns `false`.
/// Appends from concurrent callers are serialized so lines never interleave.
#[derive(Debug)]
pub struct TelemetryStore {
    path: PathBuf,
    transcript: Option<PathBuf>,
    lock: Mutex<()>,
}

impl TelemetryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            transcript: None,
            lock: Mutex::new(()),
        }
    }

    /// Also append every full record (raw body and reply included) as JSONL
    pub fn with_transcript(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript = Some(path.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn transcript_path(&self) -> Option<&Path> {
        self.transcript.as_deref()
    }

    /// Create the log with its header if missing
    pub fn ensure_initialized(&self) -> bool {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match ensure_initialized(&self.path) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to initialize telemetry log {}: {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    /// Append a record. Returns whether the log line was written.
    pub fn append(&self, record: &TelemetryRecord) -> bool {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let written = match ensure_initialized(&self.path)
            .and_then(|()| append_line(&self.path, &record.csv_line()))
        {
            Ok(()) => {
                info!(
                    "Telemetry logged: {} ({:.0} ms)",
                    record.model, record.inference_ms
                );
                true
            }
            Err(e) => {
                warn!("Failed to write telemetry: {}", e);
                false
            }
        };

        if let Some(transcript) = &self.transcript {
            if let Err(e) = append_jsonl(transcript, record) {
                warn!("Failed to write transcript {}: {}", transcript.display(), e);
            }
        }

        written
    }
}
