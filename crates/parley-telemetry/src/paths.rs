//! Path resolution for telemetry files

use std::path::PathBuf;

const APP_DIR: &str = "parley";

/// Resolves the per-user locations of telemetry files
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve the per-user application data directory
    pub fn new() -> std::io::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "data directory not found")
        })?;

        Ok(Self {
            data_dir: base.join(APP_DIR),
        })
    }

    /// Use an explicit directory instead of the per-user default
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get ollama_telemetry.csv path
    pub fn telemetry_file(&self) -> PathBuf {
        self.data_dir.join("ollama_telemetry.csv")
    }

    /// Get transcript.jsonl path
    pub fn transcript_file(&self) -> PathBuf {
        self.data_dir.join("transcript.jsonl")
    }
}
