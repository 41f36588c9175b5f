//! Telemetry record types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::io::escape_field;

/// One chat exchange: timing, model identity and outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub timestamp_utc: DateTime<Utc>,
    pub model: String,
    pub success: bool,
    pub inference_ms: f64,
    #[serde(default)]
    pub tokens: u64,
    #[serde(default)]
    pub tokens_generated: u64,
    pub platform: String,
    pub device: String,
    pub device_type: String,
    /// Full server body on success, error text on failure
    #[serde(default)]
    pub raw_response_body: String,
    /// Absent when the exchange failed
    #[serde(default)]
    pub generated_text: Option<String>,
}

impl TelemetryRecord {
    /// ISO-8601 timestamp as written to the log
    pub fn timestamp_iso(&self) -> String {
        self.timestamp_utc.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Render the record as one log line, without the trailing newline.
    ///
    /// Field order matches [`crate::CSV_HEADER`].
    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{:.0},{},{},{},{},{}",
            self.timestamp_iso(),
            escape_field(&self.model),
            self.inference_ms,
            self.tokens,
            self.tokens_generated,
            escape_field(&self.platform),
            escape_field(&self.device),
            escape_field(&self.device_type),
        )
    }
}
