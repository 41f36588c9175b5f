//! Append-only file I/O for the telemetry log and transcript

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Header line of the telemetry log
pub const CSV_HEADER: &str =
    "timestampUtc,model,inferenceMs,tokens,tokensGenerated,platform,device,deviceType";

/// Make a string safe for a single delimited field.
///
/// Commas become semicolons and newlines become spaces. This is not CSV
/// quoting; the log is only ever split on commas and newlines.
pub fn escape_field(value: &str) -> String {
    value.replace(',', ";").replace('\n', " ")
}

/// Create the log with its header line if it does not exist yet
pub fn ensure_initialized(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => writeln!(file, "{}", CSV_HEADER),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Append one line to an existing file
pub fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// Append a JSON record to a JSONL file
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let json = serde_json::to_string(record)?;
    writeln!(file, "{}", json)?;
    Ok(())
}
