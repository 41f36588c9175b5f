use std::path::Path;

use crate::cli::Options;
use crate::settings;

pub fn run(options: &Options) -> anyhow::Result<()> {
    let config = settings::client_config(options)?;
    let log = settings::log_path(options)?;
    let transcript = settings::transcript_path(options)?;

    println!("Configuration\n-------------");
    println!("  Endpoint: {}", config.endpoint());
    println!("  Model: {}", config.model);
    println!("  Timeout: {} s", config.timeout_secs);
    println!("  Persona: {}", config.system_prompt);
    match config.validate() {
        Ok(()) => println!("  Valid: yes"),
        Err(e) => println!("  Valid: no ({})", e),
    }

    println!("\nTelemetry\n---------");
    println!("  Log: {} {}", file_status(&log), log.display());
    if let Some(path) = transcript {
        println!("  Transcript: {} {}", file_status(&path), path.display());
    }
    Ok(())
}

fn file_status(path: &Path) -> String {
    if !path.exists() {
        return "MISS".to_string();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => format!("OK  ({} lines)", content.lines().count()),
        Err(e) => format!("ERR (read error: {})", e),
    }
}
