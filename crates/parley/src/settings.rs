//! Resolution of flags, environment and defaults into runtime components

use std::path::PathBuf;
use std::sync::Arc;

use parley_client::{ChatClient, ClientConfig};
use parley_telemetry::{HostEnvironment, Paths, TelemetryStore};

use crate::cli::Options;

/// Client configuration: flag > `PARLEY_*` variable > default
pub fn client_config(options: &Options) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &options.base_url {
        config.base_url = url.clone();
    }
    if let Some(model) = &options.model {
        config.model = model.clone();
    }
    if let Some(timeout) = options.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(prompt) = &options.system_prompt {
        config.system_prompt = prompt.clone();
    }
    Ok(config)
}

pub fn build_client(options: &Options) -> anyhow::Result<ChatClient> {
    let config = client_config(options)?;
    Ok(ChatClient::new(config, Arc::new(HostEnvironment))?)
}

pub fn log_path(options: &Options) -> anyhow::Result<PathBuf> {
    match &options.log_file {
        Some(path) => Ok(path.clone()),
        None => Ok(Paths::new()?.telemetry_file()),
    }
}

pub fn transcript_path(options: &Options) -> anyhow::Result<Option<PathBuf>> {
    match &options.transcript {
        None => Ok(None),
        Some(Some(path)) => Ok(Some(path.clone())),
        Some(None) => Ok(Some(Paths::new()?.transcript_file())),
    }
}

pub fn build_store(options: &Options) -> anyhow::Result<TelemetryStore> {
    let store = TelemetryStore::new(log_path(options)?);
    Ok(match transcript_path(options)? {
        Some(path) => store.with_transcript(path),
        None => store,
    })
}
