//! HTTP chat client with per-exchange telemetry

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use parley_telemetry::{EnvironmentInfo, TelemetryRecord};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::error::ExchangeError;
use crate::extract::{extract_count, MarkerExtractor, ResponseExtractor};
use crate::{ChatRequest, ClientConfig, ConfigError};

pub const CHAT_PATH: &str = "/api/chat";

/// Reply text recorded when a successful response carries no reply field
pub const NO_REPLY_PLACEHOLDER: &str = "(no reply found)";

/// Sends single-turn chat requests and turns each outcome into a
/// [`TelemetryRecord`].
///
/// Every call to [`ChatClient::send`] performs exactly one POST, never
/// retries, and always yields a record: failures are classified in the
/// record (`success == false`) rather than returned as errors. Persisting
/// the record is left to the caller.
pub struct ChatClient {
    http: reqwest::Client,
    config: ClientConfig,
    endpoint: String,
    extractor: Box<dyn ResponseExtractor>,
    environment: Arc<dyn EnvironmentInfo>,
}

impl ChatClient {
    /// Validate `config` and build the client. Fails before any network I/O.
    pub fn new(
        config: ClientConfig,
        environment: Arc<dyn EnvironmentInfo>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            config,
            extractor: Box::new(MarkerExtractor),
            environment,
        })
    }

    /// Replace the reply extractor
    pub fn with_extractor(mut self, extractor: impl ResponseExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `prompt` under the configured persona
    pub async fn send(&self, prompt: &str) -> TelemetryRecord {
        self.send_with_system(prompt, &self.config.system_prompt).await
    }

    /// Send `prompt` under an explicit system prompt
    pub async fn send_with_system(&self, prompt: &str, system_prompt: &str) -> TelemetryRecord {
        let request = ChatRequest::new(&self.config.model, system_prompt, prompt);
        debug_assert!(request.is_well_formed());
        debug!(
            "Sending chat request to {} (model {})",
            self.endpoint, self.config.model
        );

        let started = Instant::now();
        let outcome = self.dispatch(&request).await;
        let inference_ms = started.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(body) => self.success_record(body, inference_ms),
            Err(err) => {
                warn!("Chat request failed after {:.0} ms: {}", inference_ms, err);
                self.record(false, inference_ms, err.into_body(), None)
            }
        }
    }

    async fn dispatch(&self, request: &ChatRequest) -> Result<String, ExchangeError> {
        let timeout = self.config.timeout_secs;

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ExchangeError::from_reqwest(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            return Err(ExchangeError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn success_record(&self, body: String, inference_ms: f64) -> TelemetryRecord {
        let reply = self.extractor.extract(&body).unwrap_or_else(|| {
            debug!("No reply field in {} byte response", body.len());
            NO_REPLY_PLACEHOLDER.to_string()
        });

        let prompt_tokens = extract_count(&body, "prompt_eval_count").unwrap_or(0);
        let generated_tokens = extract_count(&body, "eval_count").unwrap_or(0);

        let mut record = self.record(true, inference_ms, body, Some(reply));
        record.tokens = prompt_tokens.saturating_add(generated_tokens);
        record.tokens_generated = generated_tokens;
        record
    }

    fn record(
        &self,
        success: bool,
        inference_ms: f64,
        raw_response_body: String,
        generated_text: Option<String>,
    ) -> TelemetryRecord {
        TelemetryRecord {
            timestamp_utc: Utc::now(),
            model: self.config.model.clone(),
            success,
            inference_ms,
            tokens: 0,
            tokens_generated: 0,
            platform: self.environment.platform(),
            device: self.environment.device(),
            device_type: self.environment.device_type(),
            raw_response_body,
            generated_text,
        }
    }
}
