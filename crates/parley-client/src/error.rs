use thiserror::Error;

/// Rejected client configuration. Raised before any request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("model name must not be empty")]
    EmptyModel,

    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("timeout must be greater than zero seconds")]
    ZeroTimeout,

    #[error("invalid timeout {0:?}: expected whole seconds")]
    InvalidTimeout(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Why an exchange did not produce a usable response
#[derive(Debug, Error)]
pub(crate) enum ExchangeError {
    #[error("cannot reach server: {0}")]
    Transport(String),

    #[error("request timed out after {0} s")]
    Timeout(u64),

    #[error("server returned {status}")]
    Server { status: u16, body: String },
}

impl ExchangeError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            return Self::Timeout(timeout_secs);
        }

        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        Self::Transport(message)
    }

    /// Best-effort diagnostic text: server body if there was one, else the error
    pub(crate) fn into_body(self) -> String {
        match self {
            Self::Server { status, body } if body.trim().is_empty() => {
                format!("server returned {}", status)
            }
            Self::Server { body, .. } => body,
            other => other.to_string(),
        }
    }
}
