//! Conversation controller: drives one exchange per submitted prompt and
//! always forwards the resulting record to the telemetry log.

use std::io::Write;

use parley_client::{preview, ChatClient};
use parley_telemetry::{TelemetryRecord, TelemetryStore};

pub const GREETING: &str = "Greetings, traveler!";
pub const PENDING_TEXT: &str = "Thinking...";
pub const ERROR_REPLY: &str = "Sorry, I can't think right now.";
pub const ERROR_STATUS: &str = "Error: Failed to reach the inference server.";

const MAX_REPLY_CHARS: usize = 1000;
const MAX_RAW_CHARS: usize = 800;

/// Where the controller renders its state
pub trait Presenter {
    fn show_pending(&mut self);
    fn show_reply(&mut self, reply: &str, status: &str);
    fn show_error(&mut self, reply: &str, status: &str);
}

pub struct Conversation<'a> {
    client: &'a ChatClient,
    store: &'a TelemetryStore,
    input: String,
}

impl<'a> Conversation<'a> {
    pub fn new(client: &'a ChatClient, store: &'a TelemetryStore) -> Self {
        Self {
            client,
            store,
            input: String::new(),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Send the current input. Blank input is ignored and returns `None`.
    ///
    /// The input buffer is cleared as soon as the request is built, before the
    /// response is awaited. The record is appended to the log whether or not
    /// the exchange succeeded.
    pub async fn submit<P: Presenter>(&mut self, presenter: &mut P) -> Option<TelemetryRecord> {
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() {
            return None;
        }

        presenter.show_pending();
        let client = self.client;
        let exchange = client.send(&prompt);
        self.input.clear();
        let record = exchange.await;

        if record.success {
            presenter.show_reply(&reply_text(&record), &status_line(&record));
        } else {
            presenter.show_error(ERROR_REPLY, ERROR_STATUS);
        }

        self.store.append(&record);
        Some(record)
    }
}

/// Reply to display: the extracted text, or a raw body preview if it is blank
fn reply_text(record: &TelemetryRecord) -> String {
    match record.generated_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => preview(text, MAX_REPLY_CHARS),
        _ => preview(&record.raw_response_body, MAX_RAW_CHARS),
    }
}

fn status_line(record: &TelemetryRecord) -> String {
    format!(
        "Model: {}\nTime: {:.0} ms\nDevice: {}",
        record.model, record.inference_ms, record.device
    )
}

/// Renders to the terminal: replies on stdout, pending and status on stderr
pub struct TerminalPresenter;

impl TerminalPresenter {
    fn render(&self, reply: &str, status: &str) {
        println!("{}", reply);
        std::io::stdout().flush().ok();
        eprintln!("{}", status);
    }
}

impl Presenter for TerminalPresenter {
    fn show_pending(&mut self) {
        eprintln!("{}", PENDING_TEXT);
    }

    fn show_reply(&mut self, reply: &str, status: &str) {
        self.render(reply, status);
    }

    fn show_error(&mut self, reply: &str, status: &str) {
        self.render(reply, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_client::ClientConfig;
    use parley_telemetry::StaticEnvironment;
    use std::sync::Arc;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Presenter for Recorder {
        fn show_pending(&mut self) {
            self.events.push("pending".to_string());
        }

        fn show_reply(&mut self, reply: &str, status: &str) {
            self.events.push(format!("reply:{}|{}", reply, status));
        }

        fn show_error(&mut self, reply: &str, status: &str) {
            self.events.push(format!("error:{}|{}", reply, status));
        }
    }

    fn client(base_url: &str) -> ChatClient {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..ClientConfig::new()
        };
        let env = Arc::new(StaticEnvironment::new("TestOS", "rig", "Desktop"));
        ChatClient::new(config, env).unwrap()
    }

    fn log_lines(store: &TelemetryStore) -> usize {
        std::fs::read_to_string(store.path())
            .map(|c| c.lines().count())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_reply_is_shown_and_logged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"message":{"role":"assistant","content":"  Well met, traveler!\n"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let store = TelemetryStore::new(temp.path().join("telemetry.csv"));
        let client = client(&server.uri());
        let mut conversation = Conversation::new(&client, &store);
        let mut recorder = Recorder::default();

        conversation.set_input("  Hello!  ");
        let record = conversation.submit(&mut recorder).await.unwrap();

        assert!(record.success);
        assert!(conversation.input().is_empty());
        assert_eq!(recorder.events.len(), 2);
        assert_eq!(recorder.events[0], "pending");
        assert!(recorder.events[1]
            .starts_with("reply:Well met, traveler!|Model: llama3\nTime: "));
        assert!(recorder.events[1].ends_with("ms\nDevice: rig"));
        assert_eq!(log_lines(&store), 2);
    }

    #[tokio::test]
    async fn test_blank_input_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let store = TelemetryStore::new(temp.path().join("telemetry.csv"));
        let client = client(&server.uri());
        let mut conversation = Conversation::new(&client, &store);
        let mut recorder = Recorder::default();

        conversation.set_input(" \n\t ");
        assert!(conversation.submit(&mut recorder).await.is_none());
        assert!(recorder.events.is_empty());
        assert_eq!(log_lines(&store), 0);
    }

    #[tokio::test]
    async fn test_failure_is_shown_and_still_logged() {
        let temp = TempDir::new().unwrap();
        let store = TelemetryStore::new(temp.path().join("telemetry.csv"));
        let client = client("http://127.0.0.1:1");
        let mut conversation = Conversation::new(&client, &store);
        let mut recorder = Recorder::default();

        conversation.set_input("Hello?");
        let record = conversation.submit(&mut recorder).await.unwrap();

        assert!(!record.success);
        assert!(conversation.input().is_empty());
        assert_eq!(
            recorder.events,
            vec![
                "pending".to_string(),
                format!("error:{}|{}", ERROR_REPLY, ERROR_STATUS)
            ]
        );
        assert_eq!(log_lines(&store), 2);
    }

    #[tokio::test]
    async fn test_unwritable_log_does_not_fail_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"message":{"content":"Aye"}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        // A directory where the log file should be
        let log_path = temp.path().join("telemetry.csv");
        std::fs::create_dir_all(&log_path).unwrap();
        let store = TelemetryStore::new(&log_path);
        let client = client(&server.uri());
        let mut conversation = Conversation::new(&client, &store);
        let mut recorder = Recorder::default();

        conversation.set_input("Hello!");
        let record = conversation.submit(&mut recorder).await.unwrap();

        assert!(record.success);
        assert_eq!(record.generated_text.as_deref(), Some("Aye"));
        assert!(conversation.input().is_empty());
        assert_eq!(recorder.events.len(), 2);
        assert_eq!(recorder.events[0], "pending");
        assert!(recorder.events[1].starts_with("reply:Aye|Model: llama3"));
        assert!(log_path.is_dir());
    }

    #[test]
    fn test_reply_text_falls_back_to_raw_preview() {
        let record = TelemetryRecord {
            timestamp_utc: chrono::Utc::now(),
            model: "llama3".to_string(),
            success: true,
            inference_ms: 5.0,
            tokens: 0,
            tokens_generated: 0,
            platform: String::new(),
            device: String::new(),
            device_type: String::new(),
            raw_response_body: "r".repeat(900),
            generated_text: Some("   ".to_string()),
        };
        let text = reply_text(&record);
        assert_eq!(text.len(), 803);
        assert!(text.ends_with("..."));
    }
}
