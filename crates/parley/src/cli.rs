use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "Chat with a local LLM server and log telemetry for every exchange")]
pub struct Cli {
    #[command(flatten)]
    pub options: Options,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command. Flags win over `PARLEY_*` variables.
#[derive(Args, Debug, Default, Clone)]
pub struct Options {
    /// Inference server base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// System prompt (persona) sent before each user prompt
    #[arg(long, global = true)]
    pub system_prompt: Option<String>,

    /// Telemetry log location (defaults to the per-user data directory)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Also append full records as JSONL (default path if no value is given)
    #[arg(long, global = true, num_args = 0..=1)]
    pub transcript: Option<Option<PathBuf>>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one prompt and print the reply
    Ask {
        /// Prompt text (multiple words are joined with spaces)
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Interactive conversation on stdin (one prompt per line, /quit to exit)
    Chat,

    /// Show resolved configuration and telemetry log location
    Status,

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["parley", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_ask() {
        let cli = Cli::try_parse_from(["parley", "ask", "Hello", "there!"]).unwrap();
        if let Commands::Ask { prompt } = cli.command {
            assert_eq!(prompt, vec!["Hello", "there!"]);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_ask_requires_prompt() {
        assert!(Cli::try_parse_from(["parley", "ask"]).is_err());
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "parley",
            "chat",
            "--model",
            "gemma3:4b",
            "--timeout",
            "30",
            "--base-url",
            "http://10.0.0.5:11434",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Chat));
        assert_eq!(cli.options.model.as_deref(), Some("gemma3:4b"));
        assert_eq!(cli.options.timeout, Some(30));
        assert_eq!(
            cli.options.base_url.as_deref(),
            Some("http://10.0.0.5:11434")
        );
    }

    #[test]
    fn test_cli_transcript_flag() {
        let cli = Cli::try_parse_from(["parley", "status"]).unwrap();
        assert_eq!(cli.options.transcript, None);

        let cli = Cli::try_parse_from(["parley", "status", "--transcript"]).unwrap();
        assert_eq!(cli.options.transcript, Some(None));

        let cli =
            Cli::try_parse_from(["parley", "status", "--transcript", "/tmp/t.jsonl"]).unwrap();
        assert_eq!(
            cli.options.transcript,
            Some(Some(PathBuf::from("/tmp/t.jsonl")))
        );
    }
}
