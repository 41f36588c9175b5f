mod cli;
mod commands;
mod conversation;
mod settings;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.options.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Initialize tracing; stdout is reserved for replies
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask { prompt } => commands::ask::run(&cli.options, &prompt.join(" ")),
        Commands::Chat => commands::chat::run(&cli.options),
        Commands::Status => commands::status::run(&cli.options),
        Commands::Version => commands::version::run(),
    }
}
