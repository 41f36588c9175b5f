use crate::cli::Options;
use crate::conversation::{Conversation, TerminalPresenter};
use crate::settings;

pub fn run(options: &Options, prompt: &str) -> anyhow::Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("prompt must not be blank");
    }

    let client = settings::build_client(options)?;
    let store = settings::build_store(options)?;
    let runtime = super::runtime()?;

    let mut conversation = Conversation::new(&client, &store);
    conversation.set_input(prompt);
    runtime.block_on(conversation.submit(&mut TerminalPresenter));
    Ok(())
}
