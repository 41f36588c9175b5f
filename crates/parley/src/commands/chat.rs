use std::io::{BufRead, Write};

use tokio::runtime::Runtime;

use crate::cli::Options;
use crate::conversation::{Conversation, Presenter, TerminalPresenter, GREETING};
use crate::settings;

const QUIT: &str = "/quit";

pub fn run(options: &Options) -> anyhow::Result<()> {
    let client = settings::build_client(options)?;
    let store = settings::build_store(options)?;
    let runtime = super::runtime()?;
    store.ensure_initialized();

    println!("{}", GREETING);
    let mut conversation = Conversation::new(&client, &store);
    let stdin = std::io::stdin();
    let exchanges = converse(
        &mut conversation,
        &runtime,
        stdin.lock(),
        &mut TerminalPresenter,
    )?;

    tracing::debug!("Chat ended after {} exchanges", exchanges);
    Ok(())
}

/// Submit each input line until EOF or `/quit`. Returns the number of
/// exchanges sent.
fn converse<R: BufRead, P: Presenter>(
    conversation: &mut Conversation<'_>,
    runtime: &Runtime,
    reader: R,
    presenter: &mut P,
) -> anyhow::Result<usize> {
    let mut exchanges = 0;
    prompt_marker();

    for line in reader.lines() {
        let line = line?;
        if line.trim() == QUIT {
            break;
        }

        conversation.set_input(line);
        if runtime.block_on(conversation.submit(presenter)).is_some() {
            exchanges += 1;
        }
        prompt_marker();
    }

    Ok(exchanges)
}

fn prompt_marker() {
    print!("> ");
    std::io::stdout().flush().ok();
}
