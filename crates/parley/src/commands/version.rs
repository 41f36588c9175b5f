pub fn run() -> anyhow::Result<()> {
    println!("parley {}", env!("CARGO_PKG_VERSION"));
    println!("Chat client for local LLM servers with exchange telemetry");
    Ok(())
}
