pub mod ask;
pub mod chat;
pub mod status;
pub mod version;

/// Single-threaded runtime; one exchange is in flight at a time
fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
