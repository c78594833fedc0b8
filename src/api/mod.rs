mod error;
mod handlers;
mod router;
mod types;

pub use error::ApiError;
pub use router::build_router;
pub use types::AppState;

/// Runs storage work on the blocking pool; a panicked task surfaces as an error.
pub(crate) async fn run_blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
