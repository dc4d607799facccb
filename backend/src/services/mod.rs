pub mod health;
pub mod records;
pub mod uploads;

use crate::error::ApiError;

/// Runs blocking storage work off the async workers.
pub(crate) async fn run_blocking<T, E, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Blocking(e.to_string()))?
        .map_err(Into::into)
}
