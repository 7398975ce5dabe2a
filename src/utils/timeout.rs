//! Timeout wrapper for page operations
//!
//! Keeps navigation and DOM waits from hanging indefinitely on slow or
//! streaming pages.

use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;

/// Run `operation` under `limit`, naming it in the timeout error
///
/// # Returns
/// * `Ok(T)` - operation completed in time
/// * `Err` - the operation failed, or `ScrapeError::Timeout` if `limit` elapsed
pub async fn with_timeout<F, T>(
    operation: F,
    limit: Duration,
    operation_name: &str,
) -> Result<T, ScrapeError>
where
    F: Future<Output = Result<T, ScrapeError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout {
            operation: operation_name.to_string(),
            secs: limit.as_secs(),
        }),
    }
}
