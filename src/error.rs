//! Error types for scraping operations.
//!
//! The public entry points are total and never surface these errors; they
//! exist so internal steps can use `?` and so the single top-level boundary
//! can log what went wrong before degrading to an empty result.

use thiserror::Error;

/// Failure of one orchestration step
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser could not be found, downloaded or launched
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// Listing page could not be reached
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// A bounded wait ran out
    #[error("{operation} timeout after {secs} seconds")]
    Timeout { operation: String, secs: u64 },

    /// CDP-level failure talking to the browser
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// In-page script returned something unexpected
    #[error("script error: {0}")]
    Script(String),
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::Launch(format!("{err:#}"))
    }
}

/// Convenience alias for results of orchestration steps
pub type StepResult<T> = Result<T, ScrapeError>;

/// Failure fetching or decoding a post's comment listing
#[derive(Debug, Error)]
pub enum CommentFetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("unexpected listing shape: {0}")]
    Shape(&'static str),
}
