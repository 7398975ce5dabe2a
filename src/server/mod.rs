//! HTTP boundary around the scraper
//!
//! One route does the work (`GET /api/v1/scrape?subreddit=<name>`); admission
//! is gated by a semaphore and each scrape runs on its own task under an outer
//! timeout.

pub mod router;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use crate::listing::{ChromeLauncher, SessionLauncher};
use crate::subreddit::SubredditScraper;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared handler state
pub struct AppState<L = ChromeLauncher> {
    pub scraper: Arc<SubredditScraper<L>>,
    pub permits: Arc<Semaphore>,
    pub scrape_timeout: Duration,
}

impl<L> AppState<L> {
    pub fn new(
        scraper: SubredditScraper<L>,
        max_concurrent_scrapes: usize,
        scrape_timeout: Duration,
    ) -> Self {
        Self {
            scraper: Arc::new(scraper),
            permits: Arc::new(Semaphore::new(max_concurrent_scrapes)),
            scrape_timeout,
        }
    }
}

// Manual impl: a derive would require `L: Clone`
impl<L> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            scraper: Arc::clone(&self.scraper),
            permits: Arc::clone(&self.permits),
            scrape_timeout: self.scrape_timeout,
        }
    }
}

/// Serve on an already bound listener until the process stops
pub async fn serve_on<L>(listener: TcpListener, state: AppState<L>) -> Result<(), ServerError>
where
    L: SessionLauncher + 'static,
{
    let router = router::build(state);
    axum::serve(listener, router).await?;
    Ok(())
}

pub async fn serve<L>(addr: SocketAddr, state: AppState<L>) -> Result<(), ServerError>
where
    L: SessionLauncher + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("SubSpy server listening on {}", listener.local_addr()?);
    serve_on(listener, state).await
}
