//! The seam between the scrape orchestrator and a rendered listing page
//!
//! The orchestrator only needs a handful of page operations (navigate, count
//! posts, scroll, enumerate post elements, read one element's attributes) and
//! a way to open and tear down a session. The live implementation drives
//! Chromium over CDP ([`chrome`]); [`snapshot`] reads the same attributes out
//! of saved HTML.

use std::future::Future;

use crate::config::ScrapeConfig;
use crate::error::StepResult;
use crate::models::RawPost;

pub mod chrome;
pub mod snapshot;

pub use chrome::{ChromeLauncher, ChromeListing, ChromePost};
pub use snapshot::parse_listing;

/// A listing page that can be navigated, scrolled and enumerated
pub trait ListingPage: Send + Sync {
    type Post: PostHandle;

    /// Load `url` and wait for the document to settle
    ///
    /// Callers bound this with their own timeout.
    fn navigate(&self, url: &str) -> impl Future<Output = StepResult<()>> + Send;

    /// Number of post elements currently in the DOM
    fn post_count(&self) -> impl Future<Output = StepResult<usize>> + Send;

    fn scroll_to_top(&self) -> impl Future<Output = StepResult<()>> + Send;

    /// Scroll down by `px` pixels to trigger lazy rendering
    fn scroll_by(&self, px: u32) -> impl Future<Output = StepResult<()>> + Send;

    /// Post elements in document order (newest first on the "new" view)
    fn posts(&self) -> impl Future<Output = StepResult<Vec<Self::Post>>> + Send;
}

/// One post element on a listing page
pub trait PostHandle: Send + Sync {
    /// Read the element's attributes; failed reads leave fields `None`
    fn read(&self) -> impl Future<Output = RawPost> + Send;
}

/// A browser session owned by exactly one scrape
///
/// Implementations must release their resources on `Drop` as well as in
/// [`shutdown`](ListingSession::shutdown), so cancelling the scrape future
/// still tears the browser down.
pub trait ListingSession: Send {
    type Page: ListingPage;

    /// Open a fresh page prepared for the listing (stealth applied)
    fn open_page(
        &mut self,
        config: &ScrapeConfig,
    ) -> impl Future<Output = StepResult<Self::Page>> + Send;

    fn shutdown(&mut self) -> impl Future<Output = ()> + Send;
}

/// Starts isolated sessions
pub trait SessionLauncher: Send + Sync {
    type Session: ListingSession;

    fn launch(
        &self,
        config: &ScrapeConfig,
    ) -> impl Future<Output = StepResult<Self::Session>> + Send;
}
