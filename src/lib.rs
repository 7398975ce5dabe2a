//! SubSpy: newest posts and leading comments of a subreddit
//!
//! A headless Chromium renders the listing page, post attributes are read off
//! the rendered elements, and each post's comment tree comes from its JSON
//! side-channel. [`SubredditScraper::scrape`] never fails: anything that goes
//! wrong degrades to an empty post list.

pub mod browser_session;
pub mod browser_setup;
pub mod comments;
pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod post;
pub mod server;
pub mod stealth;
pub mod subreddit;
pub mod timestamp;
pub mod utils;
pub mod validation;

pub use browser_session::BrowserSession;
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use comments::{CommentFetcher, parse_comment_listing};
pub use config::{ConfigError, ScrapeConfig, ScrapeConfigBuilder, ServerConfig};
pub use error::{CommentFetchError, ScrapeError, StepResult};
pub use listing::{ChromeLauncher, ListingPage, ListingSession, PostHandle, SessionLauncher};
pub use models::{Comment, Post, RawPost, ScrapeResult};
pub use post::extract_post;
pub use subreddit::SubredditScraper;
pub use timestamp::normalize as normalize_timestamp;
pub use validation::validate_subreddit;
