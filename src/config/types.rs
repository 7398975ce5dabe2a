//! Core configuration type for a subreddit scrape

use std::path::PathBuf;
use std::time::Duration;

/// Settings for one scrape invocation
///
/// Post and comment caps are not configurable; see
/// [`MAX_POSTS`](crate::utils::MAX_POSTS) and
/// [`MAX_TOP_LEVEL_COMMENTS`](crate::utils::MAX_TOP_LEVEL_COMMENTS).
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site origin for listing URLs and permalinks.
    ///
    /// **INVARIANT:** parses as an absolute http(s) URL (checked in builder).
    pub(crate) site_origin: String,
    pub(crate) headless: bool,

    /// Chrome profile directory; a fresh temp directory per session if `None`
    pub(crate) chrome_data_dir: Option<PathBuf>,

    pub(crate) browser_user_agent: String,
    pub(crate) comments_user_agent: String,

    /// Bound on navigation plus document settle
    ///
    /// Default: 90 seconds
    pub(crate) navigation_timeout: Duration,

    /// Bound on the first post element appearing
    ///
    /// Default: 30 seconds
    pub(crate) content_wait_timeout: Duration,

    /// Per-request timeout on the comments endpoint
    ///
    /// Default: 30 seconds
    pub(crate) comment_timeout: Duration,

    /// Politeness pause after navigation
    pub(crate) settle_delay: Duration,
    pub(crate) scroll_step_px: u32,
    pub(crate) scroll_delay: Duration,
    pub(crate) max_scroll_attempts: u32,

    /// Pause between posts, before the comment request
    pub(crate) post_delay: Duration,
}
