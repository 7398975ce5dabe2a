//! Shared constants for subspy
//!
//! Default values, selectors and caps used throughout the crate to keep
//! magic numbers in one place.

/// Site origin that permalinks and listing paths are resolved against.
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.reddit.com";

/// Maximum number of posts returned per subreddit.
pub const MAX_POSTS: usize = 10;

/// Maximum number of top-level comments kept per post.
///
/// Also sent as the `limit` query parameter of the JSON side-channel.
pub const MAX_TOP_LEVEL_COMMENTS: usize = 5;

/// Custom element the listing renders for every post.
pub const POST_SELECTOR: &str = "shreddit-post";

/// Title link inside a post element, used when `post-title` is missing.
pub const TITLE_LINK_SELECTOR: &str = r#"a[slot="title"]"#;

/// Relative-time element inside a post element carrying `datetime` / `title`.
pub const TIME_SELECTOR: &str = "faceplate-timeago time";

/// Chrome user agent string used for the listing session
///
/// Matches a current desktop Chrome on Windows; the headless marker is also
/// stripped at the CDP level by the stealth layer.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Descriptive user agent for the comments JSON side-channel.
pub const COMMENTS_USER_AGENT: &str = "Mozilla/5.0 SubSpy/1.0";

/// Navigation timeout for the listing page: 90 seconds
pub const NAVIGATION_TIMEOUT_SECS: u64 = 90;

/// Time allowed for the first post element to render: 30 seconds
pub const CONTENT_WAIT_TIMEOUT_SECS: u64 = 30;

/// Request timeout for the comments JSON endpoint: 30 seconds
pub const COMMENT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Politeness delay after navigation
pub const SETTLE_DELAY_MS: u64 = 700;

/// Pixels scrolled per progressive-load attempt
pub const SCROLL_STEP_PX: u32 = 1800;

/// Delay between progressive-load attempts
pub const SCROLL_DELAY_MS: u64 = 700;

/// Upper bound on progressive-load attempts
pub const MAX_SCROLL_ATTEMPTS: u32 = 10;

/// Pacing delay between consecutive posts
pub const POST_DELAY_MS: u64 = 500;
