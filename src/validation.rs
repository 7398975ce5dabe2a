//! Subreddit name validation for the CLI and HTTP boundaries

use once_cell::sync::Lazy;
use regex::Regex;

static SUBREDDIT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{2,21}$").expect("valid regex"));

/// Message returned to callers for a bad name
pub const INVALID_SUBREDDIT_MSG: &str =
    "Subreddit name must be 2-21 characters of letters, digits or underscores";

/// Trim `raw` and check it is a plausible subreddit name
///
/// Returns the trimmed name on success.
pub fn validate_subreddit(raw: &str) -> Option<&str> {
    let name = raw.trim();
    SUBREDDIT_NAME.is_match(name).then_some(name)
}
