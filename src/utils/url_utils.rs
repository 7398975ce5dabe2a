//! URL construction for listing pages, permalinks and the comments side-channel.

use anyhow::{Context, Result};
use url::Url;

use super::constants::MAX_TOP_LEVEL_COMMENTS;

/// Build the "new posts" listing URL for a subreddit
///
/// `origin` is the site root, e.g. `https://www.reddit.com`.
pub fn listing_url(origin: &str, subreddit: &str) -> Result<String> {
    let base = Url::parse(origin).with_context(|| format!("Invalid site origin: {origin}"))?;
    let url = base
        .join(&format!("/r/{subreddit}/new/"))
        .context("Failed to build listing URL")?;
    Ok(url.into())
}

/// Absolute post URL from a permalink attribute
///
/// Returns an empty string when there is no permalink, which callers treat as
/// "do not fetch comments".
#[must_use]
pub fn permalink_url(origin: &str, permalink: Option<&str>) -> String {
    match permalink {
        Some(path) if !path.is_empty() => format!("{}{path}", origin.trim_end_matches('/')),
        _ => String::new(),
    }
}

/// JSON side-channel URL for a post's comments
#[must_use]
pub fn comments_json_url(post_url: &str) -> String {
    if post_url.ends_with('/') {
        format!("{post_url}.json?limit={MAX_TOP_LEVEL_COMMENTS}")
    } else {
        format!("{post_url}/.json?limit={MAX_TOP_LEVEL_COMMENTS}")
    }
}
