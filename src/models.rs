//! Data structures produced by a scrape
//!
//! All values are built fresh per invocation and handed back by value; the
//! serialized shape is always complete, with placeholders instead of missing
//! keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One comment and its nested replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,

    /// Comment text, serialized as `comment`
    #[serde(rename = "comment")]
    pub body: String,

    /// Direct replies in source order
    pub replies: Vec<Comment>,
}

/// One post from the listing page with its leading comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub author: String,

    /// Score shown on the listing; `None` when absent or not a number
    pub upvotes: Option<i64>,

    /// Absolute permalink, or empty when the element carried none
    pub url: String,

    /// ISO-8601 timestamp, raw fallback text, or empty
    pub posted_at: String,

    /// At most five top-level comments
    pub comments: Vec<Comment>,
}

/// Posts keyed by subreddit name
pub type ScrapeResult = BTreeMap<String, Vec<Post>>;

/// Build the single-key result for one subreddit
#[must_use]
pub fn single_result(subreddit: &str, posts: Vec<Post>) -> ScrapeResult {
    let mut result = ScrapeResult::new();
    result.insert(subreddit.to_string(), posts);
    result
}

/// Attribute values read off one rendered post element, untouched
///
/// Every field is optional: a failed or missing read is simply `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    /// `post-title` attribute
    pub post_title: Option<String>,
    /// `author` attribute
    pub author: Option<String>,
    /// `score` attribute
    pub score: Option<String>,
    /// `permalink` attribute, site-relative
    pub permalink: Option<String>,
    /// `created-timestamp` attribute
    pub created_timestamp: Option<String>,
    /// Text content of the `a[slot="title"]` child
    pub title_link_text: Option<String>,
    /// `datetime` attribute of the relative-time element
    pub time_datetime: Option<String>,
    /// `title` attribute of the relative-time element
    pub time_title: Option<String>,
}
