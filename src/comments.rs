//! Comment tree retrieval through the post JSON side-channel
//!
//! Every post permalink also answers at `<permalink>/.json` with a two-element
//! array: the post listing and the comment listing. Only the second one is
//! read. Comment nodes (`kind == "t1"`) are kept; "more" placeholders and any
//! other kinds are skipped. Replies nest under `data.replies.data.children`,
//! which is an empty string rather than an object when there are none.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CommentFetchError;
use crate::models::Comment;
use crate::utils::{MAX_TOP_LEVEL_COMMENTS, comments_json_url};

/// Listing node kind for a comment
const COMMENT_KIND: &str = "t1";

/// Author placeholder for comments without one
const UNKNOWN_AUTHOR: &str = "Unknown";

/// HTTP client for the comments endpoint
#[derive(Debug, Clone)]
pub struct CommentFetcher {
    client: Client,
}

impl CommentFetcher {
    /// Create a fetcher with its own user agent and per-request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, CommentFetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch up to five top-level comments for `post_url`
    ///
    /// Never fails: any network, status or decoding problem yields an empty
    /// list so one broken post cannot abort the surrounding scrape.
    pub async fn fetch(&self, post_url: &str) -> Vec<Comment> {
        match self.try_fetch(post_url).await {
            Ok(comments) => {
                debug!(url = %post_url, count = comments.len(), "Fetched comments");
                comments
            }
            Err(e) => {
                warn!(url = %post_url, "Comment fetch failed, using empty list: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`fetch`](Self::fetch) but reports why nothing came back
    pub async fn try_fetch(&self, post_url: &str) -> Result<Vec<Comment>, CommentFetchError> {
        let json_url = comments_json_url(post_url);
        let response = self
            .client
            .get(&json_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommentFetchError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        parse_comment_listing(&body)
    }
}

/// Parse the `[post_listing, comment_listing]` document
///
/// Stops after five accepted top-level comments; later nodes are not parsed.
pub fn parse_comment_listing(body: &Value) -> Result<Vec<Comment>, CommentFetchError> {
    let listings = body
        .as_array()
        .ok_or(CommentFetchError::Shape("document is not an array"))?;
    if listings.len() < 2 {
        return Err(CommentFetchError::Shape("fewer than two listings"));
    }

    let children = listing_children(&listings[1]);
    let mut top_level = Vec::with_capacity(MAX_TOP_LEVEL_COMMENTS);
    for node in children {
        if top_level.len() >= MAX_TOP_LEVEL_COMMENTS {
            break;
        }
        if let Some(comment) = parse_node(node) {
            top_level.push(comment);
        }
    }
    Ok(top_level)
}

/// Recursive node parser; depth follows the source tree
fn parse_node(node: &Value) -> Option<Comment> {
    if node.get("kind").and_then(Value::as_str) != Some(COMMENT_KIND) {
        return None;
    }

    let replies = data_field(node, "replies")
        .map(listing_children)
        .unwrap_or_default()
        .iter()
        .filter_map(parse_node)
        .collect();

    Some(Comment {
        author: coerce_string(data_field(node, "author")).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        body: coerce_string(data_field(node, "body")).unwrap_or_default(),
        replies,
    })
}

fn data_field<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.get("data")?.get(name)
}

/// `data.children` of a listing value, or nothing if it is not a listing
fn listing_children(listing: &Value) -> &[Value] {
    listing
        .get("data")
        .and_then(|d| d.get("children"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// String view of a scalar; `None` for missing or null
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
