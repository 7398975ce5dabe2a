//! Field extraction for a single listing post
//!
//! Works on a [`RawPost`] so the rules are the same whether the attributes
//! came from a live page or a saved snapshot. Each field has a fallback chain
//! and a placeholder; nothing here can fail.

use crate::models::{Post, RawPost};
use crate::timestamp;
use crate::utils::permalink_url;

/// Placeholder title when neither the attribute nor the title link has text
pub const UNTITLED: &str = "Untitled";

/// Placeholder author when the attribute is missing or blank
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Build a [`Post`] (with no comments yet) from raw attributes
///
/// `origin` is prefixed to the permalink to form the post URL.
#[must_use]
pub fn extract_post(raw: &RawPost, origin: &str) -> Post {
    Post {
        title: extract_title(raw),
        author: non_blank(raw.author.as_deref()).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        upvotes: raw.score.as_deref().and_then(parse_upvotes),
        url: permalink_url(origin, raw.permalink.as_deref()),
        posted_at: extract_posted_at(raw),
        comments: Vec::new(),
    }
}

fn extract_title(raw: &RawPost) -> String {
    non_blank(raw.post_title.as_deref())
        .or_else(|| non_blank(raw.title_link_text.as_deref()))
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn extract_posted_at(raw: &RawPost) -> String {
    let precise = timestamp::normalize(raw.created_timestamp.as_deref().unwrap_or_default());
    if !precise.is_empty() {
        return precise;
    }

    let fallback = non_blank(raw.time_datetime.as_deref())
        .or_else(|| non_blank(raw.time_title.as_deref()))
        .unwrap_or_default();
    timestamp::normalize(&fallback)
}

/// Parse a score attribute into a whole number
///
/// Accepts integer text and integral float text (`"42"`, `"42.0"`, `"1e3"`);
/// blank, non-numeric, non-finite and fractional values give `None`.
#[must_use]
pub fn parse_upvotes(score: &str) -> Option<i64> {
    let score = score.trim();
    if score.is_empty() {
        return None;
    }
    if let Ok(value) = score.parse::<i64>() {
        return Some(value);
    }

    let value = score.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.reddit.com";

    fn full_raw() -> RawPost {
        RawPost {
            post_title: Some("  Hello world  ".to_string()),
            author: Some("ferris".to_string()),
            score: Some("42".to_string()),
            permalink: Some("/r/rust/comments/abc/hello_world/".to_string()),
            created_timestamp: Some("2024-01-15T10:30:00.123000+0000".to_string()),
            title_link_text: Some("Link text".to_string()),
            time_datetime: Some("2020-01-01T00:00:00.000Z".to_string()),
            time_title: None,
        }
    }

    #[test]
    fn primary_attributes_win() {
        let post = extract_post(&full_raw(), ORIGIN);
        assert_eq!(post.title, "Hello world");
        assert_eq!(post.author, "ferris");
        assert_eq!(post.upvotes, Some(42));
        assert_eq!(post.url, "https://www.reddit.com/r/rust/comments/abc/hello_world/");
        assert_eq!(post.posted_at, "2024-01-15T10:30:00.123+00:00");
        assert!(post.comments.is_empty());
    }

    #[test]
    fn title_falls_back_to_link_then_placeholder() {
        let mut raw = full_raw();
        raw.post_title = Some("   ".to_string());
        assert_eq!(extract_post(&raw, ORIGIN).title, "Link text");

        raw.title_link_text = None;
        assert_eq!(extract_post(&raw, ORIGIN).title, UNTITLED);
    }

    #[test]
    fn empty_record_is_fully_shaped() {
        let post = extract_post(&RawPost::default(), ORIGIN);
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.author, "Unknown");
        assert_eq!(post.upvotes, None);
        assert_eq!(post.url, "");
        assert_eq!(post.posted_at, "");
    }

    #[test]
    fn non_numeric_score_is_none() {
        let mut raw = full_raw();
        raw.score = Some("abc".to_string());
        assert_eq!(extract_post(&raw, ORIGIN).upvotes, None);
    }

    #[test]
    fn upvote_parsing_edge_cases() {
        assert_eq!(parse_upvotes(" -3 "), Some(-3));
        assert_eq!(parse_upvotes("1e3"), Some(1000));
        assert_eq!(parse_upvotes("12.0"), Some(12));
        assert_eq!(parse_upvotes("12.5"), None);
        assert_eq!(parse_upvotes("NaN"), None);
        assert_eq!(parse_upvotes("inf"), None);
        assert_eq!(parse_upvotes(""), None);
    }

    #[test]
    fn posted_at_falls_back_to_time_element() {
        let mut raw = full_raw();
        raw.created_timestamp = None;
        assert_eq!(extract_post(&raw, ORIGIN).posted_at, "2020-01-01T00:00:00.000Z");

        raw.time_datetime = None;
        raw.time_title = Some("Mon, 15 Jan 2024 10:30:00 +0000".to_string());
        assert_eq!(extract_post(&raw, ORIGIN).posted_at, "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn blank_precise_timestamp_uses_fallback() {
        let mut raw = full_raw();
        raw.created_timestamp = Some("  ".to_string());
        assert_eq!(extract_post(&raw, ORIGIN).posted_at, "2020-01-01T00:00:00.000Z");
    }
}
