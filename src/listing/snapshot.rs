//! Reading post attributes out of saved listing HTML
//!
//! Useful for inspecting a page captured from a browser without launching
//! one. The records match what [`ChromePost`](super::ChromePost) reads live.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::models::RawPost;
use crate::utils::constants::{POST_SELECTOR, TIME_SELECTOR, TITLE_LINK_SELECTOR};

static POST: Lazy<Selector> = Lazy::new(|| parse_selector(POST_SELECTOR));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| parse_selector(TITLE_LINK_SELECTOR));
static TIME: Lazy<Selector> = Lazy::new(|| parse_selector(TIME_SELECTOR));

fn parse_selector(css: &str) -> Selector {
    // Only called with the constant selectors above
    Selector::parse(css).expect("constant selector must parse")
}

/// Extract one [`RawPost`] per post element, in document order
#[must_use]
pub fn parse_listing(html: &str) -> Vec<RawPost> {
    let document = Html::parse_document(html);
    document.select(&POST).map(read_post).collect()
}

fn read_post(post: ElementRef<'_>) -> RawPost {
    let attr = |name: &str| post.value().attr(name).map(str::to_string);
    let time = post.select(&TIME).next();

    RawPost {
        post_title: attr("post-title"),
        author: attr("author"),
        score: attr("score"),
        permalink: attr("permalink"),
        created_timestamp: attr("created-timestamp"),
        title_link_text: post
            .select(&TITLE_LINK)
            .next()
            .map(|link| link.text().collect::<String>()),
        time_datetime: time.and_then(|t| t.value().attr("datetime").map(str::to_string)),
        time_title: time.and_then(|t| t.value().attr("title").map(str::to_string)),
    }
}
