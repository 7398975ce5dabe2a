//! Saved listing pages through the extraction rules

use subspy::listing::parse_listing;
use subspy::post::{UNKNOWN_AUTHOR, UNTITLED};
use subspy::extract_post;

const SAVED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
  <shreddit-feed>
    <article>
      <shreddit-post post-title="  Announcing 2.0  " author="maintainer" score="1234"
          permalink="/r/rust/comments/1abc/announcing_20/"
          created-timestamp="2024-03-10T08:15:30.123000+0530">
        <a slot="title" href="/r/rust/comments/1abc/announcing_20/">Announcing 2.0</a>
      </shreddit-post>
    </article>
    <article>
      <shreddit-post score="abc">
        <faceplate-timeago ts="2024-03-10T01:00:00.000Z">
          <time datetime="2024-03-10T01:00:00.000Z" title="Sun Mar 10 2024 01:00:00 GMT+0000"></time>
        </faceplate-timeago>
      </shreddit-post>
    </article>
    <article>
      <shreddit-post author="" score="" created-timestamp="">
        <a slot="title">   </a>
        <faceplate-timeago>
          <time title="yesterday"></time>
        </faceplate-timeago>
      </shreddit-post>
    </article>
  </shreddit-feed>
</body>
</html>"#;

#[test]
fn saved_page_extracts_like_a_live_one() {
    let raws = parse_listing(SAVED_PAGE);
    assert_eq!(raws.len(), 3);

    let posts: Vec<_> = raws
        .iter()
        .map(|raw| extract_post(raw, "https://www.reddit.com"))
        .collect();

    assert_eq!(posts[0].title, "Announcing 2.0");
    assert_eq!(posts[0].author, "maintainer");
    assert_eq!(posts[0].upvotes, Some(1234));
    assert_eq!(
        posts[0].url,
        "https://www.reddit.com/r/rust/comments/1abc/announcing_20/"
    );
    assert_eq!(posts[0].posted_at, "2024-03-10T08:15:30.123+05:30");

    assert_eq!(posts[1].title, UNTITLED);
    assert_eq!(posts[1].author, UNKNOWN_AUTHOR);
    assert_eq!(posts[1].upvotes, None);
    assert_eq!(posts[1].url, "");
    assert_eq!(posts[1].posted_at, "2024-03-10T01:00:00.000Z");

    assert_eq!(posts[2].title, UNTITLED);
    assert_eq!(posts[2].upvotes, None);
    // No datetime, so the title text is tried and passed through unparsed
    assert_eq!(posts[2].posted_at, "yesterday");
}
