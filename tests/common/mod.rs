//! Shared fixtures: an in-memory listing page and a launcher that counts
//! session lifecycles.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use subspy::config::ScrapeConfig;
use subspy::error::{ScrapeError, StepResult};
use subspy::listing::{ListingPage, ListingSession, PostHandle, SessionLauncher, parse_listing};
use subspy::models::RawPost;

/// One `shreddit-post` element; `permalink` is omitted when `None`
pub fn post_html(index: usize, permalink: Option<&str>) -> String {
    let permalink = permalink
        .map(|p| format!(r#" permalink="{p}""#))
        .unwrap_or_default();
    format!(
        r#"<shreddit-post post-title="Post {index}" author="user{index}" score="{score}"{permalink}
              created-timestamp="2024-05-01T12:{minute:02}:00.000000+0000">
             <a slot="title">Post {index}</a>
           </shreddit-post>"#,
        score = index * 10,
        minute = index % 60,
    )
}

pub fn listing_html(posts: &[String]) -> String {
    format!("<html><body><main>{}</main></body></html>", posts.join("\n"))
}

/// `count` posts without permalinks, so no comment requests are made
pub fn plain_listing(count: usize) -> String {
    let posts: Vec<String> = (0..count).map(|i| post_html(i, None)).collect();
    listing_html(&posts)
}

/// Config pointed at `origin` with no pacing and a short content wait
pub fn fast_config(origin: &str) -> ScrapeConfig {
    ScrapeConfig::builder()
        .site_origin(origin)
        .without_delays()
        .content_wait_timeout(Duration::from_millis(300))
        .comment_timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Listing that reveals more posts each time it is scrolled
pub struct FakeListing {
    posts: Vec<RawPost>,
    visible: AtomicUsize,
    per_scroll: usize,
    navigation_delay: Duration,
    pub navigated: Mutex<Vec<String>>,
    pub scrolls: AtomicUsize,
}

impl FakeListing {
    pub fn from_html(html: &str, initially_visible: usize, per_scroll: usize) -> Self {
        Self {
            posts: parse_listing(html),
            visible: AtomicUsize::new(initially_visible),
            per_scroll,
            navigation_delay: Duration::ZERO,
            navigated: Mutex::new(Vec::new()),
            scrolls: AtomicUsize::new(0),
        }
    }

    fn visible(&self) -> usize {
        self.visible.load(Ordering::SeqCst).min(self.posts.len())
    }
}

impl ListingPage for FakeListing {
    type Post = FakePost;

    async fn navigate(&self, url: &str) -> StepResult<()> {
        self.navigated.lock().unwrap().push(url.to_string());
        if !self.navigation_delay.is_zero() {
            tokio::time::sleep(self.navigation_delay).await;
        }
        Ok(())
    }

    async fn post_count(&self) -> StepResult<usize> {
        Ok(self.visible())
    }

    async fn scroll_to_top(&self) -> StepResult<()> {
        Ok(())
    }

    async fn scroll_by(&self, _px: u32) -> StepResult<()> {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
        self.visible.fetch_add(self.per_scroll, Ordering::SeqCst);
        Ok(())
    }

    async fn posts(&self) -> StepResult<Vec<FakePost>> {
        Ok(self.posts[..self.visible()]
            .iter()
            .cloned()
            .map(FakePost)
            .collect())
    }
}

pub struct FakePost(RawPost);

impl PostHandle for FakePost {
    async fn read(&self) -> RawPost {
        self.0.clone()
    }
}

/// Lifecycle counters shared between a launcher and its sessions
#[derive(Debug, Default)]
pub struct SessionStats {
    pub launched: AtomicUsize,
    pub shut_down: AtomicUsize,
    pub dropped: AtomicUsize,
}

impl SessionStats {
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    pub fn shut_down(&self) -> usize {
        self.shut_down.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct FakeLauncher {
    html: String,
    initially_visible: usize,
    per_scroll: usize,
    navigation_delay: Duration,
    fail_launch: bool,
    pub stats: Arc<SessionStats>,
}

impl FakeLauncher {
    pub fn new(html: impl Into<String>, initially_visible: usize, per_scroll: usize) -> Self {
        Self {
            html: html.into(),
            initially_visible,
            per_scroll,
            navigation_delay: Duration::ZERO,
            fail_launch: false,
            stats: Arc::new(SessionStats::default()),
        }
    }

    /// Everything visible immediately
    pub fn showing(html: impl Into<String>) -> Self {
        Self::new(html, usize::MAX / 2, 0)
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new("", 0, 0)
        }
    }

    pub fn with_navigation_delay(mut self, delay: Duration) -> Self {
        self.navigation_delay = delay;
        self
    }
}

impl SessionLauncher for FakeLauncher {
    type Session = FakeSession;

    async fn launch(&self, _config: &ScrapeConfig) -> StepResult<FakeSession> {
        if self.fail_launch {
            return Err(ScrapeError::Launch(
                "Chrome/Chromium executable not found".to_string(),
            ));
        }
        self.stats.launched.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            launcher: self.clone(),
            closed: false,
        })
    }
}

pub struct FakeSession {
    launcher: FakeLauncher,
    closed: bool,
}

impl ListingSession for FakeSession {
    type Page = FakeListing;

    async fn open_page(&mut self, _config: &ScrapeConfig) -> StepResult<FakeListing> {
        let launcher = &self.launcher;
        let mut page = FakeListing::from_html(
            &launcher.html,
            launcher.initially_visible,
            launcher.per_scroll,
        );
        page.navigation_delay = launcher.navigation_delay;
        Ok(page)
    }

    async fn shutdown(&mut self) {
        if !self.closed {
            self.closed = true;
            self.launcher.stats.shut_down.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.launcher.stats.dropped.fetch_add(1, Ordering::SeqCst);
    }
}
