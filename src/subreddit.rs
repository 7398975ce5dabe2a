//! Scrape orchestration for one subreddit
//!
//! `SubredditScraper::scrape` is total: every failure inside the pipeline is
//! logged and collapses to an empty post list under the subreddit's key. The
//! browser session is owned by the invocation and torn down on every path,
//! including cancellation of the returned future.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::comments::CommentFetcher;
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, StepResult};
use crate::listing::{ChromeLauncher, ListingPage, ListingSession, PostHandle, SessionLauncher};
use crate::models::{Post, ScrapeResult, single_result};
use crate::post::extract_post;
use crate::utils::{MAX_POSTS, listing_url, with_timeout};

/// Interval between post-count checks while waiting for content
const CONTENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct SubredditScraper<L = ChromeLauncher> {
    config: ScrapeConfig,
    launcher: L,
    comments: CommentFetcher,
}

impl SubredditScraper<ChromeLauncher> {
    /// Scraper backed by a local Chromium
    pub fn new(config: ScrapeConfig) -> anyhow::Result<Self> {
        Self::with_launcher(config, ChromeLauncher)
    }
}

impl<L: SessionLauncher> SubredditScraper<L> {
    pub fn with_launcher(config: ScrapeConfig, launcher: L) -> anyhow::Result<Self> {
        let comments =
            CommentFetcher::new(config.comments_user_agent(), config.comment_timeout())?;
        Ok(Self {
            config,
            launcher,
            comments,
        })
    }

    /// Scrape the newest posts of `subreddit`
    ///
    /// The name is expected to be validated already. Always resolves to a
    /// single-key map; an empty list means nothing could be collected.
    pub async fn scrape(&self, subreddit: &str) -> ScrapeResult {
        info!(subreddit, "Starting scrape");

        let posts = match self.launcher.launch(&self.config).await {
            Ok(mut session) => {
                let outcome = self.scrape_in_session(&mut session, subreddit).await;
                session.shutdown().await;
                match outcome {
                    Ok(posts) => posts,
                    Err(e) => {
                        error!(subreddit, "Scrape failed: {e}");
                        Vec::new()
                    }
                }
            }
            Err(e) => {
                error!(subreddit, "Could not start browser session: {e}");
                Vec::new()
            }
        };

        info!(subreddit, posts = posts.len(), "Scrape finished");
        single_result(subreddit, posts)
    }

    async fn scrape_in_session(
        &self,
        session: &mut L::Session,
        subreddit: &str,
    ) -> StepResult<Vec<Post>> {
        let page = session.open_page(&self.config).await?;
        self.scrape_page(&page, subreddit).await
    }

    /// Run the listing pipeline against an already opened page
    ///
    /// Navigation, content wait, progressive load, then per-post extraction
    /// with comments. Returns an empty list when no post renders in time.
    pub async fn scrape_page<P: ListingPage>(
        &self,
        page: &P,
        subreddit: &str,
    ) -> StepResult<Vec<Post>> {
        let origin = self.config.site_origin();
        let url = listing_url(origin, subreddit)
            .map_err(|e| ScrapeError::Navigation(format!("{e:#}")))?;

        with_timeout(
            page.navigate(&url),
            self.config.navigation_timeout(),
            "Listing navigation",
        )
        .await?;
        sleep(self.config.settle_delay()).await;

        if !self.wait_for_posts(page).await {
            warn!(
                subreddit,
                "No posts rendered within {}s",
                self.config.content_wait_timeout().as_secs()
            );
            return Ok(Vec::new());
        }

        self.load_progressively(page).await?;

        let handles = page.posts().await?;
        debug!(subreddit, found = handles.len(), "Extracting posts");

        let mut posts = Vec::with_capacity(MAX_POSTS.min(handles.len()));
        for handle in handles.iter().take(MAX_POSTS) {
            let raw = handle.read().await;
            let mut post = extract_post(&raw, origin);
            sleep(self.config.post_delay()).await;

            if !post.url.is_empty() {
                post.comments = self.comments.fetch(&post.url).await;
            }
            debug!(title = %post.title, comments = post.comments.len(), "Post extracted");
            posts.push(post);
        }

        Ok(posts)
    }

    /// Poll until at least one post exists or the wait window closes
    async fn wait_for_posts<P: ListingPage>(&self, page: &P) -> bool {
        let poll = async {
            loop {
                match page.post_count().await {
                    Ok(count) if count > 0 => return,
                    Ok(_) => {}
                    Err(e) => debug!("Failed to count posts: {e}, retrying"),
                }
                sleep(CONTENT_POLL_INTERVAL).await;
            }
        };
        tokio::time::timeout(self.config.content_wait_timeout(), poll)
            .await
            .is_ok()
    }

    /// Scroll until enough posts are rendered or attempts run out
    async fn load_progressively<P: ListingPage>(&self, page: &P) -> StepResult<()> {
        page.scroll_to_top().await?;

        for attempt in 0..self.config.max_scroll_attempts() {
            let count = page.post_count().await?;
            if count >= MAX_POSTS {
                debug!(count, attempt, "Enough posts rendered");
                return Ok(());
            }
            page.scroll_by(self.config.scroll_step_px()).await?;
            sleep(self.config.scroll_delay()).await;
        }

        debug!("Scroll attempts exhausted");
        Ok(())
    }
}
