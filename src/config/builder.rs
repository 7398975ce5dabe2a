//! Fluent builder for `ScrapeConfig`
//!
//! Every field has a default, so `ScrapeConfig::builder().build()` yields the
//! production settings. Tests mostly shorten the delays and point the origin
//! at a local mock server.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use url::Url;

use super::types::ScrapeConfig;
use crate::utils::{
    CHROME_USER_AGENT, COMMENT_REQUEST_TIMEOUT_SECS, COMMENTS_USER_AGENT,
    CONTENT_WAIT_TIMEOUT_SECS, DEFAULT_SITE_ORIGIN, MAX_SCROLL_ATTEMPTS, NAVIGATION_TIMEOUT_SECS,
    POST_DELAY_MS, SCROLL_DELAY_MS, SCROLL_STEP_PX, SETTLE_DELAY_MS,
};

#[derive(Debug, Clone)]
pub struct ScrapeConfigBuilder {
    site_origin: String,
    headless: bool,
    chrome_data_dir: Option<PathBuf>,
    browser_user_agent: String,
    comments_user_agent: String,
    navigation_timeout: Duration,
    content_wait_timeout: Duration,
    comment_timeout: Duration,
    settle_delay: Duration,
    scroll_step_px: u32,
    scroll_delay: Duration,
    max_scroll_attempts: u32,
    post_delay: Duration,
}

impl Default for ScrapeConfigBuilder {
    fn default() -> Self {
        Self {
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            headless: true,
            chrome_data_dir: None,
            browser_user_agent: CHROME_USER_AGENT.to_string(),
            comments_user_agent: COMMENTS_USER_AGENT.to_string(),
            navigation_timeout: Duration::from_secs(NAVIGATION_TIMEOUT_SECS),
            content_wait_timeout: Duration::from_secs(CONTENT_WAIT_TIMEOUT_SECS),
            comment_timeout: Duration::from_secs(COMMENT_REQUEST_TIMEOUT_SECS),
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            scroll_step_px: SCROLL_STEP_PX,
            scroll_delay: Duration::from_millis(SCROLL_DELAY_MS),
            max_scroll_attempts: MAX_SCROLL_ATTEMPTS,
            post_delay: Duration::from_millis(POST_DELAY_MS),
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder {
    #[must_use]
    pub fn site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = origin.into();
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.chrome_data_dir = dir;
        self
    }

    #[must_use]
    pub fn browser_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.browser_user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn comments_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.comments_user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    #[must_use]
    pub fn content_wait_timeout(mut self, timeout: Duration) -> Self {
        self.content_wait_timeout = timeout;
        self
    }

    #[must_use]
    pub fn comment_timeout(mut self, timeout: Duration) -> Self {
        self.comment_timeout = timeout;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn scroll_step_px(mut self, px: u32) -> Self {
        self.scroll_step_px = px;
        self
    }

    #[must_use]
    pub fn scroll_delay(mut self, delay: Duration) -> Self {
        self.scroll_delay = delay;
        self
    }

    #[must_use]
    pub fn max_scroll_attempts(mut self, attempts: u32) -> Self {
        self.max_scroll_attempts = attempts;
        self
    }

    #[must_use]
    pub fn post_delay(mut self, delay: Duration) -> Self {
        self.post_delay = delay;
        self
    }

    /// Zero every pacing delay; intended for tests and offline replays
    #[must_use]
    pub fn without_delays(self) -> Self {
        self.settle_delay(Duration::ZERO)
            .scroll_delay(Duration::ZERO)
            .post_delay(Duration::ZERO)
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the site origin is not an absolute http(s) URL or a
    /// timeout is zero.
    pub fn build(self) -> Result<ScrapeConfig> {
        let origin = Url::parse(&self.site_origin)
            .map_err(|e| anyhow!("Invalid site origin '{}': {e}", self.site_origin))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Site origin must use http or https, got '{}'",
                origin.scheme()
            ));
        }

        for (name, value) in [
            ("navigation_timeout", self.navigation_timeout),
            ("content_wait_timeout", self.content_wait_timeout),
            ("comment_timeout", self.comment_timeout),
        ] {
            if value.is_zero() {
                return Err(anyhow!("{name} must be greater than zero"));
            }
        }

        Ok(ScrapeConfig {
            site_origin: self.site_origin.trim_end_matches('/').to_string(),
            headless: self.headless,
            chrome_data_dir: self.chrome_data_dir,
            browser_user_agent: self.browser_user_agent,
            comments_user_agent: self.comments_user_agent,
            navigation_timeout: self.navigation_timeout,
            content_wait_timeout: self.content_wait_timeout,
            comment_timeout: self.comment_timeout,
            settle_delay: self.settle_delay,
            scroll_step_px: self.scroll_step_px,
            scroll_delay: self.scroll_delay,
            max_scroll_attempts: self.max_scroll_attempts,
            post_delay: self.post_delay,
        })
    }
}
