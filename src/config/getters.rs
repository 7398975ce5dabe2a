//! Getter methods for `ScrapeConfig`

use std::path::Path;
use std::time::Duration;

use super::types::ScrapeConfig;

impl ScrapeConfig {
    #[must_use]
    pub fn site_origin(&self) -> &str {
        &self.site_origin
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&Path> {
        self.chrome_data_dir.as_deref()
    }

    #[must_use]
    pub fn browser_user_agent(&self) -> &str {
        &self.browser_user_agent
    }

    #[must_use]
    pub fn comments_user_agent(&self) -> &str {
        &self.comments_user_agent
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        self.navigation_timeout
    }

    #[must_use]
    pub fn content_wait_timeout(&self) -> Duration {
        self.content_wait_timeout
    }

    #[must_use]
    pub fn comment_timeout(&self) -> Duration {
        self.comment_timeout
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    #[must_use]
    pub fn scroll_step_px(&self) -> u32 {
        self.scroll_step_px
    }

    #[must_use]
    pub fn scroll_delay(&self) -> Duration {
        self.scroll_delay
    }

    #[must_use]
    pub fn max_scroll_attempts(&self) -> u32 {
        self.max_scroll_attempts
    }

    #[must_use]
    pub fn post_delay(&self) -> Duration {
        self.post_delay
    }
}
