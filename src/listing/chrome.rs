//! Live listing pages driven through Chromium

use std::time::{Duration, Instant};

use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ListingPage, ListingSession, PostHandle, SessionLauncher};
use crate::browser_session::BrowserSession;
use crate::browser_setup::launch_browser;
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, StepResult};
use crate::models::RawPost;
use crate::stealth;
use crate::utils::constants::POST_SELECTOR;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Resource-entry count must hold still this long to count as network idle
const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

const READY_STATE_SCRIPT: &str = r"
    (function() {
        return {
            readyState: document.readyState,
            resources: performance.getEntriesByType('resource').length
        };
    })()
";

// Runs with `this` bound to a shreddit-post element. Objects do not survive
// callFunctionOn by value, so the record is returned as a JSON string.
const READ_POST_FN: &str = r#"
    function() {
        const attr = (name) => this.getAttribute(name);
        const link = this.querySelector('a[slot="title"]');
        const time = this.querySelector('faceplate-timeago time');
        return JSON.stringify({
            post_title: attr('post-title'),
            author: attr('author'),
            score: attr('score'),
            permalink: attr('permalink'),
            created_timestamp: attr('created-timestamp'),
            title_link_text: link ? link.textContent : null,
            time_datetime: time ? time.getAttribute('datetime') : null,
            time_title: time ? time.getAttribute('title') : null
        });
    }
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadState {
    ready_state: String,
    resources: usize,
}

/// Launches one Chromium process per scrape
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeLauncher;

impl SessionLauncher for ChromeLauncher {
    type Session = BrowserSession;

    async fn launch(&self, config: &ScrapeConfig) -> StepResult<BrowserSession> {
        Ok(launch_browser(config).await?)
    }
}

impl ListingSession for BrowserSession {
    type Page = ChromeListing;

    async fn open_page(&mut self, config: &ScrapeConfig) -> StepResult<ChromeListing> {
        let page = self.new_blank_page().await?;
        // Stealth is best effort; an unpatched page can still render the listing
        if let Err(e) = stealth::apply(&page, config.browser_user_agent()).await {
            warn!("Failed to apply stealth: {e}");
        }
        Ok(ChromeListing::new(page))
    }

    async fn shutdown(&mut self) {
        BrowserSession::shutdown(self).await;
    }
}

/// A listing rendered in a Chromium tab
pub struct ChromeListing {
    page: Page,
}

impl ChromeListing {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn evaluate<T: serde::de::DeserializeOwned>(&self, script: &str) -> StepResult<T> {
        self.page
            .evaluate(script)
            .await?
            .into_value::<T>()
            .map_err(|e| ScrapeError::Script(format!("unexpected result from `{script}`: {e}")))
    }

    async fn run(&self, script: &str) -> StepResult<()> {
        self.page.evaluate(script).await?;
        Ok(())
    }

    /// Poll until `readyState` is complete and resource loading has stopped
    async fn wait_for_settled(&self) {
        let start = Instant::now();
        let mut last_resources: Option<usize> = None;
        let mut quiet_since = Instant::now();

        loop {
            match self.evaluate::<LoadState>(READY_STATE_SCRIPT).await {
                Ok(state) if state.ready_state == "complete" => {
                    if last_resources == Some(state.resources) {
                        if quiet_since.elapsed() >= NETWORK_QUIET_WINDOW {
                            break;
                        }
                    } else {
                        last_resources = Some(state.resources);
                        quiet_since = Instant::now();
                    }
                }
                Ok(_) => {}
                Err(e) => debug!("Failed to check readyState: {e}, retrying"),
            }
            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }

        debug!(
            "Page settled after {:.2}s",
            start.elapsed().as_secs_f64()
        );
    }
}

impl ListingPage for ChromeListing {
    type Post = ChromePost;

    async fn navigate(&self, url: &str) -> StepResult<()> {
        info!("Navigating to {url}");
        let outcome = self.page.goto(url).await.map(|_| ());
        check_goto(outcome, url)?;
        self.wait_for_settled().await;
        Ok(())
    }

    async fn post_count(&self) -> StepResult<usize> {
        self.evaluate(&format!(
            "document.querySelectorAll('{POST_SELECTOR}').length"
        ))
        .await
    }

    async fn scroll_to_top(&self) -> StepResult<()> {
        self.run("window.scrollTo(0, 0)").await
    }

    async fn scroll_by(&self, px: u32) -> StepResult<()> {
        self.run(&format!("window.scrollBy(0, {px})")).await
    }

    async fn posts(&self) -> StepResult<Vec<ChromePost>> {
        let elements = self.page.find_elements(POST_SELECTOR).await?;
        Ok(elements.into_iter().map(ChromePost).collect())
    }
}

/// Classify the result of `Page::goto`
///
/// chromiumoxide gives up on a frame navigation after a fixed 30 s, well
/// inside the configured navigation timeout. That timeout is not fatal: the
/// page keeps loading and `wait_for_settled` takes over, bounded by the
/// caller.
fn check_goto(outcome: Result<(), CdpError>, url: &str) -> StepResult<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(CdpError::Timeout) => {
            warn!("Navigation to {url} still loading after the CDP deadline, waiting on");
            Ok(())
        }
        Err(e) => Err(ScrapeError::Navigation(format!("{url}: {e}"))),
    }
}

/// A `shreddit-post` element in a live page
pub struct ChromePost(Element);

impl ChromePost {
    async fn try_read(&self) -> StepResult<RawPost> {
        let returns = self.0.call_js_fn(READ_POST_FN, false).await?;
        let json = returns
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| ScrapeError::Script("post reader returned no value".to_string()))?;
        serde_json::from_str(json).map_err(|e| ScrapeError::Script(e.to_string()))
    }
}

impl PostHandle for ChromePost {
    async fn read(&self) -> RawPost {
        match self.try_read().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read post element: {e}");
                RawPost::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.reddit.com/r/rust/new/";

    #[test]
    fn cdp_navigation_deadline_is_not_fatal() {
        assert!(check_goto(Err(CdpError::Timeout), URL).is_ok());
        assert!(check_goto(Ok(()), URL).is_ok());
    }

    #[test]
    fn other_navigation_errors_fail_the_step() {
        let err = check_goto(Err(CdpError::ChromeMessage("net::ERR_NAME_NOT_RESOLVED".into())), URL)
            .unwrap_err();
        match err {
            ScrapeError::Navigation(msg) => {
                assert!(msg.contains(URL));
                assert!(msg.contains("ERR_NAME_NOT_RESOLVED"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            check_goto(Err(CdpError::NotFound), URL),
            Err(ScrapeError::Navigation(_))
        ));
    }
}
