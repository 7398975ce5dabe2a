//! Scoped ownership of one browser process
//!
//! A `BrowserSession` is created per scrape and torn down on every exit path:
//! explicitly through [`BrowserSession::shutdown`] on normal paths, and via
//! `Drop` when the owning future is cancelled mid-scrape. Dropping the inner
//! `Browser` kills the Chrome child process; `Drop` here additionally stops
//! the CDP handler task and removes the temporary profile directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ScrapeError;

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    /// Profile directory to delete on teardown; `None` when caller-owned
    user_data_dir: Option<PathBuf>,
    closed: bool,
}

impl BrowserSession {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: Option<PathBuf>) -> Self {
        Self {
            browser,
            handler,
            user_data_dir,
            closed: false,
        }
    }

    /// Open a blank tab; stealth scripts must be registered before navigating
    pub async fn new_blank_page(&self) -> Result<Page, ScrapeError> {
        Ok(self.browser.new_page("about:blank").await?)
    }

    /// Close the browser, wait for the process and remove the profile
    ///
    /// Safe to call more than once.
    pub async fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        debug!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
        self.handler.abort();
        self.cleanup_temp_dir();
        info!("Browser session shut down");
    }

    /// Remove the session's profile directory
    ///
    /// Must run after the browser process has exited, otherwise locked files
    /// may survive on Windows.
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            remove_profile_dir(&path, 1, Duration::ZERO);
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.closed {
            return;
        }
        warn!("BrowserSession dropped without shutdown; killing browser");

        // SIGKILL now rather than when the Browser field drops after this body,
        // so Chrome stops writing into the profile before it is removed
        if let Some(child) = self.browser.get_mut_child()
            && let Err(e) = child.as_mut_inner().start_kill()
        {
            warn!("Failed to kill browser process: {e}");
        }

        let Some(path) = self.user_data_dir.take() else {
            return;
        };
        // The kill is delivered asynchronously; retry off the async thread
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    remove_profile_dir(&path, PROFILE_REMOVE_ATTEMPTS, PROFILE_REMOVE_BACKOFF)
                });
            }
            Err(_) => {
                remove_profile_dir(&path, PROFILE_REMOVE_ATTEMPTS, PROFILE_REMOVE_BACKOFF);
            }
        }
    }
}

const PROFILE_REMOVE_ATTEMPTS: u32 = 20;
const PROFILE_REMOVE_BACKOFF: Duration = Duration::from_millis(100);

/// Delete a profile directory, retrying while a dying browser still holds it
///
/// A directory that is already gone counts as removed. Returns whether the
/// directory is gone.
pub(crate) fn remove_profile_dir(path: &Path, attempts: u32, backoff: Duration) -> bool {
    debug!("Cleaning up temp directory: {}", path.display());
    let mut last_error = None;
    for attempt in 0..attempts.max(1) {
        if attempt > 0 {
            std::thread::sleep(backoff);
        }
        match std::fs::remove_dir_all(path) {
            Ok(()) => return true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return true,
            Err(e) => last_error = Some(e),
        }
    }
    if let Some(e) = last_error {
        warn!(
            "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
            path.display(),
            e
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populated_profile_dir_is_removed() {
        let root = tempfile::tempdir().unwrap();
        let profile = root.path().join("subspy_chrome_test");
        std::fs::create_dir_all(profile.join("Default").join("Cache")).unwrap();
        std::fs::write(profile.join("Default").join("Cache").join("data_0"), b"x").unwrap();
        std::fs::write(profile.join("Local State"), b"{}").unwrap();

        assert!(remove_profile_dir(&profile, 3, Duration::from_millis(1)));
        assert!(!profile.exists());
    }

    #[test]
    fn missing_profile_dir_counts_as_removed() {
        let root = tempfile::tempdir().unwrap();
        let profile = root.path().join("never_created");

        assert!(remove_profile_dir(&profile, 1, Duration::ZERO));
    }

    #[test]
    fn file_in_place_of_dir_is_reported_after_retries() {
        let root = tempfile::tempdir().unwrap();
        let not_a_dir = root.path().join("profile");
        std::fs::write(&not_a_dir, b"").unwrap();

        assert!(!remove_profile_dir(&not_a_dir, 2, Duration::from_millis(1)));
        assert!(not_a_dir.exists());
    }
}
