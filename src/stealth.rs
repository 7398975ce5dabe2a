//! Automation-fingerprint reduction for listing pages
//!
//! Scripts are registered with `Page.addScriptToEvaluateOnNewDocument`, so
//! they must be installed on a blank page before the listing is loaded.

use chromiumoxide::{Page, cdp};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::ScrapeError;

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const PLATFORM: &str = "Win32";

// Order matters: later scripts may rely on window.chrome existing
const EVASIONS: &[(&str, &str)] = &[
    (
        "navigator_webdriver",
        r"Object.defineProperty(Navigator.prototype, 'webdriver', { get: () => false });",
    ),
    (
        "navigator_languages",
        r"Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });",
    ),
    (
        "navigator_plugins",
        r"
        (() => {
            const fake = [
                { name: 'Chrome PDF Plugin', filename: 'internal-pdf-viewer', description: 'Portable Document Format' },
                { name: 'Chrome PDF Viewer', filename: 'mhjfbmdgcfjbbpaeojofohoefgiehjai', description: '' },
                { name: 'Native Client', filename: 'internal-nacl-plugin', description: '' },
            ];
            const proto = Object.getPrototypeOf(navigator.plugins);
            Object.defineProperty(navigator, 'plugins', {
                get: () => {
                    const plugins = {};
                    fake.forEach((p, i) => { plugins[i] = p; plugins[p.name] = p; });
                    Object.setPrototypeOf(plugins, proto);
                    Object.defineProperty(plugins, 'length', { value: fake.length });
                    return plugins;
                },
            });
        })();
        ",
    ),
    (
        "chrome_runtime",
        r"
        if (!window.chrome) { window.chrome = {}; }
        if (!window.chrome.runtime) {
            window.chrome.runtime = {
                connect: () => ({
                    onMessage: { addListener: () => {}, removeListener: () => {} },
                    postMessage: () => {},
                }),
            };
        }
        ",
    ),
    (
        "webgl_vendor",
        r"
        if (window.WebGLRenderingContext) {
            const getParameter = WebGLRenderingContext.prototype.getParameter;
            WebGLRenderingContext.prototype.getParameter = new Proxy(getParameter, {
                apply(target, ctx, args) {
                    if (args[0] === 37445) return 'Intel Inc.';
                    if (args[0] === 37446) return 'Intel(R) UHD Graphics';
                    return Reflect.apply(target, ctx, args);
                },
            });
        }
        ",
    ),
];

/// Register evasion scripts, override the user agent (minus any `Headless`
/// marker) and pin a desktop viewport
///
/// Individual script failures are logged and skipped; the call only fails if
/// no script could be registered or the CDP overrides are rejected.
pub async fn apply(page: &Page, user_agent: &str) -> Result<(), ScrapeError> {
    debug!("Injecting {} stealth scripts", EVASIONS.len());

    let results = join_all(EVASIONS.iter().map(|(name, source)| {
        let page = page.clone();
        async move {
            let result = page
                .execute(
                    cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams {
                        source: (*source).to_string(),
                        include_command_line_api: None,
                        world_name: None,
                        run_immediately: None,
                    },
                )
                .await;
            (*name, result)
        }
    }))
    .await;

    let mut injected = 0;
    for (name, result) in results {
        match result {
            Ok(_) => injected += 1,
            Err(e) => warn!("Failed to inject {name}: {e}"),
        }
    }
    if injected == 0 {
        return Err(ScrapeError::Script(
            "no stealth scripts could be injected".to_string(),
        ));
    }

    page.execute(cdp::browser_protocol::network::SetUserAgentOverrideParams {
        user_agent: user_agent.replace("Headless", ""),
        accept_language: Some(ACCEPT_LANGUAGE.to_string()),
        platform: Some(PLATFORM.to_string()),
        user_agent_metadata: None,
    })
    .await?;

    page.execute(
        cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams::builder()
            .width(1920)
            .height(1080)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(ScrapeError::Script)?,
    )
    .await?;

    debug!("Stealth applied: {injected}/{} scripts active", EVASIONS.len());
    Ok(())
}
