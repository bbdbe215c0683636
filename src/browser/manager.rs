use super::config::BrowserConfig;
use super::scraper::PageDriver;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::{info, warn};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

/// Launches configured browser processes and hands out scrape sessions
#[derive(Clone)]
pub struct BrowserManager {
    config: BrowserConfig,
}

impl BrowserManager {
    /// Create a new browser manager with the given configuration
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Launch a browser process and open its single browsing context.
    ///
    /// A launch failure aborts the current scrape attempt only; the caller
    /// decides whether to retry with a fresh session.
    pub fn acquire(&self) -> Result<ScrapeSession, BrowserError> {
        // Owned flag strings first, the args list borrows from them
        let user_agent_arg = format!("--user-agent={}", self.config.user_agent);
        let images_arg = if self.config.disable_images {
            Some("--blink-settings=imagesEnabled=false".to_string())
        } else {
            None
        };

        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--disable-extensions"),
            OsStr::new("--disable-gpu"),
            OsStr::new("--disable-dev-shm-usage"),
        ];
        args.push(OsStr::new(&user_agent_arg));
        if let Some(ref img) = images_arg {
            args.push(OsStr::new(img));
        }
        for flag in &self.config.chrome_flags {
            args.push(OsStr::new(flag));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(self.config.headless)
            // Restricted containers have no usable sandbox
            .sandbox(false)
            .window_size(Some(self.config.window_size))
            .idle_browser_timeout(self.config.launch_timeout())
            .args(args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;

        // Match the viewport to the window size
        tab.set_bounds(headless_chrome::types::Bounds::Normal {
            left: Some(0),
            top: Some(0),
            width: Some(self.config.window_size.0 as f64),
            height: Some(self.config.window_size.1 as f64),
        })
        .map_err(|e| BrowserError::ConfigurationError(e.to_string()))?;

        info!("browser session launched ({}x{})", self.config.window_size.0, self.config.window_size.1);

        Ok(ScrapeSession {
            browser,
            tab,
            slowdown: self.config.slowdown(),
        })
    }

    /// Get the browser configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}

/// One browser process plus its single browsing context, scoped to a
/// single scrape attempt.
pub struct ScrapeSession {
    browser: Browser,
    tab: Arc<Tab>,
    slowdown: Duration,
}

impl ScrapeSession {
    /// Page driver bound to this session's context
    pub fn driver(&self) -> PageDriver {
        PageDriver::new(self.tab.clone(), self.slowdown)
    }

    /// Get a reference to the underlying tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Close the context and the browser process. Close failures are
    /// logged and never propagated, so they cannot mask the outcome of
    /// the attempt that used this session.
    pub fn release(self) {
        if let Err(e) = self.tab.close(true) {
            warn!("tab close failed during session release: {}", e);
        }
        // Dropping the handle tears down the browser process
        drop(self.browser);
        info!("browser session released");
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    JavaScriptError(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),
}

impl BrowserError {
    /// Whether this error looks like a timeout. Timeouts are logged
    /// distinctly but follow the same retry policy as other failures.
    pub fn is_timeout(&self) -> bool {
        match self {
            BrowserError::Timeout(_) => true,
            other => other.to_string().to_lowercase().contains("timeout"),
        }
    }
}
