use super::manager::BrowserError;
use headless_chrome::Tab;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// High-level page operations for a session's browsing context.
///
/// Every operation ends with the configured slowdown pause, which gives
/// dynamic pages a chance to settle before the next step.
pub struct PageDriver {
    tab: Arc<Tab>,
    slowdown: Duration,
    default_timeout: Duration,
}

impl PageDriver {
    pub fn new(tab: Arc<Tab>, slowdown: Duration) -> Self {
        Self {
            tab,
            slowdown,
            default_timeout: Duration::from_secs(30),
        }
    }

    /// Navigate to a URL and wait for page load
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        self.pause();
        Ok(())
    }

    /// Wait for an element matching the given CSS selector
    pub fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        self.wait_for_selector_with_timeout(selector, self.default_timeout)
    }

    /// Wait for an element with a custom timeout
    pub fn wait_for_selector_with_timeout(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let start = Instant::now();

        loop {
            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(format!(
                    "Waiting for selector: {}",
                    selector
                )));
            }

            let script = format!(
                r#"document.querySelector('{}') !== null"#,
                selector.replace('\'', "\\'")
            );

            match self.tab.evaluate(&script, false) {
                Ok(result) => {
                    if let Some(value) = result.value {
                        if value.as_bool() == Some(true) {
                            self.pause();
                            return Ok(());
                        }
                    }
                }
                Err(_) => {
                    // Element not found yet, continue waiting
                }
            }

            std::thread::sleep(Duration::from_millis(100));
        }
    }

    /// Scroll to the bottom of the page.
    /// Triggers lazy-loaded listing content.
    pub fn scroll_to_bottom(&self) -> Result<(), BrowserError> {
        let script = "window.scrollTo(0, document.body.scrollHeight);";

        self.tab
            .evaluate(script, false)
            .map_err(|e| BrowserError::JavaScriptError(format!("Scroll failed: {}", e)))?;

        self.pause();
        Ok(())
    }

    /// Get the rendered HTML content of the page
    pub fn html(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }

    fn pause(&self) {
        if !self.slowdown.is_zero() {
            std::thread::sleep(self.slowdown);
        }
    }
}
