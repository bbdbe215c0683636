use std::time::Duration;

/// Fixed desktop user agent for all sessions.
const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Configuration for browser sessions
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// User agent applied to the browsing context
    pub user_agent: String,

    /// Bound on browser launch / idle lifetime in seconds
    pub launch_timeout_secs: u64,

    /// Artificial delay after each browser operation, in milliseconds.
    /// Gives dynamic pages a chance to settle before the next step.
    pub slowdown_millis: u64,

    /// Disable image loading for performance
    pub disable_images: bool,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: DESKTOP_USER_AGENT.to_string(),
            launch_timeout_secs: 300,
            slowdown_millis: 100,
            disable_images: true,
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Create a configuration for debugging (non-headless, visible browser,
    /// no artificial slowdown)
    pub fn debug_mode() -> Self {
        let mut config = Self::default();
        config.headless = false;
        config.disable_images = false;
        config.slowdown_millis = 0;
        config
    }

    /// Get launch timeout as Duration
    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.launch_timeout_secs)
    }

    /// Get per-operation slowdown as Duration
    pub fn slowdown(&self) -> Duration {
        Duration::from_millis(self.slowdown_millis)
    }
}
