//! Browser session layer for the scraping pipeline
//!
//! Owns the browser process and browsing-context lifecycle: launch
//! configuration, user agent and viewport, and guaranteed teardown. One
//! session means one browser process plus one context, scoped to a single
//! scrape attempt.
//!
//! # Example
//!
//! ```no_run
//! use seoul_place_scraper::browser::{BrowserConfig, BrowserManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BrowserManager::new(BrowserConfig::default());
//!
//! let session = manager.acquire()?;
//! let driver = session.driver();
//!
//! driver.navigate("https://example.com")?;
//! let html = driver.html()?;
//! println!("Extracted {} bytes of HTML", html.len());
//!
//! session.release();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod scraper;

// Re-export main types for convenience
pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager, ScrapeSession};
pub use scraper::PageDriver;
