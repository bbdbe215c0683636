// Full pipeline run against the live site.
// Requires Chrome/Chromium: cargo run --example run_scrape
use seoul_place_scraper::{BrowserConfig, MemoryStore, Orchestrator, PlaceStore, ScrapeService};

#[tokio::main]
async fn main() {
    env_logger::init();

    let orchestrator = Orchestrator::visit_seoul(BrowserConfig::default());
    let mut service = ScrapeService::new(orchestrator, MemoryStore::new());

    let inserted = service.run_if_empty().await.unwrap_or(0);
    println!(
        "{} new places ({} known in total)",
        inserted,
        service.store().count()
    );
}
