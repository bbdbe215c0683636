// Probe a single detail page and print the extracted record as JSON.
// Requires Chrome/Chromium:
//   cargo run --example probe_detail -- <detail-url>
use scraper::{Html, Selector};
use seoul_place_scraper::browser::{BrowserConfig, BrowserManager};
use seoul_place_scraper::extract;
use seoul_place_scraper::models::PlaceRecord;

fn page_title(doc: &Html) -> String {
    for selector in ["h1", ".title", "h2"] {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(element) = doc.select(&sel).next() {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }
    String::new()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let url = std::env::args().nth(1).unwrap_or_else(|| {
        "https://korean.visitseoul.net/attractions/경복궁/KOP031343".to_string()
    });

    let manager = BrowserManager::new(BrowserConfig::default());
    let session = manager.acquire()?;
    let driver = session.driver();

    driver.navigate(&url)?;
    let html = driver.html()?;
    let doc = Html::parse_document(&html);

    let record = PlaceRecord {
        identifier: extract::extract_identifier(&url),
        name: page_title(&doc),
        description: extract::extract_description(&doc, ""),
        address: extract::extract_address(&doc),
        coordinate: extract::extract_coordinates(&doc, &html),
    };

    session.release();

    println!("{}", serde_json::to_string_pretty(&record)?);
    println!("complete: {}", record.is_complete());
    Ok(())
}
