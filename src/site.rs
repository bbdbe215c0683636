use crate::browser::{PageDriver, ScrapeSession};
use crate::extract;
use crate::models::PlaceRecord;
use log::{debug, info, warn};
use scraper::{Html, Selector};
use std::time::Duration;

const BASE_URL: &str = "https://korean.visitseoul.net";

/// One listing category: display name plus site path
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub path: &'static str,
}

/// Categories in declared crawl order
const CATEGORIES: &[Category] = &[
    Category {
        name: "관광명소",
        path: "/attractions",
    },
    Category {
        name: "자연명소",
        path: "/nature",
    },
    Category {
        name: "엔터테인먼트",
        path: "/entertainment",
    },
    Category {
        name: "쇼핑",
        path: "/shopping",
    },
];

/// Listing card shapes, most specific first
const LISTING_ITEM_SELECTORS: &[&str] = &[
    "ul.article-list > li",
    ".list-wrap li.item",
    ".item-list > li",
];

/// Pagination link shapes
const PAGINATION_SELECTORS: &[&str] = &[".paging a", ".pagination a", ".paginate a"];

/// One listing card, collected before the tab leaves the listing page
#[derive(Debug, Clone)]
struct ListingItem {
    name: String,
    short_description: String,
    url: String,
}

/// Category/listing traversal for the Seoul tourism site.
///
/// Walks every category in declared order, pages through its listings and
/// opens each place's detail page, assembling records through the field
/// extractors. Failures below the category level log and continue, so one
/// broken page never costs the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct SeoulPlaceSite;

impl SeoulPlaceSite {
    pub fn new() -> Self {
        Self
    }

    pub fn categories(&self) -> &'static [Category] {
        CATEGORIES
    }

    /// Run the full traversal in one session. Records come back in
    /// discovery order across categories.
    pub fn collect_places(&self, session: &ScrapeSession) -> Vec<PlaceRecord> {
        let driver = session.driver();
        let mut places = Vec::new();

        for category in self.categories() {
            let records = self.process_category(&driver, category);
            info!("category {}: {} places", category.name, records.len());
            places.extend(records);
        }

        places
    }

    fn process_category(&self, driver: &PageDriver, category: &Category) -> Vec<PlaceRecord> {
        let category_url = format!("{}{}", BASE_URL, category.path);
        info!("category {}: {}", category.name, category_url);

        if let Err(e) = driver.navigate(&category_url) {
            warn!("category {} unreachable: {}", category.name, e);
            return Vec::new();
        }
        let _ = driver.wait_for_selector_with_timeout("ul.article-list, .list-wrap, body", Duration::from_secs(10));

        let total = match driver.html() {
            Ok(html) => total_pages(&Html::parse_document(&html)),
            Err(e) => {
                warn!("category {} page count unreadable: {}", category.name, e);
                1
            }
        };
        debug!("category {}: {} listing pages", category.name, total);

        let mut places = Vec::new();
        for page_num in 1..=total {
            // The tab is on detail pages between listing rounds, so every
            // page after the first gets an explicit navigation
            if page_num > 1 {
                let page_url = format!("{}?curPage={}", category_url, page_num);
                if let Err(e) = driver.navigate(&page_url) {
                    warn!(
                        "category {} page {}/{} navigation failed: {}",
                        category.name, page_num, total, e
                    );
                    continue;
                }
            }
            places.extend(self.process_listing_page(driver, page_num, total));
        }

        places
    }

    fn process_listing_page(
        &self,
        driver: &PageDriver,
        page_num: usize,
        total_pages: usize,
    ) -> Vec<PlaceRecord> {
        // Trigger lazy-loaded cards before reading the DOM
        let _ = driver.scroll_to_bottom();

        let html = match driver.html() {
            Ok(html) => html,
            Err(e) => {
                warn!("listing page {}/{} unreadable: {}", page_num, total_pages, e);
                return Vec::new();
            }
        };

        let items = listing_items(&Html::parse_document(&html));
        debug!(
            "listing page {}/{}: {} items",
            page_num,
            total_pages,
            items.len()
        );

        let mut records = Vec::new();
        for item in items {
            // Items are independent; a broken one is skipped, not fatal
            match self.process_detail_page(driver, &item) {
                Some(record) => records.push(record),
                None => warn!(
                    "skipping item '{}' on listing page {}/{}",
                    item.name, page_num, total_pages
                ),
            }
        }
        records
    }

    fn process_detail_page(&self, driver: &PageDriver, item: &ListingItem) -> Option<PlaceRecord> {
        if let Err(e) = driver.navigate(&item.url) {
            warn!("detail page {} failed: {}", item.url, e);
            return None;
        }

        let html = match driver.html() {
            Ok(html) => html,
            Err(e) => {
                warn!("detail page {} unreadable: {}", item.url, e);
                return None;
            }
        };
        let doc = Html::parse_document(&html);

        Some(PlaceRecord {
            identifier: extract::extract_identifier(&item.url),
            name: item.name.clone(),
            description: extract::extract_description(&doc, &item.short_description),
            address: extract::extract_address(&doc),
            coordinate: extract::extract_coordinates(&doc, &html),
        })
    }
}

/// Highest page number visible in the pagination links; one page when the
/// listing has no pagination
fn total_pages(doc: &Html) -> usize {
    for selector in PAGINATION_SELECTORS {
        if let Ok(sel) = Selector::parse(selector) {
            let max = doc
                .select(&sel)
                .filter_map(|link| {
                    link.text()
                        .collect::<String>()
                        .trim()
                        .parse::<usize>()
                        .ok()
                })
                .max();
            if let Some(pages) = max.filter(|&pages| pages >= 1) {
                return pages;
            }
        }
    }
    1
}

/// Parse listing cards out of a rendered listing page
fn listing_items(doc: &Html) -> Vec<ListingItem> {
    let mut items: Vec<ListingItem> = Vec::new();

    for item_selector in LISTING_ITEM_SELECTORS {
        let item_sel = match Selector::parse(item_selector) {
            Ok(sel) => sel,
            Err(_) => continue,
        };

        for element in doc.select(&item_sel) {
            let Some(link) = first_link(&element) else {
                continue;
            };
            let url = absolutize(&link);

            let name = item_name(&element);
            if name.is_empty() {
                continue;
            }

            let short_description = item_short_description(&element);

            if !items.iter().any(|existing| existing.url == url) {
                items.push(ListingItem {
                    name,
                    short_description,
                    url,
                });
            }
        }

        if !items.is_empty() {
            break;
        }
    }

    items
}

fn first_link(element: &scraper::ElementRef) -> Option<String> {
    let link_sel = Selector::parse("a[href]").ok()?;
    let href = element
        .select(&link_sel)
        .next()
        .and_then(|a| a.value().attr("href"))?;
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    Some(href.to_string())
}

fn absolutize(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", BASE_URL, href)
    } else {
        format!("{}/{}", BASE_URL, href)
    }
}

fn item_name(element: &scraper::ElementRef) -> String {
    for selector in [".title", "strong", "em", "h3"] {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(found) = element.select(&sel).next() {
                let text = crate::extract::element_text(&found);
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }

    // Fall back to the link text, guarding against capturing the whole card
    if let Ok(sel) = Selector::parse("a[href]") {
        if let Some(link) = element.select(&sel).next() {
            let text = crate::extract::element_text(&link);
            if !text.is_empty() && text.chars().count() < 100 {
                return text;
            }
        }
    }

    String::new()
}

fn item_short_description(element: &scraper::ElementRef) -> String {
    for selector in [".small-text", ".desc", "p"] {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(found) = element.select(&sel).next() {
                let text = crate::extract::element_text(&found);
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }
    String::new()
}
