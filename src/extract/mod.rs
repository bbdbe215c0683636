//! Field extraction over rendered detail pages
//!
//! Each field is pulled through an ordered fallback chain: a priority list
//! of strategies sharing one validity check. The first candidate that
//! passes wins; a selector that matches nothing is "no candidate", never
//! an error, so a markup change degrades a field instead of aborting the
//! traversal.

pub mod address;
pub mod coordinates;
pub mod description;
pub mod identifier;

pub use address::extract_address;
pub use coordinates::extract_coordinates;
pub use description::extract_description;
pub use identifier::extract_identifier;

use scraper::{ElementRef, Html, Selector};

/// Whitespace-normalized text content of an element
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element matching `selector`, if any
pub(crate) fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let element = doc.select(&sel).next()?;
    let text = element_text(&element);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Walk a selector chain in priority order and return the first candidate
/// passing the shared validity check
pub(crate) fn first_valid<F>(doc: &Html, chain: &[&str], valid: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    chain
        .iter()
        .find_map(|selector| first_text(doc, selector).filter(|text| valid(text)))
}

/// Texts of all elements matching `selector`, in document order
pub(crate) fn all_texts(doc: &Html, selector: &str) -> Vec<String> {
    match Selector::parse(selector) {
        Ok(sel) => doc
            .select(&sel)
            .map(|element| element_text(&element))
            .filter(|text| !text.is_empty())
            .collect(),
        Err(_) => Vec::new(),
    }
}
