use super::element_text;
use scraper::{Html, Selector};

/// Every usable address mentions the city by name
const CITY_MARKER: &str = "서울";

/// Label text marking the address row
const ADDRESS_LABEL: &str = "주소";

/// "label: value" row shapes used across the site, most specific first:
/// (row, label-within-row, value-within-row)
const LABEL_VALUE_ROWS: &[(&str, &str, &str)] = &[
    ("ul.detail-info-list li", "strong", "span"),
    (".info-wrap dl", "dt", "dd"),
    (".detail-info li", ".tit", ".cont"),
];

/// Elements longer than this are too big to be a bare address line
const MAX_SCAN_CHARS: usize = 100;

/// Pull the place address out of a rendered detail page. Falls back to
/// scanning for any small element mentioning the city; returns an empty
/// string when nothing qualifies.
pub fn extract_address(doc: &Html) -> String {
    for (row_sel, label_sel, value_sel) in LABEL_VALUE_ROWS {
        if let (Ok(rows), Ok(label), Ok(value)) = (
            Selector::parse(row_sel),
            Selector::parse(label_sel),
            Selector::parse(value_sel),
        ) {
            for row in doc.select(&rows) {
                let labeled = row
                    .select(&label)
                    .next()
                    .map(|el| element_text(&el).contains(ADDRESS_LABEL))
                    .unwrap_or(false);
                if !labeled {
                    continue;
                }
                if let Some(value_el) = row.select(&value).next() {
                    let text = element_text(&value_el);
                    if text.contains(CITY_MARKER) {
                        return text;
                    }
                }
            }
        }
    }

    // Last resort: first small element anywhere that mentions the city
    if let Ok(any) = Selector::parse("body *") {
        for element in doc.select(&any) {
            let text = element_text(&element);
            if text.contains(CITY_MARKER) && text.chars().count() < MAX_SCAN_CHARS {
                return text;
            }
        }
    }

    String::new()
}
