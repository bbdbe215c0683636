use crate::models::Coordinate;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};

/// Approximate geographic envelope of Seoul. Pairs outside it are
/// regex noise, not place coordinates.
pub const SEOUL_LAT_MIN: f64 = 37.0;
pub const SEOUL_LAT_MAX: f64 = 38.0;
pub const SEOUL_LNG_MIN: f64 = 126.5;
pub const SEOUL_LNG_MAX: f64 = 127.5;

/// Anything that suggests an embedded map, checked in order
const MAP_ELEMENT_SELECTORS: &[&str] = &[
    "#map",
    "[id*='map']",
    "[class*='map']",
    "iframe[src*='map']",
    "img[src*='map']",
];

/// Numeric-pair patterns tried in order against the raw markup. Only the
/// first match of each pattern is considered; an out-of-box pair moves on
/// to the next pattern.
const COORD_PATTERNS: &[&str] = &[
    // JSON payloads: {"lat":37.5796,"lng":126.977}
    r#""lat"\s*:\s*"?(-?\d+\.?\d*)"?\s*,\s*"lng"\s*:\s*"?(-?\d+\.?\d*)"?"#,
    // script assignments: lat: 37.5796, lng: 126.977
    r#"\blat['"]?\s*[:=]\s*['"]?(-?\d+\.?\d*)['"]?\s*[,;]\s*['"]?lng['"]?\s*[:=]\s*['"]?(-?\d+\.?\d*)"#,
    // spelled-out variants: latitude = "37.5796", longitude = "126.977"
    r#"latitude['"]?\s*[:=]\s*['"]?(-?\d+\.?\d*)['"]?\s*[,;]?\s*['"]?longitude['"]?\s*[:=]\s*['"]?(-?\d+\.?\d*)"#,
    // query strings, with literal and entity-escaped ampersands
    r#"lat=(-?\d+\.?\d*)&(?:amp;)?l(?:on|ng)=(-?\d+\.?\d*)"#,
];

/// Map embeds carrying coordinates in their src query
const MAP_IFRAME_DOMAINS: &[&str] = &[
    "google.com/maps",
    "maps.google",
    "map.kakao",
    "map.naver",
    "openstreetmap",
];

const IFRAME_QUERY_PATTERN: &str = r#"[?&](?:amp;)?(?:q|ll)=(-?\d+\.?\d*),(-?\d+\.?\d*)"#;

/// Pull a coordinate pair out of a rendered detail page.
///
/// Stage 1 requires some map-related element on the page; stage 2 scans
/// the raw markup with the pattern list, then falls back to map-iframe
/// query parameters. Returns `None` when nothing validates, never a
/// partial or zeroed pair.
pub fn extract_coordinates(doc: &Html, raw_html: &str) -> Option<Coordinate> {
    if !has_map_element(doc) {
        return None;
    }

    for pattern in COORD_PATTERNS {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if let Some(caps) = re.captures(raw_html) {
            if let Some(coordinate) = parse_pair(caps.get(1), caps.get(2)) {
                if in_seoul_box(&coordinate) {
                    return Some(coordinate);
                }
                debug!(
                    "discarding out-of-box pair {:.4},{:.4}",
                    coordinate.latitude, coordinate.longitude
                );
            }
        }
    }

    map_iframe_coordinates(doc)
}

/// Whether a pair falls inside the Seoul envelope
pub fn in_seoul_box(coordinate: &Coordinate) -> bool {
    (SEOUL_LAT_MIN..=SEOUL_LAT_MAX).contains(&coordinate.latitude)
        && (SEOUL_LNG_MIN..=SEOUL_LNG_MAX).contains(&coordinate.longitude)
}

fn has_map_element(doc: &Html) -> bool {
    MAP_ELEMENT_SELECTORS.iter().any(|selector| {
        Selector::parse(selector)
            .map(|sel| doc.select(&sel).next().is_some())
            .unwrap_or(false)
    })
}

/// Both halves parse or the pair is discarded
fn parse_pair(
    lat: Option<regex::Match<'_>>,
    lng: Option<regex::Match<'_>>,
) -> Option<Coordinate> {
    let latitude = lat?.as_str().parse::<f64>().ok()?;
    let longitude = lng?.as_str().parse::<f64>().ok()?;
    Some(Coordinate {
        latitude,
        longitude,
    })
}

fn map_iframe_coordinates(doc: &Html) -> Option<Coordinate> {
    let iframes = Selector::parse("iframe[src]").ok()?;
    let re = Regex::new(IFRAME_QUERY_PATTERN).ok()?;

    for iframe in doc.select(&iframes) {
        let src = iframe.value().attr("src").unwrap_or_default();
        if !MAP_IFRAME_DOMAINS.iter().any(|domain| src.contains(domain)) {
            continue;
        }
        if let Some(caps) = re.captures(src) {
            if let Some(coordinate) = parse_pair(caps.get(1), caps.get(2)) {
                if in_seoul_box(&coordinate) {
                    return Some(coordinate);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        assert!(in_seoul_box(&Coordinate {
            latitude: 37.5796,
            longitude: 126.977,
        }));
        assert!(!in_seoul_box(&Coordinate {
            latitude: 35.1796,
            longitude: 129.0756,
        }));
    }

    #[test]
    fn test_no_map_element_means_no_scan() {
        let html = r#"<p>"lat":37.5796,"lng":126.977</p>"#;
        let doc = Html::parse_document(html);
        assert!(extract_coordinates(&doc, html).is_none());
    }
}
