use regex::Regex;
use sha2::{Digest, Sha256};
use url::Url;

/// Site-native content identifiers: "KOP" followed by digits
const ID_SEGMENT_PATTERN: &str = r"^KOP\d+$";
const ID_ANYWHERE_PATTERN: &str = r"KOP\d+";

const SURROGATE_PREFIX: &str = "URL-";
const SURROGATE_HEX_CHARS: usize = 16;

/// Derive the stable identifier for a detail page URL.
///
/// Priority: the final path segment when it is a site-native id, then the
/// first id-shaped substring anywhere in the URL, then an `id` query
/// parameter, and finally the hashed surrogate. Some value is always
/// produced, so a record can never lack its key.
pub fn extract_identifier(detail_url: &str) -> String {
    match native_identifier(detail_url) {
        Some(id) => id,
        None => surrogate_identifier(detail_url),
    }
}

fn native_identifier(detail_url: &str) -> Option<String> {
    let segment_re = Regex::new(ID_SEGMENT_PATTERN).ok()?;
    let anywhere_re = Regex::new(ID_ANYWHERE_PATTERN).ok()?;

    let parsed = Url::parse(detail_url).ok();

    if let Some(ref url) = parsed {
        if let Some(last) = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        {
            if segment_re.is_match(last) {
                return Some(last.to_string());
            }
        }
    }

    if let Some(found) = anywhere_re.find(detail_url) {
        return Some(found.as_str().to_string());
    }

    if let Some(ref url) = parsed {
        for (key, value) in url.query_pairs() {
            if key == "id" && !value.is_empty() {
                return Some(value.into_owned());
            }
        }
    }

    None
}

/// Deterministic fallback key: `URL-` plus the first 16 hex characters of
/// the SHA-256 digest of the full URL string. The algorithm is pinned so
/// the same URL always maps to the same identifier.
pub fn surrogate_identifier(detail_url: &str) -> String {
    let digest = Sha256::digest(detail_url.as_bytes());
    let hash = hex::encode(digest);
    format!("{}{}", SURROGATE_PREFIX, &hash[..SURROGATE_HEX_CHARS])
}
