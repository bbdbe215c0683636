use serde::{Deserialize, Serialize};

/// Minimum description length (in characters) for a record to count as
/// properly described.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// A latitude/longitude pair. Only ever constructed as a whole; a record
/// either has both values or neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One scraped place, assembled from a detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Stable external key. Site-native where the URL carries one,
    /// otherwise a deterministic surrogate derived from the URL.
    pub identifier: String,
    pub name: String,
    pub description: String,
    /// May be empty when no address could be extracted.
    pub address: String,
    pub coordinate: Option<Coordinate>,
}

impl PlaceRecord {
    pub fn has_valid_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn has_valid_identifier(&self) -> bool {
        !self.identifier.trim().is_empty()
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.coordinate.is_some()
    }

    pub fn has_valid_description(&self) -> bool {
        !self.description.is_empty()
            && self.description.chars().count() >= MIN_DESCRIPTION_CHARS
    }

    pub fn is_complete(&self) -> bool {
        self.has_valid_name()
            && self.has_valid_identifier()
            && self.has_valid_coordinates()
            && self.has_valid_description()
    }
}

/// How a scrape run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrapeStatus {
    /// At least one record was produced.
    Completed,
    /// The site was reachable but yielded no records on the final attempt.
    Empty,
    /// Every attempt failed; the retry budget is spent.
    Exhausted,
}

/// Result of a full scrape run. `places` is all the persistence side ever
/// consumes; `status` and `attempts` let callers tell a quiet night from a
/// broken scraper.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub places: Vec<PlaceRecord>,
    pub status: ScrapeStatus,
    pub attempts: u32,
}

impl ScrapeOutcome {
    pub fn into_places(self) -> Vec<PlaceRecord> {
        self.places
    }
}
