use crate::models::{PlaceRecord, ScrapeStatus};
use crate::orchestrator::{Orchestrator, PlaceStrategy, SessionFactory};
use log::info;
use std::collections::HashMap;

/// Persistence collaborator. The store is authoritative for what is
/// already known; the pipeline itself never deduplicates.
pub trait PlaceStore {
    fn count(&self) -> usize;

    /// Upsert records by identifier. Returns how many were not known
    /// before.
    fn save(&mut self, places: &[PlaceRecord]) -> usize;
}

/// In-memory store keyed by identifier, for tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    places: HashMap<String, PlaceRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &str) -> Option<&PlaceRecord> {
        self.places.get(identifier)
    }
}

impl PlaceStore for MemoryStore {
    fn count(&self) -> usize {
        self.places.len()
    }

    fn save(&mut self, places: &[PlaceRecord]) -> usize {
        let mut inserted = 0;
        for place in places {
            if !self.places.contains_key(&place.identifier) {
                inserted += 1;
            }
            self.places.insert(place.identifier.clone(), place.clone());
        }
        inserted
    }
}

/// Trigger-side glue: runs scrapes off the caller's thread and reports
/// how many new places each run contributed. A scheduler owns the cadence
/// and simply awaits `run_scrape`.
pub struct ScrapeService<F, S, P>
where
    F: SessionFactory,
    S: PlaceStrategy<F::Session>,
    P: PlaceStore,
{
    orchestrator: Orchestrator<F, S>,
    store: P,
}

impl<F, S, P> ScrapeService<F, S, P>
where
    F: SessionFactory + Clone + Send + 'static,
    S: PlaceStrategy<F::Session> + Clone + Send + 'static,
    P: PlaceStore,
{
    pub fn new(orchestrator: Orchestrator<F, S>, store: P) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Run one scrape and persist the result. Returns the count of newly
    /// inserted places; an empty run reports zero, never an error.
    pub async fn run_scrape(&mut self) -> usize {
        let outcome = self.orchestrator.scrape_async().await;
        match outcome.status {
            ScrapeStatus::Completed => {
                info!("scrape completed with {} places", outcome.places.len())
            }
            ScrapeStatus::Empty => info!("scrape completed empty-handed"),
            ScrapeStatus::Exhausted => info!("scrape exhausted its retry budget"),
        }

        let inserted = self.store.save(&outcome.places);
        info!(
            "{} new places saved ({} known in total)",
            inserted,
            self.store.count()
        );
        inserted
    }

    /// Startup hook: scrape only when the store has nothing yet
    pub async fn run_if_empty(&mut self) -> Option<usize> {
        if self.store.count() == 0 {
            Some(self.run_scrape().await)
        } else {
            None
        }
    }
}
