/// Orchestrator retry-machine tests with injected session and strategy
/// doubles. No browser is involved.
use seoul_place_scraper::browser::BrowserError;
use seoul_place_scraper::models::{PlaceRecord, ScrapeStatus};
use seoul_place_scraper::orchestrator::{Orchestrator, PlaceStrategy, RetryPolicy, SessionFactory};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct FakeSession;

/// Counts acquisitions and releases; optionally fails every acquire
#[derive(Clone, Default)]
struct CountingFactory {
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    refuse_launch: bool,
}

impl CountingFactory {
    fn refusing() -> Self {
        Self {
            refuse_launch: true,
            ..Self::default()
        }
    }
}

impl SessionFactory for CountingFactory {
    type Session = FakeSession;

    fn acquire(&self) -> Result<FakeSession, BrowserError> {
        if self.refuse_launch {
            return Err(BrowserError::InitializationError(
                "no usable chrome binary".to_string(),
            ));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession)
    }

    fn release(&self, _session: FakeSession) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Plays back a scripted result per attempt; empty-handed once the
/// script runs out
#[derive(Clone)]
struct ScriptedStrategy {
    script: Arc<Mutex<Vec<Result<Vec<PlaceRecord>, BrowserError>>>>,
}

impl ScriptedStrategy {
    fn new(script: Vec<Result<Vec<PlaceRecord>, BrowserError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
        }
    }
}

impl PlaceStrategy<FakeSession> for ScriptedStrategy {
    fn execute(&self, _session: &FakeSession) -> Result<Vec<PlaceRecord>, BrowserError> {
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            Ok(Vec::new())
        } else {
            script.remove(0)
        }
    }
}

fn place(id: &str) -> PlaceRecord {
    PlaceRecord {
        identifier: id.to_string(),
        name: format!("장소 {}", id),
        description: "스크랩한 설명 텍스트가 여기에 들어간다.".to_string(),
        address: "서울특별시 중구".to_string(),
        coordinate: None,
    }
}

/// Millisecond backoff so retry tests stay fast
fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        backoff_base_millis: 1,
    }
}

#[test]
fn empty_first_attempt_is_retried_and_second_list_returned() {
    let factory = CountingFactory::default();
    let strategy = ScriptedStrategy::new(vec![
        Ok(Vec::new()),
        Ok(vec![place("KOP1"), place("KOP2")]),
    ]);
    let orchestrator = Orchestrator::with_policy(factory.clone(), strategy, fast_policy());

    let outcome = orchestrator.scrape();

    assert_eq!(outcome.status, ScrapeStatus::Completed);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.places.len(), 2);
    assert_eq!(outcome.places[0].identifier, "KOP1");

    // One session per attempt, each released exactly once
    assert_eq!(factory.acquired.load(Ordering::SeqCst), 2);
    assert_eq!(factory.released.load(Ordering::SeqCst), 2);
}

#[test]
fn first_attempt_success_needs_no_retry() {
    let factory = CountingFactory::default();
    let strategy = ScriptedStrategy::new(vec![Ok(vec![place("KOP9")])]);
    let orchestrator = Orchestrator::with_policy(factory.clone(), strategy, fast_policy());

    let outcome = orchestrator.scrape();

    assert_eq!(outcome.status, ScrapeStatus::Completed);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(factory.released.load(Ordering::SeqCst), 1);
}

#[test]
fn always_empty_strategy_exhausts_quietly() {
    let factory = CountingFactory::default();
    let strategy = ScriptedStrategy::new(vec![]);
    let orchestrator = Orchestrator::with_policy(factory.clone(), strategy, fast_policy());

    let outcome = orchestrator.scrape();

    assert_eq!(outcome.attempts, 2);
    assert!(outcome.places.is_empty());
    assert_eq!(outcome.status, ScrapeStatus::Empty);
    assert_eq!(factory.released.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_strategy_exhausts_the_budget() {
    let factory = CountingFactory::default();
    let strategy = ScriptedStrategy::new(vec![
        Err(BrowserError::NavigationError("listing timeout".to_string())),
        Err(BrowserError::Timeout("category page".to_string())),
    ]);
    let orchestrator = Orchestrator::with_policy(factory.clone(), strategy, fast_policy());

    let outcome = orchestrator.scrape();

    assert_eq!(outcome.status, ScrapeStatus::Exhausted);
    assert!(outcome.places.is_empty());
    // Sessions were still torn down after both failed attempts
    assert_eq!(factory.released.load(Ordering::SeqCst), 2);
}

#[test]
fn launch_failures_count_against_the_budget() {
    let factory = CountingFactory::refusing();
    let strategy = ScriptedStrategy::new(vec![Ok(vec![place("KOP1")])]);
    let orchestrator = Orchestrator::with_policy(factory.clone(), strategy, fast_policy());

    let outcome = orchestrator.scrape();

    assert_eq!(outcome.status, ScrapeStatus::Exhausted);
    assert_eq!(outcome.attempts, 2);
    // Nothing acquired, so nothing to release
    assert_eq!(factory.acquired.load(Ordering::SeqCst), 0);
    assert_eq!(factory.released.load(Ordering::SeqCst), 0);
}

#[test]
fn results_are_rebuilt_per_attempt_not_merged() {
    let factory = CountingFactory::default();
    let strategy = ScriptedStrategy::new(vec![
        Err(BrowserError::NavigationError("first attempt dies".to_string())),
        Ok(vec![place("KOP7")]),
    ]);
    let orchestrator = Orchestrator::with_policy(factory.clone(), strategy, fast_policy());

    let outcome = orchestrator.scrape();

    assert_eq!(outcome.status, ScrapeStatus::Completed);
    let ids: Vec<&str> = outcome
        .places
        .iter()
        .map(|p| p.identifier.as_str())
        .collect();
    assert_eq!(ids, ["KOP7"]);
}

#[tokio::test]
async fn service_reports_newly_inserted_places() {
    use seoul_place_scraper::store::{MemoryStore, PlaceStore, ScrapeService};

    let mut store = MemoryStore::new();
    store.save(&[place("KOP1")]);

    let strategy = ScriptedStrategy::new(vec![Ok(vec![place("KOP1"), place("KOP2")])]);
    let orchestrator =
        Orchestrator::with_policy(CountingFactory::default(), strategy, fast_policy());
    let mut service = ScrapeService::new(orchestrator, store);

    // KOP1 was already known, so only KOP2 counts as new
    assert_eq!(service.run_scrape().await, 1);
    assert_eq!(service.store().count(), 2);
}

#[tokio::test]
async fn startup_trigger_skips_a_populated_store() {
    use seoul_place_scraper::store::{MemoryStore, PlaceStore, ScrapeService};

    let mut store = MemoryStore::new();
    store.save(&[place("KOP1")]);

    let strategy = ScriptedStrategy::new(vec![Ok(vec![place("KOP2")])]);
    let orchestrator =
        Orchestrator::with_policy(CountingFactory::default(), strategy, fast_policy());
    let mut service = ScrapeService::new(orchestrator, store);

    assert_eq!(service.run_if_empty().await, None);
    assert_eq!(service.store().count(), 1);
}

#[tokio::test]
async fn async_wrapper_has_the_same_contract() {
    let factory = CountingFactory::default();
    let strategy = ScriptedStrategy::new(vec![Ok(Vec::new()), Ok(vec![place("KOP3")])]);
    let orchestrator = Orchestrator::with_policy(factory.clone(), strategy, fast_policy());

    let outcome = orchestrator.scrape_async().await;

    assert_eq!(outcome.status, ScrapeStatus::Completed);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(factory.released.load(Ordering::SeqCst), 2);
}
