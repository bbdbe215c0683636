use crate::browser::{BrowserConfig, BrowserError, BrowserManager, ScrapeSession};
use crate::models::{PlaceRecord, ScrapeOutcome, ScrapeStatus};
use crate::site::SeoulPlaceSite;
use log::{error, info, warn};
use std::time::Duration;

/// Produces and releases scrape sessions. The orchestrator acquires one
/// per attempt and releases it on every exit path.
pub trait SessionFactory {
    type Session;

    fn acquire(&self) -> Result<Self::Session, BrowserError>;
    fn release(&self, session: Self::Session);
}

impl SessionFactory for BrowserManager {
    type Session = ScrapeSession;

    fn acquire(&self) -> Result<ScrapeSession, BrowserError> {
        BrowserManager::acquire(self)
    }

    fn release(&self, session: ScrapeSession) {
        session.release();
    }
}

/// One full category/listing/detail traversal within one session
pub trait PlaceStrategy<S> {
    fn execute(&self, session: &S) -> Result<Vec<PlaceRecord>, BrowserError>;
}

impl PlaceStrategy<ScrapeSession> for SeoulPlaceSite {
    fn execute(&self, session: &ScrapeSession) -> Result<Vec<PlaceRecord>, BrowserError> {
        Ok(self.collect_places(session))
    }
}

/// Attempt budget and backoff curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base_millis: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_base_millis: 5000,
        }
    }
}

impl RetryPolicy {
    /// Delay inserted after failed attempt `attempt` (1-based), before the
    /// next one starts. Grows linearly with the attempt count.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_millis * u64::from(attempt))
    }
}

/// States of one scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Attempting { attempt: u32 },
    Retrying { next_attempt: u32 },
    Succeeded,
    Exhausted,
}

/// What a single attempt produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Non-empty record list
    Populated,
    /// Clean traversal, zero records. Soft failure, retried.
    Empty,
    /// Session launch or traversal error
    Failed,
}

/// Events driving the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeEvent {
    Start,
    AttemptFinished(AttemptOutcome),
    BackoffElapsed,
}

/// Pure transition function of the retry machine. Terminal states absorb
/// every event.
pub fn advance(state: AttemptState, event: ScrapeEvent, policy: &RetryPolicy) -> AttemptState {
    match (state, event) {
        (AttemptState::Idle, ScrapeEvent::Start) => AttemptState::Attempting { attempt: 1 },

        (AttemptState::Attempting { .. }, ScrapeEvent::AttemptFinished(AttemptOutcome::Populated)) => {
            AttemptState::Succeeded
        }
        (AttemptState::Attempting { attempt }, ScrapeEvent::AttemptFinished(_)) => {
            if attempt < policy.max_attempts {
                AttemptState::Retrying {
                    next_attempt: attempt + 1,
                }
            } else {
                AttemptState::Exhausted
            }
        }

        (AttemptState::Retrying { next_attempt }, ScrapeEvent::BackoffElapsed) => {
            AttemptState::Attempting {
                attempt: next_attempt,
            }
        }

        (state, _) => state,
    }
}

/// Drives the retry machine around the traversal: per attempt, acquire a
/// session, run the strategy, evaluate, and always release the session.
/// Nothing above attempt granularity ever escapes `scrape()` — the caller
/// gets a (possibly empty) outcome, never an error.
#[derive(Clone)]
pub struct Orchestrator<F, S>
where
    F: SessionFactory,
    S: PlaceStrategy<F::Session>,
{
    factory: F,
    strategy: S,
    policy: RetryPolicy,
}

impl Orchestrator<BrowserManager, SeoulPlaceSite> {
    /// Production pipeline against the live site
    pub fn visit_seoul(config: BrowserConfig) -> Self {
        Self::new(BrowserManager::new(config), SeoulPlaceSite::new())
    }
}

impl<F, S> Orchestrator<F, S>
where
    F: SessionFactory,
    S: PlaceStrategy<F::Session>,
{
    pub fn new(factory: F, strategy: S) -> Self {
        Self::with_policy(factory, strategy, RetryPolicy::default())
    }

    pub fn with_policy(factory: F, strategy: S, policy: RetryPolicy) -> Self {
        Self {
            factory,
            strategy,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run the scrape to completion, retrying per policy
    pub fn scrape(&self) -> ScrapeOutcome {
        let mut state = AttemptState::Idle;
        let mut places: Vec<PlaceRecord> = Vec::new();
        let mut last_outcome = AttemptOutcome::Empty;
        let mut attempts = 0;

        loop {
            match state {
                AttemptState::Idle => {
                    state = advance(state, ScrapeEvent::Start, &self.policy);
                }
                AttemptState::Attempting { attempt } => {
                    attempts = attempt;
                    last_outcome = self.run_attempt(attempt, &mut places);
                    state = advance(
                        state,
                        ScrapeEvent::AttemptFinished(last_outcome),
                        &self.policy,
                    );
                }
                AttemptState::Retrying { next_attempt } => {
                    let delay = self.policy.backoff_after(next_attempt - 1);
                    info!(
                        "retrying: attempt {}/{} in {:?}",
                        next_attempt, self.policy.max_attempts, delay
                    );
                    std::thread::sleep(delay);
                    state = advance(state, ScrapeEvent::BackoffElapsed, &self.policy);
                }
                AttemptState::Succeeded => {
                    info!(
                        "scrape finished: {} places after {} attempt(s)",
                        places.len(),
                        attempts
                    );
                    return ScrapeOutcome {
                        places,
                        status: ScrapeStatus::Completed,
                        attempts,
                    };
                }
                AttemptState::Exhausted => {
                    let status = match last_outcome {
                        AttemptOutcome::Empty => ScrapeStatus::Empty,
                        _ => ScrapeStatus::Exhausted,
                    };
                    warn!("scrape gave up after {} attempt(s): {:?}", attempts, status);
                    return ScrapeOutcome {
                        places,
                        status,
                        attempts,
                    };
                }
            }
        }
    }

    /// Async wrapper with the identical failure contract
    pub async fn scrape_async(&self) -> ScrapeOutcome
    where
        F: Clone + Send + 'static,
        S: Clone + Send + 'static,
    {
        let orchestrator = self.clone();
        match tokio::task::spawn_blocking(move || orchestrator.scrape()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("scrape task aborted: {}", e);
                ScrapeOutcome {
                    places: Vec::new(),
                    status: ScrapeStatus::Exhausted,
                    attempts: 0,
                }
            }
        }
    }

    /// One attempt: session up, traversal, session down. The record list
    /// is rebuilt from scratch, never merged across attempts.
    fn run_attempt(&self, attempt: u32, places: &mut Vec<PlaceRecord>) -> AttemptOutcome {
        places.clear();
        info!("scrape attempt {} starting", attempt);

        let session = match self.factory.acquire() {
            Ok(session) => session,
            Err(e) => {
                error!(
                    "attempt {}: browser session could not be created: {}",
                    attempt, e
                );
                return AttemptOutcome::Failed;
            }
        };

        let result = self.strategy.execute(&session);

        // Release before the result is inspected; a close failure is
        // logged inside release and cannot mask the attempt outcome
        self.factory.release(session);

        match result {
            Ok(records) if records.is_empty() => {
                warn!("attempt {} produced no places", attempt);
                AttemptOutcome::Empty
            }
            Ok(records) => {
                info!("attempt {} produced {} places", attempt, records.len());
                *places = records;
                AttemptOutcome::Populated
            }
            Err(e) if e.is_timeout() => {
                error!("attempt {} timed out: {}", attempt, e);
                AttemptOutcome::Failed
            }
            Err(e) => {
                error!("attempt {} failed: {}", attempt, e);
                AttemptOutcome::Failed
            }
        }
    }
}
