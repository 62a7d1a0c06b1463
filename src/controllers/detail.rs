use std::sync::Arc;

use log::error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::models::property::PropertyRecord;
use crate::store::PropertyStore;

/// Lifecycle of the detail view's data.
///
/// `NotFound` is a distinct user-visible state, not a failure: the slug
/// resolved cleanly to zero records.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Idle,
    Loading,
    Found(Box<PropertyRecord>),
    NotFound,
    Failed,
}

/// What a completed slug lookup means.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(Box<PropertyRecord>),
    NotFound,
    /// The slug matched more than one record, which the data model forbids.
    IntegrityViolation,
}

/// Classifies the rows returned for a slug equality query.
pub fn resolve_lookup(slug: &str, mut rows: Vec<PropertyRecord>) -> LookupOutcome {
    if rows.is_empty() {
        return LookupOutcome::NotFound;
    }
    if rows.len() > 1 {
        error!("slug {:?} matched {} records", slug, rows.len());
        return LookupOutcome::IntegrityViolation;
    }
    LookupOutcome::Found(Box::new(rows.remove(0)))
}

/// Immutable view of the controller for consumers.
#[derive(Debug, Clone)]
pub struct DetailSnapshot {
    pub phase: DetailPhase,
    pub slug: String,
}

struct DetailState {
    phase: DetailPhase,
    slug: String,
    latest_seq: u64,
    task: Option<JoinHandle<()>>,
}

/// Resolves one slug to one record, superseding in-flight lookups whenever
/// the slug changes.
pub struct DetailController {
    store: Arc<dyn PropertyStore>,
    state: Arc<Mutex<DetailState>>,
}

impl DetailController {
    pub fn new(store: Arc<dyn PropertyStore>) -> DetailController {
        DetailController {
            store,
            state: Arc::new(Mutex::new(DetailState {
                phase: DetailPhase::Idle,
                slug: String::new(),
                latest_seq: 0,
                task: None,
            })),
        }
    }

    /// Loads the record for `slug`. A lookup still in flight for an older
    /// slug is aborted, and its result is dropped even if it completes.
    pub async fn load_slug(&self, slug: String) {
        let mut state = self.state.lock().await;
        state.latest_seq += 1;
        let seq = state.latest_seq;
        state.phase = DetailPhase::Loading;
        state.slug = slug.clone();
        if let Some(task) = state.task.take() {
            task.abort();
        }

        let store = Arc::clone(&self.store);
        let shared = Arc::clone(&self.state);
        state.task = Some(tokio::task::spawn(async move {
            let outcome = store.property_by_slug(&slug).await;

            let mut state = shared.lock().await;
            if state.latest_seq != seq {
                return;
            }
            state.phase = match outcome {
                Ok(rows) => match resolve_lookup(&slug, rows) {
                    LookupOutcome::Found(record) => DetailPhase::Found(record),
                    LookupOutcome::NotFound => DetailPhase::NotFound,
                    LookupOutcome::IntegrityViolation => DetailPhase::Failed,
                },
                Err(err) => {
                    error!("detail query for {:?} failed: {:?}", slug, err);
                    DetailPhase::Failed
                }
            };
        }));
    }

    pub async fn snapshot(&self) -> DetailSnapshot {
        let state = self.state.lock().await;
        DetailSnapshot {
            phase: state.phase.clone(),
            slug: state.slug.clone(),
        }
    }
}
