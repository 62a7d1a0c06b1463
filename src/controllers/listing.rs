use std::sync::Arc;

use log::error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::filters::FilterCriteria;
use crate::models::property::PropertyRecord;
use crate::store::PropertyStore;

/// Lifecycle of the listing view's data. No state is terminal; every new
/// criteria snapshot re-enters `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Immutable view of the controller for consumers.
#[derive(Debug, Clone)]
pub struct ListingSnapshot {
    pub phase: ListingPhase,
    pub records: Vec<PropertyRecord>,
    pub criteria: FilterCriteria,
}

struct ListingState {
    phase: ListingPhase,
    records: Vec<PropertyRecord>,
    criteria: FilterCriteria,
    latest_seq: u64,
    task: Option<JoinHandle<()>>,
}

/// Orchestrates listing fetches: one owned task per criteria snapshot, last
/// submitted snapshot wins regardless of response arrival order.
pub struct ListingController {
    store: Arc<dyn PropertyStore>,
    state: Arc<Mutex<ListingState>>,
}

impl ListingController {
    pub fn new(store: Arc<dyn PropertyStore>) -> ListingController {
        ListingController {
            store,
            state: Arc::new(Mutex::new(ListingState {
                phase: ListingPhase::Idle,
                records: Vec::new(),
                criteria: FilterCriteria::default(),
                latest_seq: 0,
                task: None,
            })),
        }
    }

    /// Replaces the current criteria and issues the composed query.
    ///
    /// The previously owned fetch task is aborted; cancellation is best
    /// effort, so even a task that survives to completion finds its
    /// sequence number superseded and drops its result.
    pub async fn set_filters(&self, criteria: FilterCriteria) {
        let mut state = self.state.lock().await;
        state.latest_seq += 1;
        let seq = state.latest_seq;
        state.phase = ListingPhase::Loading;
        state.criteria = criteria.clone();
        if let Some(task) = state.task.take() {
            task.abort();
        }

        let store = Arc::clone(&self.store);
        let shared = Arc::clone(&self.state);
        state.task = Some(tokio::task::spawn(async move {
            let outcome = store.list_properties(&criteria).await;

            let mut state = shared.lock().await;
            if state.latest_seq != seq {
                // superseded while in flight
                return;
            }
            match outcome {
                Ok(records) => {
                    state.records = records;
                    state.phase = ListingPhase::Success;
                }
                Err(err) => {
                    error!("listing query failed: {:?}", err);
                    state.records = Vec::new();
                    state.phase = ListingPhase::Failed;
                }
            }
        }));
    }

    pub async fn snapshot(&self) -> ListingSnapshot {
        let state = self.state.lock().await;
        ListingSnapshot {
            phase: state.phase,
            records: state.records.clone(),
            criteria: state.criteria.clone(),
        }
    }
}
