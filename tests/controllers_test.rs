use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use anandam::filters::{compose, matches_all, FilterCriteria};
use anandam::models::property::{create_test_record, PropertyRecord};
use anandam::store::PropertyStore;

/// In-memory store with configurable artificial latency, keyed by the
/// search text (listing) or slug (detail), so tests can force an older
/// request to finish after a newer one.
struct SlowStore {
    records: Vec<PropertyRecord>,
    delays_ms: HashMap<String, u64>,
    fail: bool,
}

impl SlowStore {
    fn with_records(records: Vec<PropertyRecord>) -> SlowStore {
        SlowStore {
            records,
            delays_ms: HashMap::new(),
            fail: false,
        }
    }

    async fn stall(&self, key: &str) {
        if let Some(millis) = self.delays_ms.get(key) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
    }
}

#[async_trait]
impl PropertyStore for SlowStore {
    async fn list_properties(&self, criteria: &FilterCriteria) -> Result<Vec<PropertyRecord>> {
        self.stall(&criteria.search).await;
        if self.fail {
            return Err(anyhow!("store unreachable"));
        }
        let constraints = compose(criteria);
        Ok(self
            .records
            .iter()
            .filter(|record| matches_all(&constraints, record))
            .cloned()
            .collect())
    }

    async fn property_by_slug(&self, slug: &str) -> Result<Vec<PropertyRecord>> {
        self.stall(slug).await;
        if self.fail {
            return Err(anyhow!("store unreachable"));
        }
        Ok(self
            .records
            .iter()
            .filter(|record| record.slug == slug)
            .take(2)
            .cloned()
            .collect())
    }
}

mod listing {
    use super::*;
    use anandam::controllers::listing::{ListingController, ListingPhase};

    fn search(text: &str) -> FilterCriteria {
        FilterCriteria {
            search: text.to_string(),
            ..FilterCriteria::default()
        }
    }

    #[tokio::test]
    async fn later_criteria_win_over_slow_earlier_response() {
        let mut villa = create_test_record("villa-one");
        villa.title = "Alpine Villa".to_string();
        let mut flat = create_test_record("flat-one");
        flat.title = "Lakeside Flat".to_string();

        let mut store = SlowStore::with_records(vec![villa, flat]);
        store.delays_ms.insert("Alpine".to_string(), 200);
        let controller = ListingController::new(Arc::new(store));

        controller.set_filters(search("Alpine")).await;
        controller.set_filters(search("Lakeside")).await;

        tokio::time::sleep(Duration::from_millis(400)).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, ListingPhase::Success);
        assert_eq!(snapshot.criteria, search("Lakeside"));
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].slug, "flat-one");
    }

    #[tokio::test]
    async fn empty_result_is_success_not_failed() {
        let store = SlowStore::with_records(vec![create_test_record("only")]);
        let controller = ListingController::new(Arc::new(store));

        controller.set_filters(search("no such place")).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, ListingPhase::Success);
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn store_failure_shows_failed_with_no_records() {
        let mut store = SlowStore::with_records(vec![create_test_record("only")]);
        store.fail = true;
        let controller = ListingController::new(Arc::new(store));

        controller.set_filters(FilterCriteria::default()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, ListingPhase::Failed);
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn new_snapshot_reenters_loading_after_failure() {
        let mut store = SlowStore::with_records(vec![create_test_record("only")]);
        store.fail = true;
        store.delays_ms.insert("slow".to_string(), 200);
        let controller = ListingController::new(Arc::new(store));

        controller.set_filters(FilterCriteria::default()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(controller.snapshot().await.phase, ListingPhase::Failed);

        controller.set_filters(search("slow")).await;
        assert_eq!(controller.snapshot().await.phase, ListingPhase::Loading);
    }
}

mod detail {
    use super::*;
    use anandam::controllers::detail::{DetailController, DetailPhase};

    #[tokio::test]
    async fn found_record_matches_requested_slug() {
        let store = SlowStore::with_records(vec![
            create_test_record("cedar-ridge"),
            create_test_record("other"),
        ]);
        let controller = DetailController::new(Arc::new(store));

        controller.load_slug("cedar-ridge".to_string()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = controller.snapshot().await;
        match snapshot.phase {
            DetailPhase::Found(record) => assert_eq!(record.slug, "cedar-ridge"),
            phase => panic!("expected Found, got {:?}", phase),
        }
    }

    #[tokio::test]
    async fn missing_slug_is_not_found() {
        let store = SlowStore::with_records(vec![create_test_record("cedar-ridge")]);
        let controller = DetailController::new(Arc::new(store));

        controller.load_slug("no-such-slug".to_string()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(controller.snapshot().await.phase, DetailPhase::NotFound);
    }

    #[tokio::test]
    async fn duplicate_slug_rows_fail_defensively() {
        let store = SlowStore::with_records(vec![
            create_test_record("twin"),
            create_test_record("twin"),
        ]);
        let controller = DetailController::new(Arc::new(store));

        controller.load_slug("twin".to_string()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(controller.snapshot().await.phase, DetailPhase::Failed);
    }

    #[tokio::test]
    async fn transport_error_is_failed_not_not_found() {
        let mut store = SlowStore::with_records(vec![create_test_record("cedar-ridge")]);
        store.fail = true;
        let controller = DetailController::new(Arc::new(store));

        controller.load_slug("cedar-ridge".to_string()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(controller.snapshot().await.phase, DetailPhase::Failed);
    }

    #[tokio::test]
    async fn newer_slug_supersedes_inflight_lookup() {
        let mut store = SlowStore::with_records(vec![
            create_test_record("slow-one"),
            create_test_record("fast-one"),
        ]);
        store.delays_ms.insert("slow-one".to_string(), 200);
        let controller = DetailController::new(Arc::new(store));

        controller.load_slug("slow-one".to_string()).await;
        controller.load_slug("fast-one".to_string()).await;

        tokio::time::sleep(Duration::from_millis(400)).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.slug, "fast-one");
        match snapshot.phase {
            DetailPhase::Found(record) => assert_eq!(record.slug, "fast-one"),
            phase => panic!("expected Found, got {:?}", phase),
        }
    }
}
