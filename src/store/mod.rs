pub mod query;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::Config;
use crate::filters::{self, FilterCriteria};
use crate::models::property::PropertyRecord;
use query::{Direction, QueryBuilder};

/// Collection holding one row per listing.
pub const PROPERTY_COLLECTION: &str = "projects";

/// Read access to the property collection, however it is hosted.
///
/// Controllers talk to this seam so tests can drive them against an
/// in-memory store.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Records matching `criteria`, most recently created first.
    async fn list_properties(&self, criteria: &FilterCriteria) -> Result<Vec<PropertyRecord>>;

    /// Records whose slug equals `slug`. Implementations return at most two
    /// rows; callers decide what zero, one or many matches mean.
    async fn property_by_slug(&self, slug: &str) -> Result<Vec<PropertyRecord>>;
}

/// Client for the hosted store's REST surface. The site never writes.
pub struct StoreClient {
    http: reqwest::Client,
    rest_base: String,
}

impl StoreClient {
    pub fn new(config: &Config) -> Result<StoreClient> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.store_anon_key)
                .context("store key is not a valid header value")?,
        );
        let bearer = format!("Bearer {}", config.store_anon_key);
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).context("store key is not a valid header value")?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(StoreClient {
            http,
            rest_base: format!("{}/rest/v1", config.store_url.trim_end_matches('/')),
        })
    }

    pub fn query(&self, collection: &str) -> QueryBuilder {
        QueryBuilder::new(self.http.clone(), &self.rest_base, collection)
    }
}

#[async_trait]
impl PropertyStore for StoreClient {
    async fn list_properties(&self, criteria: &FilterCriteria) -> Result<Vec<PropertyRecord>> {
        let mut builder = self.query(PROPERTY_COLLECTION);
        for constraint in filters::compose(criteria) {
            builder = constraint.apply(builder);
        }
        // Fixed ordering, not user selectable: newest listings first.
        builder
            .order("created_at", Direction::Descending)
            .execute()
            .await
    }

    async fn property_by_slug(&self, slug: &str) -> Result<Vec<PropertyRecord>> {
        // limit 2 keeps a uniqueness violation observable without pulling
        // the whole collection.
        self.query(PROPERTY_COLLECTION)
            .eq("slug", slug)
            .limit(2)
            .execute()
            .await
    }
}
