//! Session-lifetime cache of the full station collection.
//!
//! The collection is fetched lazily on first demand and then held for the
//! rest of the process. There is no TTL and no eviction. Concurrent callers
//! that arrive while the fetch is in flight wait on that same fetch rather
//! than issuing their own.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::{info, warn};

use crate::domain::StationRecord;
use crate::source::{SourceError, StationSource};

/// Every station in the dataset, in source order.
pub type StationCollection = Vec<StationRecord>;

/// The cache holds exactly one entry under the unit key.
type CollectionKey = ();

/// Lazily initialised, fetch-once station collection.
pub struct StationCache<S> {
    source: S,
    collection: MokaCache<CollectionKey, Arc<StationCollection>>,
}

impl<S: StationSource> StationCache<S> {
    /// Create an empty cache over `source`. Nothing is fetched yet.
    pub fn new(source: S) -> Self {
        Self {
            source,
            collection: MokaCache::builder().initial_capacity(1).build(),
        }
    }

    /// Get the station collection, fetching it on first use.
    ///
    /// Callers arriving while the fetch is outstanding share its result.
    /// Once loaded, every caller receives the same `Arc`.
    ///
    /// A failed fetch is reported to every caller that was waiting on it
    /// and is not cached: the next call fetches again.
    pub async fn collection(&self) -> Result<Arc<StationCollection>, Arc<SourceError>> {
        self.collection
            .try_get_with((), async {
                info!("fetching station collection");
                match self.source.fetch_all().await {
                    Ok(stations) => {
                        info!(count = stations.len(), "loaded station collection");
                        Ok(Arc::new(stations))
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to fetch station collection");
                        Err(e)
                    }
                }
            })
            .await
    }

    /// Whether the collection has finished loading.
    ///
    /// False while the first fetch is still in flight, and after a failure.
    pub fn has_cached_stations(&self) -> bool {
        self.collection.contains_key(&())
    }

    /// The underlying source, for structured queries that bypass the cache.
    pub fn source(&self) -> &S {
        &self.source
    }
}
