// Remote repository - fetches the glossary from the public HTTP endpoint and
// caches it in memory.
//
// At most one fetch is in flight at any time: callers arriving during a load
// await the same shared future. A failed load clears the in-flight marker so
// the next call retries.

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use super::{ApiResponse, RepositoryError, TermRepository, TermSnapshot};
use crate::term::Term;
use crate::{debug, info, warn};

/// Public glossary endpoint
pub const DEFAULT_API_URL: &str = "https://translate.monta.app/public/api/glossary";

type SnapshotLoad = Shared<BoxFuture<'static, Result<Arc<TermSnapshot>, RepositoryError>>>;

/// A load that has been started but not yet settled
struct InFlight {
    ticket: u64,
    load: SnapshotLoad,
}

/// Cached snapshot plus the load currently producing one
#[derive(Default)]
struct CacheState {
    snapshot: Option<Arc<TermSnapshot>>,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

/// Repository backed by the remote glossary endpoint
pub struct RemoteRepository {
    client: reqwest::Client,
    url: String,
    cache: Mutex<CacheState>,
}

impl RemoteRepository {
    /// Create a repository for `url` with an optional request timeout
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RepositoryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        Ok(Self::with_client(client, url))
    }

    /// Create a repository around an existing HTTP client
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            cache: Mutex::new(CacheState::default()),
        }
    }

    /// Endpoint this repository reads from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// True once a snapshot has been loaded and not invalidated
    pub fn is_cached(&self) -> bool {
        self.cache.lock().snapshot.is_some()
    }

    /// Return the cached snapshot, loading it first if needed
    async fn ensure_loaded(&self) -> Result<Arc<TermSnapshot>, RepositoryError> {
        let (ticket, load) = {
            let mut cache = self.cache.lock();
            if let Some(snapshot) = &cache.snapshot {
                return Ok(snapshot.clone());
            }

            match &cache.in_flight {
                Some(in_flight) => {
                    debug!("Glossary load already in flight, waiting for it");
                    (in_flight.ticket, in_flight.load.clone())
                }
                None => {
                    cache.next_ticket += 1;
                    let ticket = cache.next_ticket;
                    let load = fetch_snapshot(self.client.clone(), self.url.clone())
                        .boxed()
                        .shared();
                    cache.in_flight = Some(InFlight {
                        ticket,
                        load: load.clone(),
                    });
                    (ticket, load)
                }
            }
        };

        let result = load.await;

        // Only the load that is still current may settle the cache; a refresh
        // in the meantime has replaced or dropped it.
        let mut cache = self.cache.lock();
        if cache
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.ticket == ticket)
        {
            cache.in_flight = None;
            match &result {
                Ok(snapshot) => cache.snapshot = Some(snapshot.clone()),
                Err(e) => warn!("Glossary load failed, next request will retry: {}", e),
            }
        }

        result
    }
}

/// Fetch and decode the glossary
async fn fetch_snapshot(
    client: reqwest::Client,
    url: String,
) -> Result<Arc<TermSnapshot>, RepositoryError> {
    debug!("Fetching glossary from {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| RepositoryError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(RepositoryError::Fetch(format!(
            "HTTP error from {}: {}",
            url,
            response.status()
        )));
    }

    let body: ApiResponse = response
        .json()
        .await
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let snapshot = TermSnapshot::new(body.into_terms());
    info!("Loaded {} glossary terms from {}", snapshot.len(), url);
    Ok(Arc::new(snapshot))
}

#[async_trait]
impl TermRepository for RemoteRepository {
    async fn get_by_name(&self, name: &str) -> Result<Option<Term>, RepositoryError> {
        Ok(self.ensure_loaded().await?.get_by_name(name).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Term>, RepositoryError> {
        Ok(self.ensure_loaded().await?.search(query))
    }

    async fn get_by_tag(&self, tag: &str) -> Result<Vec<Term>, RepositoryError> {
        Ok(self.ensure_loaded().await?.get_by_tag(tag))
    }

    async fn list_all(&self) -> Result<Vec<Term>, RepositoryError> {
        Ok(self.ensure_loaded().await?.terms().to_vec())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.ensure_loaded().await?.len())
    }

    async fn languages(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.ensure_loaded().await?.languages())
    }

    /// Drop the cached snapshot and any pending load, then fetch again
    async fn refresh(&self) -> Result<(), RepositoryError> {
        {
            let mut cache = self.cache.lock();
            cache.snapshot = None;
            cache.in_flight = None;
        }
        info!("Refreshing glossary from {}", self.url);
        self.ensure_loaded().await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;
