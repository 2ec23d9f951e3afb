//! Remote ranking and the remote-then-local fallback.
//!
//! The proxy round-trip is one attempt with a timeout. Anything that goes
//! wrong on the wire degrades silently to [`LocalRanker`]; the user never
//! sees a search error unless their own input was invalid.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{MAX_QUERY_LEN, MAX_RESULTS, item::MenuItem, ranker::LocalRanker};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SearchError {
    /// Bad caller input. The only variant a user ever sees.
    #[error("invalid query: {0}")]
    Validation(String),

    /// Could not reach the proxy at all.
    #[error("search proxy unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Proxy reachable but answered with a non-success status.
    #[error("search proxy returned status {status}")]
    Upstream { status: u16 },
}

/// Body of `POST /smart-search`, shared with the server crate.
#[derive(Debug, Serialize, Deserialize)]
pub struct SmartSearchRequest {
    pub query: String,
    pub menu: Vec<MenuItem>,
}

/// A ranking strategy: query plus candidates in, at most five items out,
/// best match first.
#[async_trait]
pub trait Ranker: Send + Sync {
    async fn rank(&self, query: &str, candidates: &[MenuItem])
    -> Result<Vec<MenuItem>, SearchError>;
}

#[async_trait]
impl Ranker for LocalRanker {
    async fn rank(
        &self,
        query: &str,
        candidates: &[MenuItem],
    ) -> Result<Vec<MenuItem>, SearchError> {
        // Resolves to the inherent, synchronous rank.
        Ok(LocalRanker::rank(self, query, candidates))
    }
}

/// Ranks by asking the smart-search proxy.
pub struct RemoteRanker {
    http: reqwest::Client,
    endpoint: String,
}

impl RemoteRanker {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build http client"),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Ranker for RemoteRanker {
    async fn rank(
        &self,
        query: &str,
        candidates: &[MenuItem],
    ) -> Result<Vec<MenuItem>, SearchError> {
        let body = SmartSearchRequest {
            query: query.to_string(),
            menu: candidates.to_vec(),
        };

        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream {
                status: status.as_u16(),
            });
        }

        let mut items = response.json::<Vec<MenuItem>>().await?;
        // Contract cap, even against a proxy that over-answers.
        items.truncate(MAX_RESULTS);

        Ok(items)
    }
}

/// Remote-first search with a silent local fallback.
pub struct SmartSearch<R: Ranker> {
    remote: R,
    local: LocalRanker,
}

impl SmartSearch<RemoteRanker> {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_remote(RemoteRanker::new(endpoint))
    }
}

impl<R: Ranker> SmartSearch<R> {
    pub fn with_remote(remote: R) -> Self {
        Self {
            remote,
            local: LocalRanker,
        }
    }

    /// Validates the query, tries the remote ranker once, and falls back to
    /// the local heuristic on transport or upstream failure. Validation
    /// errors are the only ones that propagate.
    pub async fn search(
        &self,
        query: &str,
        candidates: &[MenuItem],
    ) -> Result<Vec<MenuItem>, SearchError> {
        validate_query(query)?;

        match self.remote.rank(query, candidates).await {
            Ok(items) => Ok(items),
            Err(SearchError::Validation(message)) => Err(SearchError::Validation(message)),
            Err(err) => {
                warn!("smart search degraded to local ranking: {err}");
                Ok(LocalRanker::rank(&self.local, query, candidates))
            }
        }
    }
}

pub fn validate_query(query: &str) -> Result<(), SearchError> {
    if query.is_empty() {
        return Err(SearchError::Validation("query must not be empty".into()));
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(SearchError::Validation(format!(
            "query too long (max {MAX_QUERY_LEN} chars)"
        )));
    }
    Ok(())
}
