use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;

use crate::config::VotesConfig;
use crate::RawSignals;

#[derive(Error, Debug)]
pub enum VoteError {
    #[error("invalid video id: {0:?}")]
    InvalidId(String),
    #[error("vote request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("vote service error {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteData {
    pub likes: i64,
    pub dislikes: i64,
    pub view_count: i64,
}

impl VoteData {
    pub fn into_signals(
        self,
        subscribers: Option<i64>,
        days_old: Option<f64>,
        title: Option<String>,
    ) -> RawSignals {
        RawSignals {
            likes: Some(self.likes),
            dislikes: Some(self.dislikes),
            view_count: Some(self.view_count),
            subscribers,
            days_old,
            title,
        }
    }
}

struct CacheSlot {
    created: Instant,
    cell: OnceCell<VoteData>,
}

impl CacheSlot {
    fn new() -> Self {
        Self {
            created: Instant::now(),
            cell: OnceCell::new(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created.elapsed() >= ttl
    }
}

/// Keyed store with a fixed time-to-live. Concurrent lookups for the same
/// key share one in-flight fetch; a failed fetch removes its slot.
pub struct VoteCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, Arc<CacheSlot>>>,
}

impl VoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<VoteData, VoteError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<VoteData, VoteError>>,
    {
        let slot = {
            let mut guard = self.slots.lock().await;
            let live = guard
                .get(key)
                .filter(|slot| !slot.is_expired(self.ttl))
                .cloned();
            match live {
                Some(slot) => slot,
                None => {
                    if guard.contains_key(key) {
                        tracing::debug!(video_id = key, "vote cache entry expired");
                    }
                    let slot = Arc::new(CacheSlot::new());
                    guard.insert(key.to_string(), slot.clone());
                    slot
                }
            }
        };

        let result = slot.cell.get_or_try_init(fetch).await.copied();
        if result.is_err() {
            let mut guard = self.slots.lock().await;
            if guard.get(key).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
                guard.remove(key);
            }
        }
        result
    }

    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.slots.lock().await;
        let before = guard.len();
        guard.retain(|_, slot| !slot.is_expired(self.ttl));
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);
        let period = period.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = weak.upgrade() else {
                    break;
                };
                let purged = cache.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "purged expired vote cache entries");
                }
            }
        })
    }
}

#[derive(Clone)]
pub struct VoteClient {
    client: reqwest::Client,
    endpoint: String,
    cache: Arc<VoteCache>,
}

impl VoteClient {
    pub fn from_config(config: &VotesConfig) -> Result<Self, VoteError> {
        VoteClient::new(
            config.endpoint.clone(),
            Duration::from_millis(config.timeout_ms),
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    pub fn new(endpoint: String, timeout: Duration, cache_ttl: Duration) -> Result<Self, VoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            cache: Arc::new(VoteCache::new(cache_ttl)),
        })
    }

    pub fn cache(&self) -> &Arc<VoteCache> {
        &self.cache
    }

    pub async fn fetch(&self, video_id: &str) -> Result<VoteData, VoteError> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(VoteError::InvalidId(video_id.to_string()));
        }
        self.cache
            .get_or_fetch(video_id, || self.fetch_uncached(video_id))
            .await
    }

    async fn fetch_uncached(&self, video_id: &str) -> Result<VoteData, VoteError> {
        let url = format!(
            "{}/Votes?videoId={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(video_id)
        );
        tracing::debug!(video_id, "fetching vote data");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(video_id, status = status.as_u16(), "vote service returned an error");
            return Err(VoteError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(response.json::<VoteData>().await?)
    }
}
