//! The enrichment service.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use verselight_cache::ResponseCache;
use verselight_core::error::{Result, VerseError};
use verselight_core::traits::{CompletionClient, ScriptureClient, VideoSearchClient};

/// Per-feature request handling over shared clients and one shared cache.
///
/// Cheap to clone; every clone talks to the same clients and cache.
#[derive(Clone)]
pub struct Enricher {
    pub(crate) completion: Arc<dyn CompletionClient>,
    pub(crate) scripture: Arc<dyn ScriptureClient>,
    pub(crate) videos: Arc<dyn VideoSearchClient>,
    cache: Arc<ResponseCache>,
}

impl Enricher {
    /// Creates a service over the given clients and cache.
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        scripture: Arc<dyn ScriptureClient>,
        videos: Arc<dyn VideoSearchClient>,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            completion,
            scripture,
            videos,
            cache,
        }
    }

    /// The shared response cache.
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Returns the cached value for `key`, or computes, stores, and returns it.
    ///
    /// Only successful results are stored. A hit that no longer deserializes
    /// into `T` is dropped and recomputed.
    pub(crate) async fn cached<T, F, Fut>(&self, key: String, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.cache.get(&key) {
            match serde_json::from_value(hit) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding unreadable cache entry");
                    self.cache.remove(&key);
                }
            }
        }

        debug!(key = %key, "Cache miss");
        let value = compute().await?;
        self.cache.set(key, serde_json::to_value(&value)?);
        Ok(value)
    }
}

/// Trims every field and fails with `message` if any is empty.
pub(crate) fn require_fields<'a, const N: usize>(
    fields: [&'a str; N],
    message: &str,
) -> Result<[&'a str; N]> {
    let trimmed = fields.map(str::trim);
    if trimmed.iter().any(|f| f.is_empty()) {
        return Err(VerseError::InvalidInput(message.to_string()));
    }
    Ok(trimmed)
}
