//! Periodic removal of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a task that sweeps expired entries every `every` until `shutdown`
/// flips to `true` or its sender is dropped.
///
/// Reads never depend on this task: stale entries are already hidden by
/// [`ResponseCache::get`]. The sweep only bounds memory held by entries that
/// are never read again.
pub fn spawn_sweeper<V>(
    cache: Arc<ResponseCache<V>>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await; // skip first immediate tick

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let removed = cache.cleanup_expired();
                    if removed > 0 {
                        info!(removed, remaining = cache.len(), "Cleaned up expired cache entries");
                    } else {
                        debug!("Cache sweep found nothing to remove");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Cache sweeper stopping");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Ttl;
    use serde_json::json;

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let cache: Arc<ResponseCache> = Arc::new(ResponseCache::new());
        cache.set_with_ttl("stale", json!(1), Ttl::After(Duration::from_millis(1)));
        cache.set("fresh", json!(2));

        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(cache.clone(), Duration::from_millis(20), rx);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.len(), 1);
        assert!(cache.get("fresh").is_some());

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweeper_stops_when_sender_dropped() {
        let cache: Arc<ResponseCache> = Arc::new(ResponseCache::new());
        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(cache, Duration::from_secs(3600), rx);

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should exit")
            .unwrap();
    }
}
