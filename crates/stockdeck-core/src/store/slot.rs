// ── Cached collection slot ──
//
// One slot per collection key: the last-fetched snapshot, a binary stale
// flag, a by-id index, and the single in-flight fetch that concurrent
// readers share. Snapshots are published through a `watch` channel;
// mutating the snapshot is the coordinator's job alone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::sync::{Mutex, watch};

use crate::error::CoreError;
use crate::model::EntityId;
use crate::store::Identified;

type FetchOutcome<T> = Result<Arc<Vec<Arc<T>>>, CoreError>;
type SharedFetch<T> = Shared<BoxFuture<'static, FetchOutcome<T>>>;

/// A cached, refreshable snapshot of one remote collection.
///
/// All waiters on a refresh observe the same resolved snapshot or the
/// same error (the error type is `Clone` for exactly this reason).
/// Staleness is binary; there is no TTL and no eviction.
pub(crate) struct CollectionSlot<T> {
    /// Ordered snapshot as last returned by the service.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,

    /// Version counter, bumped every time a fetch lands.
    version: watch::Sender<u64>,

    /// Secondary index for O(1) id lookups.
    index: DashMap<EntityId, Arc<T>>,

    /// Whether any fetch has ever succeeded.
    loaded: AtomicBool,

    /// Set by the mutation coordinator; cleared when a fetch lands.
    stale: AtomicBool,

    /// The single outstanding fetch, if one is in flight.
    inflight: Mutex<Option<SharedFetch<T>>>,
}

impl<T> CollectionSlot<T>
where
    T: Identified + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);

        Self {
            snapshot,
            version,
            index: DashMap::new(),
            loaded: AtomicBool::new(false),
            stale: AtomicBool::new(false),
            inflight: Mutex::new(None),
        }
    }

    // ── Snapshot access ──────────────────────────────────────────────

    /// The current snapshot (cheap `Arc` clone; possibly stale).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    /// Look up an entity by id in the current snapshot.
    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.index.get(id).map(|r| Arc::clone(r.value()))
    }

    /// The current snapshot version. Unchanged fetches never happen --
    /// every landed fetch bumps this, and nothing else does.
    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    // ── Status flags ─────────────────────────────────────────────────

    pub(crate) fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub(crate) fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Mark the snapshot as needing a refetch before it counts as
    /// authoritative again. The data itself is untouched.
    pub(crate) fn mark_stale(&self) {
        self.stale.store(true, Ordering::Release);
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Run `fetch` and install its result, coalescing with any fetch
    /// already in flight: concurrent callers share one network request
    /// and all receive the identical outcome. The in-flight slot is
    /// cleared when the fetch resolves, so a later refresh issues a
    /// fresh request.
    pub(crate) async fn refresh<F>(self: Arc<Self>, fetch: F) -> FetchOutcome<T>
    where
        F: Future<Output = Result<Vec<T>, CoreError>> + Send + 'static,
    {
        let shared = {
            let mut guard = self.inflight.lock().await;
            if let Some(existing) = guard.as_ref() {
                // Someone is already fetching; join them. `fetch` is
                // dropped unexecuted.
                existing.clone()
            } else {
                let slot = Arc::clone(&self);
                let fut: BoxFuture<'static, FetchOutcome<T>> = Box::pin(async move {
                    let outcome = match fetch.await {
                        Ok(items) => Ok(slot.apply(items)),
                        Err(e) => Err(e),
                    };
                    *slot.inflight.lock().await = None;
                    outcome
                });
                let shared = fut.shared();
                *guard = Some(shared.clone());
                shared
            }
        };

        shared.await
    }

    /// Replace the snapshot with freshly fetched items, rebuild the
    /// index, and clear the stale flag.
    fn apply(&self, items: Vec<T>) -> Arc<Vec<Arc<T>>> {
        let items: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();

        self.index.clear();
        for item in &items {
            self.index.insert(item.id().clone(), Arc::clone(item));
        }

        let snap = Arc::new(items);
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|s| *s = Arc::clone(&snap));
        self.version.send_modify(|v| *v += 1);
        self.loaded.store(true, Ordering::Release);
        self.stale.store(false, Ordering::Release);
        snap
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;
    use crate::model::Product;

    fn product(id: &str, name: &str, quantity: u64) -> Product {
        Product {
            id: EntityId::from(id),
            name: name.into(),
            quantity,
            price: 1000.0,
        }
    }

    #[tokio::test]
    async fn refresh_installs_snapshot_and_index() {
        let slot = Arc::new(CollectionSlot::<Product>::new());
        assert!(!slot.is_loaded());
        assert!(slot.snapshot().is_empty());

        let snap = Arc::clone(&slot)
            .refresh(async { Ok(vec![product("a", "Pen", 10), product("b", "Ink", 3)]) })
            .await
            .unwrap();

        assert_eq!(snap.len(), 2);
        assert!(slot.is_loaded());
        assert_eq!(slot.get(&EntityId::from("a")).unwrap().name, "Pen");
        assert_eq!(slot.version(), 1);
    }

    #[tokio::test]
    async fn refresh_clears_stale_flag() {
        let slot = Arc::new(CollectionSlot::<Product>::new());
        Arc::clone(&slot)
            .refresh(async { Ok(vec![product("a", "Pen", 10)]) })
            .await
            .unwrap();

        slot.mark_stale();
        assert!(slot.is_stale());

        Arc::clone(&slot)
            .refresh(async { Ok(vec![product("a", "Pen", 5)]) })
            .await
            .unwrap();

        assert!(!slot.is_stale());
        assert_eq!(slot.get(&EntityId::from("a")).unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_snapshot_untouched() {
        let slot = Arc::new(CollectionSlot::<Product>::new());
        let before = Arc::clone(&slot)
            .refresh(async { Ok(vec![product("a", "Pen", 10)]) })
            .await
            .unwrap();

        let err = Arc::clone(&slot)
            .refresh(async {
                Err(CoreError::Unavailable {
                    message: "offline".into(),
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Unavailable { .. }));
        assert!(Arc::ptr_eq(&before, &slot.snapshot()));
        assert_eq!(slot.version(), 1);
    }

    #[tokio::test]
    async fn concurrent_refreshes_share_one_fetch() {
        let slot = Arc::new(CollectionSlot::<Product>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let fetch = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(vec![product("a", "Pen", 10)])
        };

        let (r1, r2, r3) = tokio::join!(
            Arc::clone(&slot).refresh(fetch(Arc::clone(&calls))),
            Arc::clone(&slot).refresh(fetch(Arc::clone(&calls))),
            Arc::clone(&slot).refresh(fetch(Arc::clone(&calls))),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let (r1, r2, r3) = (r1.unwrap(), r2.unwrap(), r3.unwrap());
        assert!(Arc::ptr_eq(&r1, &r2));
        assert!(Arc::ptr_eq(&r2, &r3));
    }

    #[tokio::test]
    async fn refresh_after_resolution_fetches_again() {
        let slot = Arc::new(CollectionSlot::<Product>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = Arc::clone(&calls);
            Arc::clone(&slot)
                .refresh(async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![product("a", "Pen", 10)])
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(slot.version(), 2);
    }
}
