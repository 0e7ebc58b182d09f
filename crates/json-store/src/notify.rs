//! Notification dispatch around a [`Backend`].
//!
//! Writes run under the backend's exclusive lock and enqueue their update
//! record before the lock is released. Delivery happens afterwards, on
//! whichever thread wins the dispatch lock, so subscribers observe commits
//! in commit order and may call back into the store.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::{debug, trace};

use crate::backend::Backend;
use crate::error::StoreResult;
use crate::update::Update;

/// Receives batches of committed updates.
pub trait Subscriber: Send + Sync {
    fn on_update(&self, updates: &[Update]);
}

impl<F> Subscriber for F
where
    F: Fn(&[Update]) + Send + Sync,
{
    fn on_update(&self, updates: &[Update]) {
        self(updates)
    }
}

/// Unique within the process, so an id from a released store never names a
/// subscriber of another notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

type Subscribers = Vec<(SubscriptionId, Arc<dyn Subscriber>)>;

pub struct Notifier {
    backend: RwLock<Box<dyn Backend>>,
    subscribers: RwLock<Subscribers>,
    pending: Mutex<VecDeque<Vec<Update>>>,
    dispatch: Mutex<()>,
}

impl Notifier {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: RwLock::new(Box::new(backend)),
            subscribers: RwLock::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
            dispatch: Mutex::new(()),
        }
    }

    /// Runs `f` against the backend under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&dyn Backend) -> R) -> R {
        let backend = self.backend.read();
        f(&**backend)
    }

    pub fn version(&self) -> u64 {
        self.backend.read().version()
    }

    /// Snapshot and the version it belongs to, read atomically.
    pub fn snapshot_with_version(&self) -> (u64, Arc<Vec<Value>>) {
        let backend = self.backend.read();
        (backend.version(), backend.snapshot())
    }

    /// Runs a write and, if it succeeds, delivers its update.
    ///
    /// A failing `f` must leave the backend untouched; nothing is enqueued.
    pub fn commit<R>(
        &self,
        f: impl FnOnce(&mut dyn Backend) -> StoreResult<(R, Update)>,
    ) -> StoreResult<R> {
        let out = {
            let mut backend = self.backend.write();
            let (out, update) = f(&mut **backend)?;
            debug!(id = %update.id(), version = backend.version(), kind = %update.kind(), "committed");
            self.pending.lock().push_back(vec![update]);
            out
        };
        self.drain();
        Ok(out)
    }

    fn drain(&self) {
        loop {
            let Some(guard) = self.dispatch.try_lock() else {
                // Another thread is delivering and will pick up our batch.
                return;
            };
            loop {
                let next = self.pending.lock().pop_front();
                let Some(batch) = next else {
                    break;
                };
                let subscribers: Vec<_> = self
                    .subscribers
                    .read()
                    .iter()
                    .map(|(id, subscriber)| (*id, Arc::clone(subscriber)))
                    .collect();
                for (id, subscriber) in subscribers {
                    trace!(subscription = ?id, updates = batch.len(), "delivering");
                    subscriber.on_update(&batch);
                }
            }
            drop(guard);
            // A batch enqueued between our last pop and the unlock would
            // otherwise wait for the next commit.
            if self.pending.lock().is_empty() {
                return;
            }
        }
    }

    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, subscriber));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn unsubscribe_all(&self) {
        self.subscribers.write().clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("version", &self.version())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}
