use std::cmp::Ordering;
use std::sync::{Arc, Weak};

use json_store_patch::Patch;
use json_store_util::random_id;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::{debug, trace};

use crate::backend::{identity_of, PutRequest};
use crate::error::StoreResult;
use crate::filter::Filter;
use crate::memory::MemoryBackend;
use crate::notify::{Notifier, Subscriber, SubscriptionId};
use crate::options::StoreOptions;
use crate::path::IntoPath;
use crate::query::{apply_all, Query};
use crate::range::Range;
use crate::sort::Sort;
use crate::update::Update;

/// A queryable, observable collection of JSON items.
///
/// A root store owns its items. `filter`, `sort` and `range` derive views:
/// stores that read through to the same items with queries applied, and
/// that forward writes and subscriptions to the root. Cloning a `Store`
/// yields another handle to the same store or view.
///
/// ```
/// use json_store::{Filter, Store};
/// use serde_json::json;
///
/// let store = Store::from_items(vec![
///     json!({"id": "1", "key": 5}),
///     json!({"id": "2", "key": 7}),
///     json!({"id": "3", "key": 4}),
/// ]).unwrap();
///
/// let small = store.filter(Filter::new().less_than(5, "key"));
/// assert_eq!(*small.fetch(), vec![json!({"id": "3", "key": 4})]);
///
/// store.add(json!({"id": "4", "key": 1})).unwrap();
/// assert_eq!(small.fetch().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    options: StoreOptions,
    link: RwLock<Link>,
}

#[derive(Debug)]
enum Link {
    Root(Arc<Notifier>),
    View(ViewLink),
}

#[derive(Debug)]
struct ViewLink {
    root: Arc<Notifier>,
    queries: Vec<Query>,
    cache: Mutex<Option<(u64, Arc<Vec<Value>>)>>,
    forwarded: Mutex<Vec<SubscriptionId>>,
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriptionId,
    notifier: Weak<Notifier>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stops delivery. Removing twice is harmless.
    pub fn remove(&self) {
        if let Some(notifier) = self.notifier.upgrade() {
            notifier.unsubscribe(self.id);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let options = StoreOptions::default();
        let backend = MemoryBackend::new(options.id_path.clone());
        Self::root(options, backend)
    }

    pub fn from_items(items: Vec<Value>) -> StoreResult<Self> {
        Self::with_options(StoreOptions::default(), items)
    }

    pub fn with_options(options: StoreOptions, items: Vec<Value>) -> StoreResult<Self> {
        let backend = MemoryBackend::from_items(options.id_path.clone(), items)?;
        Ok(Self::root(options, backend))
    }

    fn root(options: StoreOptions, backend: MemoryBackend) -> Self {
        Self::from_link(options, Link::Root(Arc::new(Notifier::new(backend))))
    }

    fn from_link(options: StoreOptions, link: Link) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                options,
                link: RwLock::new(link),
            }),
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.inner.options
    }

    fn notifier(&self) -> Arc<Notifier> {
        match &*self.inner.link.read() {
            Link::Root(notifier) => Arc::clone(notifier),
            Link::View(view) => Arc::clone(&view.root),
        }
    }

    pub fn is_view(&self) -> bool {
        matches!(&*self.inner.link.read(), Link::View(_))
    }

    /// The version of the backing store.
    pub fn version(&self) -> u64 {
        self.notifier().version()
    }

    /// The queries this view applies, outermost last. Empty for a root.
    pub fn queries(&self) -> Vec<Query> {
        match &*self.inner.link.read() {
            Link::Root(_) => Vec::new(),
            Link::View(view) => view.queries.clone(),
        }
    }

    pub fn get(&self, id: &str) -> StoreResult<Value> {
        self.notifier().read(|backend| backend.get(id))
    }

    pub fn get_id(&self, item: &Value) -> StoreResult<String> {
        identity_of(item, &self.inner.options.id_path)
    }

    pub fn generate_id(&self) -> String {
        random_id()
    }

    /// Appends `item`. Its identity must be new.
    pub fn add(&self, item: Value) -> StoreResult<Value> {
        self.notifier().commit(|backend| {
            let update = backend.add(item)?;
            Ok((stored(&update), update))
        })
    }

    /// Replaces the item with the same identity, or appends it.
    pub fn put(&self, item: Value) -> StoreResult<Value> {
        self.notifier().commit(|backend| {
            let update = backend.put(PutRequest::Item(item))?;
            Ok((stored(&update), update))
        })
    }

    /// Applies `patch` to the stored item `id`; subscribers see `patch` as the diff.
    pub fn put_patch(&self, id: &str, patch: Patch) -> StoreResult<Value> {
        let id = id.to_owned();
        self.notifier().commit(|backend| {
            let update = backend.put(PutRequest::Patch { id, patch })?;
            Ok((stored(&update), update))
        })
    }

    /// Removes the item and returns its id.
    pub fn delete(&self, id: &str) -> StoreResult<String> {
        self.notifier().commit(|backend| {
            let update = backend.delete(id)?;
            Ok((update.id().to_owned(), update))
        })
    }

    /// Derives a view with `query` appended to this store's queries.
    pub fn query(&self, query: impl Into<Query>) -> Store {
        let (root, mut queries) = match &*self.inner.link.read() {
            Link::Root(notifier) => (Arc::clone(notifier), Vec::new()),
            Link::View(view) => (Arc::clone(&view.root), view.queries.clone()),
        };
        queries.push(query.into());
        Self::from_link(
            self.inner.options.clone(),
            Link::View(ViewLink {
                root,
                queries,
                cache: Mutex::new(None),
                forwarded: Mutex::new(Vec::new()),
            }),
        )
    }

    pub fn filter(&self, filter: Filter) -> Store {
        self.query(filter)
    }

    /// Filters by an arbitrary predicate over the whole item.
    pub fn filter_by(&self, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Store {
        self.query(Filter::new().custom(test))
    }

    pub fn create_filter(&self) -> Filter {
        Filter::new()
    }

    pub fn sort(&self, sort: Sort) -> Store {
        self.query(sort)
    }

    pub fn sort_by(
        &self,
        compare: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
        descending: bool,
    ) -> Store {
        self.query(Sort::by(compare, descending))
    }

    pub fn sort_by_field(&self, path: impl IntoPath, descending: bool) -> Store {
        self.query(Sort::by_field(path, descending))
    }

    pub fn range(&self, range: Range) -> Store {
        self.query(range)
    }

    pub fn range_of(&self, start: usize, count: usize) -> Store {
        self.query(Range::new(start, count))
    }

    /// Subscribes to every committed change of the backing store.
    pub fn subscribe(&self, subscriber: impl Subscriber + 'static) -> Subscription {
        let link = self.inner.link.read();
        let (notifier, forwarded) = match &*link {
            Link::Root(notifier) => (notifier, None),
            Link::View(view) => (&view.root, Some(&view.forwarded)),
        };
        let id = notifier.subscribe(Arc::new(subscriber));
        if let Some(forwarded) = forwarded {
            forwarded.lock().push(id);
        }
        Subscription {
            id,
            notifier: Arc::downgrade(notifier),
        }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let link = self.inner.link.read();
        match &*link {
            Link::Root(notifier) => {
                notifier.unsubscribe(id);
            }
            Link::View(view) => {
                view.root.unsubscribe(id);
                view.forwarded.lock().retain(|existing| *existing != id);
            }
        }
    }

    /// The items, with this view's queries applied.
    ///
    /// A view returns the same `Arc` until the backing store's version moves.
    pub fn fetch(&self) -> Arc<Vec<Value>> {
        match &*self.inner.link.read() {
            Link::Root(notifier) => notifier.read(|backend| backend.snapshot()),
            Link::View(view) => view.fetch(),
        }
    }

    /// Detaches this store.
    ///
    /// A view snapshots its current items into a root store of its own and
    /// drops every subscription it forwarded to its source. A root store
    /// drops all of its subscribers.
    pub fn release(&self) -> StoreResult<()> {
        let items = self.fetch();
        let mut link = self.inner.link.write();
        let view = match &*link {
            Link::Root(notifier) => {
                notifier.unsubscribe_all();
                debug!("released root store");
                return Ok(());
            }
            Link::View(view) => view,
        };
        let backend =
            MemoryBackend::from_items(self.inner.options.id_path.clone(), items.as_ref().clone())?;
        for id in view.forwarded.lock().drain(..) {
            view.root.unsubscribe(id);
        }
        debug!(items = backend.len(), "released view");
        *link = Link::Root(Arc::new(Notifier::new(backend)));
        Ok(())
    }
}

impl ViewLink {
    fn fetch(&self) -> Arc<Vec<Value>> {
        let (version, items) = self.root.snapshot_with_version();
        if let Some((seen, cached)) = &*self.cache.lock() {
            if *seen == version {
                return Arc::clone(cached);
            }
        }
        trace!(version, queries = self.queries.len(), "recomputing view");
        let computed = Arc::new(apply_all(&self.queries, &items));
        let mut cache = self.cache.lock();
        match &*cache {
            Some((seen, _)) if *seen >= version => {}
            _ => *cache = Some((version, Arc::clone(&computed))),
        }
        computed
    }
}

fn stored(update: &Update) -> Value {
    update.item().cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> Store {
        Store::from_items(vec![
            json!({"id": "1", "key": 5}),
            json!({"id": "2", "key": 7}),
            json!({"id": "3", "key": 4}),
        ])
        .unwrap()
    }

    #[test]
    fn views_forward_writes() {
        let store = store();
        let view = store.filter(Filter::new().greater_than(4, "key"));
        view.add(json!({"id": "4", "key": 0})).unwrap();
        assert_eq!(store.get("4").unwrap(), json!({"id": "4", "key": 0}));
        assert_eq!(view.fetch().len(), 2);
        assert_eq!(view.version(), store.version());
    }

    #[test]
    fn chained_views_accumulate_queries() {
        let view = store().sort_by_field("key", false).range_of(0, 2);
        assert!(view.is_view());
        assert_eq!(view.queries().len(), 2);
        let ids: Vec<_> = view.fetch().iter().map(|i| i["id"].clone()).collect();
        assert_eq!(ids, vec![json!("3"), json!("1")]);
    }

    #[test]
    fn view_cache_tracks_version() {
        let store = store();
        let view = store.filter_by(|item| item["key"].as_i64().unwrap_or(0) > 4);
        let first = view.fetch();
        assert!(Arc::ptr_eq(&first, &view.fetch()));
        store.delete("2").unwrap();
        let second = view.fetch();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn release_detaches_view() {
        let store = store();
        let view = store.sort_by_field("key", true);
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        view.subscribe(move |_: &[Update]| *counter.lock() += 1);
        view.release().unwrap();
        assert!(!view.is_view());

        store.add(json!({"id": "9", "key": 9})).unwrap();
        assert_eq!(*calls.lock(), 0);
        let ids: Vec<_> = view.fetch().iter().map(|i| i["id"].clone()).collect();
        assert_eq!(ids, vec![json!("2"), json!("1"), json!("3")]);

        view.delete("1").unwrap();
        assert!(store.get("1").is_ok());
    }

    #[test]
    fn generated_ids_differ() {
        let store = Store::new();
        assert_ne!(store.generate_id(), store.generate_id());
        assert_eq!(store.get_id(&json!({"id": 3})).unwrap(), "3");
    }
}
