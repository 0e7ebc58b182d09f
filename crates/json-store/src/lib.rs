//! json-store - an in-memory, queryable, observable collection of JSON items.
//!
//! Items are [`serde_json::Value`]s identified by the value at a configurable
//! pointer (`/id` by default). A [`Store`] keeps them in insertion order,
//! versions every write, and notifies [`Subscriber`]s with [`Update`]
//! records. Derived views apply [`Filter`], [`Sort`] and [`Range`] queries
//! lazily and memoize the result until the next write.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use json_store::{Filter, Store, Update};
//! use serde_json::json;
//!
//! let store = Store::new();
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let sink = log.clone();
//! store.subscribe(move |updates: &[Update]| {
//!     for update in updates {
//!         sink.lock().unwrap().push(format!("{} {}", update.kind(), update.id()));
//!     }
//! });
//!
//! store.add(json!({"id": "a", "done": false})).unwrap();
//! store.put(json!({"id": "a", "done": true})).unwrap();
//!
//! let done = store.filter(Filter::new().equal_to(true, "done"));
//! assert_eq!(done.fetch().len(), 1);
//! assert_eq!(*log.lock().unwrap(), vec!["add a", "update a"]);
//! ```

mod backend;
mod error;
mod filter;
mod memory;
mod notify;
mod options;
mod path;
mod query;
mod range;
mod sort;
mod store;
mod update;

pub use backend::{identity_of, Backend, PutRequest};
pub use error::{QueryError, StoreError, StoreResult};
pub use filter::{BoolOp, Comparison, Filter, Member, Predicate, TestFn};
pub use memory::MemoryBackend;
pub use notify::{Notifier, Subscriber, SubscriptionId};
pub use options::StoreOptions;
pub use path::IntoPath;
pub use query::{apply_all, Query, QueryKind};
pub use range::Range;
pub use sort::{CompareFn, Sort, SortKey};
pub use store::{Store, Subscription};
pub use update::{ItemUpdated, Update, UpdateType};

pub use json_store_patch::{Operation, OperationKind, Patch, PatchError};
pub use json_store_pointer::Pointer;
