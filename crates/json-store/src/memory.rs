use std::collections::HashMap;
use std::sync::Arc;

use json_store_pointer::Pointer;
use serde_json::Value;

use crate::backend::{identity_of, Backend, PutRequest};
use crate::error::{StoreError, StoreResult};
use crate::update::{ItemUpdated, Update};

/// In-memory [`Backend`]: an ordered item vector plus an id → position index.
///
/// The vector is shared copy-on-write with outstanding snapshots, so a
/// reader's `Arc<Vec<Value>>` keeps describing the version it was taken at.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    id_path: Pointer,
    items: Arc<Vec<Value>>,
    index: HashMap<String, usize>,
    version: u64,
}

impl MemoryBackend {
    pub fn new(id_path: Pointer) -> Self {
        Self {
            id_path,
            items: Arc::new(Vec::new()),
            index: HashMap::new(),
            version: 0,
        }
    }

    /// Indexes `items` eagerly; two items sharing an identity is an error.
    pub fn from_items(id_path: Pointer, items: Vec<Value>) -> StoreResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let id = identity_of(item, &id_path)?;
            if index.insert(id.clone(), position).is_some() {
                return Err(StoreError::DuplicateIdentity { id });
            }
        }
        Ok(Self {
            id_path,
            items: Arc::new(items),
            index,
            version: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn require(&self, id: &str) -> StoreResult<usize> {
        self.position(id).ok_or_else(|| StoreError::UnknownIdentity { id: id.to_owned() })
    }

    fn replace_at(&mut self, position: usize, item: Value) -> Value {
        self.version += 1;
        std::mem::replace(&mut Arc::make_mut(&mut self.items)[position], item)
    }
}

impl Backend for MemoryBackend {
    fn id_path(&self) -> &Pointer {
        &self.id_path
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn snapshot(&self) -> Arc<Vec<Value>> {
        Arc::clone(&self.items)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn get(&self, id: &str) -> StoreResult<Value> {
        let position = self.require(id)?;
        Ok(self.items[position].clone())
    }

    fn add(&mut self, item: Value) -> StoreResult<Update> {
        let id = identity_of(&item, &self.id_path)?;
        if self.index.contains_key(&id) {
            return Err(StoreError::DuplicateIdentity { id });
        }
        let index = self.items.len();
        Arc::make_mut(&mut self.items).push(item.clone());
        self.index.insert(id.clone(), index);
        self.version += 1;
        Ok(Update::Added { id, item, index })
    }

    fn put(&mut self, request: PutRequest) -> StoreResult<Update> {
        match request {
            PutRequest::Item(item) => {
                let id = identity_of(&item, &self.id_path)?;
                let Some(position) = self.position(&id) else {
                    return self.add(item);
                };
                let old_item = self.replace_at(position, item.clone());
                Ok(Update::Updated(ItemUpdated::computed(id, old_item, item, position)))
            }
            PutRequest::Patch { id, patch } => {
                let position = self.require(&id)?;
                let item = patch.apply(self.items[position].clone())?;
                let next_id = identity_of(&item, &self.id_path)?;
                if next_id != id {
                    return Err(StoreError::IdentityChanged { from: id, to: next_id });
                }
                let old_item = self.replace_at(position, item.clone());
                Ok(Update::Updated(ItemUpdated::patched(id, old_item, item, position, patch)))
            }
        }
    }

    fn delete(&mut self, id: &str) -> StoreResult<Update> {
        let index = self.require(id)?;
        let items = Arc::make_mut(&mut self.items);
        items.remove(index);
        self.index.remove(id);
        // Only the suffix shifted.
        for (position, item) in items.iter().enumerate().skip(index) {
            if let Ok(id) = identity_of(item, &self.id_path) {
                self.index.insert(id, position);
            }
        }
        self.version += 1;
        Ok(Update::Deleted {
            id: id.to_owned(),
            index,
        })
    }
}
