use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use hometab_application::{
    Document, DocumentStore, Fields, SnapshotListener, StoreError, Subscription,
};
use hometab_domain::DocumentId;
use indexmap::IndexMap;

/// In-memory document store with the same contract as the hosted one:
/// generated ids, merge-updates, and a full ordered snapshot pushed to
/// every listener on subscribe and after each mutation.
pub struct MemoryStore {
    collections: DashMap<String, IndexMap<String, Fields>>,
    listeners: DashMap<String, Vec<(u64, SnapshotListener)>>,
    next_document: AtomicU64,
    next_subscription: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
            listeners: DashMap::new(),
            next_document: AtomicU64::new(1),
            next_subscription: AtomicU64::new(1),
        }
    }

    fn snapshot(&self, collection: &str) -> Vec<Document> {
        match self.collections.get(collection) {
            Some(documents) => documents
                .iter()
                .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Fans the current snapshot out to every listener on the collection.
    /// Guards are released before the callbacks run so a listener may
    /// re-enter the store.
    fn notify(&self, collection: &str) {
        let snapshot = self.snapshot(collection);
        let listeners: Vec<SnapshotListener> = match self.listeners.get(collection) {
            Some(listeners) => listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect(),
            None => Vec::new(),
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn subscribe(
        &self,
        collection: &str,
        listener: SnapshotListener,
    ) -> Result<Subscription, StoreError> {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .entry(collection.to_string())
            .or_default()
            .push((id, listener.clone()));

        // Initial snapshot, delivered synchronously on subscribe.
        listener(&self.snapshot(collection));
        Ok(Subscription(id))
    }

    fn unsubscribe(&self, subscription: Subscription) {
        for mut listeners in self.listeners.iter_mut() {
            listeners.retain(|(id, _)| *id != subscription.0);
        }
    }

    fn create(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        let id = format!("doc-{:06}", self.next_document.fetch_add(1, Ordering::Relaxed));
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        self.notify(collection);
        Ok(DocumentId(id))
    }

    fn update(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError> {
        {
            let mut documents =
                self.collections
                    .get_mut(collection)
                    .ok_or_else(|| StoreError::NotFound {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    })?;
            let document = documents
                .get_mut(id.as_str())
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            // Merge semantics: incoming fields overwrite, absent ones stay.
            document.extend(fields);
        }
        self.notify(collection);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        let removed = match self.collections.get_mut(collection) {
            Some(mut documents) => documents.shift_remove(id.as_str()).is_some(),
            None => false,
        };
        if !removed {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        self.notify(collection);
        Ok(())
    }
}
