//! Stub store shared by the service tests.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

use hometab_domain::DocumentId;

use crate::{
    error::StoreError,
    ports::{DocumentStore, Fields, SnapshotListener, Subscription},
};

/// Records every write without persisting or notifying anything.
#[derive(Default)]
pub struct RecordingStore {
    pub created: Mutex<Vec<(String, Fields)>>,
    pub updated: Mutex<Vec<(String, DocumentId, Fields)>>,
    pub deleted: Mutex<Vec<(String, DocumentId)>>,
    next_id: AtomicU64,
}

impl DocumentStore for RecordingStore {
    fn subscribe(
        &self,
        _collection: &str,
        _listener: SnapshotListener,
    ) -> Result<Subscription, StoreError> {
        Ok(Subscription(0))
    }

    fn unsubscribe(&self, _subscription: Subscription) {}

    fn create(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        self.created
            .lock()
            .unwrap()
            .push((collection.to_string(), fields));
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(DocumentId(format!("doc-{n}")))
    }

    fn update(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError> {
        self.updated
            .lock()
            .unwrap()
            .push((collection.to_string(), id.clone(), fields));
        Ok(())
    }

    fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        self.deleted
            .lock()
            .unwrap()
            .push((collection.to_string(), id.clone()));
        Ok(())
    }
}
