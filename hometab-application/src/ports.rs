use std::sync::Arc;

use hometab_domain::DocumentId;
use serde_json::{Map, Value};

use crate::error::{AuthError, StoreError};

/// Logical collection names at the store boundary.
pub mod collections {
    pub const ROOMMATES: &str = "roommates";
    pub const EXPENSES: &str = "expenses";
    pub const PAYMENTS: &str = "payments";
    pub const CHORES: &str = "chores";
    pub const SHOPPING_LIST: &str = "shoppingList";
    pub const FRIDGE_INVENTORY: &str = "fridgeInventory";
}

/// Wire shape of a stored document's fields.
pub type Fields = Map<String, Value>;

/// A stored document: generated id plus caller-supplied fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: DocumentId(id.into()),
            fields,
        }
    }
}

/// Listener invoked with the full ordered contents of a collection, on
/// subscribe and after every subsequent mutation.
pub type SnapshotListener = Arc<dyn Fn(&[Document]) + Send + Sync>;

/// Token handed back by [`DocumentStore::subscribe`]; passing it to
/// [`DocumentStore::unsubscribe`] releases the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(pub u64);

/// Boundary with the hosted document database.
///
/// The store pushes complete collection snapshots, never deltas; a local
/// write is reflected only once the store notifies. Conflicting writes
/// resolve last-write-wins inside the store.
pub trait DocumentStore: Send + Sync {
    fn subscribe(
        &self,
        collection: &str,
        listener: SnapshotListener,
    ) -> Result<Subscription, StoreError>;

    fn unsubscribe(&self, subscription: Subscription);

    /// Appends a document; the store assigns the id.
    fn create(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError>;

    /// Merges `fields` into an existing document.
    fn update(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError>;

    fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError>;
}

/// Signed-in user as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
}

/// Boundary with the identity provider. All application functionality is
/// gated until [`IdentityProvider::restore`] resolves on startup.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self) -> Result<Session, AuthError>;

    fn sign_out(&self);

    /// Current session from a previous sign-in, if any.
    fn restore(&self) -> Option<Session>;
}
