use hometab_domain::DocumentId;
use serde_json::{json, Value};

use crate::{
    error::ValidationError,
    ports::{collections, DocumentStore},
};

/// Party registry writes: add and remove registered roommates.
pub struct RoommateService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> RoommateService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub fn add(&self, name: &str, email: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingRoommateName);
        }

        let email = email.trim();
        let Value::Object(fields) = json!({
            "name": name,
            "email": if email.is_empty() { Value::Null } else { json!(email) },
        }) else {
            unreachable!("roommate fields literal is an object");
        };
        if let Err(e) = self.store.create(collections::ROOMMATES, fields) {
            tracing::error!("Failed to create roommate: {:?}", e);
        }
        Ok(())
    }

    pub fn delete(&self, id: &DocumentId) {
        if let Err(e) = self.store.delete(collections::ROOMMATES, id) {
            tracing::error!("Failed to delete roommate {}: {:?}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingStore;
    use serde_json::json;

    #[test]
    fn add_trims_and_stores_the_name() {
        let store = RecordingStore::default();

        RoommateService::new(&store)
            .add("  Alice ", "a@x.io")
            .expect("named roommate");

        let created = store.created.lock().unwrap();
        let (collection, fields) = &created[0];
        assert_eq!(collection, "roommates");
        assert_eq!(fields["name"], json!("Alice"));
        assert_eq!(fields["email"], json!("a@x.io"));
    }

    #[test]
    fn missing_email_is_stored_as_null() {
        let store = RecordingStore::default();

        RoommateService::new(&store)
            .add("Bob", "")
            .expect("named roommate");

        let created = store.created.lock().unwrap();
        assert_eq!(created[0].1["email"], json!(null));
    }

    #[test]
    fn blank_name_is_rejected() {
        let store = RecordingStore::default();

        let result = RoommateService::new(&store).add("   ", "");

        assert_eq!(result, Err(ValidationError::MissingRoommateName));
        assert!(store.created.lock().unwrap().is_empty());
    }
}
