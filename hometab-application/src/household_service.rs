use chrono::Local;
use hometab_domain::{Chore, DocumentId, FridgeItem, ShoppingItem};
use serde_json::{json, Value};

use crate::{
    error::ValidationError,
    ports::{collections, DocumentStore, Fields},
};

fn object(value: Value) -> Fields {
    let Value::Object(fields) = value else {
        unreachable!("household fields literals are objects");
    };
    fields
}

/// Unsaved fridge item as entered by the user.
#[derive(Clone, Debug)]
pub struct FridgeDraft {
    pub name: String,
    pub owners: Vec<String>,
    pub kind: String,
    pub packed_on: String,
    pub expires: String,
}

impl Default for FridgeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            owners: vec!["Shared".to_string()],
            kind: "Fridge".to_string(),
            packed_on: String::new(),
            expires: String::new(),
        }
    }
}

/// Writes for the non-ledger collections: chores, the shopping list, and
/// the fridge inventory.
pub struct HouseholdService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> HouseholdService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub fn add_chore(
        &self,
        name: &str,
        assigned_to: &[String],
        due_date: &str,
    ) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingChoreName);
        }

        let fields = object(json!({
            "name": name,
            "assignedTo": assigned_to,
            "isCompleted": false,
            "date": Local::now().date_naive().to_string(),
            "dueDate": due_date,
        }));
        if let Err(e) = self.store.create(collections::CHORES, fields) {
            tracing::error!("Failed to create chore: {:?}", e);
        }
        Ok(())
    }

    pub fn toggle_chore(&self, id: &DocumentId, is_completed: bool) {
        let fields = object(json!({ "isCompleted": !is_completed }));
        if let Err(e) = self.store.update(collections::CHORES, id, fields) {
            tracing::error!("Failed to update chore {}: {:?}", id, e);
        }
    }

    pub fn assign_chore(&self, id: &DocumentId, assigned_to: &[String]) {
        let fields = object(json!({ "assignedTo": assigned_to }));
        if let Err(e) = self.store.update(collections::CHORES, id, fields) {
            tracing::error!("Failed to assign chore {}: {:?}", id, e);
        }
    }

    pub fn delete_chore(&self, id: &DocumentId) {
        if let Err(e) = self.store.delete(collections::CHORES, id) {
            tracing::error!("Failed to delete chore {}: {:?}", id, e);
        }
    }

    /// Deletes every completed chore in the given snapshot.
    pub fn purge_completed_chores(&self, chores: &[Chore]) {
        for chore in chores.iter().filter(|chore| chore.is_completed) {
            self.delete_chore(&chore.id);
        }
    }

    pub fn add_shopping_item(&self, name: &str, due_date: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingItemName);
        }

        let fields = object(json!({
            "name": name,
            "isCompleted": false,
            "dueDate": due_date,
        }));
        if let Err(e) = self.store.create(collections::SHOPPING_LIST, fields) {
            tracing::error!("Failed to create shopping item: {:?}", e);
        }
        Ok(())
    }

    pub fn toggle_shopping_item(&self, id: &DocumentId, is_completed: bool) {
        let fields = object(json!({ "isCompleted": !is_completed }));
        if let Err(e) = self.store.update(collections::SHOPPING_LIST, id, fields) {
            tracing::error!("Failed to update shopping item {}: {:?}", id, e);
        }
    }

    pub fn delete_shopping_item(&self, id: &DocumentId) {
        if let Err(e) = self.store.delete(collections::SHOPPING_LIST, id) {
            tracing::error!("Failed to delete shopping item {}: {:?}", id, e);
        }
    }

    /// Deletes every bought item in the given snapshot.
    pub fn purge_bought_items(&self, items: &[ShoppingItem]) {
        for item in items.iter().filter(|item| item.is_completed) {
            self.delete_shopping_item(&item.id);
        }
    }

    pub fn add_fridge_item(&self, draft: &FridgeDraft) -> Result<(), ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::MissingFridgeItemName);
        }

        let fields = object(json!({
            "name": draft.name,
            "owner": draft.owners,
            "type": draft.kind,
            "packedOn": draft.packed_on,
            "expires": draft.expires,
        }));
        if let Err(e) = self.store.create(collections::FRIDGE_INVENTORY, fields) {
            tracing::error!("Failed to create fridge item: {:?}", e);
        }
        Ok(())
    }

    pub fn update_fridge_item(&self, item: &FridgeItem) {
        let fields = object(json!({
            "name": item.name,
            "owner": item.owners,
            "type": item.kind,
            "packedOn": item.packed_on,
            "expires": item.expires,
        }));
        if let Err(e) = self
            .store
            .update(collections::FRIDGE_INVENTORY, &item.id, fields)
        {
            tracing::error!("Failed to update fridge item {}: {:?}", item.id, e);
        }
    }

    pub fn delete_fridge_item(&self, id: &DocumentId) {
        if let Err(e) = self.store.delete(collections::FRIDGE_INVENTORY, id) {
            tracing::error!("Failed to delete fridge item {}: {:?}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingStore;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn add_chore_stamps_a_creation_date() {
        let store = RecordingStore::default();

        HouseholdService::new(&store)
            .add_chore("dishes", &["Alice".to_string()], "")
            .expect("named chore");

        let created = store.created.lock().unwrap();
        let (collection, fields) = &created[0];
        assert_eq!(collection, "chores");
        assert_eq!(fields["isCompleted"], json!(false));
        assert!(!fields["date"].as_str().unwrap().is_empty());
    }

    #[rstest]
    #[case::chore(ValidationError::MissingChoreName)]
    #[case::shopping(ValidationError::MissingItemName)]
    fn blank_names_are_rejected(#[case] expected: ValidationError) {
        let store = RecordingStore::default();
        let service = HouseholdService::new(&store);

        let result = match expected {
            ValidationError::MissingChoreName => service.add_chore("  ", &[], ""),
            _ => service.add_shopping_item("  ", ""),
        };

        assert_eq!(result, Err(expected));
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[test]
    fn toggle_writes_the_inverted_flag() {
        let store = RecordingStore::default();
        let id = DocumentId("c1".to_string());

        HouseholdService::new(&store).toggle_chore(&id, true);

        let updated = store.updated.lock().unwrap();
        assert_eq!(updated[0].2["isCompleted"], json!(false));
    }

    #[test]
    fn purge_deletes_only_completed_chores() {
        let store = RecordingStore::default();
        let chores = vec![
            Chore {
                id: DocumentId("c1".to_string()),
                name: "dishes".to_string(),
                assigned_to: Vec::new(),
                is_completed: true,
                date: String::new(),
                due_date: String::new(),
            },
            Chore {
                id: DocumentId("c2".to_string()),
                name: "trash".to_string(),
                assigned_to: Vec::new(),
                is_completed: false,
                date: String::new(),
                due_date: String::new(),
            },
        ];

        HouseholdService::new(&store).purge_completed_chores(&chores);

        let deleted = store.deleted.lock().unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].1, DocumentId("c1".to_string()));
    }

    #[test]
    fn fridge_draft_defaults_to_a_shared_fridge_item() {
        let store = RecordingStore::default();
        let draft = FridgeDraft {
            name: "leftovers".to_string(),
            ..FridgeDraft::default()
        };

        HouseholdService::new(&store)
            .add_fridge_item(&draft)
            .expect("named fridge item");

        let created = store.created.lock().unwrap();
        let (_, fields) = &created[0];
        assert_eq!(fields["owner"], json!(["Shared"]));
        assert_eq!(fields["type"], json!("Fridge"));
    }
}
