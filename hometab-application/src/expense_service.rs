use hometab_domain::{DocumentId, SplitType};
use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::{
    error::ValidationError,
    ports::{collections, DocumentStore, Fields},
};

/// Unsaved expense as entered by the user. Amounts arrive as raw text and
/// are parsed at the save boundary.
#[derive(Clone, Debug, Default)]
pub struct ExpenseDraft {
    pub description: String,
    pub date: String,
    pub paid_by: String,
    pub split_type: SplitType,
    pub participants: Vec<String>,
    pub percentages: IndexMap<String, f64>,
    pub items: Vec<ItemDraft>,
    pub amount: String,
    pub notes: String,
}

#[derive(Clone, Debug, Default)]
pub struct ItemDraft {
    pub name: String,
    pub cost: String,
    pub participants: Vec<String>,
}

fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Expense ledger writes: validate-then-upsert keyed by id, delete by id.
pub struct ExpenseService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ExpenseService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Validates the draft and writes it through the store: create when
    /// `editing_id` is absent, merge-update otherwise. Store failures are
    /// logged and dropped; nothing local depends on the write landing.
    pub fn save(
        &self,
        draft: &ExpenseDraft,
        editing_id: Option<&DocumentId>,
    ) -> Result<(), ValidationError> {
        let fields = validate(draft)?;

        match editing_id {
            Some(id) => {
                if let Err(e) = self.store.update(collections::EXPENSES, id, fields) {
                    tracing::error!("Failed to update expense {}: {:?}", id, e);
                }
            }
            None => {
                if let Err(e) = self.store.create(collections::EXPENSES, fields) {
                    tracing::error!("Failed to create expense: {:?}", e);
                }
            }
        }
        Ok(())
    }

    pub fn delete(&self, id: &DocumentId) {
        if let Err(e) = self.store.delete(collections::EXPENSES, id) {
            tracing::error!("Failed to delete expense {}: {:?}", id, e);
        }
    }
}

/// Save-boundary validation. Returns the wire fields for a valid draft,
/// with `totalAmount` carried for Equal/Percentage splits and derived from
/// item costs for Itemized ones.
fn validate(draft: &ExpenseDraft) -> Result<Fields, ValidationError> {
    if draft.description.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    if draft.paid_by.trim().is_empty() {
        return Err(ValidationError::MissingPayer);
    }
    if draft.date.trim().is_empty() {
        return Err(ValidationError::MissingDate);
    }

    let mut total_amount = 0.0;
    let mut items: Vec<Value> = Vec::new();

    match draft.split_type {
        SplitType::Equal | SplitType::Percentage => {
            let amount = parse_amount(&draft.amount);
            if amount <= 0.0 {
                return Err(ValidationError::InvalidAmount);
            }
            if draft.participants.is_empty() {
                return Err(ValidationError::NoParticipants);
            }
            total_amount = amount;

            if draft.split_type == SplitType::Percentage {
                let total: f64 = draft
                    .percentages
                    .values()
                    .map(|pct| if pct.is_finite() { *pct } else { 0.0 })
                    .sum();
                if total != 100.0 {
                    return Err(ValidationError::PercentagesNotHundred { total });
                }
            }
        }
        SplitType::Itemized => {
            if draft.items.is_empty() {
                return Err(ValidationError::NoItems);
            }
            for item in &draft.items {
                if item.name.trim().is_empty() {
                    return Err(ValidationError::ItemMissingName);
                }
                let cost = parse_amount(&item.cost);
                if cost <= 0.0 {
                    return Err(ValidationError::ItemInvalidCost {
                        name: item.name.clone(),
                    });
                }
                if item.participants.is_empty() {
                    return Err(ValidationError::ItemNoParticipants {
                        name: item.name.clone(),
                    });
                }
                total_amount += cost;
                items.push(json!({
                    "name": item.name,
                    "cost": cost,
                    "participants": item.participants,
                }));
            }
        }
    }

    let participants: Vec<String> = match draft.split_type {
        // Itemized stores participants per item.
        SplitType::Itemized => Vec::new(),
        _ => draft.participants.clone(),
    };
    let mut percentages = serde_json::Map::new();
    if draft.split_type == SplitType::Percentage {
        for (name, pct) in &draft.percentages {
            percentages.insert(name.clone(), json!(pct));
        }
    }

    let Value::Object(fields) = json!({
        "description": draft.description,
        "date": draft.date,
        "paidBy": draft.paid_by,
        "splitType": draft.split_type.as_wire(),
        "participants": participants,
        "percentages": percentages,
        "items": items,
        "totalAmount": total_amount,
        "notes": draft.notes,
    }) else {
        unreachable!("expense fields literal is an object");
    };
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::ports::{SnapshotListener, Subscription};
    use crate::test_support::RecordingStore;
    use rstest::rstest;

    fn equal_draft() -> ExpenseDraft {
        ExpenseDraft {
            description: "Groceries".to_string(),
            date: "2026-08-01".to_string(),
            paid_by: "Alice".to_string(),
            split_type: SplitType::Equal,
            participants: vec!["Alice".to_string(), "Bob".to_string()],
            amount: "90".to_string(),
            ..ExpenseDraft::default()
        }
    }

    fn percentage_draft(percentages: &[(&str, f64)]) -> ExpenseDraft {
        let mut draft = equal_draft();
        draft.split_type = SplitType::Percentage;
        draft.percentages = percentages
            .iter()
            .map(|(name, pct)| (name.to_string(), *pct))
            .collect();
        draft
    }

    #[test]
    fn valid_draft_is_created() {
        let store = RecordingStore::default();

        ExpenseService::new(&store)
            .save(&equal_draft(), None)
            .expect("draft should validate");

        let created = store.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        let (collection, fields) = &created[0];
        assert_eq!(collection, "expenses");
        assert_eq!(fields["totalAmount"], json!(90.0));
        assert_eq!(fields["splitType"], json!("Equally"));
    }

    #[test]
    fn editing_id_routes_to_update() {
        let store = RecordingStore::default();
        let id = DocumentId("e7".to_string());

        ExpenseService::new(&store)
            .save(&equal_draft(), Some(&id))
            .expect("draft should validate");

        assert!(store.created.lock().unwrap().is_empty());
        let updated = store.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].1, id);
    }

    #[rstest]
    #[case::missing_description("description")]
    #[case::missing_payer("paid_by")]
    #[case::missing_date("date")]
    fn required_fields_are_enforced(#[case] field: &str) {
        let store = RecordingStore::default();
        let mut draft = equal_draft();
        match field {
            "description" => draft.description.clear(),
            "paid_by" => draft.paid_by.clear(),
            _ => draft.date.clear(),
        }

        let result = ExpenseService::new(&store).save(&draft, None);

        assert!(result.is_err());
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-5")]
    #[case::garbage("ninety")]
    fn invalid_amount_is_rejected(#[case] amount: &str) {
        let store = RecordingStore::default();
        let mut draft = equal_draft();
        draft.amount = amount.to_string();

        let result = ExpenseService::new(&store).save(&draft, None);

        assert_eq!(result, Err(ValidationError::InvalidAmount));
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[test]
    fn percentages_must_sum_to_one_hundred() {
        let store = RecordingStore::default();
        let draft = percentage_draft(&[("Alice", 50.0), ("Bob", 40.0)]);

        let result = ExpenseService::new(&store).save(&draft, None);

        assert_eq!(
            result,
            Err(ValidationError::PercentagesNotHundred { total: 90.0 })
        );
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[test]
    fn exact_percentages_are_accepted() {
        let store = RecordingStore::default();
        let draft = percentage_draft(&[("Alice", 50.0), ("Bob", 30.0), ("Chloe", 20.0)]);

        ExpenseService::new(&store)
            .save(&draft, None)
            .expect("percentages sum to 100");

        assert_eq!(store.created.lock().unwrap().len(), 1);
    }

    #[test]
    fn itemized_draft_derives_its_total() {
        let store = RecordingStore::default();
        let mut draft = equal_draft();
        draft.split_type = SplitType::Itemized;
        draft.items = vec![
            ItemDraft {
                name: "pasta".to_string(),
                cost: "20".to_string(),
                participants: vec!["Alice".to_string(), "Bob".to_string()],
            },
            ItemDraft {
                name: "wine".to_string(),
                cost: "30".to_string(),
                participants: vec!["Bob".to_string()],
            },
        ];

        ExpenseService::new(&store)
            .save(&draft, None)
            .expect("itemized draft should validate");

        let created = store.created.lock().unwrap();
        let (_, fields) = &created[0];
        assert_eq!(fields["totalAmount"], json!(50.0));
        assert_eq!(fields["participants"], json!([]));
    }

    #[rstest]
    #[case::unnamed_item("", "10", vec!["Alice".to_string()], ValidationError::ItemMissingName)]
    #[case::free_item("pasta", "0", vec!["Alice".to_string()], ValidationError::ItemInvalidCost { name: "pasta".to_string() })]
    #[case::orphan_item("pasta", "10", Vec::new(), ValidationError::ItemNoParticipants { name: "pasta".to_string() })]
    fn itemized_validation_cases(
        #[case] name: &str,
        #[case] cost: &str,
        #[case] participants: Vec<String>,
        #[case] expected: ValidationError,
    ) {
        let store = RecordingStore::default();
        let mut draft = equal_draft();
        draft.split_type = SplitType::Itemized;
        draft.items = vec![ItemDraft {
            name: name.to_string(),
            cost: cost.to_string(),
            participants,
        }];

        assert_eq!(ExpenseService::new(&store).save(&draft, None), Err(expected));
    }

    struct FailingStore;

    impl DocumentStore for FailingStore {
        fn subscribe(
            &self,
            _collection: &str,
            _listener: SnapshotListener,
        ) -> Result<Subscription, StoreError> {
            Err(StoreError::Rejected("offline".to_string()))
        }

        fn unsubscribe(&self, _subscription: Subscription) {}

        fn create(&self, _collection: &str, _fields: Fields) -> Result<DocumentId, StoreError> {
            Err(StoreError::Rejected("offline".to_string()))
        }

        fn update(
            &self,
            _collection: &str,
            _id: &DocumentId,
            _fields: Fields,
        ) -> Result<(), StoreError> {
            Err(StoreError::Rejected("offline".to_string()))
        }

        fn delete(&self, _collection: &str, _id: &DocumentId) -> Result<(), StoreError> {
            Err(StoreError::Rejected("offline".to_string()))
        }
    }

    #[test]
    fn store_failures_are_swallowed() {
        let service = ExpenseService::new(&FailingStore);

        service
            .save(&equal_draft(), None)
            .expect("validation passed; the store failure is logged, not raised");
        service.delete(&DocumentId("gone".to_string()));
    }
}
