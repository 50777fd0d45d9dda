use chrono::Utc;
use hometab_domain::DocumentId;
use serde_json::{json, Value};

use crate::{
    error::ValidationError,
    ports::{collections, DocumentStore, Fields},
};

/// Unsaved payment as entered by the user.
#[derive(Clone, Debug, Default)]
pub struct PaymentDraft {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub date: String,
    pub notes: String,
}

impl PaymentDraft {
    /// Wire fields with the amount coerced to a float.
    fn fields(&self, created_at: Option<i64>) -> Fields {
        let amount: f64 = self.amount.trim().parse().unwrap_or(0.0);
        let mut value = json!({
            "from": self.from,
            "to": self.to,
            "amount": amount,
            "date": self.date,
            "notes": self.notes,
        });
        if let Some(created_at) = created_at {
            value["createdAt"] = json!(created_at);
        }
        let Value::Object(fields) = value else {
            unreachable!("payment fields literal is an object");
        };
        fields
    }
}

/// Payment ledger writes. No settlement math lives here; payments are
/// plain records netted later by the settlement engine.
pub struct PaymentService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PaymentService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Appends a payment, stamping `createdAt` with the current time.
    /// A draft missing either side or the amount is rejected before any
    /// write.
    pub fn record(&self, draft: &PaymentDraft) -> Result<(), ValidationError> {
        if draft.from.is_empty() || draft.to.is_empty() || draft.amount.is_empty() {
            return Err(ValidationError::IncompletePayment);
        }

        let fields = draft.fields(Some(Utc::now().timestamp_millis()));
        if let Err(e) = self.store.create(collections::PAYMENTS, fields) {
            tracing::error!("Failed to create payment: {:?}", e);
        }
        Ok(())
    }

    /// Updates a payment in place, re-coercing the amount. The original
    /// `createdAt` stamp is left untouched by the merge.
    pub fn update(&self, id: &DocumentId, draft: &PaymentDraft) {
        if let Err(e) = self
            .store
            .update(collections::PAYMENTS, id, draft.fields(None))
        {
            tracing::error!("Failed to update payment {}: {:?}", id, e);
        }
    }

    pub fn delete(&self, id: &DocumentId) {
        if let Err(e) = self.store.delete(collections::PAYMENTS, id) {
            tracing::error!("Failed to delete payment {}: {:?}", id, e);
        }
    }
}
