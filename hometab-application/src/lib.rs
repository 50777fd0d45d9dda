#![warn(clippy::uninlined_format_args)]

pub mod decode;
pub mod error;
pub mod expense_service;
pub mod household_service;
pub mod payment_service;
pub mod ports;
pub mod processor;
pub mod roommate_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{AuthError, StoreError, ValidationError};
pub use expense_service::{ExpenseDraft, ExpenseService, ItemDraft};
pub use household_service::{FridgeDraft, HouseholdService};
pub use payment_service::{PaymentDraft, PaymentService};
pub use ports::{
    collections, Document, DocumentStore, Fields, IdentityProvider, Session, SnapshotListener,
    Subscription,
};
pub use processor::{LedgerSnapshot, SettlementViews, SnapshotProcessor};
pub use roommate_service::RoommateService;
