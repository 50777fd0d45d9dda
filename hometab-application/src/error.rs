use thiserror::Error;

/// Save-boundary rejections. Raised before any write reaches the store;
/// a rejected draft leaves no partial document behind.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("expense description is required")]
    MissingDescription,
    #[error("expense payer is required")]
    MissingPayer,
    #[error("expense date is required")]
    MissingDate,
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("at least one participant is required")]
    NoParticipants,
    #[error("percentages sum to {total}, expected 100")]
    PercentagesNotHundred { total: f64 },
    #[error("an itemized expense needs at least one item")]
    NoItems,
    #[error("every item needs a name")]
    ItemMissingName,
    #[error("item {name:?} needs a cost greater than zero")]
    ItemInvalidCost { name: String },
    #[error("item {name:?} needs at least one participant")]
    ItemNoParticipants { name: String },
    #[error("a payment needs a payer, a recipient, and an amount")]
    IncompletePayment,
    #[error("roommate name is required")]
    MissingRoommateName,
    #[error("chore name is required")]
    MissingChoreName,
    #[error("shopping item name is required")]
    MissingItemName,
    #[error("fridge item name is required")]
    MissingFridgeItemName,
}

/// Failures reported by the document store. The application logs these and
/// carries on; nothing local was mutated optimistically, so there is
/// nothing to roll back.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },
    #[error("store rejected the operation: {0}")]
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("identity provider has no configured user")]
    NotConfigured,
    #[error("sign-in failed: {0}")]
    SignInFailed(String),
}
