use std::sync::{Arc, RwLock};

use hometab_domain::{
    Chore, Expense, FridgeItem, MatrixSettlement, NonMemberTracker, OffsetSettlement,
    PairBalances, Payment, Roommate, SettlementResult, SettlementStrategy, ShoppingItem,
    Transaction,
};

use crate::{
    decode,
    error::StoreError,
    ports::{collections, Document, DocumentStore, Subscription},
};

/// Latest full contents of every collection, replaced wholesale on each
/// store notification.
#[derive(Clone, Debug, Default)]
pub struct LedgerSnapshot {
    pub roommates: Vec<Roommate>,
    pub expenses: Vec<Expense>,
    pub payments: Vec<Payment>,
    pub chores: Vec<Chore>,
    pub shopping_list: Vec<ShoppingItem>,
    pub fridge_inventory: Vec<FridgeItem>,
}

/// Derived views recomputed after every snapshot change.
///
/// The dashboard reads the matrix path, the "who owes whom" list reads the
/// offset path; they are separate algorithms and may disagree.
#[derive(Clone, Debug, Default)]
pub struct SettlementViews {
    pub dashboard: SettlementResult,
    pub who_owes_whom: Vec<Transaction>,
    pub non_member_balances: PairBalances,
}

/// Subscribes to the store and keeps the settlement views current.
///
/// Each notification replaces one collection snapshot and triggers a full
/// synchronous recomputation; the engine holds no state beyond the
/// snapshots, so recomputing twice over unchanged ledgers yields identical
/// views.
#[derive(Clone)]
pub struct SnapshotProcessor {
    inner: Arc<ProcessorInner>,
}

struct ProcessorInner {
    snapshot: RwLock<LedgerSnapshot>,
    views: RwLock<SettlementViews>,
}

impl SnapshotProcessor {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ProcessorInner {
                snapshot: RwLock::new(LedgerSnapshot::default()),
                views: RwLock::new(SettlementViews::default()),
            }),
        }
    }

    /// Registers one listener per collection. The store pushes the current
    /// snapshot immediately, so the views are populated when this returns.
    pub fn attach(&self, store: &dyn DocumentStore) -> Result<Vec<Subscription>, StoreError> {
        let all = [
            collections::ROOMMATES,
            collections::EXPENSES,
            collections::PAYMENTS,
            collections::CHORES,
            collections::SHOPPING_LIST,
            collections::FRIDGE_INVENTORY,
        ];

        let mut subscriptions = Vec::with_capacity(all.len());
        for collection in all {
            let inner = Arc::clone(&self.inner);
            subscriptions.push(store.subscribe(
                collection,
                Arc::new(move |documents| inner.on_snapshot(collection, documents)),
            )?);
        }
        Ok(subscriptions)
    }

    /// Replaces one collection's snapshot and recomputes every view.
    pub fn on_snapshot(&self, collection: &str, documents: &[Document]) {
        self.inner.on_snapshot(collection, documents);
    }

    pub fn views(&self) -> SettlementViews {
        self.inner.views.read().expect("views lock poisoned").clone()
    }

    pub fn dashboard(&self) -> SettlementResult {
        self.inner
            .views
            .read()
            .expect("views lock poisoned")
            .dashboard
            .clone()
    }

    pub fn who_owes_whom(&self) -> Vec<Transaction> {
        self.inner
            .views
            .read()
            .expect("views lock poisoned")
            .who_owes_whom
            .clone()
    }

    pub fn non_member_balances(&self) -> PairBalances {
        self.inner
            .views
            .read()
            .expect("views lock poisoned")
            .non_member_balances
            .clone()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner
            .snapshot
            .read()
            .expect("snapshot lock poisoned")
            .clone()
    }
}

impl Default for SnapshotProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorInner {
    fn on_snapshot(&self, collection: &str, documents: &[Document]) {
        {
            let mut snapshot = self.snapshot.write().expect("snapshot lock poisoned");
            match collection {
                collections::ROOMMATES => {
                    snapshot.roommates = documents.iter().map(decode::roommate).collect();
                }
                collections::EXPENSES => {
                    snapshot.expenses = documents.iter().map(decode::expense).collect();
                }
                collections::PAYMENTS => {
                    snapshot.payments = documents.iter().map(decode::payment).collect();
                }
                collections::CHORES => {
                    snapshot.chores = documents.iter().map(decode::chore).collect();
                }
                collections::SHOPPING_LIST => {
                    snapshot.shopping_list =
                        documents.iter().map(decode::shopping_item).collect();
                }
                collections::FRIDGE_INVENTORY => {
                    snapshot.fridge_inventory =
                        documents.iter().map(decode::fridge_item).collect();
                }
                other => {
                    tracing::warn!("Ignoring snapshot for unknown collection {}", other);
                    return;
                }
            }
        }
        self.recompute();
    }

    fn recompute(&self) {
        let views = {
            let snapshot = self.snapshot.read().expect("snapshot lock poisoned");
            SettlementViews {
                dashboard: MatrixSettlement.compute(
                    &snapshot.expenses,
                    &snapshot.payments,
                    &snapshot.roommates,
                ),
                who_owes_whom: OffsetSettlement
                    .compute(&snapshot.expenses, &snapshot.payments, &snapshot.roommates)
                    .transactions,
                non_member_balances: NonMemberTracker
                    .balances(&snapshot.payments, &snapshot.roommates),
            }
        };
        *self.views.write().expect("views lock poisoned") = views;
    }
}
