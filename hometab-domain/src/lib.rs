#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod money;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use model::{
    Chore, DocumentId, Expense, ExpenseItem, FridgeItem, PairBalances, PartyName, Payment,
    Roommate, SettlementResult, ShoppingItem, SplitType, Transaction,
};
pub use money::Money;
pub use services::{
    MatrixSettlement, NonMemberTracker, ObligationCalculator, OffsetSettlement,
    SettlementStrategy,
};
