pub mod matrix_settlement;
pub mod non_member_tracker;
pub mod obligations;
pub mod offset_settlement;

pub use matrix_settlement::MatrixSettlement;
pub use non_member_tracker::NonMemberTracker;
pub use obligations::ObligationCalculator;
pub use offset_settlement::OffsetSettlement;

use crate::model::{Expense, Payment, Roommate, SettlementResult};

/// Common capability over the two settlement algorithms.
///
/// [`MatrixSettlement`] and [`OffsetSettlement`] compute conceptually the
/// same thing but are not equivalent and may diverge on the same ledgers;
/// each view reads from its own strategy and they must not be unified
/// silently.
pub trait SettlementStrategy: Send + Sync {
    fn compute(
        &self,
        expenses: &[Expense],
        payments: &[Payment],
        roommates: &[Roommate],
    ) -> SettlementResult;
}
