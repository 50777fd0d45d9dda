use fxhash::FxHashSet;

use crate::{
    model::{PairBalances, PartyName, Payment, Roommate},
    money::Money,
};

/// Aggregates payments that touch anyone outside the registry.
///
/// A strict sum per directed pair: no offsetting, no netting against the
/// reverse direction. Settling up with a non-member is displayed as raw
/// totals, not as a simplified debt.
pub struct NonMemberTracker;

impl NonMemberTracker {
    pub fn balances(&self, payments: &[Payment], roommates: &[Roommate]) -> PairBalances {
        let members: FxHashSet<&PartyName> =
            roommates.iter().map(|roommate| &roommate.name).collect();

        let mut balances = PairBalances::new();
        for payment in payments {
            let from_is_member = members.contains(&payment.from);
            let to_is_member = members.contains(&payment.to);
            if from_is_member && to_is_member {
                continue;
            }
            *balances
                .entry((payment.from.clone(), payment.to.clone()))
                .or_insert(Money::ZERO) += payment.amount;
        }
        balances
    }
}
