use indexmap::{IndexMap, IndexSet};

use crate::{
    model::{Expense, PartyName, Payment, Roommate, SettlementResult, Transaction},
    money::Money,
    services::{ObligationCalculator, SettlementStrategy},
};

/// Dense pairwise-netting settlement used for the dashboard summary.
///
/// Builds a full `debts[ower][payee]` matrix over every known party, feeds
/// expenses and payments through it, then nets each unordered pair down to
/// at most one transaction. Not equivalent to [`OffsetSettlement`]; the two
/// paths back different views and are kept separate deliberately.
///
/// [`OffsetSettlement`]: crate::services::OffsetSettlement
pub struct MatrixSettlement;

impl MatrixSettlement {
    /// The universe of parties: registry members first, then every name
    /// mentioned as a participant, payer, or payment party in the ledgers.
    fn party_universe(
        expenses: &[Expense],
        payments: &[Payment],
        roommates: &[Roommate],
    ) -> IndexSet<PartyName> {
        let mut universe: IndexSet<PartyName> = IndexSet::new();
        for roommate in roommates {
            if !roommate.name.is_empty() {
                universe.insert(roommate.name.clone());
            }
        }
        for expense in expenses {
            for participant in &expense.participants {
                if !participant.is_empty() {
                    universe.insert(participant.clone());
                }
            }
            for item in &expense.items {
                for participant in &item.participants {
                    if !participant.is_empty() {
                        universe.insert(participant.clone());
                    }
                }
            }
        }
        for expense in expenses {
            if !expense.paid_by.is_empty() {
                universe.insert(expense.paid_by.clone());
            }
        }
        for payment in payments {
            for party in [&payment.from, &payment.to] {
                if !party.is_empty() {
                    universe.insert(party.clone());
                }
            }
        }
        universe
    }
}

impl SettlementStrategy for MatrixSettlement {
    fn compute(
        &self,
        expenses: &[Expense],
        payments: &[Payment],
        roommates: &[Roommate],
    ) -> SettlementResult {
        let universe = Self::party_universe(expenses, payments, roommates);

        // Square matrix over ordered pairs, no diagonal.
        let mut debts: IndexMap<PartyName, IndexMap<PartyName, Money>> = IndexMap::new();
        for p1 in &universe {
            let mut row = IndexMap::new();
            for p2 in &universe {
                if p1 != p2 {
                    row.insert(p2.clone(), Money::ZERO);
                }
            }
            debts.insert(p1.clone(), row);
        }

        let calculator = ObligationCalculator;
        for expense in expenses {
            for (participant, share) in calculator.obligations_for(expense) {
                if let Some(cell) = debts
                    .get_mut(&participant)
                    .and_then(|row| row.get_mut(&expense.paid_by))
                {
                    *cell += share;
                }
            }
        }

        for payment in payments {
            if payment.from.is_empty() || payment.to.is_empty() || payment.amount.is_zero() {
                continue;
            }
            let Some(cell) = debts
                .get_mut(&payment.from)
                .and_then(|row| row.get_mut(&payment.to))
            else {
                continue;
            };
            *cell -= payment.amount;
            let overshoot = -*cell;
            if overshoot.is_positive() {
                *cell = Money::ZERO;
                // A payment larger than the debt flips its direction.
                if let Some(reverse) = debts
                    .get_mut(&payment.to)
                    .and_then(|row| row.get_mut(&payment.from))
                {
                    *reverse += overshoot;
                }
            }
        }

        let mut transactions = Vec::new();
        for p1 in &universe {
            for p2 in &universe {
                if p1 == p2 {
                    continue;
                }
                let net = debts[p1][p2] - debts[p2][p1];
                if net.is_positive() {
                    transactions.push(Transaction {
                        from: p1.clone(),
                        to: p2.clone(),
                        amount: net,
                    });
                }
            }
        }

        let mut summary: IndexMap<PartyName, Money> = universe
            .iter()
            .map(|name| (name.clone(), Money::ZERO))
            .collect();
        for transaction in &transactions {
            summary[&transaction.to] += transaction.amount;
            summary[&transaction.from] -= transaction.amount;
        }

        SettlementResult {
            total: expenses.iter().map(|expense| expense.total_amount).sum(),
            summary,
            transactions,
        }
    }
}
