use indexmap::IndexMap;

use crate::{
    model::{
        Expense, PairBalances, PartyName, Payment, Roommate, SettlementResult, SplitType,
        Transaction,
    },
    money::Money,
    services::SettlementStrategy,
};

/// Sparse incremental-offset settlement used for the "who owes whom" list.
///
/// Keeps a directed `from -> to` balance map and offsets every new debt
/// against the reverse direction as it arrives, so the map only ever holds
/// one direction per pair. The per-split share logic is duplicated here
/// rather than shared with the matrix path: the two algorithms are not
/// equivalent (a Percentage split, for example, iterates the percentage map
/// here but the participant list there) and each backs its own view.
pub struct OffsetSettlement;

impl OffsetSettlement {
    /// Folds one debt into the balance map, offsetting against the reverse
    /// direction first. An exact match cancels both sides; a larger new
    /// debt deletes the reverse entry and keeps the difference.
    fn add_to_balance(balances: &mut PairBalances, from: PartyName, to: PartyName, amount: Money) {
        let key = (from, to);
        let reverse = (key.1.clone(), key.0.clone());

        match balances.get(&reverse).copied() {
            Some(existing) if !existing.is_zero() => {
                if existing > amount {
                    balances[&reverse] = existing - amount;
                } else if existing < amount {
                    balances.shift_remove(&reverse);
                    balances.insert(key, amount - existing);
                } else {
                    balances.shift_remove(&reverse);
                }
            }
            _ => {
                *balances.entry(key).or_insert(Money::ZERO) += amount;
            }
        }
    }

    /// Directed net balances over the full ledgers.
    pub fn net_balances(&self, expenses: &[Expense], payments: &[Payment]) -> PairBalances {
        let mut balances = PairBalances::new();

        for expense in expenses {
            if expense.paid_by.is_empty() {
                continue;
            }
            // Records with neither a total nor items have nothing to split.
            if expense.total_amount.is_zero() && expense.items.is_empty() {
                continue;
            }
            match expense.split_type {
                SplitType::Itemized if !expense.items.is_empty() => {
                    for item in &expense.items {
                        if item.participants.is_empty() {
                            continue;
                        }
                        let share = item.cost.split_evenly(item.participants.len());
                        for participant in &item.participants {
                            if *participant != expense.paid_by {
                                Self::add_to_balance(
                                    &mut balances,
                                    participant.clone(),
                                    expense.paid_by.clone(),
                                    share,
                                );
                            }
                        }
                    }
                }
                SplitType::Percentage => {
                    for (participant, pct) in &expense.percentages {
                        if *participant != expense.paid_by {
                            Self::add_to_balance(
                                &mut balances,
                                participant.clone(),
                                expense.paid_by.clone(),
                                expense.total_amount.percentage_share(*pct),
                            );
                        }
                    }
                }
                _ => {
                    if expense.participants.is_empty() {
                        continue;
                    }
                    let share = expense.total_amount.split_evenly(expense.participants.len());
                    for participant in &expense.participants {
                        if *participant != expense.paid_by {
                            Self::add_to_balance(
                                &mut balances,
                                participant.clone(),
                                expense.paid_by.clone(),
                                share,
                            );
                        }
                    }
                }
            }
        }

        for payment in payments {
            if payment.from.is_empty()
                || payment.to.is_empty()
                || payment.amount.is_zero()
                || payment.from == payment.to
            {
                continue;
            }
            // Reversed on purpose: a payment from A to B reduces what A
            // owes B, modeled as a credit in the opposite direction.
            Self::add_to_balance(
                &mut balances,
                payment.to.clone(),
                payment.from.clone(),
                payment.amount,
            );
        }

        balances
    }
}

impl SettlementStrategy for OffsetSettlement {
    fn compute(
        &self,
        expenses: &[Expense],
        payments: &[Payment],
        roommates: &[Roommate],
    ) -> SettlementResult {
        let balances = self.net_balances(expenses, payments);

        let transactions: Vec<Transaction> = balances
            .into_iter()
            .map(|((from, to), amount)| Transaction { from, to, amount })
            .collect();

        let mut summary: IndexMap<PartyName, Money> = roommates
            .iter()
            .filter(|roommate| !roommate.name.is_empty())
            .map(|roommate| (roommate.name.clone(), Money::ZERO))
            .collect();
        for transaction in &transactions {
            *summary
                .entry(transaction.to.clone())
                .or_insert(Money::ZERO) += transaction.amount;
            *summary
                .entry(transaction.from.clone())
                .or_insert(Money::ZERO) -= transaction.amount;
        }

        SettlementResult {
            total: expenses.iter().map(|expense| expense.total_amount).sum(),
            summary,
            transactions,
        }
    }
}
