use indexmap::IndexMap;

use crate::{
    model::{Expense, PartyName, SplitType},
    money::Money,
};

/// Per-expense obligation service: how much each party owes the payer for
/// a single expense.
pub struct ObligationCalculator;

impl ObligationCalculator {
    /// Computes the obligation map for one expense.
    ///
    /// The payer never owes themself, so their own share is excluded even
    /// when they appear in a participant list or the percentage map.
    /// Participants absent from a Percentage map carry an implicit zero
    /// share; Itemized people are discovered purely from item participant
    /// lists and the expense-level `participants` field is ignored.
    pub fn obligations_for(&self, expense: &Expense) -> IndexMap<PartyName, Money> {
        let mut obligations = IndexMap::new();
        if expense.paid_by.is_empty() {
            return obligations;
        }

        match expense.split_type {
            SplitType::Equal => {
                if expense.participants.is_empty() {
                    return obligations;
                }
                let share = expense.total_amount.split_evenly(expense.participants.len());
                for participant in &expense.participants {
                    if *participant != expense.paid_by {
                        obligations.insert(participant.clone(), share);
                    }
                }
            }
            SplitType::Percentage => {
                if expense.participants.is_empty() {
                    return obligations;
                }
                for participant in &expense.participants {
                    if *participant == expense.paid_by {
                        continue;
                    }
                    let pct = expense.percentages.get(participant).copied().unwrap_or(0.0);
                    obligations.insert(
                        participant.clone(),
                        expense.total_amount.percentage_share(pct),
                    );
                }
            }
            SplitType::Itemized => {
                for item in &expense.items {
                    if item.participants.is_empty() {
                        continue;
                    }
                    let share = item.cost.split_evenly(item.participants.len());
                    for participant in &item.participants {
                        if *participant == expense.paid_by {
                            continue;
                        }
                        *obligations
                            .entry(participant.clone())
                            .or_insert(Money::ZERO) += share;
                    }
                }
            }
        }

        obligations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentId, ExpenseItem};
    use rstest::{fixture, rstest};

    #[fixture]
    fn calculator() -> ObligationCalculator {
        ObligationCalculator
    }

    fn expense(split_type: SplitType) -> Expense {
        Expense {
            id: DocumentId("e1".to_string()),
            description: "groceries".to_string(),
            date: "2026-08-01".to_string(),
            paid_by: PartyName::new("alice"),
            split_type,
            total_amount: Money::coerce(90.0),
            participants: Vec::new(),
            percentages: IndexMap::new(),
            items: Vec::new(),
            notes: String::new(),
        }
    }

    fn names(raw: &[&str]) -> Vec<PartyName> {
        raw.iter().map(|name| PartyName::new(name)).collect()
    }

    #[rstest]
    fn equal_split_excludes_payer(calculator: ObligationCalculator) {
        let mut exp = expense(SplitType::Equal);
        exp.participants = names(&["alice", "bob", "chloe"]);

        let obligations = calculator.obligations_for(&exp);

        assert_eq!(obligations.len(), 2);
        assert_eq!(obligations[&PartyName::new("bob")].amount(), 30.0);
        assert_eq!(obligations[&PartyName::new("chloe")].amount(), 30.0);
        assert!(!obligations.contains_key(&PartyName::new("alice")));
    }

    #[rstest]
    fn percentage_split_uses_map_shares(calculator: ObligationCalculator) {
        let mut exp = expense(SplitType::Percentage);
        exp.total_amount = Money::coerce(200.0);
        exp.participants = names(&["alice", "bob", "chloe"]);
        exp.percentages.insert(PartyName::new("alice"), 50.0);
        exp.percentages.insert(PartyName::new("bob"), 30.0);
        exp.percentages.insert(PartyName::new("chloe"), 20.0);

        let obligations = calculator.obligations_for(&exp);

        assert_eq!(obligations[&PartyName::new("bob")].amount(), 60.0);
        assert_eq!(obligations[&PartyName::new("chloe")].amount(), 40.0);
        assert!(!obligations.contains_key(&PartyName::new("alice")));
    }

    #[rstest]
    fn percentage_participant_missing_from_map_gets_zero(calculator: ObligationCalculator) {
        let mut exp = expense(SplitType::Percentage);
        exp.total_amount = Money::coerce(100.0);
        exp.participants = names(&["alice", "bob", "chloe"]);
        exp.percentages.insert(PartyName::new("bob"), 100.0);

        let obligations = calculator.obligations_for(&exp);

        assert_eq!(obligations[&PartyName::new("bob")].amount(), 100.0);
        assert_eq!(obligations[&PartyName::new("chloe")].amount(), 0.0);
    }

    #[rstest]
    fn itemized_split_aggregates_across_items(calculator: ObligationCalculator) {
        let mut exp = expense(SplitType::Itemized);
        exp.items = vec![
            ExpenseItem {
                name: "pasta".to_string(),
                cost: Money::coerce(20.0),
                participants: names(&["alice", "bob"]),
            },
            ExpenseItem {
                name: "wine".to_string(),
                cost: Money::coerce(30.0),
                participants: names(&["bob", "chloe"]),
            },
        ];

        let obligations = calculator.obligations_for(&exp);

        assert_eq!(obligations[&PartyName::new("bob")].amount(), 25.0);
        assert_eq!(obligations[&PartyName::new("chloe")].amount(), 15.0);
        assert!(!obligations.contains_key(&PartyName::new("alice")));
    }

    #[rstest]
    fn itemized_ignores_expense_level_participants(calculator: ObligationCalculator) {
        let mut exp = expense(SplitType::Itemized);
        exp.participants = names(&["dana"]);
        exp.items = vec![ExpenseItem {
            name: "milk".to_string(),
            cost: Money::coerce(4.0),
            participants: names(&["bob"]),
        }];

        let obligations = calculator.obligations_for(&exp);

        assert_eq!(obligations.len(), 1);
        assert_eq!(obligations[&PartyName::new("bob")].amount(), 4.0);
    }

    #[rstest]
    #[case::missing_payer(SplitType::Equal, "", &["bob"])]
    #[case::no_participants(SplitType::Equal, "alice", &[])]
    #[case::no_percentage_participants(SplitType::Percentage, "alice", &[])]
    fn degenerate_expenses_yield_nothing(
        calculator: ObligationCalculator,
        #[case] split_type: SplitType,
        #[case] paid_by: &str,
        #[case] participants: &[&str],
    ) {
        let mut exp = expense(split_type);
        exp.paid_by = PartyName::new(paid_by);
        exp.participants = names(participants);

        assert!(calculator.obligations_for(&exp).is_empty());
    }
}
