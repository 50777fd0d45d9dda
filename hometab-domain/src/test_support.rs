//! Record constructors shared by the unit tests.

use indexmap::IndexMap;

use crate::{
    model::{DocumentId, Expense, PartyName, Payment, Roommate, SplitType},
    money::Money,
};

pub fn roommate(id: &str, name: &str) -> Roommate {
    Roommate {
        id: DocumentId(id.to_string()),
        name: PartyName::new(name),
        email: None,
        linked_uid: None,
    }
}

pub fn equal_expense(id: &str, paid_by: &str, total: f64, participants: &[&str]) -> Expense {
    Expense {
        id: DocumentId(id.to_string()),
        description: "shared".to_string(),
        date: "2026-08-01".to_string(),
        paid_by: PartyName::new(paid_by),
        split_type: SplitType::Equal,
        total_amount: Money::coerce(total),
        participants: participants.iter().map(|name| PartyName::new(name)).collect(),
        percentages: IndexMap::new(),
        items: Vec::new(),
        notes: String::new(),
    }
}

pub fn percentage_expense(
    id: &str,
    paid_by: &str,
    total: f64,
    participants: &[&str],
    percentages: &[(&str, f64)],
) -> Expense {
    let mut expense = equal_expense(id, paid_by, total, participants);
    expense.split_type = SplitType::Percentage;
    expense.percentages = percentages
        .iter()
        .map(|(name, pct)| (PartyName::new(name), *pct))
        .collect();
    expense
}

pub fn payment(id: &str, from: &str, to: &str, amount: f64) -> Payment {
    Payment {
        id: DocumentId(id.to_string()),
        from: PartyName::new(from),
        to: PartyName::new(to),
        amount: Money::coerce(amount),
        date: "2026-08-02".to_string(),
        notes: String::new(),
        created_at: 0,
    }
}
