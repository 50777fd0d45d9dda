use std::fmt;

use indexmap::IndexMap;

use crate::money::Money;

/// Store-assigned document identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-insensitive party identifier.
///
/// A registry member and an ad-hoc participant whose names differ only in
/// case are the same economic actor, so the folded form is the identity;
/// the display form capitalizes the first letter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartyName(String);

impl PartyName {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for PartyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roommate {
    pub id: DocumentId,
    pub name: PartyName,
    pub email: Option<String>,
    pub linked_uid: Option<String>,
}

/// Rule for dividing an expense's cost among its participants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitType {
    #[default]
    Equal,
    Percentage,
    Itemized,
}

impl SplitType {
    /// Wire names as persisted by the store.
    pub fn as_wire(self) -> &'static str {
        match self {
            SplitType::Equal => "Equally",
            SplitType::Percentage => "Percentages",
            SplitType::Itemized => "Itemized",
        }
    }

    /// Unknown wire strings fall back to an equal split.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "Percentages" => SplitType::Percentage,
            "Itemized" => SplitType::Itemized,
            _ => SplitType::Equal,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseItem {
    pub name: String,
    pub cost: Money,
    pub participants: Vec<PartyName>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: DocumentId,
    pub description: String,
    pub date: String,
    pub paid_by: PartyName,
    pub split_type: SplitType,
    pub total_amount: Money,
    /// Used by Equal and Percentage splits; informational for Itemized.
    pub participants: Vec<PartyName>,
    /// Used by Percentage splits; participants missing from the map carry
    /// an implicit zero share.
    pub percentages: IndexMap<PartyName, f64>,
    pub items: Vec<ExpenseItem>,
    pub notes: String,
}

/// Money actually transferred between two parties, unallocated against any
/// particular expense.
#[derive(Clone, Debug, PartialEq)]
pub struct Payment {
    pub id: DocumentId,
    pub from: PartyName,
    pub to: PartyName,
    pub amount: Money,
    pub date: String,
    pub notes: String,
    pub created_at: i64,
}

/// One simplified pairwise debt: `from` owes `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub from: PartyName,
    pub to: PartyName,
    pub amount: Money,
}

/// Directed `from -> to` balances keyed by the pair of parties.
pub type PairBalances = IndexMap<(PartyName, PartyName), Money>;

/// Derived settlement view: recomputed from the full ledgers on every
/// change, never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettlementResult {
    /// Sum of every expense's total amount.
    pub total: Money,
    /// Net balance per party; positive means the party is owed money.
    pub summary: IndexMap<PartyName, Money>,
    pub transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chore {
    pub id: DocumentId,
    pub name: String,
    pub assigned_to: Vec<String>,
    pub is_completed: bool,
    pub date: String,
    pub due_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShoppingItem {
    pub id: DocumentId,
    pub name: String,
    pub is_completed: bool,
    pub due_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FridgeItem {
    pub id: DocumentId,
    pub name: String,
    pub owners: Vec<String>,
    pub kind: String,
    pub packed_on: String,
    pub expires: String,
}
