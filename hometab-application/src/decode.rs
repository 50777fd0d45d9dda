//! Lenient decoding of stored documents into ledger records.
//!
//! Persisted data predates some validation rules and may carry missing or
//! malformed fields; decoding degrades those to zero/empty values so the
//! settlement engine stays total over any snapshot the store hands us.

use hometab_domain::{
    Chore, Expense, ExpenseItem, FridgeItem, Money, PartyName, Payment, Roommate, ShoppingItem,
    SplitType,
};
use indexmap::IndexMap;
use serde_json::Value;

use crate::ports::{Document, Fields};

fn text(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(value)) => value.clone(),
        _ => String::new(),
    }
}

fn optional_text(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(value)) if !value.is_empty() => Some(value.clone()),
        _ => None,
    }
}

/// Numeric coercion: numbers pass through, numeric strings are parsed,
/// anything else becomes 0.
fn number(fields: &Fields, key: &str) -> f64 {
    match fields.get(key) {
        Some(Value::Number(value)) => value.as_f64().unwrap_or(0.0),
        Some(Value::String(value)) => value.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn number_value(value: &Value) -> f64 {
    match value {
        Value::Number(value) => value.as_f64().unwrap_or(0.0),
        Value::String(value) => value.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn boolean(fields: &Fields, key: &str) -> bool {
    matches!(fields.get(key), Some(Value::Bool(true)))
}

fn string_list(fields: &Fields, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn party(fields: &Fields, key: &str) -> PartyName {
    PartyName::new(&text(fields, key))
}

fn party_list(fields: &Fields, key: &str) -> Vec<PartyName> {
    string_list(fields, key)
        .iter()
        .map(|name| PartyName::new(name))
        .collect()
}

pub fn roommate(document: &Document) -> Roommate {
    Roommate {
        id: document.id.clone(),
        name: party(&document.fields, "name"),
        email: optional_text(&document.fields, "email"),
        linked_uid: optional_text(&document.fields, "uid"),
    }
}

pub fn expense(document: &Document) -> Expense {
    let fields = &document.fields;

    let percentages: IndexMap<PartyName, f64> = match fields.get("percentages") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, value)| (PartyName::new(name), number_value(value)))
            .collect(),
        _ => IndexMap::new(),
    };

    let items: Vec<ExpenseItem> = match fields.get("items") {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_object)
            .map(|item| ExpenseItem {
                name: item
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                cost: Money::coerce(item.get("cost").map(number_value).unwrap_or(0.0)),
                participants: item
                    .get("participants")
                    .and_then(Value::as_array)
                    .map(|participants| {
                        participants
                            .iter()
                            .filter_map(Value::as_str)
                            .map(PartyName::new)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect(),
        _ => Vec::new(),
    };

    // A stored total is never trusted when absent: recompute from the item
    // costs so older itemized records still settle.
    let mut total_amount = Money::coerce(number(fields, "totalAmount"));
    if total_amount.is_zero() && !items.is_empty() {
        total_amount = items.iter().map(|item| item.cost).sum();
    }

    Expense {
        id: document.id.clone(),
        description: text(fields, "description"),
        date: text(fields, "date"),
        paid_by: party(fields, "paidBy"),
        split_type: SplitType::from_wire(&text(fields, "splitType")),
        total_amount,
        participants: party_list(fields, "participants"),
        percentages,
        items,
        notes: text(fields, "notes"),
    }
}

pub fn payment(document: &Document) -> Payment {
    let fields = &document.fields;
    Payment {
        id: document.id.clone(),
        from: party(fields, "from"),
        to: party(fields, "to"),
        amount: Money::coerce(number(fields, "amount")),
        date: text(fields, "date"),
        notes: text(fields, "notes"),
        created_at: number(fields, "createdAt") as i64,
    }
}

pub fn chore(document: &Document) -> Chore {
    let fields = &document.fields;
    Chore {
        id: document.id.clone(),
        name: text(fields, "name"),
        assigned_to: string_list(fields, "assignedTo"),
        is_completed: boolean(fields, "isCompleted"),
        date: text(fields, "date"),
        due_date: text(fields, "dueDate"),
    }
}

pub fn shopping_item(document: &Document) -> ShoppingItem {
    let fields = &document.fields;
    ShoppingItem {
        id: document.id.clone(),
        name: text(fields, "name"),
        is_completed: boolean(fields, "isCompleted"),
        due_date: text(fields, "dueDate"),
    }
}

pub fn fridge_item(document: &Document) -> FridgeItem {
    let fields = &document.fields;
    FridgeItem {
        id: document.id.clone(),
        name: text(fields, "name"),
        owners: string_list(fields, "owner"),
        kind: text(fields, "type"),
        packed_on: text(fields, "packedOn"),
        expires: text(fields, "expires"),
    }
}
