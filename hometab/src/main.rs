#![warn(clippy::uninlined_format_args)]

use hometab_application::{
    DocumentStore, ExpenseDraft, ExpenseService, HouseholdService, IdentityProvider, ItemDraft,
    PaymentDraft, PaymentService, RoommateService, SnapshotProcessor,
};
use hometab_domain::SplitType;
use hometab_infrastructure::{EnvIdentityProvider, MemoryStore};
use hometab_presentation::SettlementPresenter;

fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let identity = EnvIdentityProvider::from_env();
    let session = match identity.restore() {
        Some(session) => session,
        None => match identity.sign_in() {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Not signed in ({e}); set HOMETAB_USER_ID to continue");
                std::process::exit(1);
            }
        },
    };
    tracing::info!(
        "Signed in as {} <{}>",
        session.user_id,
        session.email.as_deref().unwrap_or("no email")
    );

    let store = MemoryStore::new();
    let processor = SnapshotProcessor::new();
    let subscriptions = processor
        .attach(&store)
        .expect("in-memory subscriptions cannot fail");

    seed_demo_ledger(&store);

    let views = processor.views();
    let view = SettlementPresenter::render(&views.dashboard, &views.who_owes_whom);

    println!("{}", view.total_outstanding);
    println!();
    println!("Balances:");
    for line in &view.balances {
        println!("  {line}");
    }
    println!();
    println!("Who owes whom:");
    for line in &view.who_owes_whom {
        println!("  {line}");
    }

    let non_member = SettlementPresenter::render_non_member_balances(&views.non_member_balances);
    if !non_member.is_empty() {
        println!();
        println!("Settling up outside the house:");
        for line in &non_member {
            println!("  {line}");
        }
    }

    let snapshot = processor.snapshot();
    let open_chores = snapshot
        .chores
        .iter()
        .filter(|chore| !chore.is_completed)
        .count();
    println!();
    println!(
        "Chores to do: {open_chores} | Shopping items: {}",
        snapshot.shopping_list.len()
    );

    for subscription in subscriptions {
        store.unsubscribe(subscription);
    }
}

/// Writes a small household through the services, the same way the UI
/// would: every record goes through validation and the store, and the
/// processor picks everything up from change notifications.
fn seed_demo_ledger(store: &MemoryStore) {
    let roommates = RoommateService::new(store);
    for (name, email) in [
        ("Alice", "alice@example.com"),
        ("Bob", "bob@example.com"),
        ("Chloe", ""),
    ] {
        roommates.add(name, email).expect("demo roommate is named");
    }

    let expenses = ExpenseService::new(store);
    expenses
        .save(
            &ExpenseDraft {
                description: "Groceries".to_string(),
                date: "2026-08-01".to_string(),
                paid_by: "Alice".to_string(),
                split_type: SplitType::Equal,
                participants: vec![
                    "Alice".to_string(),
                    "Bob".to_string(),
                    "Chloe".to_string(),
                ],
                amount: "90".to_string(),
                ..ExpenseDraft::default()
            },
            None,
        )
        .expect("demo expense is valid");
    expenses
        .save(
            &ExpenseDraft {
                description: "Takeout".to_string(),
                date: "2026-08-03".to_string(),
                paid_by: "Bob".to_string(),
                split_type: SplitType::Itemized,
                items: vec![
                    ItemDraft {
                        name: "pizza".to_string(),
                        cost: "24".to_string(),
                        participants: vec!["Alice".to_string(), "Bob".to_string()],
                    },
                    ItemDraft {
                        name: "salad".to_string(),
                        cost: "8".to_string(),
                        participants: vec!["Chloe".to_string()],
                    },
                ],
                ..ExpenseDraft::default()
            },
            None,
        )
        .expect("demo expense is valid");

    let payments = PaymentService::new(store);
    payments
        .record(&PaymentDraft {
            from: "Bob".to_string(),
            to: "Alice".to_string(),
            amount: "12".to_string(),
            date: "2026-08-04".to_string(),
            notes: "groceries share".to_string(),
        })
        .expect("demo payment is complete");
    payments
        .record(&PaymentDraft {
            from: "Alice".to_string(),
            to: "Landlord".to_string(),
            amount: "500".to_string(),
            date: "2026-08-05".to_string(),
            notes: "august rent".to_string(),
        })
        .expect("demo payment is complete");

    let household = HouseholdService::new(store);
    household
        .add_chore("Dishes", &["Alice".to_string()], "")
        .expect("demo chore is named");
    household
        .add_shopping_item("Milk", "")
        .expect("demo item is named");
}
