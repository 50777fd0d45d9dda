use hometab_domain::{Money, PairBalances, SettlementResult, Transaction};

/// Renders settlement views as display lines.
pub struct SettlementPresenter;

/// Text view of the current settlement state.
pub struct SettlementView {
    pub total_outstanding: String,
    pub balances: Vec<String>,
    pub who_owes_whom: Vec<String>,
}

impl SettlementPresenter {
    pub fn render(result: &SettlementResult, who_owes_whom: &[Transaction]) -> SettlementView {
        SettlementView {
            total_outstanding: Self::render_total_outstanding(result),
            balances: Self::render_balances(result),
            who_owes_whom: Self::render_who_owes_whom(who_owes_whom),
        }
    }

    /// Dashboard headline: the sum of every simplified debt still open.
    pub fn render_total_outstanding(result: &SettlementResult) -> String {
        let total: Money = result
            .transactions
            .iter()
            .map(|transaction| transaction.amount)
            .sum();
        format!("Total Expenses ${total}")
    }

    pub fn render_balances(result: &SettlementResult) -> Vec<String> {
        result
            .summary
            .iter()
            .map(|(name, balance)| {
                let sign = if balance.amount() >= 0.0 { "+" } else { "-" };
                format!("{}: {sign}${}", name.capitalized(), balance.abs())
            })
            .collect()
    }

    pub fn render_who_owes_whom(transactions: &[Transaction]) -> Vec<String> {
        if transactions.is_empty() {
            return vec!["Everything is settled!".to_string()];
        }
        transactions
            .iter()
            .map(|transaction| {
                format!(
                    "{} owes {} ${}",
                    transaction.from.capitalized(),
                    transaction.to.capitalized(),
                    transaction.amount
                )
            })
            .collect()
    }

    /// Raw per-pair totals for payments touching someone outside the
    /// registry; no netting, so both directions may appear.
    pub fn render_non_member_balances(balances: &PairBalances) -> Vec<String> {
        balances
            .iter()
            .map(|((from, to), amount)| {
                format!("{} -> {}: ${amount}", from.capitalized(), to.capitalized())
            })
            .collect()
    }
}
