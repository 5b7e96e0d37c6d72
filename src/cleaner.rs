//! Canonical merchant names.
//!
//! Runs after categorization and overwrites `clean` whenever a cleanup rule
//! matches, whatever the categorizer left there.

use crate::types::{Rule, Transaction};

/// Apply the first matching cleanup rule to one transaction.
pub fn clean_transaction(mut tx: Transaction, rules: &[Rule]) -> Transaction {
    if let Some(rule) = rules.iter().find(|rule| rule.matches(&tx.place)) {
        tx.clean = rule.label.clone();
    }
    tx
}

/// Clean every transaction independently.
pub fn clean(transactions: Vec<Transaction>, rules: &[Rule]) -> Vec<Transaction> {
    transactions
        .into_iter()
        .map(|tx| clean_transaction(tx, rules))
        .collect()
}
