//! Category assignment.
//!
//! A transaction gets the label of the first category rule whose pattern
//! appears in its place, and the upper-cased pattern becomes its clean name.
//! Bus passes bought at the drug store or the transit office are recognised
//! before the table is consulted: they are whole-dollar charges between
//! `BUS_PASS_MIN` and `BUS_PASS_MAX`, exclusive.

use crate::types::{Rule, Transaction};
use rust_decimal::Decimal;

pub const BUS_PASS_CATEGORY: &str = "BUS PASS";

/// Merchants that sell the flat-rate transit pass.
pub const BUS_PASS_MERCHANTS: &[&str] = &["SHOPPERS", "RMOW GRT"];

pub const BUS_PASS_MIN: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
pub const BUS_PASS_MAX: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

fn is_bus_pass(tx: &Transaction) -> bool {
    tx.debit.fract().is_zero()
        && tx.debit > BUS_PASS_MIN
        && tx.debit < BUS_PASS_MAX
        && BUS_PASS_MERCHANTS.iter().any(|m| tx.place.contains(m))
}

/// Assign a category (and possibly a clean name) to one transaction.
pub fn categorize_transaction(mut tx: Transaction, rules: &[Rule]) -> Transaction {
    if is_bus_pass(&tx) {
        tx.category = BUS_PASS_CATEGORY.to_string();
        return tx;
    }

    if let Some(rule) = rules.iter().find(|rule| rule.matches(&tx.place)) {
        tx.category = rule.label.clone();
        tx.clean = rule.pattern.to_uppercase();
    }
    tx
}

/// Categorize every transaction independently.
pub fn categorize(transactions: Vec<Transaction>, rules: &[Rule]) -> Vec<Transaction> {
    transactions
        .into_iter()
        .map(|tx| categorize_transaction(tx, rules))
        .collect()
}
