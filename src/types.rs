//! Common types shared by every statement format.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical transaction record produced by every parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Date of the transaction.
    pub date: NaiveDate,

    /// Raw merchant/description text from the export.
    pub place: String,

    /// Money spent. Zero when the row is a credit.
    pub debit: Decimal,

    /// Money received. Zero when the row is a debit.
    pub credit: Decimal,

    /// Tag of the institution/account that produced the row.
    pub source: String,

    /// Spending category, empty until categorized.
    pub category: String,

    /// Canonical merchant name, empty until categorized or cleaned.
    pub clean: String,
}

impl Transaction {
    /// Create an uncategorized transaction with an empty clean name.
    pub fn new(date: NaiveDate, place: impl Into<String>, debit: Decimal, credit: Decimal, source: &str) -> Self {
        Self {
            date,
            place: place.into(),
            debit,
            credit,
            source: source.to_string(),
            category: String::new(),
            clean: String::new(),
        }
    }

    /// Day of month of the transaction date.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Month of the transaction date (1-12).
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Year of the transaction date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Whether the categorizer assigned a category.
    pub fn is_categorized(&self) -> bool {
        !self.category.is_empty()
    }
}

/// One entry of a category or cleanup table: a case-insensitive substring and the label it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Substring looked for in `Transaction::place`.
    pub pattern: String,

    /// Category name or canonical merchant name.
    pub label: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            label: label.into(),
        }
    }

    /// Case-insensitive substring match against a place string.
    pub fn matches(&self, place: &str) -> bool {
        place.to_lowercase().contains(&self.pattern.to_lowercase())
    }
}

/// Result of the pipeline: transactions split by whether a category was assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Transactions with a category, in arrival order.
    pub categorized: Vec<Transaction>,

    /// Transactions left for manual review, newest first.
    pub uncategorized: Vec<Transaction>,
}

impl Partition {
    /// Total number of transactions across both sets.
    pub fn len(&self) -> usize {
        self.categorized.len() + self.uncategorized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
