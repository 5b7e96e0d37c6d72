//! RBC credit card CSV export parser.
//!
//! RBC exports carry a header row and separate `CAD$` and `USD$` amount
//! columns. Only one of the two is filled for a given row; the CAD value is
//! preferred and USD is used when CAD is empty or zero. A positive amount is
//! a credit to the account and a negative amount is a purchase.

use crate::error::{Error, Result};
use crate::fields::{parse_date, parse_optional_amount, SignConvention, CSV_DATE_FORMATS};
use crate::types::Transaction;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const REQUIRED_HEADERS: &[&str] = &["Transaction Date", "Description 1", "CAD$", "USD$"];

/// Transactions read from an RBC-style export.
#[derive(Debug, Clone, PartialEq)]
pub struct RbcStatement {
    pub transactions: Vec<Transaction>,
}

/// RBC CSV row. Account type/number, cheque number and the second
/// description column are not part of the canonical record and are skipped.
#[derive(Debug, Deserialize)]
struct RbcRecord {
    #[serde(rename = "Transaction Date")]
    date: String,
    #[serde(rename = "Description 1", default)]
    description: String,
    #[serde(rename = "CAD$", default)]
    cad: String,
    #[serde(rename = "USD$", default)]
    usd: String,
}

impl RbcStatement {
    /// Parse an RBC export from any source implementing `Read`.
    pub fn from_read<R: Read>(reader: &mut R, source: &str) -> Result<Self> {
        // Header cells are trimmed so serde field lookup sees the same names
        // the layout check does.
        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::UnexpectedLayout(format!(
                "RBC export is missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut transactions = Vec::new();
        for result in csv_reader.deserialize() {
            let record: RbcRecord = result?;

            let date = parse_date(&record.date, CSV_DATE_FORMATS)?;
            let amount = Self::merged_amount(&record.cad, &record.usd)?;
            let (debit, credit) = SignConvention::NegativeIsDebit.split(amount);

            transactions.push(Transaction::new(date, record.description.trim(), debit, credit, source));
        }

        Ok(RbcStatement { transactions })
    }

    /// Parse an RBC export file.
    pub fn from_path(path: impl AsRef<Path>, source: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::from_read(&mut file, source)
    }

    fn merged_amount(cad: &str, usd: &str) -> Result<rust_decimal::Decimal> {
        let cad = parse_optional_amount(cad)?;
        if !cad.is_zero() {
            return Ok(cad);
        }
        parse_optional_amount(usd)
    }
}
