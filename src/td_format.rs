//! TD Canada Trust CSV export parser (Visa and chequing accounts).
//!
//! Rows have no header: date, description, debit, credit, running balance.
//! Debit and credit are already split, with an empty cell for the unused side.

use crate::error::{Error, Result};
use crate::fields::{parse_date, parse_optional_amount, CSV_DATE_FORMATS};
use crate::types::Transaction;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COLUMNS: usize = 5;

/// Transactions read from a TD-style export.
#[derive(Debug, Clone, PartialEq)]
pub struct TdStatement {
    pub transactions: Vec<Transaction>,
}

impl TdStatement {
    /// Parse a TD export from any source implementing `Read`.
    pub fn from_read<R: Read>(reader: &mut R, source: &str) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut transactions = Vec::new();

        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            if record.len() != COLUMNS {
                return Err(Error::UnexpectedLayout(format!(
                    "TD row {} has {} columns, expected {}",
                    index + 1,
                    record.len(),
                    COLUMNS
                )));
            }

            let date = parse_date(&record[0], CSV_DATE_FORMATS)?;
            let debit = parse_optional_amount(&record[2])?;
            let credit = parse_optional_amount(&record[3])?;
            if debit.is_sign_negative() && !debit.is_zero() {
                return Err(Error::InvalidAmount(format!("negative debit {}", &record[2])));
            }
            if credit.is_sign_negative() && !credit.is_zero() {
                return Err(Error::InvalidAmount(format!("negative credit {}", &record[3])));
            }
            // Column 4 is the running balance and is dropped.

            transactions.push(Transaction::new(date, record[1].trim(), debit, credit, source));
        }

        Ok(TdStatement { transactions })
    }

    /// Parse a TD export file.
    pub fn from_path(path: impl AsRef<Path>, source: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::from_read(&mut file, source)
    }
}
