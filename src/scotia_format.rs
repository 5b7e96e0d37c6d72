//! Scotiabank Visa CSV export parser.
//!
//! The export has no header row and three columns: date, description and a
//! signed amount where negative values are purchases.

use crate::error::{Error, Result};
use crate::fields::{parse_amount, parse_date, SignConvention, CSV_DATE_FORMATS};
use crate::types::Transaction;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COLUMNS: usize = 3;

/// Transactions read from a Scotia-style export.
#[derive(Debug, Clone, PartialEq)]
pub struct ScotiaStatement {
    pub transactions: Vec<Transaction>,
}

impl ScotiaStatement {
    /// Parse a Scotia export from any source implementing `Read`.
    ///
    /// Every transaction is tagged with `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use per_statements::scotia_format::ScotiaStatement;
    ///
    /// let data = "2023-01-05,Coffee Shop,-4.50\n";
    /// let statement = ScotiaStatement::from_read(&mut data.as_bytes(), "SCOTIA-VISA")?;
    /// assert_eq!(statement.transactions[0].debit.to_string(), "4.50");
    /// # Ok::<(), per_statements::Error>(())
    /// ```
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
                    "Scotia row {} has {} columns, expected {}",
                    index + 1,
                    record.len(),
                    COLUMNS
                )));
            }

            let date = parse_date(&record[0], CSV_DATE_FORMATS)?;
            let amount = parse_amount(&record[2])?;
            let (debit, credit) = SignConvention::NegativeIsDebit.split(amount);

            transactions.push(Transaction::new(date, record[1].trim(), debit, credit, source));
        }

        Ok(ScotiaStatement { transactions })
    }

    /// Parse a Scotia export file.
    pub fn from_path(path: impl AsRef<Path>, source: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::from_read(&mut file, source)
    }
}
