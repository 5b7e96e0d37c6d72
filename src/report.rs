//! CSV output for categorized and uncategorized transactions.

use crate::error::Result;
use crate::types::{Partition, Transaction};
use csv::Writer;
use log::info;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub const CATEGORIZED_FILE: &str = "categorized.csv";
pub const UNCATEGORIZED_FILE: &str = "uncategorized.csv";

/// Column order shared by the CSV files and the workbook sheets.
pub const COLUMNS: [&str; 10] = [
    "Date", "Day", "Place", "Debit", "Credit", "Source", "Category", "Year", "Month", "Clean",
];

/// Output row, with the date split out for spreadsheet pivots.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Day")]
    day: u32,
    #[serde(rename = "Place")]
    place: &'a str,
    #[serde(rename = "Debit")]
    debit: Decimal,
    #[serde(rename = "Credit")]
    credit: Decimal,
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Clean")]
    clean: &'a str,
}

impl<'a> From<&'a Transaction> for ReportRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        ReportRow {
            date: tx.date.format("%Y-%m-%d").to_string(),
            day: tx.day(),
            place: &tx.place,
            debit: tx.debit,
            credit: tx.credit,
            source: &tx.source,
            category: &tx.category,
            year: tx.year(),
            month: tx.month(),
            clean: &tx.clean,
        }
    }
}

/// Write transactions as a headered CSV to any destination implementing `Write`.
pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);

    if transactions.is_empty() {
        csv_writer.write_record(COLUMNS)?;
    }
    for transaction in transactions {
        csv_writer.serialize(ReportRow::from(transaction))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write both halves of a partition into `output_dir`, creating it if needed.
pub fn write_partition(output_dir: impl AsRef<Path>, partition: &Partition) -> Result<()> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    info!("Writing {} uncategorized transactions", partition.uncategorized.len());
    write_transactions(File::create(output_dir.join(UNCATEGORIZED_FILE))?, &partition.uncategorized)?;

    info!("Writing {} categorized transactions", partition.categorized.len());
    write_transactions(File::create(output_dir.join(CATEGORIZED_FILE))?, &partition.categorized)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample() -> Transaction {
        let mut tx = Transaction::new(
            NaiveDate::from_ymd_opt(2023, 2, 14).unwrap(),
            "TIM HORTONS #12",
            Decimal::new(250, 2),
            Decimal::ZERO,
            "RBC-VISA",
        );
        tx.category = "Coffee".into();
        tx.clean = "TIM HORTONS".into();
        tx
    }

    #[test]
    fn test_column_order() {
        let mut out = Vec::new();
        write_transactions(&mut out, &[sample()]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Day,Place,Debit,Credit,Source,Category,Year,Month,Clean\n\
             2023-02-14,14,TIM HORTONS #12,2.50,0,RBC-VISA,Coffee,2023,2,TIM HORTONS\n"
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let mut out = Vec::new();
        write_transactions(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Day,Place,Debit,Credit,Source,Category,Year,Month,Clean\n"
        );
    }

    #[test]
    fn test_write_partition_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output");
        let partition = Partition {
            categorized: vec![sample()],
            uncategorized: Vec::new(),
        };

        write_partition(&output, &partition).unwrap();

        let categorized = fs::read_to_string(output.join(CATEGORIZED_FILE)).unwrap();
        assert_eq!(categorized.lines().count(), 2);
        let uncategorized = fs::read_to_string(output.join(UNCATEGORIZED_FILE)).unwrap();
        assert_eq!(uncategorized.lines().count(), 1);
    }
}
