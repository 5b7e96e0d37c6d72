//! Statement directory processing.
//!
//! Every file in the source directory whose name identifies a supported
//! export is parsed; the combined transactions are deduplicated, categorized,
//! cleaned and split by whether a category was found.

use crate::categorizer::categorize;
use crate::cleaner::clean;
use crate::error::Result;
use crate::types::{Partition, Rule, Transaction};
use crate::Source;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Run the whole pipeline over a directory of statement exports.
pub fn process_statements(
    source_dir: impl AsRef<Path>,
    category_rules: &[Rule],
    cleanup_rules: &[Rule],
) -> Result<Partition> {
    let transactions = read_statements(source_dir)?;
    let transactions = deduplicate(transactions);

    info!("Categorizing {} transactions", transactions.len());
    let transactions = categorize(transactions, category_rules);
    info!("Cleaning");
    let transactions = clean(transactions, cleanup_rules);

    info!("Splitting categorized and uncategorized");
    Ok(partition(transactions))
}

/// Parse every recognised statement in `source_dir`, in file name order.
///
/// Files that match no known export are skipped with a warning. A file that
/// fails to parse aborts the run with an error naming it.
pub fn read_statements(source_dir: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let mut entries = fs::read_dir(source_dir.as_ref())?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut transactions = Vec::new();
    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();

        let Some(source) = Source::from_file_name(&file_name) else {
            warn!("Skipping unrecognized file: {}", file_name);
            continue;
        };

        let parsed = source.parse_file(&path).map_err(|err| err.in_file(&path))?;
        info!("Parsed: {} ({} rows as {})", file_name, parsed.len(), source.tag());
        transactions.extend(parsed);
    }

    Ok(transactions)
}

/// Drop exact duplicates, keeping the first occurrence of each.
pub fn deduplicate(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let before = transactions.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<Transaction> = transactions
        .into_iter()
        .filter(|tx| seen.insert(tx.clone()))
        .collect();
    debug!("Removed {} duplicate transactions", before - unique.len());
    unique
}

/// Split transactions on whether a category was assigned.
///
/// Categorized transactions keep their order; uncategorized ones are sorted
/// newest first.
pub fn partition(transactions: Vec<Transaction>) -> Partition {
    let (categorized, mut uncategorized): (Vec<_>, Vec<_>) =
        transactions.into_iter().partition(Transaction::is_categorized);
    uncategorized.sort_by(|a, b| b.date.cmp(&a.date));

    Partition {
        categorized,
        uncategorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    fn tx(day: u32, place: &str, category: &str) -> Transaction {
        let mut tx = Transaction::new(
            NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            place,
            Decimal::new(500, 2),
            Decimal::ZERO,
            "TD-VISA",
        );
        tx.category = category.to_string();
        tx
    }

    fn statement_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_partition_by_category() {
        let part = partition(vec![
            tx(3, "A", "Food"),
            tx(1, "B", ""),
            tx(9, "C", "Coffee"),
            tx(5, "D", ""),
            tx(7, "E", ""),
        ]);

        let categorized: Vec<&str> = part.categorized.iter().map(|t| t.place.as_str()).collect();
        let uncategorized: Vec<&str> = part.uncategorized.iter().map(|t| t.place.as_str()).collect();
        assert_eq!(categorized, vec!["A", "C"]);
        assert_eq!(uncategorized, vec!["E", "D", "B"]);
        assert_eq!(part.len(), 5);
    }

    #[test]
    fn test_deduplicate_keeps_first() {
        let out = deduplicate(vec![tx(1, "A", ""), tx(2, "B", ""), tx(1, "A", ""), tx(1, "A", "x")]);
        assert_eq!(out, vec![tx(1, "A", ""), tx(2, "B", ""), tx(1, "A", "x")]);
    }

    #[test]
    fn test_scotia_scenario() {
        let dir = statement_dir(&[("scotia-visa-jan.csv", "2023-01-05,Coffee Shop,4.50\n")]);
        let txs = read_statements(dir.path()).unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].debit, Decimal::ZERO);
        assert_eq!(txs[0].credit, Decimal::new(450, 2));
        assert_eq!(txs[0].source, "SCOTIA-VISA");
        assert_eq!(txs[0].category, "");
    }

    #[test]
    fn test_unrecognized_files_skipped() {
        let dir = statement_dir(&[
            ("notes.txt", "not a statement"),
            ("TD-VISA-2023.csv", "01/03/2023,TIM HORTONS,2.19,,100.00\n"),
        ]);
        fs::create_dir(dir.path().join("rbc-archive")).unwrap();

        let txs = read_statements(dir.path()).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].source, "TD-VISA");
    }

    #[test]
    fn test_overlapping_files_collapse() {
        let row = "01/03/2023,TIM HORTONS,2.19,,100.00\n";
        let dir = statement_dir(&[
            ("td-cheq-jan.csv", row),
            ("td-cheq-jan-feb.csv", "01/03/2023,TIM HORTONS,2.19,,100.00\n02/01/2023,RENT,1500.00,,0.00\n"),
        ]);

        let part = process_statements(dir.path(), &[], &[]).unwrap();
        assert_eq!(part.categorized.len(), 0);
        assert_eq!(part.uncategorized.len(), 2);
        assert_eq!(part.uncategorized[0].place, "RENT");
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = statement_dir(&[("scotia-visa.csv", "2023-01-05,Coffee Shop,abc\n")]);
        let err = read_statements(dir.path()).unwrap_err();
        match err {
            Error::Statement { path, source } => {
                assert!(path.ends_with("scotia-visa.csv"));
                assert!(matches!(*source, Error::InvalidAmount(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_full_pipeline() {
        let dir = statement_dir(&[
            (
                "scotia-visa.csv",
                "2023-01-05,SHOPPERS DRUG MART,-85.00\n2023-01-06,AMZN Mktp CA,-20.00\n2023-01-08,MYSTERY SHOP,-3.00\n",
            ),
            (
                "rbc.csv",
                "Account Type,Account Number,Transaction Date,Cheque Number,Description 1,Description 2,CAD$,USD$\n\
                 Visa,1,1/7/2023,,TIM HORTONS #12,,-2.50,\n\
                 Visa,1,1/9/2023,,CORNER STORE,,-4.00,\n",
            ),
        ]);
        let categories = vec![Rule::new("amzn", "Shopping"), Rule::new("tim hortons", "Coffee")];
        let cleanup = vec![Rule::new("amzn mktp", "AMAZON")];

        let part = process_statements(dir.path(), &categories, &cleanup).unwrap();

        // rbc.csv sorts before scotia-visa.csv
        let categorized: Vec<(&str, &str, &str)> = part
            .categorized
            .iter()
            .map(|t| (t.place.as_str(), t.category.as_str(), t.clean.as_str()))
            .collect();
        assert_eq!(
            categorized,
            vec![
                ("TIM HORTONS #12", "Coffee", "TIM HORTONS"),
                ("SHOPPERS DRUG MART", "BUS PASS", ""),
                ("AMZN Mktp CA", "Shopping", "AMAZON"),
            ]
        );

        let uncategorized: Vec<&str> = part.uncategorized.iter().map(|t| t.place.as_str()).collect();
        assert_eq!(uncategorized, vec!["CORNER STORE", "MYSTERY SHOP"]);
    }
}
