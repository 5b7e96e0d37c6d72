//! Personal statement categorizer.
//!
//! Reads bank and credit card exports from several Canadian institutions,
//! normalizes them into one [`Transaction`] shape, tags each transaction with
//! a spending category and a clean merchant name from user-maintained rule
//! tables, and splits the result into categorized and uncategorized sets.
//!
//! # Supported Exports
//!
//! - **Scotia Visa**: headerless CSV, signed amount
//! - **TD Visa / chequing**: headerless CSV, split debit/credit columns
//! - **RBC Visa**: headered CSV, CAD and USD amount columns
//! - **American Express**: `.xls` summary workbook
//!
//! # Examples
//!
//! ```no_run
//! use per_statements::{aggregator, report, rules, workbook};
//!
//! let categories = rules::load_rules("categories.yml")?;
//! let cleanup = rules::load_rules("place_mappings.yml")?;
//!
//! let partition = aggregator::process_statements("Files", &categories, &cleanup)?;
//! report::write_partition("output", &partition)?;
//! workbook::update_workbook("output/BudgetAndTracking-Q.xlsx", &partition)?;
//! # Ok::<(), per_statements::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod fields;
pub mod scotia_format;
pub mod td_format;
pub mod rbc_format;
pub mod amex_format;
pub mod rules;
pub mod categorizer;
pub mod cleaner;
pub mod aggregator;
pub mod report;
pub mod workbook;

use std::path::Path;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{Partition, Rule, Transaction};

/// Statement exports the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Scotiabank Visa CSV
    ScotiaVisa,
    /// TD Visa CSV
    TdVisa,
    /// TD chequing account CSV
    TdChequing,
    /// American Express summary workbook
    AmericanExpress,
    /// RBC Visa CSV
    RbcVisa,
}

impl Source {
    /// All sources, in the order file names are matched against them.
    pub const ALL: [Source; 5] = [
        Source::ScotiaVisa,
        Source::TdVisa,
        Source::TdChequing,
        Source::AmericanExpress,
        Source::RbcVisa,
    ];

    /// Lowercase fragment identifying this source in a file name.
    pub fn file_pattern(&self) -> &'static str {
        match self {
            Source::ScotiaVisa => "scotia-visa",
            Source::TdVisa => "td-visa",
            Source::TdChequing => "td-cheq",
            Source::AmericanExpress => "american-express",
            Source::RbcVisa => "rbc",
        }
    }

    /// Tag stored in `Transaction::source`.
    pub fn tag(&self) -> &'static str {
        match self {
            Source::ScotiaVisa => "SCOTIA-VISA",
            Source::TdVisa => "TD-VISA",
            Source::TdChequing => "TD-CHEQ",
            Source::AmericanExpress => "AMERICAN-EXPRESS",
            Source::RbcVisa => "RBC-VISA",
        }
    }

    /// Pick the source for a statement by case-insensitive substring match on its file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|source| lower.contains(source.file_pattern()))
    }

    /// Parse a statement file of this source into transactions tagged with [`Source::tag`].
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Transaction>> {
        let tag = self.tag();
        let transactions = match self {
            Source::ScotiaVisa => scotia_format::ScotiaStatement::from_path(path, tag)?.transactions,
            Source::TdVisa | Source::TdChequing => td_format::TdStatement::from_path(path, tag)?.transactions,
            Source::AmericanExpress => amex_format::AmexStatement::from_path(path, tag)?.transactions,
            Source::RbcVisa => rbc_format::RbcStatement::from_path(path, tag)?.transactions,
        };
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_file_name() {
        assert_eq!(Source::from_file_name("Scotia-Visa-2023-01.csv"), Some(Source::ScotiaVisa));
        assert_eq!(Source::from_file_name("td-visa_jan.csv"), Some(Source::TdVisa));
        assert_eq!(Source::from_file_name("TD-CHEQUING.csv"), Some(Source::TdChequing));
        assert_eq!(Source::from_file_name("American-Express-2023.xls"), Some(Source::AmericanExpress));
        assert_eq!(Source::from_file_name("rbc_visa.csv"), Some(Source::RbcVisa));
        assert_eq!(Source::from_file_name("tangerine.csv"), None);
    }

    #[test]
    fn test_source_tags() {
        let tags: Vec<&str> = Source::ALL.iter().map(Source::tag).collect();
        assert_eq!(tags, vec!["SCOTIA-VISA", "TD-VISA", "TD-CHEQ", "AMERICAN-EXPRESS", "RBC-VISA"]);
    }
}
