//! Error types for the per_statements library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading statements and rule tables.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing CSV.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error reading a spreadsheet export.
    #[error("Spreadsheet error: {0}")]
    ExcelError(String),

    /// Error reading or saving the budget workbook.
    #[error("Workbook error: {0}")]
    WorkbookError(String),

    /// Error reading a YAML rule file.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Unparseable date.
    #[error("Unparseable date: {0}")]
    InvalidDate(String),

    /// Unparseable amount.
    #[error("Unparseable amount: {0}")]
    InvalidAmount(String),

    /// The export does not have the columns its format expects.
    #[error("Unexpected column layout: {0}")]
    UnexpectedLayout(String),

    /// Rule file is not a mapping of label to a list of patterns.
    #[error("Invalid rule file: {0}")]
    InvalidRules(String),

    /// A statement file failed to parse.
    #[error("Failed to parse {}: {source}", path.display())]
    Statement {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the path of the statement file that produced this error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::Statement {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::ExcelError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_error_names_file() {
        let err = Error::InvalidAmount("abc".into()).in_file("Files/scotia-visa.csv");
        let message = err.to_string();
        assert!(message.contains("Files/scotia-visa.csv"));
        assert!(message.contains("Unparseable amount: abc"));
    }
}
