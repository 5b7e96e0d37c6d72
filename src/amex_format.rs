//! American Express summary spreadsheet parser.
//!
//! Amex exports an `.xls` workbook whose `Summary` sheet opens with a block of
//! account details and explanatory text. Transactions start after that block
//! in five columns:
//!
//! | Date | Description | (blank) | Card member | Amount |
//!
//! Single-card accounts leave the card member column out, which shifts the
//! amount one column left. Charges are positive, payments and refunds negative.

use crate::error::{Error, Result};
use crate::fields::{parse_amount, parse_date, SignConvention};
use crate::types::Transaction;
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::path::Path;

/// Rows above the transaction table on the summary sheet.
pub const HEADER_ROWS: u32 = 12;

/// Sheet holding the transaction table.
pub const SUMMARY_SHEET: &str = "Summary";

const DATE_FORMATS: &[&str] = &["%d %b %Y"];

static EMPTY_CELL: Data = Data::Empty;

const DATE_COLUMN: u32 = 0;
const PLACE_COLUMN: u32 = 1;
const USER_COLUMN: u32 = 3;
const AMOUNT_COLUMN: u32 = 4;

/// Transactions read from an Amex summary workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct AmexStatement {
    pub transactions: Vec<Transaction>,
}

impl AmexStatement {
    /// Open an Amex workbook (`.xls` or `.xlsx`) and parse its summary sheet.
    pub fn from_path(path: impl AsRef<Path>, source: &str) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .iter()
            .find(|name| name.as_str() == SUMMARY_SHEET)
            .or_else(|| sheet_names.first())
            .cloned()
            .ok_or_else(|| Error::UnexpectedLayout("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;
        Self::from_range(&range, source)
    }

    /// Parse the transaction table out of a summary sheet range.
    ///
    /// Positions are absolute sheet coordinates, so ranges that do not start
    /// at `A1` are handled.
    pub fn from_range(range: &Range<Data>, source: &str) -> Result<Self> {
        let Some((last_row, _)) = range.end() else {
            return Ok(AmexStatement { transactions: Vec::new() });
        };
        let cell = |row: u32, col: u32| range.get_value((row, col)).unwrap_or(&EMPTY_CELL);

        let data_rows: Vec<u32> = (HEADER_ROWS..=last_row)
            .filter(|&row| (DATE_COLUMN..=AMOUNT_COLUMN).any(|col| !is_empty(cell(row, col))))
            .collect();

        let amount_column = if data_rows.iter().all(|&row| is_empty(cell(row, AMOUNT_COLUMN))) {
            USER_COLUMN
        } else {
            AMOUNT_COLUMN
        };

        let mut transactions = Vec::with_capacity(data_rows.len());
        for row in data_rows {
            let date = parse_date_cell(cell(row, DATE_COLUMN))?;
            let place = cell_text(cell(row, PLACE_COLUMN));
            let amount = parse_amount_cell(cell(row, amount_column))?;
            let (debit, credit) = SignConvention::PositiveIsDebit.split(amount);

            transactions.push(Transaction::new(date, place.trim(), debit, credit, source));
        }

        Ok(AmexStatement { transactions })
    }
}

fn is_empty(data: &Data) -> bool {
    match data {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Excel stores dates as days since 1899-12-30.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn parse_date_cell(data: &Data) -> Result<NaiveDate> {
    let serial = match data {
        Data::String(s) => return parse_date(s, DATE_FORMATS),
        Data::DateTimeIso(s) => {
            return parse_date(s.get(..10).unwrap_or(s), &["%Y-%m-%d"]);
        }
        Data::DateTime(dt) => dt.as_f64(),
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        other => return Err(Error::InvalidDate(other.to_string())),
    };
    excel_serial_to_date(serial).ok_or_else(|| Error::InvalidDate(serial.to_string()))
}

fn parse_amount_cell(data: &Data) -> Result<Decimal> {
    match data {
        Data::Empty => Ok(Decimal::ZERO),
        Data::String(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Data::String(s) => parse_amount(s),
        Data::Int(i) => Ok(Decimal::from(*i)),
        Data::Float(f) => Decimal::from_f64(*f).ok_or_else(|| Error::InvalidAmount(f.to_string())),
        other => Err(Error::InvalidAmount(other.to_string())),
    }
}
