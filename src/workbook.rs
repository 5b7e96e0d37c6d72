//! Budget workbook update.
//!
//! The categorized table goes to the `Expenses` sheet and the uncategorized
//! table to the `Uncategorized` sheet of an `.xlsx` workbook, starting at
//! `A1`. Every other sheet in the workbook is kept as it was, so the
//! workbook can hold the user's own budget and pivot sheets.

use crate::error::{Error, Result};
use crate::report::COLUMNS;
use crate::types::{Partition, Transaction};
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub const EXPENSES_SHEET: &str = "Expenses";
pub const UNCATEGORIZED_SHEET: &str = "Uncategorized";

/// Workbook name offered by the destination prompt.
pub const DEFAULT_WORKBOOK: &str = "BudgetAndTracking.xlsx";

/// Write both halves of a partition into the workbook at `path`.
///
/// An existing workbook is opened and saved back in place; a missing one is
/// created with just the two sheets.
pub fn update_workbook(path: impl AsRef<Path>, partition: &Partition) -> Result<()> {
    let path = path.as_ref();
    let mut book = open_or_create(path)?;

    info!("Updating {} sheet with {} rows", EXPENSES_SHEET, partition.categorized.len());
    write_rows(sheet_mut(&mut book, EXPENSES_SHEET)?, &partition.categorized);

    info!("Updating {} sheet with {} rows", UNCATEGORIZED_SHEET, partition.uncategorized.len());
    write_rows(sheet_mut(&mut book, UNCATEGORIZED_SHEET)?, &partition.uncategorized);

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| Error::WorkbookError(format!("{}: {}", path.display(), e)))
}

/// Turn an answer to the destination prompt into a workbook path.
///
/// An empty answer picks [`DEFAULT_WORKBOOK`] and `.xlsx` is appended when
/// missing. A name that does not exist as given is placed in `fallback_dir`.
pub fn resolve_destination(answer: &str, fallback_dir: &Path) -> PathBuf {
    let answer = answer.trim();
    let mut name = if answer.is_empty() {
        DEFAULT_WORKBOOK.to_string()
    } else {
        answer.to_string()
    };
    if !name.ends_with(".xlsx") {
        name.push_str(".xlsx");
    }

    let candidate = PathBuf::from(&name);
    if candidate.exists() {
        candidate
    } else {
        fallback_dir.join(name)
    }
}

fn open_or_create(path: &Path) -> Result<Spreadsheet> {
    if path.exists() {
        return umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| Error::WorkbookError(format!("{}: {}", path.display(), e)));
    }

    info!("Creating workbook {}", path.display());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(umya_spreadsheet::new_file_empty_worksheet())
}

fn sheet_mut<'a>(book: &'a mut Spreadsheet, name: &str) -> Result<&'a mut Worksheet> {
    if book.get_sheet_by_name(name).is_none() {
        book.new_sheet(name)
            .map_err(|e| Error::WorkbookError(format!("cannot add sheet {}: {}", name, e)))?;
    }
    book.get_sheet_by_name_mut(name)
        .ok_or_else(|| Error::WorkbookError(format!("missing sheet {}", name)))
}

/// Header in row 1, one transaction per row below it. Rows left over from a
/// longer earlier table are blanked in the report columns only.
fn write_rows(sheet: &mut Worksheet, transactions: &[Transaction]) {
    let previous_last_row = sheet.get_highest_row();

    for (col, name) in (1u32..).zip(COLUMNS) {
        sheet.get_cell_mut((col, 1)).set_value(name);
    }

    for (row, tx) in (2u32..).zip(transactions) {
        sheet.get_cell_mut((1, row)).set_value(tx.date.format("%Y-%m-%d").to_string());
        sheet.get_cell_mut((2, row)).set_value_number(tx.day());
        sheet.get_cell_mut((3, row)).set_value(tx.place.as_str());
        sheet.get_cell_mut((4, row)).set_value_number(to_number(tx.debit));
        sheet.get_cell_mut((5, row)).set_value_number(to_number(tx.credit));
        sheet.get_cell_mut((6, row)).set_value(tx.source.as_str());
        sheet.get_cell_mut((7, row)).set_value(tx.category.as_str());
        sheet.get_cell_mut((8, row)).set_value_number(tx.year());
        sheet.get_cell_mut((9, row)).set_value_number(tx.month());
        sheet.get_cell_mut((10, row)).set_value(tx.clean.as_str());
    }

    let last_row = transactions.len() as u32 + 1;
    for row in (last_row + 1)..=previous_last_row {
        for col in 1..=COLUMNS.len() as u32 {
            sheet.get_cell_mut((col, row)).set_value("");
        }
    }
}

fn to_number(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}
