//! # officepack-core
//!
//! In-memory model for office documents.
//!
//! This crate provides the types shared by the file format crates:
//! - [`Document`] - a document of some [`DocumentKind`] with a matching body
//! - [`Spreadsheet`] - a [`Workbook`] plus the [`StringTable`] its cells refer to
//! - [`Sheet`], [`Row`], [`Cell`] - the rectangular grid of a worksheet
//! - [`parse_address`] / [`format_address`] - A1-style cell reference codec
//!
//! ## Example
//!
//! ```rust
//! use officepack_core::{Cell, Row, Sheet, Spreadsheet};
//!
//! let mut spreadsheet = Spreadsheet::new();
//!
//! let mut row = Row::new();
//! row.add_cell(&Cell::number(42.5));
//!
//! let mut sheet = Sheet::new("Sheet1");
//! sheet.add_row(&row);
//! spreadsheet.workbook_mut().add_sheet(&sheet);
//!
//! // Text goes through the shared string table
//! spreadsheet.set_cell_text(0, 0, 1, "Hello");
//!
//! let sheet = spreadsheet.workbook().sheet(0).unwrap();
//! assert_eq!(sheet.column_count(), 2);
//! assert_eq!(spreadsheet.cell_text(0, 0, 1), Some("Hello"));
//! ```

pub mod address;
pub mod cell;
pub mod column;
pub mod document;
pub mod error;
pub mod row;
pub mod sheet;
pub mod spreadsheet;
pub mod strings;
pub mod workbook;

// Re-exports for convenience
pub use address::{
    format_address, format_column, format_range, parse_address, parse_column, parse_range,
};
pub use cell::{Cell, CellKind, Expression};
pub use column::ColumnAttributes;
pub use document::{Document, DocumentBody, DocumentKind, PresentationBody, TextBody};
pub use error::{Error, Result};
pub use row::Row;
pub use sheet::{ColumnFilter, Freeze, FreezeKind, Sheet};
pub use spreadsheet::{RenumberReport, Spreadsheet};
pub use strings::StringTable;
pub use workbook::Workbook;

/// Maximum sheet name length
pub const MAX_SHEET_NAME_LEN: usize = 31;
