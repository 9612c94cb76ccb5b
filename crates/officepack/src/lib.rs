//! # officepack
//!
//! A Rust library for reading and writing Office Open XML documents.
//!
//! Spreadsheets (`.xlsx`) are fully supported. Text documents and
//! presentations are recognised when opened but cannot be loaded yet.
//!
//! ## Example
//!
//! ```rust
//! use officepack::prelude::*;
//! use std::io::Cursor;
//!
//! let mut sheet = Sheet::new("Sheet1");
//! sheet.add_row(&Row::from(vec![Cell::number(42.5)]));
//!
//! let mut spreadsheet = Spreadsheet::new();
//! spreadsheet.workbook_mut().add_sheet(&sheet);
//! spreadsheet.set_cell_text(0, 0, 1, "Hello");
//!
//! let mut document = Document::from_spreadsheet(spreadsheet);
//! let buf = XlsxWriter::write(&mut document, Cursor::new(Vec::new())).unwrap();
//!
//! let document = XlsxReader::read(Cursor::new(buf.into_inner())).unwrap();
//! let spreadsheet = document.spreadsheet().unwrap();
//! assert_eq!(spreadsheet.cell_text(0, 0, 1), Some("Hello"));
//!
//! // Save to file
//! // let mut document = Document::open("input.xlsx").unwrap();
//! // document.save_as("output.xlsx").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use officepack_core::{
    // Address codec
    format_address,
    format_column,
    format_range,
    parse_address,
    parse_column,
    parse_range,
    // Cell types
    Cell,
    CellKind,
    ColumnAttributes,
    ColumnFilter,
    // Main types
    Document,
    DocumentBody,
    DocumentKind,
    // Error types
    Error,
    Expression,
    Freeze,
    FreezeKind,
    PresentationBody,
    RenumberReport,
    Result,
    Row,
    Sheet,
    Spreadsheet,
    StringTable,
    TextBody,
    Workbook,
    // Constants
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use officepack_xlsx::{
    XlsxError, XlsxReadOptions, XlsxReader, XlsxResult, XlsxWriteOptions, XlsxWriter,
};

use std::path::Path;

/// Extension trait for Document to add file I/O
pub trait DocumentExt: Sized {
    /// Open a document from a file
    fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self>;

    /// Save the document back to the path it was opened from or last saved to
    fn save(&mut self) -> XlsxResult<()>;

    /// Save the document to a new path, which becomes its stored path
    fn save_as<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()>;
}

impl DocumentExt for Document {
    fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Document> {
        let path = path.as_ref();
        check_extension(path)?;
        XlsxReader::read_file(path)
    }

    fn save(&mut self) -> XlsxResult<()> {
        let path = match self.path() {
            Some(path) => path.to_path_buf(),
            None => {
                return Err(XlsxError::Core(Error::other(
                    "document has no path, use save_as",
                )))
            }
        };
        self.save_as(path)
    }

    fn save_as<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        check_extension(path)?;
        XlsxWriter::write_file(self, path)
    }
}

/// Extensions `open` and `save_as` accept
const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx"];

fn check_extension(path: &Path) -> XlsxResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(XlsxError::UnsupportedDocumentKind(format!(
            "unsupported file format: {}",
            path.display()
        ))),
    }
}
