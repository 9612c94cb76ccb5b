//! Prelude module - common imports for officepack users
//!
//! ```rust
//! use officepack::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellKind,
    ColumnAttributes,
    ColumnFilter,
    // Main types
    Document,
    // Extension traits
    DocumentExt,
    DocumentKind,
    // Error types
    Error,
    Expression,
    Freeze,
    FreezeKind,
    Result,
    Row,
    Sheet,
    Spreadsheet,
    StringTable,
    Workbook,
    XlsxError,
    // I/O types
    XlsxReader,
    XlsxWriter,
};
