//! # officepack-xlsx
//!
//! XLSX (Office Open XML) reader and writer for officepack.
//!
//! Reading checks the package markers, works out the document kind from
//! `docProps/app.xml` and then loads the workbook, shared strings and every
//! worksheet into a [`officepack_core::Document`]. Writing produces a complete
//! package with fixed theme and style parts.

pub mod error;
pub mod options;
pub mod package;
pub mod parts;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use options::{XlsxReadOptions, XlsxWriteOptions};
pub use package::{PackageReader, PackageWriter};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
