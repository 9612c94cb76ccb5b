//! XLSX options

use chrono::{DateTime, Utc};
use zip::CompressionMethod;

/// Options for reading XLSX files
#[derive(Debug, Clone)]
pub struct XlsxReadOptions {
    /// Require `docProps/app.xml` to name a known application (default: true).
    ///
    /// When false, a container with an unknown application that still has a
    /// workbook part is read as a spreadsheet.
    pub strict_kind: bool,
}

impl Default for XlsxReadOptions {
    fn default() -> Self {
        Self { strict_kind: true }
    }
}

/// Options for writing XLSX files
#[derive(Debug, Clone)]
pub struct XlsxWriteOptions {
    /// `dc:creator` in the core properties
    pub creator: String,
    /// `cp:lastModifiedBy` in the core properties
    pub last_modified_by: String,
    /// Compression for every archive entry (default: deflate)
    pub compression: CompressionMethod,
    /// Fixed created/modified timestamp; the current time when `None`
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for XlsxWriteOptions {
    fn default() -> Self {
        Self {
            creator: "officepack".into(),
            last_modified_by: "officepack".into(),
            compression: CompressionMethod::Deflated,
            timestamp: None,
        }
    }
}
