//! Column attributes

/// Default column width, in characters
pub const DEFAULT_COLUMN_WIDTH: f64 = 15.0;

/// Width settings for one logical column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnAttributes {
    /// Column width in characters
    pub width: f64,
    /// Let the application fit the width to the content
    pub autowidth: bool,
}

impl ColumnAttributes {
    /// Create column attributes
    pub fn new(width: f64, autowidth: bool) -> Self {
        Self { width, autowidth }
    }
}

impl Default for ColumnAttributes {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_WIDTH, true)
    }
}
