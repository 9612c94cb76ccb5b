//! Workbook type

use crate::error::{Error, Result};
use crate::sheet::Sheet;

/// Relationship ids `rId1`..`rId3` are taken by the theme, styles and shared
/// strings parts; sheets start after them.
pub const FIRST_SHEET_REL_ID: usize = 4;

/// An ordered collection of sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get a sheet by position
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a mutable sheet by position
    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// Get a sheet by position, failing when out of range
    pub fn try_sheet(&self, index: usize) -> Result<&Sheet> {
        self.sheets
            .get(index)
            .ok_or(Error::SheetOutOfBounds(index, self.sheets.len()))
    }

    /// Find a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Index of the sheet with this name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name() == name)
    }

    /// All sheets in order
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Mutable iterator over the sheets
    pub fn sheets_mut(&mut self) -> impl Iterator<Item = &mut Sheet> {
        self.sheets.iter_mut()
    }

    /// Append a copy of `sheet` and return its position.
    ///
    /// The copy gets id `position + 1` and relationship id
    /// `rId{position + 4}`, replacing whatever `sheet` carried.
    pub fn add_sheet(&mut self, sheet: &Sheet) -> usize {
        let index = self.sheets.len();
        let mut copy = sheet.clone();
        copy.set_id(index as u32 + 1);
        copy.set_rel_id(sheet_rel_id(index));
        self.sheets.push(copy);
        index
    }

    /// Push a sheet exactly as given, keeping its ids. Used by readers.
    pub fn push_sheet(&mut self, sheet: Sheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }
}

/// Relationship id of the sheet at `index`
pub fn sheet_rel_id(index: usize) -> String {
    format!("rId{}", index + FIRST_SHEET_REL_ID)
}
