//! Spreadsheet body: a workbook plus its shared string table

use crate::cell::Cell;
use crate::strings::StringTable;
use crate::workbook::Workbook;

/// Outcome of [`Spreadsheet::renumber_strings`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberReport {
    /// Entries in the rebuilt table
    pub entries: usize,
    /// Reference cells whose id was missing from the old table
    pub dangling: usize,
}

/// A workbook together with the shared strings its cells refer to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spreadsheet {
    workbook: Workbook,
    strings: StringTable,
}

impl Spreadsheet {
    /// Create an empty spreadsheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parts
    pub fn from_parts(workbook: Workbook, strings: StringTable) -> Self {
        Self { workbook, strings }
    }

    /// The sheets
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Mutable access to the sheets
    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    /// The shared string table
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Mutable access to the shared string table
    pub fn strings_mut(&mut self) -> &mut StringTable {
        &mut self.strings
    }

    /// Borrow the workbook and the string table mutably at the same time
    pub fn parts_mut(&mut self) -> (&mut Workbook, &mut StringTable) {
        (&mut self.workbook, &mut self.strings)
    }

    /// Text of a reference cell
    pub fn cell_text(&self, sheet: usize, row: usize, col: usize) -> Option<&str> {
        self.workbook
            .sheet(sheet)?
            .cell(row, col)?
            .text(&self.strings)
    }

    /// Display text of any cell, see [`Cell::string_value`]
    pub fn cell_string_value(&self, sheet: usize, row: usize, col: usize) -> Option<String> {
        self.workbook
            .sheet(sheet)?
            .cell(row, col)?
            .string_value(&self.strings)
    }

    /// Store `text` in a cell, growing the sheet as needed.
    ///
    /// Returns `false` if the sheet does not exist.
    pub fn set_cell_text(&mut self, sheet: usize, row: usize, col: usize, text: &str) -> bool {
        let (workbook, strings) = self.parts_mut();
        match workbook.sheet_mut(sheet) {
            Some(sheet) => {
                sheet.cell_create(row, col).set_text(strings, text);
                true
            }
            None => false,
        }
    }

    /// Rebuild the string table from the cells that use it.
    ///
    /// Sheets, rows and cells are walked in order; every reference is
    /// re-pointed into a fresh table, so ids become dense in first-encounter
    /// order, duplicates collapse, and unused entries disappear. A reference
    /// to an id the old table does not have is interned as `""`.
    pub fn renumber_strings(&mut self) -> RenumberReport {
        let mut fresh = StringTable::new();
        let mut dangling = 0;

        for sheet in self.workbook.sheets_mut() {
            for row in sheet.rows_mut() {
                for cell in row.cells_mut() {
                    if let Cell::Reference(id) = cell {
                        let text = match self.strings.get(*id) {
                            Some(text) => text,
                            None => {
                                dangling += 1;
                                ""
                            }
                        };
                        *id = fresh.insert(text);
                    }
                }
            }
        }

        self.strings = fresh;
        RenumberReport {
            entries: self.strings.len(),
            dangling,
        }
    }
}
