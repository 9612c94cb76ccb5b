//! Row types

use crate::cell::Cell;

/// An ordered sequence of cells.
///
/// Inside a [`Sheet`](crate::Sheet) every row is padded to the sheet's column
/// count, so consumers never see a short row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row holding `count` empty cells
    pub fn with_empty_cells(count: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; count],
        }
    }

    /// Number of cells in the row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get a cell by column index
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Get a mutable cell by column index
    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    /// All cells, in column order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable iterator over the cells
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Append a copy of `cell` and return its column index
    pub fn add_cell(&mut self, cell: &Cell) -> usize {
        self.cells.push(cell.clone());
        self.cells.len() - 1
    }

    /// Pad the row so `col` exists and return that cell
    pub fn cell_create(&mut self, col: usize) -> &mut Cell {
        self.pad_to(col + 1);
        &mut self.cells[col]
    }

    /// Pad with empty cells up to `count`; never shrinks
    pub fn pad_to(&mut self, count: usize) {
        if self.cells.len() < count {
            self.cells.resize(count, Cell::Empty);
        }
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}
