//! Sheet (worksheet) type

use crate::cell::Cell;
use crate::column::ColumnAttributes;
use crate::row::Row;

/// Default row height, in points
pub const DEFAULT_ROW_HEIGHT: f64 = 14.4;

/// Which edge of the sheet is frozen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FreezeKind {
    /// Nothing frozen
    #[default]
    None,
    /// Leading rows stay visible while scrolling vertically
    Top,
    /// Leading columns stay visible while scrolling horizontally
    Left,
}

/// Frozen pane settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Freeze {
    /// Frozen edge
    pub kind: FreezeKind,
    /// Number of frozen rows (top) or columns (left)
    pub count: u32,
}

impl Freeze {
    /// Freeze `count` rows or columns
    pub fn new(kind: FreezeKind, count: u32) -> Self {
        Self { kind, count }
    }

    /// No frozen pane
    pub fn none() -> Self {
        Self::default()
    }

    /// Freeze the first `count` rows
    pub fn top(count: u32) -> Self {
        Self::new(FreezeKind::Top, count)
    }

    /// Freeze the first `count` columns
    pub fn left(count: u32) -> Self {
        Self::new(FreezeKind::Left, count)
    }

    /// Whether this describes an actual frozen pane
    pub fn is_active(&self) -> bool {
        self.kind != FreezeKind::None && self.count > 0
    }
}

/// Auto-filter over a span of columns (0-based, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFilter {
    /// First filtered column
    pub first_column: u32,
    /// Last filtered column
    pub last_column: u32,
}

impl ColumnFilter {
    /// Create a filter; the bounds are swapped if given in reverse
    pub fn new(first_column: u32, last_column: u32) -> Self {
        Self {
            first_column: first_column.min(last_column),
            last_column: first_column.max(last_column),
        }
    }
}

/// A worksheet.
///
/// The grid is always rectangular: every row holds [`Sheet::column_count`]
/// cells, padded with [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    id: u32,
    rel_id: String,
    rows: Vec<Row>,
    width: usize,
    columns: Vec<ColumnAttributes>,
    default_row_height: f64,
    freeze: Freeze,
    filter: Option<ColumnFilter>,
}

impl Sheet {
    /// Create a new empty sheet.
    ///
    /// The id and relationship id are assigned when the sheet is added to a
    /// [`Workbook`](crate::Workbook).
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            id: 0,
            rel_id: String::new(),
            rows: Vec::new(),
            width: 0,
            columns: Vec::new(),
            default_row_height: DEFAULT_ROW_HEIGHT,
            freeze: Freeze::none(),
            filter: None,
        }
    }

    /// Create a sheet from rows, padding them to a rectangle
    pub fn with_rows<S: Into<String>>(name: S, rows: Vec<Row>) -> Self {
        let mut sheet = Self::new(name);
        sheet.rows = rows;
        sheet.materialize();
        sheet
    }

    /// Sheet (tab) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the sheet
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// 1-based sheet id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Set the sheet id
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Relationship id binding the sheet to its part, e.g. `rId4`
    pub fn rel_id(&self) -> &str {
        &self.rel_id
    }

    /// Set the relationship id
    pub fn set_rel_id<S: Into<String>>(&mut self, rel_id: S) {
        self.rel_id = rel_id.into();
    }

    // === Grid ===

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of logical columns.
    ///
    /// Tracked as the grid grows; rows widened through [`Sheet::row_mut`] are
    /// counted after the next [`Sheet::materialize`].
    pub fn column_count(&self) -> usize {
        self.width
    }

    /// Get a row
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Get a mutable row.
    ///
    /// Cells pushed through this handle can make the grid jagged until the
    /// next [`Sheet::materialize`].
    pub fn row_mut(&mut self, row: usize) -> Option<&mut Row> {
        self.rows.get_mut(row)
    }

    /// All rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable iterator over the rows
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.iter_mut()
    }

    /// Append a copy of `row`, pad the grid, and return the row index.
    ///
    /// Only a row wider than the grid makes the earlier rows grow.
    pub fn add_row(&mut self, row: &Row) -> usize {
        let mut row = row.clone();
        self.grow_to(row.cell_count());
        row.pad_to(self.width);
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Get a cell
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cell(col))
    }

    /// Get a mutable cell
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.cell_mut(col))
    }

    /// Grow the grid until `(row, col)` exists and return that cell
    pub fn cell_create(&mut self, row: usize, col: usize) -> &mut Cell {
        self.grow_to(col + 1);
        if self.rows.len() <= row {
            let width = self.width;
            self.rows.resize_with(row + 1, || Row::with_empty_cells(width));
        }
        self.rows[row].cell_create(col)
    }

    /// Recount the columns from the widest row and pad every row to it
    pub fn materialize(&mut self) {
        self.width = self.rows.iter().map(Row::cell_count).max().unwrap_or(0);
        for row in &mut self.rows {
            row.pad_to(self.width);
        }
    }

    fn grow_to(&mut self, width: usize) {
        if width <= self.width {
            return;
        }
        self.width = width;
        for row in &mut self.rows {
            row.pad_to(width);
        }
    }

    // === Layout ===

    /// Default row height in points
    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    /// Set the default row height in points
    pub fn set_default_row_height(&mut self, height: f64) {
        self.default_row_height = height;
    }

    /// Frozen pane settings
    pub fn freeze(&self) -> Freeze {
        self.freeze
    }

    /// Replace the frozen pane settings
    pub fn set_freeze(&mut self, freeze: Freeze) {
        self.freeze = freeze;
    }

    /// Column filter, if any
    pub fn filter(&self) -> Option<ColumnFilter> {
        self.filter
    }

    /// Replace the column filter
    pub fn set_filter(&mut self, filter: ColumnFilter) {
        self.filter = Some(filter);
    }

    /// Remove the column filter
    pub fn remove_filter(&mut self) {
        self.filter = None;
    }

    /// Attributes of a column; defaults when never set
    pub fn column(&self, col: usize) -> ColumnAttributes {
        self.columns.get(col).copied().unwrap_or_default()
    }

    /// Set the attributes of a column, defaulting any columns before it
    pub fn set_column(&mut self, col: usize, attributes: ColumnAttributes) {
        if self.columns.len() <= col {
            self.columns.resize(col + 1, ColumnAttributes::default());
        }
        self.columns[col] = attributes;
    }

    /// Explicit column attributes
    pub fn columns(&self) -> &[ColumnAttributes] {
        &self.columns
    }

    /// Give every logical column an attribute entry
    pub fn ensure_column_defaults(&mut self) {
        let width = self.column_count();
        if self.columns.len() < width {
            self.columns.resize(width, ColumnAttributes::default());
        }
    }
}
