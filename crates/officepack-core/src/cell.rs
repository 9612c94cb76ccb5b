//! Cell types

use crate::strings::StringTable;

/// The kind of payload a [`Cell`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// No payload
    Empty,
    /// Id into the shared string table
    Reference,
    /// Formula and/or cached value
    Expression,
    /// Numeric value
    Number,
}

/// A formula with an optional cached value.
///
/// Formulas are stored verbatim and never evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    formula: Option<String>,
    value: Option<String>,
}

impl Expression {
    /// Create an expression from a formula and an optional cached value
    pub fn new<F: Into<String>>(formula: F, value: Option<String>) -> Self {
        Self {
            formula: Some(formula.into()),
            value,
        }
    }

    /// Create an expression from optional parts
    pub fn from_parts(formula: Option<String>, value: Option<String>) -> Self {
        Self { formula, value }
    }

    /// Create an expression that only carries a cached value
    pub fn cached<V: Into<String>>(value: V) -> Self {
        Self {
            formula: None,
            value: Some(value.into()),
        }
    }

    /// Formula text, without a leading `=`
    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }

    /// Replace the formula text
    pub fn set_formula<F: Into<String>>(&mut self, formula: Option<F>) {
        self.formula = formula.map(Into::into);
    }

    /// Cached value text
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the cached value text
    pub fn set_value<V: Into<String>>(&mut self, value: Option<V>) {
        self.value = value.map(Into::into);
    }
}

/// A single cell.
///
/// Retyping a cell assigns a new variant, which drops whatever the previous
/// variant owned.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    /// Empty cell, the default produced when a grid is materialized
    #[default]
    Empty,
    /// Shared string id; the text lives in the [`StringTable`]
    Reference(u32),
    /// Formula and cached value
    Expression(Expression),
    /// Numeric value
    Number(f64),
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Cell::Empty
    }

    /// Create a number cell
    pub fn number(value: f64) -> Self {
        Cell::Number(value)
    }

    /// Create a shared string reference cell
    pub fn reference(id: u32) -> Self {
        Cell::Reference(id)
    }

    /// Create an expression cell
    pub fn expression(expression: Expression) -> Self {
        Cell::Expression(expression)
    }

    /// Get the kind of this cell
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Reference(_) => CellKind::Reference,
            Cell::Expression(_) => CellKind::Expression,
            Cell::Number(_) => CellKind::Number,
        }
    }

    /// Change the kind of this cell.
    ///
    /// A cell that already has the requested kind is left untouched; any other
    /// cell gets a fresh default payload (id 0, `0.0`, or an empty expression).
    pub fn set_kind(&mut self, kind: CellKind) {
        if self.kind() == kind {
            return;
        }
        *self = match kind {
            CellKind::Empty => Cell::Empty,
            CellKind::Reference => Cell::Reference(0),
            CellKind::Expression => Cell::Expression(Expression::default()),
            CellKind::Number => Cell::Number(0.0),
        };
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Reset the cell to [`Cell::Empty`]
    pub fn clear(&mut self) {
        *self = Cell::Empty;
    }

    /// Shared string id, or 0 for any other kind
    pub fn reference_id(&self) -> u32 {
        match self {
            Cell::Reference(id) => *id,
            _ => 0,
        }
    }

    /// Point a reference cell at another shared string.
    ///
    /// Does nothing unless the cell is already a reference.
    pub fn set_reference_id(&mut self, id: u32) {
        if let Cell::Reference(current) = self {
            *current = id;
        }
    }

    /// Numeric value, or `0.0` for any other kind
    pub fn number_value(&self) -> f64 {
        match self {
            Cell::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Turn this cell into a number
    pub fn set_number(&mut self, value: f64) {
        *self = Cell::Number(value);
    }

    /// Borrow the expression payload
    pub fn expression_ref(&self) -> Option<&Expression> {
        match self {
            Cell::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// Mutably borrow the expression payload
    pub fn expression_mut(&mut self) -> Option<&mut Expression> {
        match self {
            Cell::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// Turn this cell into an expression
    pub fn set_expression(&mut self, expression: Expression) {
        *self = Cell::Expression(expression);
    }

    /// Text of a reference cell
    pub fn text<'a>(&self, strings: &'a StringTable) -> Option<&'a str> {
        match self {
            Cell::Reference(id) => strings.get(*id),
            _ => None,
        }
    }

    /// Turn this cell into a reference to `text`, interning it first
    pub fn set_text(&mut self, strings: &mut StringTable, text: &str) {
        *self = Cell::Reference(strings.insert(text));
    }

    /// Display text of the cell.
    ///
    /// References resolve through `strings` (an unknown id gives `""`),
    /// expressions prefer the cached value over the formula, numbers use their
    /// shortest round-trip form. Empty cells have no display text.
    pub fn string_value(&self, strings: &StringTable) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Reference(id) => Some(strings.get(*id).unwrap_or_default().to_string()),
            Cell::Expression(expr) => Some(
                expr.value()
                    .or_else(|| expr.formula())
                    .unwrap_or_default()
                    .to_string(),
            ),
            Cell::Number(n) => Some(n.to_string()),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<Expression> for Cell {
    fn from(expression: Expression) -> Self {
        Cell::Expression(expression)
    }
}
