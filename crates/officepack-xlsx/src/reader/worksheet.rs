//! `xl/worksheets/sheet{n}.xml`

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{attr_value, decode_excel_escapes, xml_text};
use crate::error::{XlsxError, XlsxResult};
use officepack_core::{
    parse_address, parse_range, Cell, ColumnAttributes, ColumnFilter, Expression, Freeze, Row,
    Sheet, StringTable,
};

/// Parse a worksheet part into a rectangular [`Sheet`].
///
/// Inline strings are interned into `strings`.
pub(crate) fn read_worksheet(
    part: &str,
    bytes: &[u8],
    name: &str,
    strings: &mut StringTable,
) -> XlsxResult<Sheet> {
    let mut xml_reader = Reader::from_reader(bytes);
    let mut parser = WorksheetParser::new(part, strings);
    let mut buf = Vec::new();

    loop {
        match xml_reader
            .read_event_into(&mut buf)
            .map_err(|e| XlsxError::malformed(part, e))?
        {
            Event::Start(e) => parser.start(&e, false)?,
            Event::Empty(e) => {
                parser.start(&e, true)?;
                parser.end(e.local_name().as_ref());
            }
            Event::End(e) => parser.end(e.local_name().as_ref()),
            Event::Text(e) if parser.target != Target::None => {
                let text = xml_text(part, &e)?;
                parser.text(&text);
            }
            Event::CData(e) if parser.target != Target::None => {
                parser.text(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let sheet = parser.finish(name);
    log::debug!(
        "read sheet {:?} from {} ({} rows x {} columns)",
        name,
        part,
        sheet.row_count(),
        sheet.column_count()
    );
    Ok(sheet)
}

/// Where character data currently goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    None,
    Value,
    Formula,
    InlineText,
}

/// A `c` element being read
#[derive(Debug, Default)]
struct PendingCell {
    col: usize,
    address: String,
    cell_type: Option<String>,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

/// A `cols/col` range, 0-based inclusive
#[derive(Debug)]
struct ColumnRange {
    first: usize,
    last: usize,
    attributes: ColumnAttributes,
}

struct WorksheetParser<'a> {
    part: &'a str,
    strings: &'a mut StringTable,
    rows: Vec<Row>,
    row: Option<Row>,
    first_span: Option<usize>,
    seen_row: bool,
    cell: Option<PendingCell>,
    target: Target,
    in_inline: bool,
    in_phonetic: bool,
    freeze: Freeze,
    default_row_height: Option<f64>,
    columns: Vec<ColumnRange>,
    filter: Option<ColumnFilter>,
}

impl<'a> WorksheetParser<'a> {
    fn new(part: &'a str, strings: &'a mut StringTable) -> Self {
        Self {
            part,
            strings,
            rows: Vec::new(),
            row: None,
            first_span: None,
            seen_row: false,
            cell: None,
            target: Target::None,
            in_inline: false,
            in_phonetic: false,
            freeze: Freeze::none(),
            default_row_height: None,
            columns: Vec::new(),
            filter: None,
        }
    }

    fn start(&mut self, e: &BytesStart, empty: bool) -> XlsxResult<()> {
        match e.local_name().as_ref() {
            b"row" => self.start_row(e),
            b"c" => self.start_cell(e)?,
            b"v" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.value = Some(String::new());
                    if !empty {
                        self.target = Target::Value;
                    }
                }
            }
            b"f" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.formula = Some(String::new());
                    if !empty {
                        self.target = Target::Formula;
                    }
                }
            }
            b"is" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.inline = Some(String::new());
                    self.in_inline = !empty;
                }
            }
            b"rPh" => self.in_phonetic = !empty,
            b"t" if self.in_inline && !self.in_phonetic && !empty => {
                self.target = Target::InlineText;
            }
            b"pane" => self.read_pane(e),
            b"sheetFormatPr" => {
                self.default_row_height =
                    attr_value(e, b"defaultRowHeight").and_then(|v| v.trim().parse().ok());
            }
            b"col" => self.read_col(e),
            b"autoFilter" => {
                if let Some(range) = attr_value(e, b"ref") {
                    let ((_, first), (_, last)) = parse_range(&range)?;
                    self.filter = Some(ColumnFilter::new(first, last));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"row" => {
                if let Some(row) = self.row.take() {
                    self.rows.push(row);
                }
            }
            b"c" => self.end_cell(),
            b"v" | b"f" | b"t" => self.target = Target::None,
            b"is" => self.in_inline = false,
            b"rPh" => self.in_phonetic = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let Some(cell) = self.cell.as_mut() else {
            return;
        };
        let slot = match self.target {
            Target::None => return,
            Target::Value => &mut cell.value,
            Target::Formula => &mut cell.formula,
            Target::InlineText => &mut cell.inline,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn start_row(&mut self, e: &BytesStart) {
        let index = attr_value(e, b"r")
            .and_then(|r| r.trim().parse::<usize>().ok())
            .and_then(|r| r.checked_sub(1));

        match index {
            // rows the file skipped become empty rows
            Some(index) if index > self.rows.len() => {
                self.rows.resize_with(index, Row::new);
            }
            Some(index) if index < self.rows.len() => {
                log::warn!(
                    "{}: row {} is out of order, appending it as row {}",
                    self.part,
                    index + 1,
                    self.rows.len() + 1
                );
            }
            _ => {}
        }

        if !self.seen_row {
            self.seen_row = true;
            self.first_span = attr_value(e, b"spans").and_then(|spans| span_end(&spans));
        }
        self.row = Some(Row::new());
    }

    fn start_cell(&mut self, e: &BytesStart) -> XlsxResult<()> {
        let Some(row) = self.row.as_ref() else {
            log::warn!("{}: cell outside of a row ignored", self.part);
            return Ok(());
        };

        let (col, address) = match attr_value(e, b"r") {
            Some(address) => {
                let (_, col) = parse_address(&address)?;
                (col as usize, address)
            }
            None => (row.cell_count(), String::new()),
        };

        self.cell = Some(PendingCell {
            col,
            address,
            cell_type: attr_value(e, b"t"),
            ..PendingCell::default()
        });
        Ok(())
    }

    fn end_cell(&mut self) {
        self.target = Target::None;
        self.in_inline = false;
        let Some(pending) = self.cell.take() else {
            return;
        };
        let col = pending.col;
        let cell = decode_cell(self.part, pending, self.strings);
        if let Some(row) = self.row.as_mut() {
            // skipped positions are padded with empty cells
            *row.cell_create(col) = cell;
        }
    }

    fn read_pane(&mut self, e: &BytesStart) {
        let frozen = matches!(
            attr_value(e, b"state").as_deref(),
            Some("frozen") | Some("frozenSplit")
        );
        if !frozen {
            return;
        }

        let split = |name: &[u8]| {
            attr_value(e, name)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map(|v| v as u32)
                .filter(|&v| v > 0)
        };

        self.freeze = match (split(b"ySplit"), split(b"xSplit")) {
            (Some(rows), cols) => {
                if cols.is_some() {
                    log::warn!("{}: frozen columns dropped, keeping frozen rows", self.part);
                }
                Freeze::top(rows)
            }
            (None, Some(cols)) => Freeze::left(cols),
            (None, None) => Freeze::none(),
        };
    }

    fn read_col(&mut self, e: &BytesStart) {
        let bound = |name: &[u8]| {
            attr_value(e, name)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .and_then(|v| v.checked_sub(1))
        };
        let (Some(first), Some(last)) = (bound(b"min"), bound(b"max")) else {
            log::warn!("{}: col without min/max ignored", self.part);
            return;
        };

        let defaults = ColumnAttributes::default();
        let width = attr_value(e, b"width")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(defaults.width);
        let autowidth = attr_value(e, b"bestFit").map_or(false, |v| is_true(&v));

        self.columns.push(ColumnRange {
            first,
            last,
            attributes: ColumnAttributes::new(width, autowidth),
        });
    }

    fn finish(mut self, name: &str) -> Sheet {
        if let Some(row) = self.row.take() {
            self.rows.push(row);
        }

        let widest = self.rows.iter().map(Row::cell_count).max().unwrap_or(0);
        let width = widest.max(self.first_span.unwrap_or(0));
        for row in &mut self.rows {
            row.pad_to(width);
        }

        let mut sheet = Sheet::with_rows(name, self.rows);
        sheet.set_freeze(self.freeze);
        if let Some(height) = self.default_row_height {
            sheet.set_default_row_height(height);
        }
        for range in &self.columns {
            // ranges commonly run to the last possible column
            for col in range.first..=range.last.min(width.saturating_sub(1)) {
                sheet.set_column(col, range.attributes);
            }
        }
        if let Some(filter) = self.filter {
            sheet.set_filter(filter);
        }
        sheet
    }
}

/// Build a cell from what a `c` element carried
fn decode_cell(part: &str, pending: PendingCell, strings: &mut StringTable) -> Cell {
    let PendingCell {
        address,
        cell_type,
        value,
        formula,
        inline,
        ..
    } = pending;

    if let Some(formula) = formula {
        // shared formula followers carry an empty <f/>
        let formula = Some(formula)
            .filter(|f| !f.is_empty())
            .map(|f| decode_excel_escapes(&f));
        let value = value.map(|v| decode_excel_escapes(&v));
        return Cell::expression(Expression::from_parts(formula, value));
    }

    match cell_type.as_deref() {
        None | Some("n") => match value {
            Some(v) => match v.trim().parse::<f64>() {
                Ok(n) => Cell::number(n),
                Err(_) => {
                    log::warn!("{}: {} has unparseable number {:?}", part, address, v);
                    Cell::Empty
                }
            },
            None => Cell::Empty,
        },
        Some("s") => match value.as_deref().map(|v| v.trim().parse::<u32>()) {
            Some(Ok(id)) => Cell::reference(id),
            _ => {
                log::warn!("{}: {} has no valid shared string id", part, address);
                Cell::Empty
            }
        },
        Some("e") | Some("str") => {
            let value = value.map(|v| decode_excel_escapes(&v));
            Cell::expression(Expression::from_parts(None, value))
        }
        Some("b") => Cell::number(if value.as_deref().map(str::trim) == Some("1") {
            1.0
        } else {
            0.0
        }),
        Some("inlineStr") => {
            let text = decode_excel_escapes(&inline.unwrap_or_default());
            Cell::reference(strings.insert(text))
        }
        Some(other) => {
            log::warn!("{}: {} has unsupported type {:?}", part, address, other);
            Cell::Empty
        }
    }
}

/// Last column covered by a row's `spans` attribute, e.g. `"1:5"` gives 5
fn span_end(spans: &str) -> Option<usize> {
    spans
        .split_whitespace()
        .last()?
        .rsplit(':')
        .next()?
        .parse()
        .ok()
}

fn is_true(value: &str) -> bool {
    matches!(value.trim(), "1" | "true")
}
