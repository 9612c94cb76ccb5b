//! Tests for reading cell data into the grid.

use std::io::Cursor;

use crate::{shared_strings, PackageBuilder};
use officepack_core::{Cell, CellKind, Document, Error, Expression};
use officepack_xlsx::{XlsxError, XlsxReader};
use pretty_assertions::assert_eq;

fn read(builder: PackageBuilder) -> Document {
    XlsxReader::read(Cursor::new(builder.build())).expect("Failed to read package")
}

#[test]
fn test_jagged_rows() {
    let document = read(PackageBuilder::spreadsheet().with_sheet_data(
        r#"<row r="1"><c r="A1"><v>1</v></c><c r="B1"><v>2</v></c><c r="C1"><v>3</v></c></row>
           <row r="2"><c r="A2"><v>4</v></c></row>"#,
    ));
    let sheet = document.spreadsheet().unwrap().workbook().sheet(0).unwrap();

    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.column_count(), 3);
    for row in sheet.rows() {
        assert_eq!(row.cell_count(), sheet.column_count());
    }
    assert_eq!(sheet.cell(1, 0), Some(&Cell::Number(4.0)));
    assert_eq!(sheet.cell(1, 2).map(Cell::kind), Some(CellKind::Empty));
}

#[test]
fn test_sparse_cells() {
    let document = read(PackageBuilder::spreadsheet().with_sheet_data(
        r#"<row r="2"><c r="C2"><v>9</v></c></row>"#,
    ));
    let sheet = document.spreadsheet().unwrap().workbook().sheet(0).unwrap();

    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.column_count(), 3);
    assert!(sheet.rows()[0].cells().iter().all(Cell::is_empty));
    assert_eq!(sheet.cell(1, 2), Some(&Cell::Number(9.0)));
}

#[test]
fn test_shared_string_references() {
    let document = read(
        PackageBuilder::spreadsheet()
            .part("xl/sharedStrings.xml", shared_strings(&["Name", "Score", "Ada"]))
            .with_sheet_data(
                r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
                   <row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>97.5</v></c></row>"#,
            ),
    );
    let spreadsheet = document.spreadsheet().unwrap();

    assert_eq!(spreadsheet.strings().len(), 3);
    assert_eq!(spreadsheet.cell_text(0, 0, 0), Some("Name"));
    assert_eq!(spreadsheet.cell_text(0, 0, 1), Some("Score"));
    assert_eq!(spreadsheet.cell_text(0, 1, 0), Some("Ada"));
    assert_eq!(spreadsheet.cell_text(0, 1, 1), None);
    assert_eq!(
        spreadsheet.cell_string_value(0, 1, 1),
        Some("97.5".to_string())
    );
}

#[test]
fn test_inline_strings_follow_shared_strings() {
    let document = read(
        PackageBuilder::spreadsheet()
            .part("xl/sharedStrings.xml", shared_strings(&["first"]))
            .with_sheet_data(
                r#"<row r="1">
                    <c r="A1" t="s"><v>0</v></c>
                    <c r="B1" t="inlineStr"><is><t>second</t></is></c>
                    <c r="C1" t="inlineStr"><is><t>first</t></is></c>
                </row>"#,
            ),
    );
    let spreadsheet = document.spreadsheet().unwrap();
    let sheet = spreadsheet.workbook().sheet(0).unwrap();

    assert_eq!(sheet.cell(0, 1), Some(&Cell::Reference(1)));
    assert_eq!(sheet.cell(0, 2), Some(&Cell::Reference(0)));
    assert_eq!(spreadsheet.cell_text(0, 0, 1), Some("second"));
}

#[test]
fn test_formulas() {
    let document = read(PackageBuilder::spreadsheet().with_sheet_data(
        r#"<row r="1">
            <c r="A1"><v>2</v></c>
            <c r="B1"><f>A1*2</f><v>4</v></c>
            <c r="C1" t="str"><f>"x"&amp;A1</f><v>x2</v></c>
            <c r="D1" t="e"><v>#N/A</v></c>
        </row>"#,
    ));
    let sheet = document.spreadsheet().unwrap().workbook().sheet(0).unwrap();

    assert_eq!(
        sheet.cell(0, 1),
        Some(&Cell::Expression(Expression::new("A1*2", Some("4".into()))))
    );
    assert_eq!(
        sheet.cell(0, 2),
        Some(&Cell::Expression(Expression::new("\"x\"&A1", Some("x2".into()))))
    );
    assert_eq!(
        sheet.cell(0, 3),
        Some(&Cell::Expression(Expression::cached("#N/A")))
    );
}

#[test]
fn test_invalid_cell_address() {
    let bytes = PackageBuilder::spreadsheet()
        .with_sheet_data(r#"<row r="1"><c r="A0"><v>1</v></c></row>"#)
        .build();
    let result = XlsxReader::read(Cursor::new(bytes));
    assert!(matches!(
        result,
        Err(XlsxError::Core(Error::InvalidAddress(_)))
    ));
}

#[test]
fn test_malformed_shared_strings() {
    let bytes = PackageBuilder::spreadsheet()
        .part("xl/sharedStrings.xml", "<sst><si><t>open</si></sst>")
        .build();
    match XlsxReader::read(Cursor::new(bytes)) {
        Err(XlsxError::MalformedPart { part, .. }) => assert_eq!(part, "xl/sharedStrings.xml"),
        other => panic!("Expected MalformedPart, got {other:?}"),
    }
}
